use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seqvar_io::compare::{compare, coordinate_key, ByteSpan};

// Short spans over a small alphabet, so that equal and prefix-related
// pairs are frequent.
fn random_spans(rng: &mut StdRng, n: usize) -> Vec<Vec<u8>> {
    let mut spans: Vec<Vec<u8>> = (0..n)
        .map(|_| {
            let len = rng.gen_range(0..5);
            (0..len).map(|_| rng.gen_range(b'a'..b'd')).collect()
        })
        .collect();
    spans.push(vec![]);
    spans.push(vec![0]);
    spans.push(vec![255, 255]);
    spans
}

#[test]
fn strict_total_order() {
    let mut rng = StdRng::seed_from_u64(42);
    let spans = random_spans(&mut rng, 60);
    for a in &spans {
        assert_eq!(compare(a, a), Ordering::Equal);
        for b in &spans {
            let ab = compare(a, b);
            // antisymmetry
            assert_eq!(ab, compare(b, a).reverse());
            assert_eq!(ab == Ordering::Equal, a == b);
            // agrees with the standard library order of slices
            assert_eq!(ab, a.as_slice().cmp(b.as_slice()));
            for c in &spans {
                if ab == Ordering::Less && compare(b, c) == Ordering::Less {
                    assert_eq!(compare(a, c), Ordering::Less, "{:?} {:?} {:?}", a, b, c);
                }
            }
        }
    }
}

#[test]
fn prefix_sorts_first() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let a: Vec<u8> = (0..rng.gen_range(0..20)).map(|_| rng.gen()).collect();
        let mut b = a.clone();
        b.push(rng.gen());
        assert_eq!(compare(&a, &b), Ordering::Less);
        assert!(ByteSpan::new(&a) < ByteSpan::new(&b));
    }
}

#[test]
fn sort_spans() {
    let mut rng = StdRng::seed_from_u64(1);
    let spans = random_spans(&mut rng, 200);
    let mut sorted: Vec<_> = spans.iter().map(|s| ByteSpan::new(s)).collect();
    sorted.sort();
    for w in sorted.windows(2) {
        assert_ne!(compare(&w[0], &w[1]), Ordering::Greater);
    }
    sorted.dedup();
    let mut unique = spans.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(sorted.len(), unique.len());
}

#[test]
fn coordinate_order() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let p1: u64 = rng.gen();
        let p2: u64 = rng.gen();
        let chrom = if rng.gen() { &b"chr1"[..] } else { &b"chr2"[..] };
        assert_eq!(
            compare(&coordinate_key(chrom, p1), &coordinate_key(chrom, p2)),
            p1.cmp(&p2)
        );
    }
    assert_eq!(
        compare(&coordinate_key(b"chr1", u64::MAX), &coordinate_key(b"chr1A", 0)),
        Ordering::Less
    );
}
