#![allow(unused_variables)]

#[macro_use]
extern crate criterion;

use criterion::{Criterion, Throughput};
use seqvar_io::fasta::{self, Record};
use std::iter::repeat;

/// number of records for all benchmarks
const N: usize = 10_000;

/// generates 'nrecords' FASTA records with given properties
fn gen_fasta(nrecords: usize, id_len: usize, desc_len: usize, seq_len: usize, wrap: Option<usize>) -> Vec<u8> {
    let mut rec: Vec<u8> = vec![b'>'];
    rec.extend(repeat(b'i').take(id_len));
    rec.push(b' ');
    rec.extend(repeat(b'd').take(desc_len));
    rec.push(b'\n');
    let seq: Vec<_> = repeat(b'A').take(seq_len).collect();
    for line in seq.chunks(wrap.unwrap_or(seq_len)) {
        rec.extend(line);
        rec.push(b'\n');
    }
    (0..nrecords).flat_map(|_| rec.clone()).collect()
}

macro_rules! bench {
    ($group:expr, $name:expr, $input:expr, $data:ident, $code:block) => {
        let input = $input;
        $group.throughput(Throughput::Bytes(input.len() as u64));
        $group.bench_function($name, |b| {
            b.iter(|| {
                let $data = input.as_slice();
                $code
            })
        });
    };
}

fn readers(c: &mut Criterion) {
    let mut group = c.benchmark_group("fasta");

    for &(seqlen, wrap) in &[(500, None), (500, Some(60)), (10_000, Some(60))] {
        let label = match wrap {
            Some(w) => format!("{} wrap {}", seqlen, w),
            None => format!("{}", seqlen),
        };

        bench!(group, format!("ref {}", label), gen_fasta(N, 20, 50, seqlen, wrap), data, {
            let mut reader = fasta::Reader::new(data).unwrap();
            while let Some(r) = reader.next() {
                let rec = r.unwrap();
                criterion::black_box(rec.seq_lines().count());
            }
        });

        bench!(group, format!("seq {}", label), gen_fasta(N, 20, 50, seqlen, wrap), data, {
            let mut reader = fasta::Reader::new(data).unwrap();
            while let Some(r) = reader.next() {
                let rec = r.unwrap();
                criterion::black_box(rec.seq().len());
            }
        });

        bench!(group, format!("owned {}", label), gen_fasta(N, 20, 50, seqlen, wrap), data, {
            for rec in fasta::Reader::new(data).unwrap().into_records() {
                criterion::black_box(rec.unwrap());
            }
        });

        bench!(group, format!("write {}", label), gen_fasta(N, 20, 50, seqlen, wrap), data, {
            let mut reader = fasta::Reader::new(data).unwrap();
            let mut writer = fasta::WriterBuilder::new()
                .line_width(80)
                .to_writer(Vec::with_capacity(data.len()))
                .unwrap();
            while let Some(r) = reader.next() {
                writer.write(&r.unwrap()).unwrap();
            }
            criterion::black_box(writer.finish().unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, readers);
criterion_main!(benches);
