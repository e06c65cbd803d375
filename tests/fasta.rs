#[macro_use]
extern crate matches;
#[macro_use]
extern crate lazy_static;

#[macro_use]
mod common;

use seqvar_io::fasta::{self, OwnedRecord, Reader, ReaderBuilder, WriterBuilder};
use seqvar_io::policy::DoubleUntilLimited;
use seqvar_io::prelude::*;
use seqvar_io::core::State;
use seqvar_io::{ErrorKind, Malformed, Position};

const FASTA: &[u8] = b"
>id desc\r
ACCGTAGGCT
CCGTAGGCTG\r
\r
GTAGG
>id2
ATTGTT\r

GGGG
>id3

>id4
ACGT";

struct Expected {
    id: &'static str,
    desc: Option<&'static str>,
    seq: &'static [u8],
    seq_lines: Vec<&'static [u8]>,
    pos: Position,
}

fn pos(line: u64, byte: u64, record: u64) -> Position {
    Position::new()
        .set_line(line)
        .set_byte(byte)
        .set_record(record)
        .clone()
}

lazy_static! {
    static ref EXPECTED: Vec<Expected> = vec![
        Expected {
            id: "id",
            desc: Some("desc"),
            seq: b"ACCGTAGGCTCCGTAGGCTGGTAGG",
            seq_lines: vec![&b"ACCGTAGGCT"[..], &b"CCGTAGGCTG"[..], &b"GTAGG"[..]],
            pos: pos(1, 1, 0),
        },
        Expected {
            id: "id2",
            desc: None,
            seq: b"ATTGTTGGGG",
            seq_lines: vec![&b"ATTGTT"[..], &b"GGGG"[..]],
            pos: pos(6, 42, 1),
        },
        Expected {
            id: "id3",
            desc: None,
            seq: b"",
            seq_lines: vec![],
            pos: pos(10, 61, 2),
        },
        Expected {
            id: "id4",
            desc: None,
            seq: b"ACGT",
            seq_lines: vec![&b"ACGT"[..]],
            pos: pos(12, 67, 3),
        },
    ];
}

#[test]
fn reader() {
    test_reader!(ReaderBuilder, FASTA, reader, {
        for exp in EXPECTED.iter() {
            {
                let record = reader.next().unwrap().unwrap();
                assert_eq!(record.id(), Ok(exp.id), "id mismatch");
                assert_eq!(record.desc(), exp.desc.map(Ok), "description mismatch");
                assert_eq!(&record.seq()[..], exp.seq, "sequence mismatch");
                assert_eq!(record.seq_lines().collect::<Vec<_>>(), exp.seq_lines);
                assert_eq!(record.to_owned_record().seq, exp.seq);
            }
            validate_position!(reader.position().unwrap(), exp.pos);
        }
        assert!(reader.next().is_none());
        assert_eq!(reader.state(), State::Exhausted);
    });
}

#[test]
fn empty() {
    test_reader!(ReaderBuilder, &b""[..], reader, {
        assert!(reader.next().is_none());
    });
    test_reader!(ReaderBuilder, &b"\n\r\n\n"[..], reader, {
        assert!(reader.next().is_none());
    });
}

#[test]
fn two_records_scenario() {
    let input = b">s1\nACGT\n>s2\nGG\n";
    let records: Vec<_> = Reader::new(&input[..])
        .unwrap()
        .into_records()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        records,
        vec![OwnedRecord::new("s1", "ACGT"), OwnedRecord::new("s2", "GG")]
    );

    let mut writer = fasta::Writer::new(vec![]);
    for rec in &records {
        writer.write(rec).unwrap();
    }
    assert_eq!(writer.finish().unwrap(), &input[..]);
}

#[test]
fn round_trip() {
    let mut reader = Reader::new(FASTA).unwrap();
    let mut writer = WriterBuilder::new().line_width(7).to_writer(vec![]).unwrap();
    while let Some(rec) = reader.next() {
        writer.write(&rec.unwrap()).unwrap();
    }
    let output = writer.finish().unwrap();

    let first: Vec<_> = Reader::new(FASTA).unwrap().records().map(|r| r.unwrap()).collect();
    let second: Vec<_> = Reader::new(&output[..])
        .unwrap()
        .records()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn write_unchanged() {
    let input = b">a x\nAC\r\nGT\n\n>b\nT\n";
    let mut reader = Reader::new(&input[..]).unwrap();
    let mut out = vec![];
    while let Some(rec) = reader.next() {
        rec.unwrap().write_unchanged(&mut out).unwrap();
    }
    assert_eq!(&out[..], &input[..]);
}

#[test]
fn invalid_start() {
    test_reader!(ReaderBuilder, &b"\r\nid\nATGC\n"[..], reader, {
        let err = reader.next().unwrap().unwrap_err();
        assert_matches!(err.malformed(), Some(Malformed::InvalidStart { expected: b'>', found: b'i' }));
        let err_pos = err.position().unwrap();
        validate_position!(err_pos.record_position(), pos(1, 2, 0));
        assert!(err_pos.record_id().is_none());
        assert!(reader.next().is_none());
        assert_eq!(reader.state(), State::Failed);
    });
}

#[test]
fn missing_sequence() {
    test_reader!(ReaderBuilder, &b">id1\n>id2\nACGT\n>id3\n>id4\nA"[..], reader, {
        let err = reader.next().unwrap().unwrap_err();
        assert_matches!(err.malformed(), Some(Malformed::MissingSequence));
        let err_pos = err.position().unwrap();
        assert_eq!(err_pos.record_id(), Some("id1"));
        validate_position!(err_pos.record_position(), pos(0, 0, 0));
        assert_eq!(reader.next().unwrap().unwrap().id(), Ok("id2"));
        let err = reader.next().unwrap().unwrap_err();
        assert_eq!(err.position().unwrap().record_id(), Some("id3"));
        assert_eq!(err.position().unwrap().record_position().record(), 2);
        assert_eq!(reader.next().unwrap().unwrap().id(), Ok("id4"));
        validate_position!(reader.position().unwrap(), pos(4, 20, 3));
        assert!(reader.next().is_none());
    });
}

#[test]
fn truncated() {
    // header line without line terminator
    test_reader!(ReaderBuilder, &b">id1\nAC\n>id2"[..], reader, {
        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert_matches!(
            err.kind(),
            ErrorKind::MalformedRecord {
                reason: Malformed::UnexpectedEnd,
                ..
            }
        );
        assert_eq!(err.position().unwrap().record_id(), Some("id2"));
        assert!(reader.next().is_none());
    });
    // header line at the end
    test_reader!(ReaderBuilder, &b">id1\nAC\n>id2\n"[..], reader, {
        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert_matches!(err.malformed(), Some(Malformed::UnexpectedEnd));
        assert!(reader.next().is_none());
    });
}

#[test]
fn policy() {
    let p = DoubleUntilLimited::new(2, 5);
    let mut reader = ReaderBuilder::new()
        .capacity(3)
        .policy(p)
        .from_reader(&b">id\nAT\nGC\n"[..])
        .unwrap();
    let err = reader.next().unwrap().unwrap_err();
    assert_matches!(err.kind(), ErrorKind::BufferLimit);
    assert_eq!(reader.state(), State::Failed);
    assert!(reader.next().is_none());
}

#[test]
fn invalid_capacity() {
    let res = ReaderBuilder::new().capacity(2).from_reader(FASTA);
    assert_matches!(res.err().unwrap().kind(), ErrorKind::Configuration(_));
}

#[test]
fn io_error() {
    let input = common::FailingReader {
        inner: FASTA,
        remaining: 30,
    };
    let mut reader = ReaderBuilder::new().capacity(16).from_reader(input).unwrap();
    let err = loop {
        match reader.next() {
            Some(Ok(_)) => {}
            Some(Err(e)) => break e,
            None => panic!("no error"),
        }
    };
    assert_matches!(err.kind(), ErrorKind::Transport(_));
    assert!(reader.next().is_none());
}

#[test]
fn record_source() {
    fn count<S: RecordSource>(source: &mut S) -> usize {
        let mut n = 0;
        while let Some(rec) = source.next_record() {
            rec.unwrap();
            n += 1;
        }
        n
    }
    let mut reader = Reader::new(FASTA).unwrap();
    assert_eq!(count(&mut reader), 4);
    assert_eq!(reader.reader_state(), State::Exhausted);
    assert_eq!(reader.record_position().unwrap().record(), 3);
}

#[test]
fn seek() {
    for cap in 3..100 {
        let mut reader = ReaderBuilder::new()
            .capacity(cap)
            .from_reader(std::io::Cursor::new(FASTA))
            .unwrap();
        while let Some(rec) = reader.next() {
            rec.unwrap();
        }
        assert_eq!(reader.state(), State::Exhausted);
        for exp in EXPECTED.iter().rev() {
            reader.seek(&exp.pos).unwrap();
            assert_eq!(reader.state(), State::HeaderRead);
            assert!(reader.position().is_none());
            {
                let record = reader.next().unwrap().unwrap();
                assert_eq!(record.id(), Ok(exp.id), "id mismatch at capacity {}", cap);
                assert_eq!(&record.seq()[..], exp.seq);
            }
            validate_position!(reader.position().unwrap(), exp.pos);
        }
        // records following the seek position are numbered on from there
        reader.seek(&EXPECTED[2].pos).unwrap();
        reader.next().unwrap().unwrap();
        let id = reader.next().unwrap().unwrap().id().unwrap().to_string();
        assert_eq!(id, "id4");
        validate_position!(reader.position().unwrap(), EXPECTED[3].pos);
        assert!(reader.next().is_none());
    }
}

#[test]
fn seek_before_reading() {
    let mut reader = Reader::new(std::io::Cursor::new(FASTA)).unwrap();
    reader.seek(&EXPECTED[1].pos).unwrap();
    assert_eq!(reader.next().unwrap().unwrap().id(), Ok("id2"));
}
