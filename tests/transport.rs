#[macro_use]
extern crate matches;

mod common;

use std::io::{Read, Write};

use flate2::write::GzEncoder;
use flate2::Compression;
use seqvar_io::prelude::*;
use seqvar_io::transport::{Sink, Source, GZIP_MAGIC};
use seqvar_io::{fasta, vcf, ErrorKind, TransportError};

const FASTA: &[u8] = b">s1 a\nACGT\nAC\n>s2\nGG\n";

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(vec![], Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn fasta_records<R: Read>(reader: fasta::Reader<R>) -> Vec<fasta::OwnedRecord> {
    reader.into_records().map(|r| r.unwrap()).collect()
}

#[test]
fn compressed_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.fasta.gz");

    let mut writer = fasta::WriterBuilder::new().to_path(&path).unwrap();
    let mut reader = fasta::Reader::new(FASTA).unwrap();
    while let Some(rec) = reader.next() {
        writer.write(&rec.unwrap()).unwrap();
    }
    writer.close().unwrap();

    let mut raw = vec![];
    std::fs::File::open(&path).unwrap().read_to_end(&mut raw).unwrap();
    assert!(raw.starts_with(&GZIP_MAGIC));

    let reader = fasta::Reader::from_path(&path).unwrap();
    assert!(reader.is_compressed());
    assert_eq!(fasta_records(reader), fasta_records(fasta::Reader::new(FASTA).unwrap()));
}

#[test]
fn compressed_flag() {
    // compression forced for a writer
    let mut writer = fasta::WriterBuilder::new()
        .compressed(true)
        .to_writer(vec![])
        .unwrap();
    writer.write_parts(b"id", None, Some(&b"ACGT"[..])).unwrap();
    let data = writer.finish().unwrap();
    assert!(data.starts_with(&GZIP_MAGIC));

    // autodetection can be turned off
    let reader = fasta::ReaderBuilder::new()
        .autodetect(false)
        .from_reader(&data[..])
        .unwrap();
    assert!(!reader.is_compressed());

    // and compression forced
    let reader = fasta::ReaderBuilder::new()
        .compressed(true)
        .from_reader(&data[..])
        .unwrap();
    assert!(reader.is_compressed());
    assert_eq!(fasta_records(reader), vec![fasta::OwnedRecord::new("id", "ACGT")]);
}

#[test]
fn compressed_chunks() {
    let data = gzip(FASTA);
    let expected = fasta_records(fasta::Reader::new(FASTA).unwrap());
    for cap in 3..40 {
        let reader = fasta::ReaderBuilder::new()
            .capacity(cap)
            .from_reader(common::OneByteReader(&data[..]))
            .unwrap();
        assert_eq!(fasta_records(reader), expected, "capacity {}", cap);
    }
}

#[test]
fn compressed_empty_input() {
    let mut reader = fasta::ReaderBuilder::new()
        .compressed(true)
        .from_reader(&b""[..])
        .unwrap();
    assert!(reader.next().is_none());

    let mut reader = vcf::ReaderBuilder::new()
        .compressed(true)
        .from_reader(&b""[..])
        .unwrap();
    assert!(reader.next().is_none());
    assert_eq!(reader.header().samples().len(), 0);
}

#[test]
fn concatenated_members() {
    let mut data = gzip(b">a\nAC\n");
    data.extend(gzip(b">b\nGT\n"));
    let records = fasta_records(fasta::Reader::new(&data[..]).unwrap());
    assert_eq!(records.len(), 2);
}

#[test]
fn corrupt_stream() {
    let mut data = gzip(FASTA);
    let n = data.len();
    data.truncate(n - 10);
    let mut reader = fasta::Reader::new(&data[..]).unwrap();
    let err = loop {
        match reader.next() {
            Some(Ok(_)) => {}
            Some(Err(e)) => break e,
            None => panic!("truncated gzip stream not detected"),
        }
    };
    assert_matches!(
        err.kind(),
        ErrorKind::Transport(TransportError::MalformedCompressedStream(_))
    );
    assert!(reader.next().is_none());
}

#[test]
fn not_found() {
    let err = fasta::Reader::from_path("/nonexistent/file.fasta").err().unwrap();
    assert_matches!(err.kind(), ErrorKind::Transport(TransportError::NotFound { .. }));

    let err = vcf::ReaderBuilder::new()
        .from_source(Source::from_path("/nonexistent/calls.vcf"))
        .err()
        .unwrap();
    assert_matches!(err.kind(), ErrorKind::Transport(TransportError::NotFound { .. }));
}

#[test]
fn sources() {
    let reader = fasta::ReaderBuilder::new()
        .from_source(Source::Bytes(gzip(FASTA)))
        .unwrap();
    assert!(reader.is_compressed());
    assert_eq!(fasta_records_boxed(reader).len(), 2);

    let reader = fasta::ReaderBuilder::new()
        .from_source(Source::from_reader(std::io::Cursor::new(FASTA.to_vec())))
        .unwrap();
    assert_eq!(fasta_records_boxed(reader).len(), 2);
}

fn fasta_records_boxed(reader: fasta::Reader<Box<dyn Read + Send>>) -> Vec<fasta::OwnedRecord> {
    reader.into_records().map(|r| r.unwrap()).collect()
}

#[test]
fn vcf_sink() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calls.vcf.bgz");
    let header = vcf::HeaderBuilder::new().sample("s").build();
    let mut writer = vcf::WriterBuilder::new()
        .header(header.clone())
        .to_sink(Sink::from_path(&path))
        .unwrap();
    let rec = vcf::OwnedRecord {
        chrom: b"1".to_vec(),
        pos: 7,
        ref_allele: b"A".to_vec(),
        format: Some(b"GT".to_vec()),
        samples: vec![b"0/1".to_vec()],
        ..Default::default()
    };
    writer.write_record(&rec).unwrap();
    writer.close_sink().unwrap();

    let mut reader = vcf::Reader::from_path(&path).unwrap();
    assert!(reader.is_compressed());
    assert_eq!(reader.header(), &header);
    let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].pos, 7);
    assert_eq!(records[0].samples, rec.samples);
}

#[test]
fn uncompressed_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.fasta");
    let mut writer = fasta::WriterBuilder::new().line_width(2).to_path(&path).unwrap();
    writer.write(&fasta::OwnedRecord::new("x", "ACG")).unwrap();
    drop(writer);
    assert_eq!(std::fs::read(&path).unwrap(), b">x\nAC\nG\n");
}

#[test]
fn seek_compressed() {
    let mut reader = fasta::Reader::new(std::io::Cursor::new(gzip(FASTA))).unwrap();
    reader.next().unwrap().unwrap();
    let pos = reader.position().unwrap().clone();
    let err = reader.seek(&pos).unwrap_err();
    assert_matches!(err.kind(), ErrorKind::Configuration(_));
}
