use std::io;

use super::{Header, Record};

const COLUMNS: &[u8] = b"#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO";

/// Writes the meta-information lines and the column header line.
pub fn write_header<W>(mut writer: W, header: &Header) -> io::Result<()>
where
    W: io::Write,
{
    for line in header.meta() {
        writer.write_all(b"##")?;
        writer.write_all(line.key().as_bytes())?;
        writer.write_all(b"=")?;
        writer.write_all(line.value().as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.write_all(COLUMNS)?;
    if header.has_format_column() {
        writer.write_all(b"\tFORMAT")?;
        for sample in header.samples() {
            writer.write_all(b"\t")?;
            writer.write_all(sample.as_bytes())?;
        }
    }
    writer.write_all(b"\n")
}

/// Writes a record as tab-delimited line. Empty columns are replaced by the
/// missing value (`.`).
pub fn write_record<W, R>(mut writer: W, record: &R) -> io::Result<()>
where
    W: io::Write,
    R: Record + ?Sized,
{
    write_column(&mut writer, record.chrom())?;
    writer.write_all(b"\t")?;
    let mut pos = itoa::Buffer::new();
    writer.write_all(pos.format(record.pos()).as_bytes())?;
    for col in &[
        record.id(),
        record.ref_allele(),
        record.alt(),
        record.qual_bytes(),
        record.filter(),
        record.info(),
    ] {
        writer.write_all(b"\t")?;
        write_column(&mut writer, col)?;
    }
    if let Some(format) = record.format() {
        writer.write_all(b"\t")?;
        write_column(&mut writer, format)?;
        for i in 0..record.num_samples() {
            writer.write_all(b"\t")?;
            write_column(&mut writer, record.sample_bytes(i).unwrap_or_default())?;
        }
    }
    writer.write_all(b"\n")
}

#[inline]
fn write_column<W: io::Write>(mut writer: W, value: &[u8]) -> io::Result<()> {
    if value.is_empty() {
        writer.write_all(b".")
    } else {
        writer.write_all(value)
    }
}
