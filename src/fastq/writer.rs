use std::fs::File;
use std::io;
use std::path::Path;

use super::{write_parts, Record};
use crate::core::{create_path, open_sink, CoreWriter, WriterState};
use crate::error::{Error, Malformed, Result};
use crate::transport::Sink;

/// FASTQ writer
///
/// The separator line is always written as a single `+`.
///
/// ```
/// use seqvar_io::fastq::{Reader, Writer};
///
/// let input = b"@s1\nACGT\n+\nIIII\n";
/// let mut reader = Reader::new(&input[..]).unwrap();
/// let mut writer = Writer::new(vec![]);
/// while let Some(record) = reader.next() {
///     writer.write(&record.unwrap()).unwrap();
/// }
/// assert_eq!(writer.finish().unwrap(), input);
/// ```
pub struct Writer<W: io::Write> {
    inner: CoreWriter<W>,
}

impl<W: io::Write> Writer<W> {
    /// Creates a writer for uncompressed output
    pub fn new(writer: W) -> Self {
        Writer {
            inner: CoreWriter::new(writer, false),
        }
    }

    /// Writes a record (`RefRecord` or `OwnedRecord`). Records with
    /// sequence and quality of different length are rejected.
    pub fn write<R: Record>(&mut self, record: &R) -> Result<()> {
        check_lengths(record.seq().len(), record.qual().len())?;
        self.inner.write_record_with(false, |out| record.write(out))
    }

    /// Writes a record given its parts. Sequence and quality may be split
    /// into several slices, which are joined.
    pub fn write_parts<'a, S, Q>(
        &mut self,
        id: &[u8],
        desc: Option<&[u8]>,
        seq: S,
        qual: Q,
    ) -> Result<()>
    where
        S: IntoIterator<Item = &'a [u8]>,
        Q: IntoIterator<Item = &'a [u8]>,
    {
        let seq: Vec<_> = seq.into_iter().collect();
        let qual: Vec<_> = qual.into_iter().collect();
        check_lengths(
            seq.iter().map(|s| s.len()).sum(),
            qual.iter().map(|q| q.len()).sum(),
        )?;
        self.inner
            .write_record_with(false, |out| write_parts(out, id, desc, seq, qual))
    }

    #[inline]
    pub fn state(&self) -> WriterState {
        self.inner.state()
    }

    #[inline]
    pub fn records_written(&self) -> u64 {
        self.inner.records_written()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }

    /// Flushes the output, finishes compression and returns the underlying
    /// writer.
    pub fn finish(self) -> Result<W> {
        self.inner.finish()
    }

    pub fn close(self) -> Result<()> {
        self.finish().map(|_| ())
    }
}

fn check_lengths(seq: usize, qual: usize) -> Result<()> {
    if seq != qual {
        return Err(Error::config(format!(
            "cannot write FASTQ record: {}",
            Malformed::UnequalLengths { seq, qual }
        )));
    }
    Ok(())
}

/// Configures and opens a FASTQ [`Writer`](Writer).
///
/// ```no_run
/// use seqvar_io::fastq::WriterBuilder;
///
/// // compressed, since the path ends with '.gz'
/// let mut writer = WriterBuilder::new().to_path("reads.fastq.gz").unwrap();
/// writer.write_parts(b"id", None, Some(&b"ACGT"[..]), Some(&b"IIII"[..])).unwrap();
/// writer.close().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct WriterBuilder {
    compressed: Option<bool>,
}

impl WriterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compress the output with gzip. If not set, output is compressed
    /// only when writing to a path ending with `.gz` or `.bgz`.
    pub fn compressed(mut self, compressed: bool) -> Self {
        self.compressed = Some(compressed);
        self
    }

    pub fn to_writer<W: io::Write>(self, writer: W) -> Result<Writer<W>> {
        let compressed = self.compressed.unwrap_or(false);
        Ok(Writer {
            inner: CoreWriter::new(writer, compressed),
        })
    }

    pub fn to_path<P: AsRef<Path>>(self, path: P) -> Result<Writer<File>> {
        let inner = create_path(path.as_ref(), self.compressed)?;
        Ok(Writer { inner })
    }

    pub fn to_sink(self, sink: Sink) -> Result<Writer<Box<dyn io::Write + Send>>> {
        let inner = open_sink(sink, self.compressed)?;
        Ok(Writer { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fastq::OwnedRecord;

    #[test]
    fn parts() {
        let mut writer = WriterBuilder::new().to_writer(vec![]).unwrap();
        writer.write(&OwnedRecord::new("id", "ACG", "III")).unwrap();
        writer
            .write_parts(b"id2", Some(b"d"), vec![&b"AC"[..], &b"G"[..]], Some(&b"JJJ"[..]))
            .unwrap();
        assert_eq!(writer.records_written(), 2);
        assert_eq!(
            writer.finish().unwrap(),
            b"@id\nACG\n+\nIII\n@id2 d\nACG\n+\nJJJ\n"
        );
    }

    #[test]
    fn unequal_lengths() {
        let mut writer = Writer::new(vec![]);
        let err = writer.write(&OwnedRecord::new("id", "ACG", "II")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Configuration(_)));
        assert_eq!(writer.records_written(), 0);
        assert_eq!(writer.finish().unwrap(), b"");
    }
}
