use std::fs::File;
use std::io;
use std::path::Path;

use super::{write_id_desc, write_seq_iter, Record};
use crate::core::{create_path, open_sink, CoreWriter, WriterState};
use crate::error::{Error, Result};
use crate::transport::Sink;

/// FASTA writer
///
/// Sequences are written to a single line, unless a line width is set
/// with [`WriterBuilder::line_width`](WriterBuilder::line_width).
///
/// ```
/// use seqvar_io::fasta::{Reader, Writer};
///
/// let input = b">s1\nACGT\n>s2\nGG\n";
/// let mut reader = Reader::new(&input[..]).unwrap();
/// let mut writer = Writer::new(vec![]);
/// while let Some(record) = reader.next() {
///     writer.write(&record.unwrap()).unwrap();
/// }
/// assert_eq!(writer.finish().unwrap(), input);
/// ```
pub struct Writer<W: io::Write> {
    inner: CoreWriter<W>,
    line_width: Option<usize>,
}

impl<W: io::Write> Writer<W> {
    /// Creates a writer for uncompressed output without line wrapping
    pub fn new(writer: W) -> Self {
        Writer {
            inner: CoreWriter::new(writer, false),
            line_width: None,
        }
    }

    /// Writes a record (`RefRecord` or `OwnedRecord`)
    pub fn write<R: Record>(&mut self, record: &R) -> Result<()> {
        let line_width = self.line_width;
        self.inner.write_record_with(false, |out| match line_width {
            Some(w) => record.write_wrap(out, w),
            None => record.write(out),
        })
    }

    /// Writes a record given its parts. The sequence may be split into
    /// several slices, which are joined.
    pub fn write_parts<'a, S>(&mut self, id: &[u8], desc: Option<&[u8]>, seq: S) -> Result<()>
    where
        S: IntoIterator<Item = &'a [u8]>,
    {
        let line_width = self.line_width;
        self.inner.write_record_with(false, |out| {
            write_id_desc(&mut *out, id, desc)?;
            match line_width {
                Some(w) => super::write_wrap_seq_iter(out, seq, w),
                None => write_seq_iter(out, seq),
            }
        })
    }

    #[inline]
    pub fn state(&self) -> WriterState {
        self.inner.state()
    }

    #[inline]
    pub fn records_written(&self) -> u64 {
        self.inner.records_written()
    }

    #[inline]
    pub fn line_width(&self) -> Option<usize> {
        self.line_width
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }

    /// Flushes the output, finishes compression and returns the underlying
    /// writer.
    pub fn finish(self) -> Result<W> {
        self.inner.finish()
    }

    /// Like [`finish()`](Writer::finish), but drops the underlying writer.
    pub fn close(self) -> Result<()> {
        self.finish().map(|_| ())
    }
}

/// Configures and opens a FASTA [`Writer`](Writer).
///
/// ```no_run
/// use seqvar_io::fasta::WriterBuilder;
///
/// // compressed, since the path ends with '.gz'
/// let mut writer = WriterBuilder::new()
///     .line_width(60)
///     .to_path("out.fasta.gz")
///     .unwrap();
/// writer.write_parts(b"id", None, Some(&b"ACGT"[..])).unwrap();
/// writer.close().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct WriterBuilder {
    line_width: Option<usize>,
    compressed: Option<bool>,
}

impl WriterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap sequences to lines of at most `width` characters. A width of
    /// 0 is rejected with a configuration error when opening the writer.
    pub fn line_width(mut self, width: usize) -> Self {
        self.line_width = Some(width);
        self
    }

    /// Compress the output with gzip. If not set, output is compressed
    /// only when writing to a path ending with `.gz` or `.bgz`.
    pub fn compressed(mut self, compressed: bool) -> Self {
        self.compressed = Some(compressed);
        self
    }

    pub fn to_writer<W: io::Write>(self, writer: W) -> Result<Writer<W>> {
        let compressed = self.compressed.unwrap_or(false);
        self.build(CoreWriter::new(writer, compressed))
    }

    pub fn to_path<P: AsRef<Path>>(self, path: P) -> Result<Writer<File>> {
        self.check()?;
        let inner = create_path(path.as_ref(), self.compressed)?;
        self.build(inner)
    }

    pub fn to_sink(self, sink: Sink) -> Result<Writer<Box<dyn io::Write + Send>>> {
        self.check()?;
        let inner = open_sink(sink, self.compressed)?;
        self.build(inner)
    }

    fn check(&self) -> Result<()> {
        if self.line_width == Some(0) {
            return Err(Error::config("FASTA line width must be greater than 0"));
        }
        Ok(())
    }

    fn build<W: io::Write>(self, inner: CoreWriter<W>) -> Result<Writer<W>> {
        self.check()?;
        Ok(Writer {
            inner,
            line_width: self.line_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fasta::OwnedRecord;

    #[test]
    fn wrap() {
        let mut writer = WriterBuilder::new().line_width(3).to_writer(vec![]).unwrap();
        writer.write(&OwnedRecord::new(&b"id"[..], &b"ACGTA"[..])).unwrap();
        writer.write_parts(b"id2", Some(b"d"), vec![&b"AC"[..], &b"G"[..]]).unwrap();
        assert_eq!(writer.records_written(), 2);
        assert_eq!(writer.finish().unwrap(), b">id\nACG\nTA\n>id2 d\nACG\n");
    }

    #[test]
    fn zero_width() {
        let err = WriterBuilder::new().line_width(0).to_writer(vec![]).err().unwrap();
        assert!(matches!(err.kind(), ErrorKind::Configuration(_)));
    }
}
