use std::fs::File;
use std::io;
use std::path::Path;

use super::{write_header, write_record, Header, Record};
use crate::core::{create_path, open_sink, CoreWriter, WriterState};
use crate::error::Result;
use crate::transport::Sink;

/// VCF writer
///
/// The header has to be written before any record, and only once.
///
/// ```
/// use seqvar_io::vcf::{HeaderBuilder, OwnedRecord, Writer};
///
/// let header = HeaderBuilder::new().build();
/// let mut writer = Writer::new(vec![]);
/// writer.write_header(&header).unwrap();
///
/// let record = OwnedRecord {
///     chrom: b"1".to_vec(),
///     pos: 100,
///     ref_allele: b"A".to_vec(),
///     alt: b"G".to_vec(),
///     ..Default::default()
/// };
/// writer.write(&record).unwrap();
///
/// let output = writer.finish().unwrap();
/// assert!(output.ends_with(b"INFO\n1\t100\t.\tA\tG\t.\t.\t.\n"));
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

    /// Writes the header. Fails with an ordering error if a header or a
    /// record was already written.
    pub fn write_header(&mut self, header: &Header) -> Result<()> {
        self.inner.write_header_with(|out| write_header(out, header))
    }

    /// Writes a record (`RefRecord` or `OwnedRecord`). Fails with an
    /// ordering error if no header was written.
    pub fn write<R: Record>(&mut self, record: &R) -> Result<()> {
        self.inner.write_record_with(true, |out| write_record(out, record))
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

/// Configures and opens a VCF [`Writer`](Writer).
///
/// If a header is supplied, it is written immediately.
///
/// ```no_run
/// use seqvar_io::vcf::{HeaderBuilder, WriterBuilder};
///
/// let header = HeaderBuilder::new().sample("NA001").build();
/// let writer = WriterBuilder::new()
///     .header(header)
///     .to_path("calls.vcf.gz")
///     .unwrap();
/// writer.close().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct WriterBuilder {
    header: Option<Header>,
    compressed: Option<bool>,
}

impl WriterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, header: Header) -> Self {
        self.header = Some(header);
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
        let inner = create_path(path.as_ref(), self.compressed)?;
        self.build(inner)
    }

    pub fn to_sink(self, sink: Sink) -> Result<Writer<Box<dyn io::Write + Send>>> {
        let inner = open_sink(sink, self.compressed)?;
        self.build(inner)
    }

    fn build<W: io::Write>(self, inner: CoreWriter<W>) -> Result<Writer<W>> {
        let mut writer = Writer { inner };
        if let Some(header) = self.header {
            writer.write_header(&header)?;
        }
        Ok(writer)
    }
}
