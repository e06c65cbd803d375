use std::fs::File;
use std::io;
use std::path::Path;

use super::{Header, RefRecord, VcfParser};
use crate::core::{ChunkedBuffer, CoreReader, State};
use crate::error::{Position, Result};
use crate::policy::{BufPolicy, StdPolicy};
use log::debug;

/// VCF parser
///
/// The header is parsed when the reader is created.
///
/// ```
/// use seqvar_io::vcf::{Reader, Record};
///
/// let vcf = b"##fileformat=VCFv4.3
/// #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
/// 1\t100\trs1\tA\tG\t30\tPASS\tDP=5
/// ";
/// let mut reader = Reader::new(&vcf[..]).unwrap();
/// assert_eq!(reader.header().fileformat(), Some("VCFv4.3"));
///
/// let record = reader.next().unwrap().unwrap();
/// assert_eq!(record.chrom(), b"1");
/// assert_eq!(record.pos(), 100);
/// assert_eq!(record.info_value(b"DP"), Some(&b"5"[..]));
/// assert!(reader.next().is_none());
/// ```
pub struct Reader<R, P = StdPolicy>
where
    R: io::Read,
    P: BufPolicy,
{
    inner: CoreReader<R, VcfParser, P>,
    header: Header,
}

impl<R> Reader<R>
where
    R: io::Read,
{
    /// Creates a new reader with the default buffer size of 64 KiB and
    /// parses the header. Gzip compressed input is recognized
    /// automatically.
    #[inline]
    pub fn new(reader: R) -> Result<Self> {
        ReaderBuilder::new().from_reader(reader)
    }

    /// Creates a new reader with a given buffer capacity. The minimum allowed
    /// capacity is 3.
    #[inline]
    pub fn with_capacity(reader: R, capacity: usize) -> Result<Self> {
        ReaderBuilder::new().capacity(capacity).from_reader(reader)
    }
}

impl Reader<File> {
    #[inline]
    pub fn from_path<F: AsRef<Path>>(path: F) -> Result<Self> {
        ReaderBuilder::new().from_path(path)
    }
}

impl<R, P> Reader<R, P>
where
    R: io::Read,
    P: BufPolicy,
{
    pub(crate) fn from_buffer(buffer: ChunkedBuffer<R, P>) -> Result<Self> {
        let mut inner = CoreReader::new(buffer, VcfParser::default());
        let header = inner.read_header()?.unwrap_or_default();
        Ok(Reader { inner, header })
    }

    /// The parsed header. Input without header lines results in an empty
    /// header without samples.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Searches the next record and returns a [`RefRecord`](RefRecord)
    /// that borrows its data from the underlying buffer of this reader.
    ///
    /// Records with invalid column count or position are reported as error,
    /// after which iteration continues with the next line. I/O errors and
    /// exceeded buffer limits end the iteration.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Result<RefRecord>> {
        try_opt!(self.inner.next_record()?);
        Some(Ok(RefRecord {
            buffer: self.inner.window(),
            fields: self.inner.positions(),
            header: &self.header,
        }))
    }

    /// Returns the position of the most recently returned record
    #[inline]
    pub fn position(&self) -> Option<&Position> {
        self.inner.position()
    }

    #[inline]
    pub fn state(&self) -> State {
        self.inner.state()
    }

    #[inline]
    pub fn policy(&self) -> &P {
        self.inner.buffer().policy()
    }

    #[inline]
    pub fn is_compressed(&self) -> bool {
        self.inner.buffer().is_compressed()
    }

    /// Returns a borrowed iterator over all records, which are copied into
    /// an `OwnedRecord`.
    #[inline]
    pub fn records(&mut self) -> RecordsIter<R, P> {
        RecordsIter { rdr: self }
    }

    #[inline]
    pub fn into_records(self) -> RecordsIntoIter<R, P> {
        RecordsIntoIter { rdr: self }
    }

    /// Closes the reader, releasing the input.
    pub fn close(self) {
        debug!(
            "closing VCF reader ({:?}, {} bytes read)",
            self.inner.state(),
            self.inner.buffer().file_offset()
        );
    }
}

impl<R, P> Reader<R, P>
where
    R: io::Read + io::Seek,
    P: BufPolicy,
{
    /// Seeks to a record position obtained from
    /// [`position()`](Reader::position). The next call to
    /// [`next()`](Reader::next) returns the record at this position, and
    /// line and record numbers continue from there. The header is not
    /// parsed again. Fails with a configuration error for compressed input.
    ///
    /// ```
    /// use seqvar_io::vcf::{Reader, Record};
    /// use std::io::Cursor;
    ///
    /// let vcf = b"#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
    /// 1\t5\t.\tA\tG\t.\t.\t.
    /// 1\t9\t.\tC\tT\t.\t.\t.
    /// ";
    /// let mut reader = Reader::new(Cursor::new(&vcf[..])).unwrap();
    /// reader.next().unwrap().unwrap();
    /// let pos = reader.position().unwrap().clone();
    /// while let Some(rec) = reader.next() {
    ///     rec.unwrap();
    /// }
    /// reader.seek(&pos).unwrap();
    /// assert_eq!(reader.next().unwrap().unwrap().pos(), 5);
    /// ```
    pub fn seek(&mut self, pos: &Position) -> Result<()> {
        self.inner.seek(pos)
    }
}

impl_records_iter!(Reader, super::OwnedRecord);

impl_reader_builder!(ReaderBuilder, Reader, "VCF", "vcf", "calls.vcf.gz");
