use std::fs::File;
use std::io;
use std::path::Path;

use super::{FastqParser, RefRecord};
use crate::core::{ChunkedBuffer, CoreReader, State};
use crate::error::{Position, Result};
use crate::policy::{BufPolicy, StdPolicy};
use log::debug;

/// FASTQ parser
///
/// ```
/// use seqvar_io::fastq::{Reader, Record};
///
/// let fq = b"@id1\nACGT\n+\nIIII\n@id2\nTG\n+\nII\n";
/// let mut reader = Reader::new(&fq[..]).unwrap();
///
/// let record = reader.next().unwrap().unwrap();
/// assert_eq!(record.id(), Ok("id1"));
/// assert_eq!(record.seq(), b"ACGT");
/// assert_eq!(record.qual(), b"IIII");
/// ```
pub struct Reader<R, P = StdPolicy>
where
    R: io::Read,
    P: BufPolicy,
{
    inner: CoreReader<R, FastqParser, P>,
}

impl<R> Reader<R>
where
    R: io::Read,
{
    /// Creates a new reader with the default buffer size of 64 KiB.
    /// Gzip compressed input is recognized automatically.
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
    /// Creates a reader from a file path.
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
        Ok(Reader {
            inner: CoreReader::new(buffer, FastqParser),
        })
    }

    /// Searches the next FASTQ record and returns a [`RefRecord`](RefRecord)
    /// that borrows its data from the underlying buffer of this reader.
    ///
    /// Iteration continues after a record with sequence and quality lines
    /// of different length
    /// ([`Malformed::UnequalLengths`](crate::Malformed::UnequalLengths)).
    /// Other errors end the iteration, and `None` is returned afterwards.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Result<RefRecord>> {
        try_opt!(self.inner.next_record()?);
        Some(Ok(RefRecord {
            buffer: self.inner.window(),
            buf_pos: self.inner.positions(),
        }))
    }

    /// Returns the position of the current record (found by the previous call
    /// to [`next()`](Reader::next)). Returns `None` if no record was read so
    /// far.
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

    /// Returns a borrowed iterator over all FASTQ records, copying each
    /// record into an `OwnedRecord`.
    #[inline]
    pub fn records(&mut self) -> RecordsIter<R, P> {
        RecordsIter { rdr: self }
    }

    /// Like [`records()`](Reader::records), but owns the underlying reader.
    #[inline]
    pub fn into_records(self) -> RecordsIntoIter<R, P> {
        RecordsIntoIter { rdr: self }
    }

    pub fn close(self) {
        debug!(
            "closing FASTQ reader ({:?}, {} bytes read)",
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
    /// [`position()`](Reader::position). Fails with a configuration error
    /// for compressed input.
    pub fn seek(&mut self, pos: &Position) -> Result<()> {
        self.inner.seek(pos)
    }
}

impl_records_iter!(Reader, super::OwnedRecord);

impl_reader_builder!(ReaderBuilder, Reader, "FASTQ", "fastq", "reads.fastq.gz");
