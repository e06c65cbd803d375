use std::fs::File;
use std::io;
use std::path::Path;

use super::{FastaParser, RefRecord};
use crate::core::{ChunkedBuffer, CoreReader, State};
use crate::error::{Position, Result};
use crate::policy::{BufPolicy, StdPolicy};
use log::debug;

/// FASTA parser
///
/// ```
/// use seqvar_io::fasta::{Reader, Record};
///
/// let seq = b">id1\nACGT\n>id2\nTGCA\n";
/// let mut reader = Reader::new(&seq[..]).unwrap();
///
/// let record = reader.next().unwrap().unwrap();
/// assert_eq!(record.id(), Ok("id1"));
/// assert_eq!(&record.seq()[..], b"ACGT");
/// ```
pub struct Reader<R, P = StdPolicy>
where
    R: io::Read,
    P: BufPolicy,
{
    inner: CoreReader<R, FastaParser, P>,
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
            inner: CoreReader::new(buffer, FastaParser),
        })
    }

    /// Searches the next FASTA record and returns a [`RefRecord`](RefRecord)
    /// that borrows its data from the underlying buffer of this reader.
    ///
    /// Iteration continues after a record that lacks a sequence line
    /// ([`Malformed::MissingSequence`](crate::Malformed::MissingSequence)).
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

    /// Returns a reference to the underlying buffer growth policy
    #[inline]
    pub fn policy(&self) -> &P {
        self.inner.buffer().policy()
    }

    /// Returns `true` if the input is decompressed on the fly
    #[inline]
    pub fn is_compressed(&self) -> bool {
        self.inner.buffer().is_compressed()
    }

    /// Returns a borrowed iterator over all FASTA records. The records
    /// are owned (`OwnedRecord`), this is therefore slower than using
    /// `Reader::next()`.
    #[inline]
    pub fn records(&mut self) -> RecordsIter<R, P> {
        RecordsIter { rdr: self }
    }

    /// Returns an iterator over all FASTA records like `Reader::records()`,
    /// but with the difference that it owns the underlying reader.
    #[inline]
    pub fn into_records(self) -> RecordsIntoIter<R, P> {
        RecordsIntoIter { rdr: self }
    }

    /// Closes the reader, releasing the input.
    pub fn close(self) {
        debug!(
            "closing FASTA reader ({:?}, {} bytes read)",
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
    /// line and record numbers continue from there. Fails with a
    /// configuration error for compressed input.
    ///
    /// ```
    /// use seqvar_io::fasta::{Reader, Record};
    /// use std::io::Cursor;
    ///
    /// let mut reader = Reader::new(Cursor::new(&b">s1\nACGT\n>s2\nGG\n"[..])).unwrap();
    /// reader.next().unwrap().unwrap();
    /// let pos = reader.position().unwrap().clone();
    /// while let Some(rec) = reader.next() {
    ///     rec.unwrap();
    /// }
    /// reader.seek(&pos).unwrap();
    /// assert_eq!(reader.next().unwrap().unwrap().id(), Ok("s1"));
    /// ```
    pub fn seek(&mut self, pos: &Position) -> Result<()> {
        self.inner.seek(pos)
    }
}

impl_records_iter!(Reader, super::OwnedRecord);

impl_reader_builder!(ReaderBuilder, Reader, "FASTA", "fasta", "seqs.fasta.gz");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Malformed};
    use crate::fasta::{OwnedRecord, Record};

    #[test]
    fn two_records() {
        let mut reader = Reader::new(&b">s1\nACGT\n>s2\nGG\n"[..]).unwrap();
        assert_eq!(reader.state(), State::Created);
        {
            let rec = reader.next().unwrap().unwrap();
            assert_eq!(rec.id(), Ok("s1"));
            assert_eq!(&rec.seq()[..], b"ACGT");
        }
        assert_eq!(reader.position().map(|p| p.byte()), Some(0));
        {
            let rec = reader.next().unwrap().unwrap();
            assert_eq!(rec.id(), Ok("s2"));
        }
        let pos = reader.position().unwrap();
        assert_eq!((pos.line(), pos.byte(), pos.record()), (2, 9, 1));
        assert_eq!(reader.state(), State::Iterating);
        assert!(reader.next().is_none());
        assert_eq!(reader.state(), State::Exhausted);
        assert!(reader.next().is_none());
    }

    #[test]
    fn missing_sequence_recovers() {
        let data = b">a\n>b\nAC\n";
        let mut reader = Reader::new(&data[..]).unwrap();
        let err = reader.next().unwrap().unwrap_err();
        assert_eq!(err.malformed(), Some(&Malformed::MissingSequence));
        let pos = err.position().unwrap();
        assert_eq!(pos.record_id(), Some("a"));
        assert_eq!(pos.position().line(), 1);
        let rec = reader.next().unwrap().unwrap();
        assert_eq!(rec.id(), Ok("b"));
        assert!(reader.next().is_none());
    }

    #[test]
    fn truncated_is_fatal() {
        let mut reader = Reader::new(&b">a\nAC\n>b"[..]).unwrap();
        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::MalformedRecord {
                reason: Malformed::UnexpectedEnd,
                ..
            }
        ));
        assert_eq!(reader.state(), State::Failed);
        assert!(reader.next().is_none());
    }

    #[test]
    fn owned_records() {
        let reader = Reader::with_capacity(&b">a\nA\nC\n>b\nG"[..], 3).unwrap();
        let records: Vec<_> = reader.into_records().map(|r| r.unwrap()).collect();
        assert_eq!(
            records,
            vec![OwnedRecord::new(&b"a"[..], &b"AC"[..]), OwnedRecord::new(&b"b"[..], &b"G"[..])]
        );
    }

    #[test]
    fn empty_input() {
        let mut reader = Reader::new(&b""[..]).unwrap();
        assert!(reader.next().is_none());
        assert_eq!(reader.records().count(), 0);
    }
}
