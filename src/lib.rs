//! Streaming, zero-copy reading and writing of FASTA, FASTQ and VCF files.
//!
//! Input is read in chunks into a buffer that is reused for every record.
//! [`fasta::RefRecord`](fasta::RefRecord) and [`vcf::RefRecord`](vcf::RefRecord)
//! borrow from this buffer, and the borrow checker makes sure that a record
//! is not used anymore when the reader advances to the next one. Owned
//! copies are available via `to_owned_record()` or the `records()`
//! iterators.
//!
//! Gzip compressed input is recognized automatically, and writers compress
//! their output if asked to or if the file name ends with `.gz`.
//!
//! # Example FASTA reader
//!
//! This code calculates the mean sequence length. Multi-line sequences are
//! not copied, [`seq_lines()`](fasta::RefRecord::seq_lines) iterates over
//! the lines in the buffer:
//!
//! ```no_run
//! use seqvar_io::fasta::Reader;
//!
//! let mut reader = Reader::from_path("seqs.fasta").unwrap();
//!
//! let mut n = 0;
//! let mut sum = 0;
//! while let Some(record) = reader.next() {
//!     let record = record.expect("Error reading record");
//!     for s in record.seq_lines() {
//!         sum += s.len();
//!     }
//!     n += 1;
//! }
//! println!("mean sequence length of {} records: {:.1} bp", n, sum as f32 / n as f32);
//! ```
//!
//! # Example VCF reader
//!
//! ```no_run
//! use seqvar_io::vcf::{Reader, Record};
//!
//! let mut reader = Reader::from_path("calls.vcf.gz").unwrap();
//! println!("samples: {:?}", reader.header().samples());
//!
//! while let Some(record) = reader.next() {
//!     let record = record.expect("Error reading record");
//!     println!("{}:{}", record.chrom_str().unwrap(), record.pos());
//! }
//! ```
//!
//! # Large records
//!
//! Each record must fit into the buffer as a whole. The initial size is
//! 64 KiB, and the buffer doubles its size whenever a record does not fit.
//! This can be changed by configuring a growth [`policy`](policy) in the
//! reader builder. A policy can also set a limit, after which reading fails
//! with [`ErrorKind::BufferLimit`](ErrorKind::BufferLimit).
//!
//! # Errors
//!
//! All readers and writers return [`Error`](Error). Invalid records carry
//! the position of the record within the input. Whether reading can
//! continue after such an error depends on the format, see the
//! [`fasta`](fasta), [`fastq`](fastq) and [`vcf`](vcf) module docs.
//!
//! # Seeking
//!
//! Readers over uncompressed input implementing `std::io::Seek` can return
//! to a record found earlier using `seek()` and the record's
//! [`Position`](Position).
//!
//! # Logging
//!
//! Buffer growth, header parsing and the selection of compressed or plain
//! input are logged using the [`log`](https://docs.rs/log) crate.

#[macro_use]
mod macros;

pub mod compare;
pub mod core;
mod error;
pub mod fasta;
pub mod fastq;
pub mod parallel;
pub mod policy;
pub mod prelude;
pub mod transport;
pub mod vcf;

pub use crate::error::*;

use crate::core::State;
use crate::policy::BufPolicy;
use std::io;

/// Common interface of the readers of all formats.
///
/// ```
/// use seqvar_io::{fasta, vcf, RecordSource};
///
/// fn count<S: RecordSource>(source: &mut S) -> seqvar_io::Result<usize> {
///     let mut n = 0;
///     while let Some(record) = source.next_record() {
///         record?;
///         n += 1;
///     }
///     Ok(n)
/// }
///
/// let mut fasta = fasta::Reader::new(&b">a\nAC\n>b\nG\n"[..]).unwrap();
/// let mut vcf = vcf::Reader::new(&b"1\t5\t.\tA\tG\t.\t.\t.\n"[..]).unwrap();
/// assert_eq!(count(&mut fasta).unwrap(), 2);
/// assert_eq!(count(&mut vcf).unwrap(), 1);
/// ```
pub trait RecordSource {
    /// The view returned for each record
    type Record<'a>
    where
        Self: 'a;

    /// Returns the next record or `None` if the input is exhausted or
    /// reading stopped after an error.
    fn next_record(&mut self) -> Option<Result<Self::Record<'_>>>;

    /// Position of the most recently returned record
    fn record_position(&self) -> Option<&Position>;

    fn reader_state(&self) -> State;
}

/// Output handling shared by the writers of all formats, independent of
/// the record type.
pub trait RecordOutput {
    fn flush_records(&mut self) -> Result<()>;

    /// Flushes all data and releases the output
    fn close_sink(self) -> Result<()>
    where
        Self: Sized;
}

/// Common interface of the writers of all formats. A writer may accept
/// several record types (borrowed views and owned records).
///
/// ```
/// use seqvar_io::prelude::*;
/// use seqvar_io::fasta;
///
/// fn copy<S, T>(records: &[T], sink: S) -> seqvar_io::Result<()>
/// where
///     S: RecordSink<T>,
/// {
///     let mut sink = sink;
///     for rec in records {
///         sink.write_record(rec)?;
///     }
///     sink.close_sink()
/// }
///
/// let records = vec![fasta::OwnedRecord::new("id", "ACGT")];
/// copy(&records, fasta::Writer::new(vec![])).unwrap();
/// ```
pub trait RecordSink<T: ?Sized>: RecordOutput {
    fn write_record(&mut self, record: &T) -> Result<()>;
}

impl<R, P> RecordSource for fasta::Reader<R, P>
where
    R: io::Read,
    P: BufPolicy,
{
    type Record<'a> = fasta::RefRecord<'a> where Self: 'a;

    #[inline]
    fn next_record(&mut self) -> Option<Result<fasta::RefRecord<'_>>> {
        self.next()
    }

    #[inline]
    fn record_position(&self) -> Option<&Position> {
        self.position()
    }

    #[inline]
    fn reader_state(&self) -> State {
        self.state()
    }
}

impl<R, P> RecordSource for fastq::Reader<R, P>
where
    R: io::Read,
    P: BufPolicy,
{
    type Record<'a> = fastq::RefRecord<'a> where Self: 'a;

    #[inline]
    fn next_record(&mut self) -> Option<Result<fastq::RefRecord<'_>>> {
        self.next()
    }

    #[inline]
    fn record_position(&self) -> Option<&Position> {
        self.position()
    }

    #[inline]
    fn reader_state(&self) -> State {
        self.state()
    }
}

impl<R, P> RecordSource for vcf::Reader<R, P>
where
    R: io::Read,
    P: BufPolicy,
{
    type Record<'a> = vcf::RefRecord<'a> where Self: 'a;

    #[inline]
    fn next_record(&mut self) -> Option<Result<vcf::RefRecord<'_>>> {
        self.next()
    }

    #[inline]
    fn record_position(&self) -> Option<&Position> {
        self.position()
    }

    #[inline]
    fn reader_state(&self) -> State {
        self.state()
    }
}

impl<W: io::Write> RecordOutput for fasta::Writer<W> {
    fn flush_records(&mut self) -> Result<()> {
        self.flush()
    }

    fn close_sink(self) -> Result<()> {
        self.close()
    }
}

impl<W, T> RecordSink<T> for fasta::Writer<W>
where
    W: io::Write,
    T: fasta::Record,
{
    #[inline]
    fn write_record(&mut self, record: &T) -> Result<()> {
        self.write(record)
    }
}

impl<W: io::Write> RecordOutput for fastq::Writer<W> {
    fn flush_records(&mut self) -> Result<()> {
        self.flush()
    }

    fn close_sink(self) -> Result<()> {
        self.close()
    }
}

impl<W, T> RecordSink<T> for fastq::Writer<W>
where
    W: io::Write,
    T: fastq::Record,
{
    #[inline]
    fn write_record(&mut self, record: &T) -> Result<()> {
        self.write(record)
    }
}

impl<W: io::Write> RecordOutput for vcf::Writer<W> {
    fn flush_records(&mut self) -> Result<()> {
        self.flush()
    }

    fn close_sink(self) -> Result<()> {
        self.close()
    }
}

/// Records are only accepted after the header was written.
impl<W, T> RecordSink<T> for vcf::Writer<W>
where
    W: io::Write,
    T: vcf::Record,
{
    #[inline]
    fn write_record(&mut self, record: &T) -> Result<()> {
        self.write(record)
    }
}
