//! FASTA reading and writing
//!
//! # Example
//!
//! This example reads some content, writes it back and compares the output
//! (should be the same):
//!
//! ```
//! use seqvar_io::fasta::{Reader, Record, WriterBuilder};
//!
//! let input = b">id1 some description
//! ACGT
//! ACGT
//! >id2
//! TGCA
//! TGCA
//! ";
//!
//! let mut reader = Reader::new(&input[..]).unwrap();
//! let mut writer = WriterBuilder::new().line_width(4).to_writer(vec![]).unwrap();
//!
//! while let Some(record) = reader.next() {
//!     let record = record.expect("Error reading record");
//!     println!("id: {}", record.id().unwrap());
//!     writer.write(&record).unwrap();
//! }
//!
//! assert_eq!(writer.finish().unwrap(), input);
//! ```
//!
//! As the record returned by [`next()`](Reader::next) borrows its data from
//! the underlying buffer, it is not possible to use a `for` loop for
//! iterating. [`records()`](Reader::records) and
//! [`into_records()`](Reader::into_records) return owned copies instead.
//!
//! # Accessing the sequence
//!
//! Wrapped sequences are not copied into a contiguous slice. Instead,
//! [`RefRecord::seq_lines()`](RefRecord::seq_lines) iterates over the
//! non-empty lines in the buffer, and the logical sequence is their
//! concatenation. [`Record::seq()`](Record::seq) returns a
//! [`Cow<[u8]>`](std::borrow::Cow): borrowed if there is only one line,
//! otherwise an owned copy. [`RefRecord::raw_seq()`](RefRecord::raw_seq)
//! returns the sequence as found in the input, including line breaks.
//!
//! # Details on parsing behaviour
//!
//! * The parser handles UNIX (LF) and Windows (CRLF) line endings, but not old
//!   Mac-style (CR) endings. FASTA writing always uses UNIX line endings.
//! * Empty lines are ignored. The first non-empty line must start with `>`,
//!   otherwise [`Malformed::InvalidStart`](crate::Malformed::InvalidStart)
//!   is returned and iteration stops.
//! * Whitespace at the end of header and sequence lines is never removed.
//! * Every header must be followed by at least one line, which may be empty.
//!   Two consecutive header lines result in
//!   [`Malformed::MissingSequence`](crate::Malformed::MissingSequence) for the
//!   first record, after which iteration continues with the next record.
//!   A header line at the end of the input is reported as
//!   [`Malformed::UnexpectedEnd`](crate::Malformed::UnexpectedEnd).
//! * Empty input results in `None` being returned immediately by
//!   `Reader::next()`.
//! * The last line does not need to be terminated by a newline.

mod parser;
mod reader;
mod record;
mod write;
mod writer;

pub use self::parser::*;
pub use self::reader::*;
pub use self::record::*;
pub use self::write::*;
pub use self::writer::*;
