//! FASTQ reading and writing
//!
//! # Example
//!
//! ```
//! use seqvar_io::fastq::{Reader, Record, Writer};
//!
//! let input = b"@id1 some description
//! ACGT
//! +
//! IIII
//! @id2
//! TGCA
//! +
//! IIII
//! ";
//!
//! let mut reader = Reader::new(&input[..]).unwrap();
//! let mut writer = Writer::new(vec![]);
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
//! # Details on parsing behaviour
//!
//! * Only four-line FASTQ is supported: sequence and quality scores must
//!   each be on a single line.
//! * The parser handles UNIX (LF) and Windows (CRLF) line endings. Writing
//!   always uses UNIX line endings.
//! * Empty lines between records are ignored. A record must start with `@`,
//!   otherwise [`Malformed::InvalidStart`](crate::Malformed::InvalidStart)
//!   is returned and iteration stops. The same applies to a third line not
//!   starting with `+`
//!   ([`Malformed::InvalidSeparator`](crate::Malformed::InvalidSeparator)).
//! * Sequence and quality lines of different length are reported as
//!   [`Malformed::UnequalLengths`](crate::Malformed::UnequalLengths), after
//!   which iteration continues with the next record.
//! * A record cut off before its quality line results in
//!   [`Malformed::UnexpectedEnd`](crate::Malformed::UnexpectedEnd).
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
