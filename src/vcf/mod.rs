//! VCF reading and writing
//!
//! # Example
//!
//! Reads a file, keeps the records with `PASS` filter and writes them
//! to a new compressed file together with the original header:
//!
//! ```no_run
//! use seqvar_io::vcf::{Reader, WriterBuilder};
//!
//! let mut reader = Reader::from_path("calls.vcf.gz").unwrap();
//! let mut writer = WriterBuilder::new()
//!     .header(reader.header().clone())
//!     .to_path("pass.vcf.gz")
//!     .unwrap();
//!
//! while let Some(record) = reader.next() {
//!     let record = record.expect("invalid record");
//!     if record.filters().any(|f| f == b"PASS") {
//!         writer.write(&record).unwrap();
//!     }
//! }
//! writer.close().unwrap();
//! ```
//!
//! # Details on parsing behaviour
//!
//! * The header is optional. Lines starting with `##` must contain a `=`,
//!   and they must be followed by the column header line, which is either
//!   `#CHROM` alone or `#CHROM` and a tab followed by the other columns.
//!   Header errors are reported when creating the reader.
//! * Records must have at least 8 columns. If the column header line
//!   declares samples, every record must have exactly `9 + n` columns.
//!   The position must be an unsigned integer.
//! * Invalid records are reported as
//!   [`ErrorKind::MalformedRecord`](crate::ErrorKind::MalformedRecord), and
//!   reading continues with the next line.
//! * Empty lines are skipped, and both LF and CRLF line endings are
//!   accepted.
//! * All columns except for POS are returned as raw bytes and only split
//!   on demand ([`RefRecord::info_fields()`](RefRecord::info_fields),
//!   [`RefRecord::samples()`](RefRecord::samples), etc.).

mod header;
mod parser;
mod reader;
mod record;
mod write;
mod writer;

pub use self::header::*;
pub use self::parser::*;
pub use self::reader::*;
pub use self::record::*;
pub use self::write::*;
pub use self::writer::*;
