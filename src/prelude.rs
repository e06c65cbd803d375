//! Imports the record traits needed for accessing record fields, as well
//! as the common reader and writer traits.
//!
//! ```
//! use seqvar_io::prelude::*;
//!
//! let mut reader = seqvar_io::fasta::Reader::new(&b">id desc\nACGT\n"[..]).unwrap();
//! let record = reader.next().unwrap().unwrap();
//! assert_eq!(record.id(), Ok("id"));
//! ```

#[doc(no_inline)]
pub use crate::fasta::Record as _;
#[doc(no_inline)]
pub use crate::fastq::Record as _;
#[doc(no_inline)]
pub use crate::vcf::Record as _;
#[doc(no_inline)]
pub use crate::{RecordOutput, RecordSink, RecordSource};
