//! Format-independent reading machinery.
//!
//! [`ChunkedBuffer`](ChunkedBuffer) pulls bytes from a transport into a
//! growable buffer. A [`RecordParser`](RecordParser) locates headers and
//! records within the unconsumed part of that buffer (the *window*),
//! signalling [`Parsed::NeedMoreData`](Parsed::NeedMoreData) whenever a
//! record crosses the end of the window. The generic reader in this module
//! drives both, and the format modules wrap it to hand out record views.
//!
//! The types in this module are mostly of interest for implementing
//! additional formats; their API may change.

mod util;
mod buffer;
mod parser;
mod reader;
mod writer;

pub use self::buffer::*;
pub use self::parser::*;
pub use self::reader::State;
pub use self::writer::WriterState;

pub(crate) use self::reader::CoreReader;
pub(crate) use self::util::*;
pub(crate) use self::writer::{create_path, open_sink, CoreWriter};

/// The default initial buffer size for readers.
pub const BUFSIZE: usize = 64 * 1024;
