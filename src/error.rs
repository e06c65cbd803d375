use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Position of a record within the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub(crate) line: u64,
    pub(crate) byte: u64,
    pub(crate) record: u64,
}

impl Position {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line index (0-based)
    #[inline]
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Byte offset within the (decompressed) input
    #[inline]
    pub fn byte(&self) -> u64 {
        self.byte
    }

    /// Record index (0-based)
    #[inline]
    pub fn record(&self) -> u64 {
        self.record
    }

    #[inline]
    pub fn set_line(&mut self, line: u64) -> &mut Self {
        self.line = line;
        self
    }

    #[inline]
    pub fn set_byte(&mut self, byte: u64) -> &mut Self {
        self.byte = byte;
        self
    }

    #[inline]
    pub fn set_record(&mut self, record: u64) -> &mut Self {
        self.record = record;
        self
    }
}

/// Offset of a parsing error relative to the start of the record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorOffset {
    pub(crate) line: u64,
    pub(crate) byte: u64,
}

impl ErrorOffset {
    pub fn new(line: u64, byte: u64) -> Self {
        ErrorOffset { line, byte }
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn byte(&self) -> u64 {
        self.byte
    }
}

/// Position of a parsing error within the input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorPosition {
    record_pos: Position,
    err_offset: Option<ErrorOffset>,
    id: Option<String>,
}

impl ErrorPosition {
    pub fn new(record_pos: Position, err_offset: Option<ErrorOffset>, id: Option<String>) -> Self {
        ErrorPosition {
            record_pos,
            err_offset,
            id,
        }
    }

    /// Returns the exact position where the error occurred. If there is an
    /// [`ErrorOffset`](ErrorOffset), it is added to the record position.
    #[inline]
    pub fn position(&self) -> Position {
        let pos = &self.record_pos;
        match self.err_offset.as_ref() {
            Some(o) => Position {
                line: pos.line + o.line,
                byte: pos.byte + o.byte,
                record: pos.record,
            },
            None => pos.clone(),
        }
    }

    /// Position of the start of the record in which the error occurred.
    #[inline]
    pub fn record_position(&self) -> &Position {
        &self.record_pos
    }

    #[inline]
    pub fn error_offset(&self) -> Option<&ErrorOffset> {
        self.err_offset.as_ref()
    }

    /// Returns the ID of the affected record, if parsing got as far as
    /// the ID. Invalid UTF-8 is replaced (see `String::from_utf8_lossy`).
    #[inline]
    pub fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl fmt::Display for ErrorPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(id) = self.id.as_ref() {
            write!(f, "record '{}' ", id)?;
        }
        let pos = self.position();
        write!(f, "at line {}, byte {}", pos.line + 1, pos.byte)
    }
}

/// Record formats handled by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Fasta,
    Fastq,
    Vcf,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Format::Fasta => f.write_str("FASTA"),
            Format::Fastq => f.write_str("FASTQ"),
            Format::Vcf => f.write_str("VCF"),
        }
    }
}

/// Reason for a record or header being rejected by a parser
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    #[error(
        "expected '{}' at record start but found '{}'",
        *expected as char,
        (*found as char).escape_default()
    )]
    InvalidStart { expected: u8, found: u8 },
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("header line is not followed by a sequence line")]
    MissingSequence,
    #[error("expected '+' separator line but found {}", describe_found(found))]
    InvalidSeparator { found: Option<u8> },
    #[error("sequence length ({seq}) differs from quality length ({qual})")]
    UnequalLengths { seq: usize, qual: usize },
    #[error("expected at least 8 tab-separated columns, found {found}")]
    MissingColumns { found: usize },
    #[error("expected {expected} columns according to the sample header, found {found}")]
    SampleCount { expected: usize, found: usize },
    #[error("invalid position '{}'", String::from_utf8_lossy(value))]
    InvalidPosition { value: Vec<u8> },
    #[error("invalid quality '{}'", String::from_utf8_lossy(value))]
    InvalidQuality { value: Vec<u8> },
    #[error("invalid meta-information line (expected '##key=value')")]
    InvalidMetaLine,
    #[error("invalid column header line (expected '#CHROM')")]
    InvalidColumnLine,
    #[error("meta-information lines are not followed by a '#CHROM' line")]
    MissingColumnLine,
    #[error("header line found after the first record")]
    UnexpectedHeaderLine,
}

fn describe_found(found: &Option<u8>) -> String {
    match found {
        Some(b) => format!("'{}'", (*b as char).escape_default()),
        None => "an empty line".to_string(),
    }
}

/// Failures of the byte channel underneath a reader or writer
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed compressed stream: {0}")]
    MalformedCompressedStream(#[source] io::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl TransportError {
    /// Attaches a path to errors that occurred while opening a file.
    pub(crate) fn from_open(err: io::Error, path: PathBuf) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => TransportError::NotFound { path, source: err },
            io::ErrorKind::PermissionDenied => TransportError::PermissionDenied { path, source: err },
            _ => TransportError::Io(err),
        }
    }
}

/// Writer methods called in the wrong order
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderingError {
    #[error("a record was written before the header")]
    RecordBeforeHeader,
    #[error("the header was already written")]
    HeaderAlreadyWritten,
    #[error("the header cannot be written after records")]
    HeaderAfterRecords,
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Grammar violation or truncated record. `pos` refers to the
    /// record start plus the offset of the offending byte.
    #[error("{format} parse error: {reason} ({pos})")]
    MalformedRecord {
        format: Format,
        pos: ErrorPosition,
        reason: Malformed,
    },
    #[error("VCF header error: {reason} ({pos})")]
    MalformedHeader { pos: ErrorPosition, reason: Malformed },
    /// Size limit of buffer was reached, which happens if `policy::BufPolicy::grow_to()` returned
    /// `None`. This does not happen with the default `StdPolicy`.
    #[error("buffer limit reached")]
    BufferLimit,
    #[error("writer used out of order: {0}")]
    Ordering(#[from] OrderingError),
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ErrorKind {
    /// Returns the position for this error, if one exists.
    pub fn position(&self) -> Option<&ErrorPosition> {
        match self {
            ErrorKind::MalformedRecord { pos, .. } | ErrorKind::MalformedHeader { pos, .. } => {
                Some(pos)
            }
            _ => None,
        }
    }
}

/// Error type of all readers and writers
#[derive(Debug)]
pub struct Error {
    kind: Box<ErrorKind>,
}

impl Error {
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Error {
            kind: Box::new(kind),
        }
    }

    /// Returns a reference to the [`ErrorKind`](ErrorKind)
    /// associated with the error.
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the [`ErrorKind`](ErrorKind) associated with
    /// the error, thereby consuming the error.
    #[inline]
    pub fn into_kind(self) -> ErrorKind {
        *self.kind
    }

    #[inline]
    pub fn position(&self) -> Option<&ErrorPosition> {
        self.kind().position()
    }

    /// Returns the parser's reason for rejecting the input, if this is a
    /// record or header error.
    pub fn malformed(&self) -> Option<&Malformed> {
        match self.kind() {
            ErrorKind::MalformedRecord { reason, .. } | ErrorKind::MalformedHeader { reason, .. } => {
                Some(reason)
            }
            _ => None,
        }
    }

    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        Error::new(ErrorKind::Configuration(msg.into()))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&*self.kind)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::new(ErrorKind::Transport(e))
    }
}

impl From<OrderingError> for Error {
    fn from(e: OrderingError) -> Self {
        Error::new(ErrorKind::Ordering(e))
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::new(ErrorKind::Transport(TransportError::Io(e)))
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err.into_kind() {
            ErrorKind::Transport(TransportError::Io(e)) => e,
            kind => io::Error::new(io::ErrorKind::Other, Error::new(kind)),
        }
    }
}
