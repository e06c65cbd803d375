use crate::error::{ErrorOffset, Format, Malformed};

/// Location of a complete header or record within the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    /// Offset of the first byte belonging to the record (after any
    /// skipped empty lines)
    pub start: usize,
    /// Number of lines skipped before `start`
    pub start_line: u64,
    /// Number of bytes to advance the buffer by after the record was used,
    /// including the terminating newline
    pub consumed: usize,
    /// Number of lines consumed in total, including skipped lines
    pub lines: u64,
}

/// Outcome of a parsing attempt on the current window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed<T> {
    Complete(T, Extent),
    /// The window ends within a record. Never returned if `eof` is `true`.
    NeedMoreData,
    /// No more records
    Eof,
}

/// A grammar violation found by a [`RecordParser`](RecordParser).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub reason: Malformed,
    /// Window offset where the record starts
    pub record_start: usize,
    /// Lines between window start and record start
    pub record_line: u64,
    /// Position of the offending byte relative to the record start
    pub offset: ErrorOffset,
    pub id: Option<String>,
    /// Number of bytes and lines (relative to the window start) after which
    /// parsing can continue with the next record. `None` means that the
    /// input cannot be parsed any further.
    pub resume: Option<(usize, u64)>,
}

impl ParseError {
    pub fn new(reason: Malformed, record_start: usize, record_line: u64) -> Self {
        ParseError {
            reason,
            record_start,
            record_line,
            offset: ErrorOffset::default(),
            id: None,
            resume: None,
        }
    }

    pub fn offset(mut self, line: u64, byte: usize) -> Self {
        self.offset = ErrorOffset::new(line, byte as u64);
        self
    }

    pub fn id(mut self, id: &[u8]) -> Self {
        self.id = Some(String::from_utf8_lossy(id).into_owned());
        self
    }

    pub fn resume_at(mut self, bytes: usize, lines: u64) -> Self {
        self.resume = Some((bytes, lines));
        self
    }
}

/// Grammar of a record format.
///
/// Parsers never read from the input themselves. They inspect the window
/// and either locate a complete item, ask for more data or report an error.
/// `eof` indicates that the window contains all of the remaining input.
pub trait RecordParser {
    type Header;
    /// Byte ranges of the most recently parsed record
    type Positions: Default;

    const FORMAT: Format;

    fn parse_header(&mut self, buf: &[u8], eof: bool)
        -> Result<Parsed<Self::Header>, ParseError>;

    fn parse_record(
        &mut self,
        buf: &[u8],
        eof: bool,
        positions: &mut Self::Positions,
    ) -> Result<Parsed<()>, ParseError>;
}
