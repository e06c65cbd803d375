use super::{ChunkedBuffer, ParseError, Parsed, RecordParser};
use crate::error::{Error, ErrorKind, ErrorPosition, Malformed, Position, Result};
use crate::policy::{BufPolicy, StdPolicy};
use log::{debug, trace};
use std::io;

/// Life cycle of a reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Created,
    /// The header was parsed (always the case for formats without header),
    /// but no record was returned so far.
    HeaderRead,
    Iterating,
    /// The input was read completely
    Exhausted,
    /// Stopped after an error that parsing cannot recover from
    Failed,
}

/// Drives a [`RecordParser`](RecordParser) over a
/// [`ChunkedBuffer`](ChunkedBuffer) and keeps track of positions.
///
/// The bytes of the last record are only consumed on the following call to
/// `next_record()`, so views obtained through `window()` and `positions()`
/// stay valid until then.
pub(crate) struct CoreReader<R, F, P = StdPolicy>
where
    R: io::Read,
    F: RecordParser,
{
    buffer: ChunkedBuffer<R, P>,
    parser: F,
    positions: F::Positions,
    state: State,
    // bytes and lines to consume before searching the next record
    pending: (usize, u64),
    // line index of the window start
    line: u64,
    record_idx: u64,
    position: Option<Position>,
}

impl<R, F, P> CoreReader<R, F, P>
where
    R: io::Read,
    F: RecordParser,
    P: BufPolicy,
{
    pub fn new(buffer: ChunkedBuffer<R, P>, parser: F) -> Self {
        CoreReader {
            buffer,
            parser,
            positions: F::Positions::default(),
            state: State::Created,
            pending: (0, 0),
            line: 0,
            record_idx: 0,
            position: None,
        }
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn buffer(&self) -> &ChunkedBuffer<R, P> {
        &self.buffer
    }

    /// Bytes of the window, to which the record positions refer
    #[inline]
    pub fn window(&self) -> &[u8] {
        self.buffer.window()
    }

    #[inline]
    pub fn positions(&self) -> &F::Positions {
        &self.positions
    }

    /// Position of the most recently returned record
    #[inline]
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// Parses the header. Returns `None` for empty input. Must be called
    /// only once, before the first record is read.
    pub fn read_header(&mut self) -> Result<Option<F::Header>> {
        debug_assert_eq!(self.state, State::Created);
        loop {
            let eof = self.buffer.is_eof();
            match self.parser.parse_header(self.buffer.window(), eof) {
                Ok(Parsed::Complete(header, extent)) => {
                    self.consume(extent.consumed, extent.lines);
                    self.state = State::HeaderRead;
                    if extent.consumed > 0 {
                        debug!("parsed {} header of {} lines", F::FORMAT, extent.lines);
                    }
                    return Ok(Some(header));
                }
                Ok(Parsed::Eof) => {
                    self.state = State::Exhausted;
                    return Ok(None);
                }
                Ok(Parsed::NeedMoreData) if eof => {
                    self.state = State::Failed;
                    let pos = self.error_position(0, 0, None);
                    return Err(Error::new(ErrorKind::MalformedHeader {
                        pos,
                        reason: Malformed::UnexpectedEnd,
                    }));
                }
                Ok(Parsed::NeedMoreData) => self.refill()?,
                Err(e) => {
                    self.state = State::Failed;
                    let pos = self.error_position_from(&e);
                    return Err(Error::new(ErrorKind::MalformedHeader {
                        pos,
                        reason: e.reason,
                    }));
                }
            }
        }
    }

    /// Searches the next record. Returns `None` if the input is exhausted
    /// or iteration was stopped by a previous error.
    pub fn next_record(&mut self) -> Option<Result<()>> {
        match self.state {
            State::Exhausted | State::Failed => return None,
            State::Created => {
                if try_opt!(self.read_header()).is_none() {
                    return None;
                }
            }
            State::HeaderRead | State::Iterating => {}
        }

        let (bytes, lines) = std::mem::take(&mut self.pending);
        self.consume(bytes, lines);

        loop {
            let eof = self.buffer.is_eof();
            let parsed = self
                .parser
                .parse_record(self.buffer.window(), eof, &mut self.positions);
            match parsed {
                Ok(Parsed::Complete((), extent)) => {
                    let mut pos = Position::new();
                    pos.set_line(self.line + extent.start_line)
                        .set_byte(self.buffer.file_offset() + extent.start as u64)
                        .set_record(self.record_idx);
                    self.position = Some(pos);
                    self.record_idx += 1;
                    self.pending = (extent.consumed, extent.lines);
                    self.state = State::Iterating;
                    return Some(Ok(()));
                }
                Ok(Parsed::Eof) => {
                    trace!("{} input exhausted after {} records", F::FORMAT, self.record_idx);
                    self.state = State::Exhausted;
                    return None;
                }
                Ok(Parsed::NeedMoreData) if eof => {
                    self.state = State::Failed;
                    let pos = self.error_position(0, 0, None);
                    return Some(Err(Error::new(ErrorKind::MalformedRecord {
                        format: F::FORMAT,
                        pos,
                        reason: Malformed::UnexpectedEnd,
                    })));
                }
                Ok(Parsed::NeedMoreData) => try_opt!(self.refill()),
                Err(e) => return Some(Err(self.record_error(e))),
            }
        }
    }

    fn record_error(&mut self, e: ParseError) -> Error {
        let pos = self.error_position_from(&e);
        match e.resume {
            Some(resume) => {
                self.pending = resume;
                self.record_idx += 1;
                self.state = State::Iterating;
            }
            None => self.state = State::Failed,
        }
        Error::new(ErrorKind::MalformedRecord {
            format: F::FORMAT,
            pos,
            reason: e.reason,
        })
    }

    fn error_position(&self, start: usize, start_line: u64, id: Option<String>) -> ErrorPosition {
        let mut pos = Position::new();
        pos.set_line(self.line + start_line)
            .set_byte(self.buffer.file_offset() + start as u64)
            .set_record(self.record_idx);
        ErrorPosition::new(pos, None, id)
    }

    fn error_position_from(&self, e: &ParseError) -> ErrorPosition {
        let rec = self.error_position(e.record_start, e.record_line, None);
        ErrorPosition::new(
            rec.record_position().clone(),
            Some(e.offset.clone()),
            e.id.clone(),
        )
    }

    // Requests at least one more byte than currently available
    fn refill(&mut self) -> Result<()> {
        let min = self.buffer.available() + 1;
        if let Err(e) = self.buffer.ensure_available(min) {
            self.state = State::Failed;
            return Err(e);
        }
        Ok(())
    }

    #[inline]
    fn consume(&mut self, bytes: usize, lines: u64) {
        self.buffer.advance(bytes);
        self.line += lines;
    }
}

impl<R, F, P> CoreReader<R, F, P>
where
    R: io::Read + io::Seek,
    F: RecordParser,
    P: BufPolicy,
{
    /// Continues reading at a record position previously obtained from
    /// `position()`. The header is parsed first if this did not happen yet.
    /// A reader that stopped after an error can be restarted this way.
    pub fn seek(&mut self, pos: &Position) -> Result<()> {
        if self.state == State::Created {
            self.read_header()?;
        }
        self.buffer.seek_to(pos.byte())?;
        debug!("{} reader seeked to byte {} (record {})", F::FORMAT, pos.byte(), pos.record());
        self.line = pos.line();
        self.record_idx = pos.record();
        self.pending = (0, 0);
        self.position = None;
        self.state = State::HeaderRead;
        Ok(())
    }
}
