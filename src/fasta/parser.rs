use crate::core::{skip_empty_lines, trim_cr, Extent, ParseError, Parsed, RecordParser, Skipped};
use crate::error::{Format, Malformed};
use memchr::memchr;

/// Positions of a FASTA record within the buffer window
#[derive(Debug, Clone, Default)]
pub struct LineStore {
    /// index of '>'
    pub(crate) start: usize,
    /// end of the header line, without line terminator
    pub(crate) head_end: usize,
    /// start of the first line after the header
    pub(crate) seq_start: usize,
    /// non-empty sequence lines, without line terminators
    pub(crate) lines: Vec<(usize, usize)>,
    /// end of the record, including the last line terminator (if present)
    pub(crate) end: usize,
}

/// Grammar of (multi-line) FASTA.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastaParser;

impl RecordParser for FastaParser {
    type Header = ();
    type Positions = LineStore;

    const FORMAT: Format = Format::Fasta;

    #[inline]
    fn parse_header(&mut self, _: &[u8], _: bool) -> Result<Parsed<()>, ParseError> {
        Ok(Parsed::Complete((), Extent::default()))
    }

    fn parse_record(
        &mut self,
        buf: &[u8],
        eof: bool,
        pos: &mut LineStore,
    ) -> Result<Parsed<()>, ParseError> {
        let (start, skipped) = match skip_empty_lines(buf) {
            Skipped::At(i, n) => (i, n),
            Skipped::End(_) if eof => return Ok(Parsed::Eof),
            Skipped::End(_) => return Ok(Parsed::NeedMoreData),
        };

        if buf[start] != b'>' {
            return Err(ParseError::new(
                Malformed::InvalidStart {
                    expected: b'>',
                    found: buf[start],
                },
                start,
                skipped,
            ));
        }

        let head_nl = match memchr(b'\n', &buf[start..]) {
            Some(i) => start + i,
            None if eof => {
                return Err(ParseError::new(Malformed::UnexpectedEnd, start, skipped)
                    .offset(0, buf.len() - start)
                    .id(id_bytes(&buf[start + 1..])));
            }
            None => return Ok(Parsed::NeedMoreData),
        };
        let head = trim_cr(&buf[start + 1..head_nl]);

        pos.lines.clear();
        let mut line_start = head_nl + 1;
        let mut has_line = false;
        let mut lines = skipped + 1;
        let end = loop {
            if line_start >= buf.len() {
                if !eof {
                    return Ok(Parsed::NeedMoreData);
                }
                break buf.len();
            }
            if buf[line_start] == b'>' {
                break line_start;
            }
            has_line = true;
            match memchr(b'\n', &buf[line_start..]) {
                Some(i) => {
                    let line_end = line_start + i;
                    push_line(pos, buf, line_start, line_end);
                    lines += 1;
                    line_start = line_end + 1;
                }
                None if eof => {
                    push_line(pos, buf, line_start, buf.len());
                    break buf.len();
                }
                None => return Ok(Parsed::NeedMoreData),
            }
        };

        if !has_line {
            let err = ParseError::new(Malformed::UnexpectedEnd, start, skipped)
                .offset(1, head_nl + 1 - start)
                .id(id_bytes(head));
            if end == buf.len() {
                // header line at the very end of the input
                return Err(err);
            }
            let err = ParseError {
                reason: Malformed::MissingSequence,
                ..err
            };
            return Err(err.resume_at(end, lines));
        }

        pos.start = start;
        pos.head_end = start + 1 + head.len();
        pos.seq_start = head_nl + 1;
        pos.end = end;

        Ok(Parsed::Complete(
            (),
            Extent {
                start,
                start_line: skipped,
                consumed: end,
                lines,
            },
        ))
    }
}

#[inline]
fn push_line(pos: &mut LineStore, buf: &[u8], start: usize, end: usize) {
    let line = trim_cr(&buf[start..end]);
    if !line.is_empty() {
        pos.lines.push((start, start + line.len()));
    }
}

#[inline]
fn id_bytes(head: &[u8]) -> &[u8] {
    let head = trim_cr(head);
    head.split(|b| *b == b' ').next().unwrap_or(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(buf: &[u8], eof: bool) -> (Result<Parsed<()>, ParseError>, LineStore) {
        let mut pos = LineStore::default();
        let res = FastaParser.parse_record(buf, eof, &mut pos);
        (res, pos)
    }

    #[test]
    fn complete() {
        let buf = b"\n>id desc\r\nAC\r\n\nGT\n>id2\n";
        let (res, pos) = parse(buf, false);
        let ext = match res {
            Ok(Parsed::Complete((), ext)) => ext,
            other => panic!("{:?}", other),
        };
        assert_eq!(ext.start, 1);
        assert_eq!(ext.start_line, 1);
        assert_eq!(ext.lines, 5);
        assert_eq!(&buf[ext.consumed..], b">id2\n");
        assert_eq!(&buf[pos.start + 1..pos.head_end], b"id desc");
        assert_eq!(pos.lines, vec![(11, 13), (16, 18)]);
    }

    #[test]
    fn need_more_data() {
        for data in [&b">id"[..], b">id\n", b">id\nACGT", b">id\nAC\n", b"\n\n"] {
            let (res, _) = parse(data, false);
            assert_eq!(res, Ok(Parsed::NeedMoreData), "{:?}", data);
        }
    }

    #[test]
    fn last_line_without_newline() {
        let (res, pos) = parse(b">id\nACGT", true);
        assert!(matches!(res, Ok(Parsed::Complete(..))));
        assert_eq!(pos.lines, vec![(4, 8)]);
        assert_eq!(pos.end, 8);
    }

    #[test]
    fn eof() {
        assert_eq!(parse(b"", true).0, Ok(Parsed::Eof));
        assert_eq!(parse(b"\n\r\n", true).0, Ok(Parsed::Eof));
    }

    #[test]
    fn truncated() {
        for data in [&b">id"[..], b">id\n"] {
            let err = parse(data, true).0.unwrap_err();
            assert_eq!(err.reason, Malformed::UnexpectedEnd);
            assert_eq!(err.id.as_deref(), Some("id"));
            assert_eq!(err.resume, None);
        }
    }

    #[test]
    fn missing_sequence() {
        let err = parse(b">a\n>b\nAC\n", true).0.unwrap_err();
        assert_eq!(err.reason, Malformed::MissingSequence);
        assert_eq!(err.resume, Some((3, 1)));
        assert_eq!(err.offset.line(), 1);
    }

    #[test]
    fn invalid_start() {
        let err = parse(b"\nACGT\n", true).0.unwrap_err();
        assert_eq!(
            err.reason,
            Malformed::InvalidStart {
                expected: b'>',
                found: b'A'
            }
        );
        assert_eq!(err.record_start, 1);
        assert_eq!(err.record_line, 1);
        assert_eq!(err.resume, None);
    }
}
