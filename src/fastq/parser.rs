use crate::core::{skip_empty_lines, trim_cr, Extent, ParseError, Parsed, RecordParser, Skipped};
use crate::error::{Format, Malformed};
use memchr::memchr;

/// Positions of a FASTQ record within the buffer window. Line ranges
/// exclude the line terminators.
#[derive(Debug, Clone, Default)]
pub struct RangeStore {
    /// index of '@'
    pub(crate) start: usize,
    pub(crate) head_end: usize,
    pub(crate) seq: (usize, usize),
    /// the separator line, starting with '+'
    pub(crate) sep: (usize, usize),
    pub(crate) qual: (usize, usize),
    /// end of the record, including the last line terminator (if present)
    pub(crate) end: usize,
}

/// Grammar of four-line FASTQ.
///
/// Each record consists of a header line (`@id desc`), a sequence line,
/// a separator line starting with `+` and a quality line. Sequence and
/// quality must have the same length.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastqParser;

impl RecordParser for FastqParser {
    type Header = ();
    type Positions = RangeStore;

    const FORMAT: Format = Format::Fastq;

    #[inline]
    fn parse_header(&mut self, _: &[u8], _: bool) -> Result<Parsed<()>, ParseError> {
        Ok(Parsed::Complete((), Extent::default()))
    }

    #[allow(clippy::needless_range_loop)]
    fn parse_record(
        &mut self,
        buf: &[u8],
        eof: bool,
        pos: &mut RangeStore,
    ) -> Result<Parsed<()>, ParseError> {
        let (start, skipped) = match skip_empty_lines(buf) {
            Skipped::At(i, n) => (i, n),
            Skipped::End(_) if eof => return Ok(Parsed::Eof),
            Skipped::End(_) => return Ok(Parsed::NeedMoreData),
        };

        if buf[start] != b'@' {
            return Err(ParseError::new(
                Malformed::InvalidStart {
                    expected: b'@',
                    found: buf[start],
                },
                start,
                skipped,
            ));
        }

        // header, sequence, separator, quality
        let mut ranges = [(0, 0); 4];
        let mut line_start = start;
        let mut lines = skipped;
        for i in 0..ranges.len() {
            let line_end = match memchr(b'\n', &buf[line_start..]) {
                Some(k) => line_start + k,
                // the quality line may lack a terminator at the end of input
                None if eof && i == 3 && line_start < buf.len() => buf.len(),
                None if eof => {
                    let mut err = ParseError::new(Malformed::UnexpectedEnd, start, skipped)
                        .offset(i as u64, buf.len() - start);
                    if i > 0 {
                        err = err.id(id_bytes(&buf[start + 1..ranges[0].1]));
                    }
                    return Err(err);
                }
                None => return Ok(Parsed::NeedMoreData),
            };
            ranges[i] = (line_start, line_start + trim_cr(&buf[line_start..line_end]).len());
            if line_end < buf.len() {
                lines += 1;
                line_start = line_end + 1;
            } else {
                line_start = line_end;
            }
        }
        let [head, seq, sep, qual] = ranges;
        let id = id_bytes(&buf[start + 1..head.1]);

        if sep.0 == sep.1 || buf[sep.0] != b'+' {
            let found = if sep.0 == sep.1 { None } else { Some(buf[sep.0]) };
            return Err(ParseError::new(Malformed::InvalidSeparator { found }, start, skipped)
                .offset(2, sep.0 - start)
                .id(id));
        }

        let end = line_start;
        let (seq_len, qual_len) = (seq.1 - seq.0, qual.1 - qual.0);
        if seq_len != qual_len {
            return Err(ParseError::new(
                Malformed::UnequalLengths {
                    seq: seq_len,
                    qual: qual_len,
                },
                start,
                skipped,
            )
            .offset(3, qual.0 - start)
            .id(id)
            .resume_at(end, lines));
        }

        pos.start = start;
        pos.head_end = head.1;
        pos.seq = seq;
        pos.sep = sep;
        pos.qual = qual;
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
fn id_bytes(head: &[u8]) -> &[u8] {
    head.split(|b| *b == b' ').next().unwrap_or(head)
}
