use super::{Header, MetaLine};
use crate::core::{skip_empty_lines, trim_cr, Extent, ParseError, Parsed, RecordParser, Skipped};
use crate::error::{Format, Malformed};
use memchr::{memchr, memchr_iter};

/// Positions of the columns of a VCF record within the buffer window
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    pub(crate) start: usize,
    /// end of the line, without line terminator
    pub(crate) end: usize,
    /// indices of all tabs in the line
    pub(crate) tabs: Vec<usize>,
    pub(crate) pos: u64,
}

impl FieldStore {
    #[inline]
    pub(crate) fn num_fields(&self) -> usize {
        self.tabs.len() + 1
    }

    #[inline]
    pub(crate) fn field_range(&self, i: usize) -> Option<(usize, usize)> {
        let start = if i == 0 {
            self.start
        } else {
            *self.tabs.get(i - 1)? + 1
        };
        let end = self.tabs.get(i).copied().unwrap_or(self.end);
        Some((start, end))
    }
}

/// Grammar of VCF.
///
/// The header is optional: parsing of records starts at the first line not
/// starting with `#`. Once the header was parsed, records are checked
/// against the number of samples it declares.
#[derive(Debug, Clone, Default)]
pub struct VcfParser {
    n_samples: usize,
}

impl RecordParser for VcfParser {
    type Header = Header;
    type Positions = FieldStore;

    const FORMAT: Format = Format::Vcf;

    fn parse_header(&mut self, buf: &[u8], eof: bool) -> Result<Parsed<Header>, ParseError> {
        let mut meta_lines = vec![];
        let mut column_line = None;
        let mut pos = 0;
        let mut lines = 0;
        let end = loop {
            match buf.get(pos) {
                None if eof => break pos,
                None => return Ok(Parsed::NeedMoreData),
                Some(b'#') => {}
                Some(_) => match skip_empty_lines(&buf[pos..]) {
                    Skipped::At(0, _) => break pos,
                    Skipped::At(i, n) => {
                        pos += i;
                        lines += n;
                        continue;
                    }
                    Skipped::End(_) if !eof => return Ok(Parsed::NeedMoreData),
                    Skipped::End(n) => {
                        lines += n;
                        break buf.len();
                    }
                },
            }
            let (line, next, nl) = match memchr(b'\n', &buf[pos..]) {
                Some(i) => (trim_cr(&buf[pos..pos + i]), pos + i + 1, 1),
                None if eof => (trim_cr(&buf[pos..]), buf.len(), 0),
                None => return Ok(Parsed::NeedMoreData),
            };
            if line.starts_with(b"##") {
                if memchr(b'=', line).is_none() {
                    return Err(ParseError::new(Malformed::InvalidMetaLine, pos, lines));
                }
                meta_lines.push((pos, pos + line.len()));
            } else if is_column_line(line) {
                column_line = Some((pos, pos + line.len()));
                lines += nl;
                break next;
            } else {
                return Err(ParseError::new(Malformed::InvalidColumnLine, pos, lines));
            }
            lines += nl;
            pos = next;
        };

        if column_line.is_none() && !meta_lines.is_empty() {
            return Err(ParseError::new(Malformed::MissingColumnLine, end, lines));
        }

        let mut meta = Vec::with_capacity(meta_lines.len());
        for (start, end) in meta_lines {
            // validated above
            if let Ok(line) = MetaLine::parse(&buf[start..end]) {
                meta.push(line);
            }
        }
        let (samples, format_column) = match column_line {
            Some((start, end)) => {
                let columns: Vec<_> = buf[start..end].split(|b| *b == b'\t').collect();
                let samples = columns
                    .iter()
                    .skip(9)
                    .map(|s| String::from_utf8_lossy(s).into_owned())
                    .collect();
                (samples, columns.len() > 8)
            }
            None => (vec![], false),
        };
        let header = Header::new(meta, samples, format_column);
        self.n_samples = header.samples().len();

        Ok(Parsed::Complete(
            header,
            Extent {
                start: 0,
                start_line: 0,
                consumed: end,
                lines,
            },
        ))
    }

    fn parse_record(
        &mut self,
        buf: &[u8],
        eof: bool,
        pos: &mut FieldStore,
    ) -> Result<Parsed<()>, ParseError> {
        let (start, skipped) = match skip_empty_lines(buf) {
            Skipped::At(i, n) => (i, n),
            Skipped::End(_) if eof => return Ok(Parsed::Eof),
            Skipped::End(_) => return Ok(Parsed::NeedMoreData),
        };

        let (line_end, consumed, lines) = match memchr(b'\n', &buf[start..]) {
            Some(i) => (start + i, start + i + 1, skipped + 1),
            None if eof => (buf.len(), buf.len(), skipped),
            None => return Ok(Parsed::NeedMoreData),
        };
        let line = trim_cr(&buf[start..line_end]);
        let err = |reason| ParseError::new(reason, start, skipped).resume_at(consumed, lines);

        if line.first() == Some(&b'#') {
            return Err(err(Malformed::UnexpectedHeaderLine));
        }

        pos.tabs.clear();
        pos.tabs.extend(memchr_iter(b'\t', line).map(|i| start + i));
        pos.start = start;
        pos.end = start + line.len();

        let chrom = &buf[start..pos.tabs.first().copied().unwrap_or(pos.end)];
        let n_fields = pos.num_fields();
        if n_fields < 8 {
            return Err(err(Malformed::MissingColumns { found: n_fields })
                .offset(0, line.len())
                .id(chrom));
        }
        if self.n_samples > 0 && n_fields != 9 + self.n_samples {
            return Err(err(Malformed::SampleCount {
                expected: 9 + self.n_samples,
                found: n_fields,
            })
            .id(chrom));
        }

        let (pos_start, pos_end) = (pos.tabs[0] + 1, pos.tabs[1]);
        let value = &buf[pos_start..pos_end];
        pos.pos = match parse_pos(value) {
            Some(p) => p,
            None => {
                return Err(err(Malformed::InvalidPosition {
                    value: value.to_vec(),
                })
                .offset(0, pos_start - start)
                .id(chrom))
            }
        };

        Ok(Parsed::Complete(
            (),
            Extent {
                start,
                start_line: skipped,
                consumed,
                lines,
            },
        ))
    }
}

/// Parses an unsigned decimal integer without sign or whitespace
#[inline]
pub(crate) fn parse_pos(value: &[u8]) -> Option<u64> {
    if value.is_empty() {
        return None;
    }
    value.iter().try_fold(0u64, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
    })
}

// `#CHROM`, optionally followed by the other columns
#[inline]
fn is_column_line(line: &[u8]) -> bool {
    match line.strip_prefix(b"#CHROM") {
        Some(rest) => rest.is_empty() || rest[0] == b'\t',
        None => false,
    }
}
