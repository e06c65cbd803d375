/// Remove a final '\r' from a byte slice
#[inline]
pub(crate) fn trim_cr(line: &[u8]) -> &[u8] {
    if let Some((&b'\r', remaining)) = line.split_last() {
        remaining
    } else {
        line
    }
}

/// Outcome of skipping empty lines at the start of a record
pub(crate) enum Skipped {
    /// Index of the first non-empty byte and the number of lines skipped
    At(usize, u64),
    /// Reached the end of the window
    End(u64),
}

/// Skips empty lines (`\n` or `\r\n`). A `\r` at the very end of the
/// window is reported as `End`: either more data is needed to judge it,
/// or it is a stray byte at the end of the input.
#[inline]
pub(crate) fn skip_empty_lines(buf: &[u8]) -> Skipped {
    let mut pos = 0;
    let mut lines = 0;
    while pos < buf.len() {
        match buf[pos] {
            b'\n' => {
                pos += 1;
                lines += 1;
            }
            b'\r' => match buf.get(pos + 1) {
                Some(b'\n') => {
                    pos += 2;
                    lines += 1;
                }
                Some(_) => return Skipped::At(pos, lines),
                None => return Skipped::End(lines),
            },
            _ => return Skipped::At(pos, lines),
        }
    }
    Skipped::End(lines)
}

/// Splits a byte slice at a separator, yielding nothing for the VCF
/// missing value `.`.
#[inline]
pub(crate) fn split_nonmissing(value: &[u8], sep: u8) -> impl Iterator<Item = &[u8]> {
    let value = if value == b"." { &b""[..] } else { value };
    value
        .split(move |b| *b == sep)
        .filter(move |_| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cr() {
        assert_eq!(trim_cr(b"AC\r"), b"AC");
        assert_eq!(trim_cr(b"AC"), b"AC");
        assert_eq!(trim_cr(b""), b"");
    }

    #[test]
    fn skip() {
        assert!(matches!(skip_empty_lines(b"\n\r\n>"), Skipped::At(3, 2)));
        assert!(matches!(skip_empty_lines(b"\n\n"), Skipped::End(2)));
        assert!(matches!(skip_empty_lines(b"\r"), Skipped::End(0)));
        assert!(matches!(skip_empty_lines(b"\rx"), Skipped::At(0, 0)));
        assert!(matches!(skip_empty_lines(b""), Skipped::End(0)));
    }

    #[test]
    fn split() {
        let v: Vec<_> = split_nonmissing(b"A,T", b',').collect();
        assert_eq!(v, vec![&b"A"[..], &b"T"[..]]);
        assert_eq!(split_nonmissing(b".", b',').count(), 0);
        assert_eq!(split_nonmissing(b"", b',').count(), 0);
    }
}
