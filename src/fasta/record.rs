use std::borrow::Cow;
use std::io;
use std::slice;
use std::str::{self, Utf8Error};

use super::{write_head, write_seq_iter, write_wrap_seq_iter, LineStore};
use crate::core::trim_cr;
use serde_derive::{Deserialize, Serialize};

/// FASTA record trait implemented by both `RefRecord` and `OwnedRecord`
pub trait Record {
    /// Return the header line of the record as byte slice
    fn head(&self) -> &[u8];

    /// Return the sequence without line breaks. Only allocates if the
    /// sequence needs to be assembled from multiple lines.
    fn seq(&self) -> Cow<[u8]>;

    /// Write the record to the given `io::Write` instance. The sequence will occupy one line only.
    fn write<W: io::Write>(&self, writer: W) -> io::Result<()>;

    /// Write the record to the given `io::Write` instance. The sequence is wrapped to produce
    /// multi-line FASTA with a maximum width specified by `wrap`.
    fn write_wrap<W: io::Write>(&self, writer: W, wrap: usize) -> io::Result<()>;

    #[inline]
    fn id_bytes(&self) -> &[u8] {
        let head = self.head();
        head.split(|b| *b == b' ').next().unwrap_or(head)
    }

    /// Return the ID of the record (everything before an optional space) as string slice
    #[inline]
    fn id(&self) -> Result<&str, Utf8Error> {
        str::from_utf8(self.id_bytes())
    }

    #[inline]
    fn desc_bytes(&self) -> Option<&[u8]> {
        self.head().splitn(2, |b| *b == b' ').nth(1)
    }

    /// Return the description of the record as string slice, if present. Otherwise, `None` is returned.
    #[inline]
    fn desc(&self) -> Option<Result<&str, Utf8Error>> {
        self.desc_bytes().map(str::from_utf8)
    }

    /// Return both the ID and the description of the record (if present)
    fn id_desc(&self) -> Result<(&str, Option<&str>), Utf8Error> {
        let head = str::from_utf8(self.head())?;
        let mut h = head.splitn(2, ' ');
        Ok((h.next().unwrap_or(head), h.next()))
    }
}

impl<'a, R: Record> Record for &'a R {
    fn head(&self) -> &[u8] {
        (**self).head()
    }

    fn seq(&self) -> Cow<[u8]> {
        (**self).seq()
    }

    fn write<W: io::Write>(&self, writer: W) -> io::Result<()> {
        (**self).write(writer)
    }

    fn write_wrap<W: io::Write>(&self, writer: W, wrap: usize) -> io::Result<()> {
        (**self).write_wrap(writer, wrap)
    }
}

/// A FASTA record that borrows data from the reader's buffer.
///
/// The sequence is not copied: it is exposed as the list of lines found in
/// the input (see [`seq_lines()`](RefRecord::seq_lines)), whose
/// concatenation is the logical sequence. [`seq()`](Record::seq) only
/// copies the data if there is more than one line.
#[derive(Debug, Clone)]
pub struct RefRecord<'a> {
    pub(crate) buffer: &'a [u8],
    pub(crate) buf_pos: &'a LineStore,
}

impl<'a> Record for RefRecord<'a> {
    #[inline]
    fn head(&self) -> &[u8] {
        &self.buffer[self.buf_pos.start + 1..self.buf_pos.head_end]
    }

    #[inline]
    fn seq(&self) -> Cow<[u8]> {
        let mut lines = self.seq_lines();
        if lines.len() <= 1 {
            return lines.next().unwrap_or(&[]).into();
        }
        self.owned_seq().into()
    }

    #[inline]
    fn write<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        write_head(&mut writer, self.head())?;
        write_seq_iter(&mut writer, self.seq_lines())
    }

    #[inline]
    fn write_wrap<W: io::Write>(&self, mut writer: W, wrap: usize) -> io::Result<()> {
        write_head(&mut writer, self.head())?;
        write_wrap_seq_iter(&mut writer, self.seq_lines(), wrap)
    }
}

impl<'a> RefRecord<'a> {
    /// Return an iterator over all non-empty sequence lines, without line
    /// terminators.
    #[inline]
    pub fn seq_lines(&self) -> SeqLines<'a> {
        SeqLines {
            data: self.buffer,
            pos_iter: self.buf_pos.lines.iter(),
        }
    }

    /// Returns the number of non-empty sequence lines.
    /// Equivalent to `self.seq_lines().len()`
    #[inline]
    pub fn num_seq_lines(&self) -> usize {
        self.buf_pos.lines.len()
    }

    /// Returns the raw sequence as found in the input, including line
    /// breaks (and empty lines), but without the final line terminator.
    #[inline]
    pub fn raw_seq(&self) -> &'a [u8] {
        let raw = &self.buffer[self.buf_pos.seq_start..self.buf_pos.end];
        trim_cr(raw.strip_suffix(b"\n").unwrap_or(raw))
    }

    /// Returns the sequence as owned `Vec`.
    pub fn owned_seq(&self) -> Vec<u8> {
        let mut seq = Vec::with_capacity(self.seq_lines().map(|l| l.len()).sum());
        for segment in self.seq_lines() {
            seq.extend_from_slice(segment);
        }
        seq
    }

    /// Creates an owned copy of the record.
    pub fn to_owned_record(&self) -> OwnedRecord {
        OwnedRecord {
            head: self.head().to_vec(),
            seq: self.owned_seq(),
        }
    }

    /// Writes a record to the given `io::Write` instance
    /// by just writing the unmodified input, which is faster than `RefRecord::write`.
    /// A line terminator is added if the record was the last one in the
    /// input and did not end with one.
    pub fn write_unchanged<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        let data = &self.buffer[self.buf_pos.start..self.buf_pos.end];
        writer.write_all(data)?;
        if data.last() != Some(&b'\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Iterator over the sequence lines of a FASTA record.
#[derive(Debug, Clone)]
pub struct SeqLines<'a> {
    data: &'a [u8],
    pos_iter: slice::Iter<'a, (usize, usize)>,
}

impl<'a> Iterator for SeqLines<'a> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<&'a [u8]> {
        self.pos_iter.next().map(|&(start, end)| &self.data[start..end])
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pos_iter.size_hint()
    }
}

impl<'a> DoubleEndedIterator for SeqLines<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a [u8]> {
        self.pos_iter
            .next_back()
            .map(|&(start, end)| &self.data[start..end])
    }
}

impl<'a> ExactSizeIterator for SeqLines<'a> {}

/// A FASTA record that owns its data (requiring two allocations)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnedRecord {
    pub head: Vec<u8>,
    pub seq: Vec<u8>,
}

impl OwnedRecord {
    pub fn new<H: Into<Vec<u8>>, S: Into<Vec<u8>>>(head: H, seq: S) -> Self {
        OwnedRecord {
            head: head.into(),
            seq: seq.into(),
        }
    }
}

impl Record for OwnedRecord {
    #[inline]
    fn head(&self) -> &[u8] {
        &self.head
    }

    #[inline]
    fn seq(&self) -> Cow<[u8]> {
        Cow::Borrowed(&self.seq)
    }

    #[inline]
    fn write<W: io::Write>(&self, writer: W) -> io::Result<()> {
        super::write_to(writer, &self.head, &self.seq)
    }

    #[inline]
    fn write_wrap<W: io::Write>(&self, mut writer: W, wrap: usize) -> io::Result<()> {
        write_head(&mut writer, &self.head)?;
        write_wrap_seq_iter(&mut writer, Some(&self.seq[..]), wrap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_record<F: FnOnce(RefRecord)>(buf: &[u8], lines: Vec<(usize, usize)>, func: F) {
        let head_end = buf.iter().position(|&b| b == b'\n' || b == b'\r').unwrap();
        let seq_start = buf.iter().position(|&b| b == b'\n').unwrap() + 1;
        let pos = LineStore {
            start: 0,
            head_end,
            seq_start,
            lines,
            end: buf.len(),
        };
        func(RefRecord {
            buffer: buf,
            buf_pos: &pos,
        });
    }

    #[test]
    fn multi_line() {
        let buf = b">id some desc\r\nAC\r\n\r\nGT\r\n";
        with_record(buf, vec![(15, 17), (21, 23)], |rec| {
            assert_eq!(rec.id(), Ok("id"));
            assert_eq!(rec.desc(), Some(Ok("some desc")));
            assert_eq!(rec.id_desc(), Ok(("id", Some("some desc"))));
            assert_eq!(rec.seq_lines().collect::<Vec<_>>(), vec![b"AC", b"GT"]);
            assert_eq!(rec.seq_lines().rev().next(), Some(&b"GT"[..]));
            assert_eq!(rec.num_seq_lines(), 2);
            assert!(matches!(rec.seq(), Cow::Owned(_)));
            assert_eq!(&rec.seq()[..], b"ACGT");
            assert_eq!(rec.raw_seq(), b"AC\r\n\r\nGT");

            let mut out = vec![];
            rec.write(&mut out).unwrap();
            assert_eq!(out, b">id some desc\nACGT\n");
            out.clear();
            rec.write_wrap(&mut out, 3).unwrap();
            assert_eq!(out, b">id some desc\nACG\nT\n");
            out.clear();
            rec.write_unchanged(&mut out).unwrap();
            assert_eq!(out, buf);

            let owned = rec.to_owned_record();
            assert_eq!(owned, OwnedRecord::new(&b"id some desc"[..], &b"ACGT"[..]));
        });
    }

    #[test]
    fn single_line_borrowed() {
        with_record(b">id\nACGT", vec![(4, 8)], |rec| {
            assert_eq!(rec.id_bytes(), b"id");
            assert_eq!(rec.desc(), None);
            assert!(matches!(rec.seq(), Cow::Borrowed(b"ACGT")));
            let mut out = vec![];
            rec.write_unchanged(&mut out).unwrap();
            assert_eq!(out, b">id\nACGT\n");
        });
    }

    #[test]
    fn empty_seq() {
        with_record(b">id\n\n", vec![], |rec| {
            assert_eq!(&rec.seq()[..], b"");
            assert_eq!(rec.raw_seq(), b"");
            let mut out = vec![];
            rec.write(&mut out).unwrap();
            assert_eq!(out, b">id\n\n");
        });
    }
}
