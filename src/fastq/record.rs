use std::io;
use std::str::{self, Utf8Error};

use super::{write_to, RangeStore};
use serde_derive::{Deserialize, Serialize};

/// FASTQ record trait implemented by both `RefRecord` and `OwnedRecord`
pub trait Record {
    /// Return the header line of the record (without `@`)
    fn head(&self) -> &[u8];

    fn seq(&self) -> &[u8];

    /// Return the quality line
    fn qual(&self) -> &[u8];

    /// Write the record to the given `io::Write` instance. The separator
    /// line is written as a single `+`.
    #[inline]
    fn write<W: io::Write>(&self, writer: W) -> io::Result<()> {
        write_to(writer, self.head(), self.seq(), self.qual())
    }

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

    #[inline]
    fn desc(&self) -> Option<Result<&str, Utf8Error>> {
        self.desc_bytes().map(str::from_utf8)
    }
}

impl<'a, R: Record> Record for &'a R {
    fn head(&self) -> &[u8] {
        (**self).head()
    }

    fn seq(&self) -> &[u8] {
        (**self).seq()
    }

    fn qual(&self) -> &[u8] {
        (**self).qual()
    }
}

/// A FASTQ record that borrows data from the reader's buffer.
#[derive(Debug, Clone)]
pub struct RefRecord<'a> {
    pub(crate) buffer: &'a [u8],
    pub(crate) buf_pos: &'a RangeStore,
}

impl<'a> Record for RefRecord<'a> {
    #[inline]
    fn head(&self) -> &[u8] {
        &self.buffer[self.buf_pos.start + 1..self.buf_pos.head_end]
    }

    #[inline]
    fn seq(&self) -> &[u8] {
        let (start, end) = self.buf_pos.seq;
        &self.buffer[start..end]
    }

    #[inline]
    fn qual(&self) -> &[u8] {
        let (start, end) = self.buf_pos.qual;
        &self.buffer[start..end]
    }
}

impl<'a> RefRecord<'a> {
    /// Text following the `+` of the separator line (often empty, or a
    /// repetition of the header).
    #[inline]
    pub fn sep_text(&self) -> &'a [u8] {
        let (start, end) = self.buf_pos.sep;
        &self.buffer[start + 1..end]
    }

    pub fn to_owned_record(&self) -> OwnedRecord {
        OwnedRecord {
            head: self.head().to_vec(),
            seq: self.seq().to_vec(),
            qual: self.qual().to_vec(),
        }
    }

    /// Writes the record exactly as found in the input, including the
    /// separator text and line endings. A line terminator is added if the
    /// record was the last one in the input and did not end with one.
    pub fn write_unchanged<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        let data = &self.buffer[self.buf_pos.start..self.buf_pos.end];
        writer.write_all(data)?;
        if data.last() != Some(&b'\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// A FASTQ record that owns its data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OwnedRecord {
    pub head: Vec<u8>,
    pub seq: Vec<u8>,
    pub qual: Vec<u8>,
}

impl OwnedRecord {
    pub fn new<H, S, Q>(head: H, seq: S, qual: Q) -> Self
    where
        H: Into<Vec<u8>>,
        S: Into<Vec<u8>>,
        Q: Into<Vec<u8>>,
    {
        OwnedRecord {
            head: head.into(),
            seq: seq.into(),
            qual: qual.into(),
        }
    }
}

impl Record for OwnedRecord {
    #[inline]
    fn head(&self) -> &[u8] {
        &self.head
    }

    #[inline]
    fn seq(&self) -> &[u8] {
        &self.seq
    }

    #[inline]
    fn qual(&self) -> &[u8] {
        &self.qual
    }
}
