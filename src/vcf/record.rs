use std::io;
use std::str;

use super::{write_record, FieldStore, Header};
use crate::compare::coordinate_key;
use crate::core::split_nonmissing;
use crate::error::Malformed;
use serde_derive::{Deserialize, Serialize};

const CHROM: usize = 0;
const ID: usize = 2;
const REF: usize = 3;
const ALT: usize = 4;
const QUAL: usize = 5;
const FILTER: usize = 6;
const INFO: usize = 7;
const FORMAT: usize = 8;

/// VCF record trait implemented by both `RefRecord` and `OwnedRecord`
///
/// Columns are returned as found in the input. Missing values (`.`) are
/// not translated, with the exception of [`qual()`](Record::qual).
pub trait Record {
    fn chrom(&self) -> &[u8];
    /// 1-based position
    fn pos(&self) -> u64;
    fn id(&self) -> &[u8];
    fn ref_allele(&self) -> &[u8];
    /// Comma-separated alternative alleles
    fn alt(&self) -> &[u8];
    fn qual_bytes(&self) -> &[u8];
    fn filter(&self) -> &[u8];
    fn info(&self) -> &[u8];
    /// The FORMAT column, if present
    fn format(&self) -> Option<&[u8]>;
    fn num_samples(&self) -> usize;
    /// The raw sample column at the given index
    fn sample_bytes(&self, index: usize) -> Option<&[u8]>;

    /// Writes the record as a single tab-delimited line. Empty columns
    /// are written as `.`.
    fn write<W: io::Write>(&self, writer: W) -> io::Result<()>
    where
        Self: Sized,
    {
        write_record(writer, self)
    }

    /// Returns the chromosome as string slice
    #[inline]
    fn chrom_str(&self) -> Result<&str, str::Utf8Error> {
        str::from_utf8(self.chrom())
    }

    /// Decodes the QUAL column. The missing value (`.`) results in `None`.
    fn qual(&self) -> Result<Option<f32>, Malformed> {
        let q = self.qual_bytes();
        if q == b"." || q.is_empty() {
            return Ok(None);
        }
        str::from_utf8(q)
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Some)
            .ok_or_else(|| Malformed::InvalidQuality { value: q.to_vec() })
    }

    /// Key for sorting records by genomic coordinate using
    /// [`compare`](crate::compare::compare), see
    /// [`coordinate_key`](crate::compare::coordinate_key).
    #[inline]
    fn coordinate_key(&self) -> Vec<u8> {
        coordinate_key(self.chrom(), self.pos())
    }
}

/// A VCF record that borrows data from the reader's buffer.
///
/// POS is decoded while parsing, all other columns are located lazily.
#[derive(Debug, Clone)]
pub struct RefRecord<'a> {
    pub(crate) buffer: &'a [u8],
    pub(crate) fields: &'a FieldStore,
    pub(crate) header: &'a Header,
}

impl<'a> RefRecord<'a> {
    #[inline]
    fn field(&self, i: usize) -> &'a [u8] {
        match self.fields.field_range(i) {
            Some((start, end)) => &self.buffer[start..end],
            None => b"",
        }
    }

    /// The whole line, without line terminator
    #[inline]
    pub fn line(&self) -> &'a [u8] {
        &self.buffer[self.fields.start..self.fields.end]
    }

    /// The header of the file this record comes from
    #[inline]
    pub fn header(&self) -> &'a Header {
        self.header
    }

    /// Iterates over the IDs (separated by `;`). Nothing is returned for
    /// the missing value `.`.
    pub fn ids(&self) -> impl Iterator<Item = &'a [u8]> {
        split_nonmissing(self.field(ID), b';')
    }

    /// Iterates over the alternative alleles
    pub fn alts(&self) -> impl Iterator<Item = &'a [u8]> {
        split_nonmissing(self.field(ALT), b',')
    }

    /// Iterates over the filters (separated by `;`)
    pub fn filters(&self) -> impl Iterator<Item = &'a [u8]> {
        split_nonmissing(self.field(FILTER), b';')
    }

    /// Iterates over `key=value` pairs of the INFO column. For flags, the
    /// value is empty.
    pub fn info_fields(&self) -> impl Iterator<Item = (&'a [u8], &'a [u8])> {
        split_nonmissing(self.field(INFO), b';').map(split_key_value)
    }

    /// Returns the value of an INFO field. Flags that are present result in
    /// `Some(b"")`.
    pub fn info_value(&self, key: &[u8]) -> Option<&'a [u8]> {
        self.info_fields().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Iterates over the keys of the FORMAT column
    pub fn format_keys(&self) -> impl Iterator<Item = &'a [u8]> {
        let format = if self.fields.num_fields() > FORMAT {
            self.field(FORMAT)
        } else {
            b""
        };
        split_nonmissing(format, b':')
    }

    /// Iterates over all samples
    pub fn samples(&self) -> impl Iterator<Item = Sample<'a>> + '_ {
        (0..self.num_samples()).filter_map(move |i| self.sample(i))
    }

    /// Returns the sample at the given index
    pub fn sample(&self, index: usize) -> Option<Sample<'a>> {
        if index >= self.num_samples() {
            return None;
        }
        Some(Sample {
            keys: self.field(FORMAT),
            values: self.field(FORMAT + 1 + index),
        })
    }

    /// Returns the sample with the given name, as declared in the header
    pub fn sample_by_name(&self, name: &str) -> Option<Sample<'a>> {
        self.header.sample_index(name).and_then(|i| self.sample(i))
    }

    /// Creates an owned copy of the record.
    pub fn to_owned_record(&self) -> OwnedRecord {
        OwnedRecord {
            chrom: self.chrom().to_vec(),
            pos: self.pos(),
            id: self.id().to_vec(),
            ref_allele: self.ref_allele().to_vec(),
            alt: self.alt().to_vec(),
            qual: self.qual_bytes().to_vec(),
            filter: self.filter().to_vec(),
            info: self.info().to_vec(),
            format: self.format().map(|f| f.to_vec()),
            samples: (0..self.num_samples())
                .filter_map(|i| self.sample_bytes(i))
                .map(|s| s.to_vec())
                .collect(),
        }
    }

    /// Writes the unmodified line, followed by `\n`, which is faster than
    /// [`Record::write`](Record::write)
    pub fn write_unchanged<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.line())?;
        writer.write_all(b"\n")
    }
}

impl<'a> Record for RefRecord<'a> {
    #[inline]
    fn chrom(&self) -> &[u8] {
        self.field(CHROM)
    }

    #[inline]
    fn pos(&self) -> u64 {
        self.fields.pos
    }

    #[inline]
    fn id(&self) -> &[u8] {
        self.field(ID)
    }

    #[inline]
    fn ref_allele(&self) -> &[u8] {
        self.field(REF)
    }

    #[inline]
    fn alt(&self) -> &[u8] {
        self.field(ALT)
    }

    #[inline]
    fn qual_bytes(&self) -> &[u8] {
        self.field(QUAL)
    }

    #[inline]
    fn filter(&self) -> &[u8] {
        self.field(FILTER)
    }

    #[inline]
    fn info(&self) -> &[u8] {
        self.field(INFO)
    }

    #[inline]
    fn format(&self) -> Option<&[u8]> {
        if self.fields.num_fields() > FORMAT {
            Some(self.field(FORMAT))
        } else {
            None
        }
    }

    #[inline]
    fn num_samples(&self) -> usize {
        self.fields.num_fields().saturating_sub(FORMAT + 1)
    }

    #[inline]
    fn sample_bytes(&self, index: usize) -> Option<&[u8]> {
        if index >= self.num_samples() {
            return None;
        }
        Some(self.field(FORMAT + 1 + index))
    }
}

#[inline]
fn split_key_value(field: &[u8]) -> (&[u8], &[u8]) {
    match memchr::memchr(b'=', field) {
        Some(i) => (&field[..i], &field[i + 1..]),
        None => (field, b""),
    }
}

/// The values of one sample column together with the FORMAT keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample<'a> {
    keys: &'a [u8],
    values: &'a [u8],
}

impl<'a> Sample<'a> {
    /// The raw sample column
    #[inline]
    pub fn raw(&self) -> &'a [u8] {
        self.values
    }

    /// Iterates over `(key, value)` pairs. Trailing values may be omitted
    /// in VCF, in which case there are fewer pairs than FORMAT keys.
    pub fn iter(&self) -> impl Iterator<Item = (&'a [u8], &'a [u8])> {
        split_nonmissing(self.keys, b':').zip(self.values.split(|b| *b == b':'))
    }

    /// Returns the value for a FORMAT key (e.g. `b"GT"`)
    pub fn get(&self, key: &[u8]) -> Option<&'a [u8]> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// A VCF record that owns its data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OwnedRecord {
    pub chrom: Vec<u8>,
    pub pos: u64,
    pub id: Vec<u8>,
    pub ref_allele: Vec<u8>,
    pub alt: Vec<u8>,
    pub qual: Vec<u8>,
    pub filter: Vec<u8>,
    pub info: Vec<u8>,
    pub format: Option<Vec<u8>>,
    pub samples: Vec<Vec<u8>>,
}

impl Record for OwnedRecord {
    #[inline]
    fn chrom(&self) -> &[u8] {
        &self.chrom
    }

    #[inline]
    fn pos(&self) -> u64 {
        self.pos
    }

    #[inline]
    fn id(&self) -> &[u8] {
        &self.id
    }

    #[inline]
    fn ref_allele(&self) -> &[u8] {
        &self.ref_allele
    }

    #[inline]
    fn alt(&self) -> &[u8] {
        &self.alt
    }

    #[inline]
    fn qual_bytes(&self) -> &[u8] {
        &self.qual
    }

    #[inline]
    fn filter(&self) -> &[u8] {
        &self.filter
    }

    #[inline]
    fn info(&self) -> &[u8] {
        &self.info
    }

    #[inline]
    fn format(&self) -> Option<&[u8]> {
        self.format.as_deref()
    }

    #[inline]
    fn num_samples(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    fn sample_bytes(&self, index: usize) -> Option<&[u8]> {
        self.samples.get(index).map(|s| s.as_slice())
    }
}
