//! Ordering of raw byte spans
//!
//! Readers return records in file order. The functions in this module are
//! for callers who need to sort, merge or deduplicate records by a raw-byte
//! key. The order is lexicographic, and a span that is a prefix of another
//! sorts first.
//!
//! ```
//! use seqvar_io::compare::{compare, coordinate_key};
//!
//! let mut keys = vec![
//!     coordinate_key(b"2", 10),
//!     coordinate_key(b"1", 300),
//!     coordinate_key(b"1", 20),
//! ];
//! keys.sort_by(|a, b| compare(a, b));
//! assert_eq!(keys[0], coordinate_key(b"1", 20));
//! assert_eq!(keys[2], coordinate_key(b"2", 10));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Three-way lexicographic comparison. Defined for all pairs of spans,
/// including empty ones.
#[inline]
pub fn compare(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// A borrowed byte span ordered by [`compare`](compare)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteSpan<'a>(&'a [u8]);

impl<'a> ByteSpan<'a> {
    #[inline]
    pub fn new(span: &'a [u8]) -> Self {
        ByteSpan(span)
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }
}

impl<'a> Deref for ByteSpan<'a> {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.0
    }
}

impl<'a> PartialOrd for ByteSpan<'a> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a> Ord for ByteSpan<'a> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self.0, other.0)
    }
}

impl<'a> fmt::Debug for ByteSpan<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ByteSpan(\"{}\")", self.0.escape_ascii())
    }
}

impl<'a> From<&'a [u8]> for ByteSpan<'a> {
    fn from(span: &'a [u8]) -> Self {
        ByteSpan(span)
    }
}

/// Encodes a genomic coordinate as a key: the chromosome bytes, a `0x00`
/// separator and the position as big-endian integer. Keys compare by
/// chromosome name first, then numerically by position.
pub fn coordinate_key(chrom: &[u8], pos: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(chrom.len() + 9);
    key.extend_from_slice(chrom);
    key.push(0);
    key.extend_from_slice(&pos.to_be_bytes());
    key
}
