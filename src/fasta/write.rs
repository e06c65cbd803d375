use std::borrow::Borrow;
use std::io;

/// Writes a header line and a sequence (not necessarily stored in a
/// `Record` instance) to the FASTA format. The sequence occupies one line.
#[inline]
pub fn write_to<W>(mut writer: W, head: &[u8], seq: &[u8]) -> io::Result<()>
where
    W: io::Write,
{
    write_head(&mut writer, head)?;
    write_seq_iter(writer, Some(seq))
}

/// Writes data to the FASTA format. ID and description parts of the header
/// are supplied separately instead of a whole header line.
#[inline]
pub fn write_parts<W>(mut writer: W, id: &[u8], desc: Option<&[u8]>, seq: &[u8]) -> io::Result<()>
where
    W: io::Write,
{
    write_id_desc(&mut writer, id, desc)?;
    write_seq_iter(writer, Some(seq))
}

/// Writes only the header line.
#[inline]
pub fn write_head<W>(mut writer: W, head: &[u8]) -> io::Result<()>
where
    W: io::Write,
{
    writer.write_all(b">")?;
    writer.write_all(head)?;
    writer.write_all(b"\n")
}

/// Writes only the header line given ID and description parts.
#[inline]
pub fn write_id_desc<W>(mut writer: W, id: &[u8], desc: Option<&[u8]>) -> io::Result<()>
where
    W: io::Write,
{
    writer.write_all(b">")?;
    writer.write_all(id)?;
    if let Some(d) = desc {
        writer.write_all(b" ")?;
        writer.write_all(d)?;
    }
    writer.write_all(b"\n")
}

/// Writes the sequence lines joined to a single line. An empty sequence
/// results in an empty line.
#[inline]
pub fn write_seq_iter<W, S, L>(mut writer: W, seq: S) -> io::Result<()>
where
    W: io::Write,
    S: IntoIterator<Item = L>,
    L: Borrow<[u8]>,
{
    for line in seq {
        writer.write_all(line.borrow())?;
    }
    writer.write_all(b"\n")
}

/// Writes the sequence lines (such as [`SeqLines`](super::SeqLines)) and
/// wraps the output to a maximum width specified by `wrap`. An empty
/// sequence results in an empty line.
///
/// # Panics
///
/// Panics if `wrap` is 0.
#[inline]
pub fn write_wrap_seq_iter<W, S, L>(mut writer: W, seq: S, wrap: usize) -> io::Result<()>
where
    W: io::Write,
    S: IntoIterator<Item = L>,
    L: Borrow<[u8]>,
{
    assert!(wrap > 0);
    let mut n_line = 0;
    for line in seq {
        let mut chunk = line.borrow();
        while !chunk.is_empty() {
            if n_line == wrap {
                writer.write_all(b"\n")?;
                n_line = 0;
            }
            let n = chunk.len().min(wrap - n_line);
            writer.write_all(&chunk[..n])?;
            n_line += n;
            chunk = &chunk[n..];
        }
    }
    writer.write_all(b"\n")
}
