use std::borrow::Borrow;
use std::io;

/// Writes a record given a header line, a sequence and a quality line.
#[inline]
pub fn write_to<W>(mut writer: W, head: &[u8], seq: &[u8], qual: &[u8]) -> io::Result<()>
where
    W: io::Write,
{
    writer.write_all(b"@")?;
    writer.write_all(head)?;
    writer.write_all(b"\n")?;
    write_seq_qual(writer, Some(seq), Some(qual))
}

/// Writes a record given ID and description separately. Sequence and
/// quality may be split into several slices, which are joined.
#[inline]
pub fn write_parts<W, S, Ls, Q, Lq>(
    mut writer: W,
    id: &[u8],
    desc: Option<&[u8]>,
    seq: S,
    qual: Q,
) -> io::Result<()>
where
    W: io::Write,
    S: IntoIterator<Item = Ls>,
    Ls: Borrow<[u8]>,
    Q: IntoIterator<Item = Lq>,
    Lq: Borrow<[u8]>,
{
    writer.write_all(b"@")?;
    writer.write_all(id)?;
    if let Some(d) = desc {
        writer.write_all(b" ")?;
        writer.write_all(d)?;
    }
    writer.write_all(b"\n")?;
    write_seq_qual(writer, seq, qual)
}

fn write_seq_qual<W, S, Ls, Q, Lq>(mut writer: W, seq: S, qual: Q) -> io::Result<()>
where
    W: io::Write,
    S: IntoIterator<Item = Ls>,
    Ls: Borrow<[u8]>,
    Q: IntoIterator<Item = Lq>,
    Lq: Borrow<[u8]>,
{
    for line in seq {
        writer.write_all(line.borrow())?;
    }
    writer.write_all(b"\n+\n")?;
    for line in qual {
        writer.write_all(line.borrow())?;
    }
    writer.write_all(b"\n")
}
