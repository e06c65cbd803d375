//! Byte sources and sinks underneath the readers and writers.
//!
//! A [`Source`](Source) or [`Sink`](Sink) describes *where* bytes come from
//! or go to. [`Input`](Input) and [`Output`](Output) describe *how* they are
//! read or written: either as plain text or through a gzip adapter.
//! Both adapters implement `io::Read` / `io::Write`, so the parsers never
//! see the difference.
//!
//! Gzip input is recognized by its magic bytes (`1f 8b`) unless
//! autodetection is turned off. Since decoding is done with
//! `MultiGzDecoder`, concatenated gzip members (such as BGZF) are
//! decoded as one stream.

use crate::error::TransportError;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};

/// Magic bytes at the start of every gzip member
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Where input bytes come from.
pub enum Source {
    Path(PathBuf),
    Stdin,
    Stream(Box<dyn Read + Send>),
    Bytes(Vec<u8>),
}

impl Source {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Source::Path(path.as_ref().to_path_buf())
    }

    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Source::Stream(Box::new(reader))
    }

    /// Opens the underlying channel. Files are opened here, so this is
    /// where `NotFound` and `PermissionDenied` are reported.
    pub fn open(self) -> Result<Box<dyn Read + Send>, TransportError> {
        Ok(match self {
            Source::Path(path) => match File::open(&path) {
                Ok(f) => Box::new(f),
                Err(e) => return Err(TransportError::from_open(e, path)),
            },
            Source::Stdin => Box::new(io::stdin()),
            Source::Stream(r) => r,
            Source::Bytes(b) => Box::new(io::Cursor::new(b)),
        })
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Source::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Source::Stdin => f.write_str("Stdin"),
            Source::Stream(_) => f.write_str("Stream"),
            Source::Bytes(b) => write!(f, "Bytes({} bytes)", b.len()),
        }
    }
}

impl From<PathBuf> for Source {
    fn from(p: PathBuf) -> Self {
        Source::Path(p)
    }
}

impl From<Vec<u8>> for Source {
    fn from(b: Vec<u8>) -> Self {
        Source::Bytes(b)
    }
}

/// Where output bytes go to.
pub enum Sink {
    Path(PathBuf),
    Stdout,
    Stream(Box<dyn Write + Send>),
}

impl Sink {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Sink::Path(path.as_ref().to_path_buf())
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Sink::Stream(Box::new(writer))
    }

    /// Returns `true` for paths ending with `.gz` or `.bgz`
    pub fn implies_compression(&self) -> bool {
        match self {
            Sink::Path(p) => matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("gz") | Some("bgz")
            ),
            _ => false,
        }
    }

    pub fn open(self) -> Result<Box<dyn Write + Send>, TransportError> {
        Ok(match self {
            Sink::Path(path) => match File::create(&path) {
                Ok(f) => Box::new(f),
                Err(e) => return Err(TransportError::from_open(e, path)),
            },
            Sink::Stdout => Box::new(io::stdout()),
            Sink::Stream(w) => w,
        })
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Sink::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Sink::Stdout => f.write_str("Stdout"),
            Sink::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// Options deciding whether input is decompressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputOptions {
    /// Always decompress
    pub compressed: bool,
    /// Decompress if the input starts with the gzip magic bytes
    pub autodetect: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        InputOptions {
            compressed: false,
            autodetect: true,
        }
    }
}

type Sniffed<R> = io::Chain<io::Cursor<Vec<u8>>, R>;

/// Input stream, either plain or gzip-compressed. The bytes read while
/// sniffing for the gzip signature are replayed in front of the stream.
pub enum Input<R: Read> {
    Plain(Sniffed<R>),
    Gzip(MultiGzDecoder<Sniffed<R>>),
}

impl<R: Read> Input<R> {
    pub fn new(mut reader: R, options: InputOptions) -> io::Result<Self> {
        let prefix = read_prefix(&mut reader, GZIP_MAGIC.len())?;
        // empty input stays empty, even if declared as compressed
        let gzip = !prefix.is_empty()
            && (options.compressed || (options.autodetect && prefix.starts_with(&GZIP_MAGIC)));
        debug!("opened input stream (gzip: {})", gzip);
        let stream = io::Cursor::new(prefix).chain(reader);
        Ok(if gzip {
            Input::Gzip(MultiGzDecoder::new(stream))
        } else {
            Input::Plain(stream)
        })
    }

    #[inline]
    pub fn is_compressed(&self) -> bool {
        matches!(self, Input::Gzip(_))
    }

    /// Classifies an error returned by `read()`. Decoder errors on a
    /// compressed stream are reported as malformed compressed data.
    pub(crate) fn classify_error(compressed: bool, err: io::Error) -> TransportError {
        let decoder_failure = matches!(
            err.kind(),
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof
        );
        if compressed && decoder_failure {
            TransportError::MalformedCompressedStream(err)
        } else {
            TransportError::Io(err)
        }
    }
}

impl<R: Read + Seek> Input<R> {
    /// Moves the underlying stream to `offset`, counted from the position
    /// at which it was handed to [`Input::new`](Input::new). Bytes that were
    /// read for compression sniffing are not replayed afterwards.
    /// Compressed input cannot be repositioned.
    pub fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        match self {
            Input::Plain(stream) => {
                let (prefix, inner) = stream.get_mut();
                let len = prefix.get_ref().len() as u64;
                prefix.set_position(len);
                inner.seek(io::SeekFrom::Start(offset))?;
                Ok(())
            }
            Input::Gzip(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "cannot seek within gzip compressed input",
            )),
        }
    }
}

impl<R: Read> Read for Input<R> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Input::Plain(r) => r.read(buf),
            Input::Gzip(r) => r.read(buf),
        }
    }
}

// Reads up to n bytes, fewer only at EOF
fn read_prefix<R: Read>(reader: &mut R, n: usize) -> io::Result<Vec<u8>> {
    let mut prefix = vec![0; n];
    let mut filled = 0;
    while filled < n {
        match reader.read(&mut prefix[filled..]) {
            Ok(0) => break,
            Ok(k) => filled += k,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    prefix.truncate(filled);
    Ok(prefix)
}

/// Output stream, either plain or gzip-compressed.
pub enum Output<W: Write> {
    Plain(W),
    Gzip(GzEncoder<W>),
}

impl<W: Write> Output<W> {
    pub fn new(writer: W, compressed: bool) -> Self {
        debug!("opened output stream (gzip: {})", compressed);
        if compressed {
            Output::Gzip(GzEncoder::new(writer, Compression::default()))
        } else {
            Output::Plain(writer)
        }
    }

    #[inline]
    pub fn is_compressed(&self) -> bool {
        matches!(self, Output::Gzip(_))
    }

    /// Writes the gzip trailer (if compressed), flushes and returns the
    /// underlying writer.
    pub fn finish(self) -> io::Result<W> {
        match self {
            Output::Plain(mut w) => {
                w.flush()?;
                Ok(w)
            }
            Output::Gzip(e) => {
                let mut w = e.finish()?;
                w.flush()?;
                Ok(w)
            }
        }
    }
}

impl<W: Write> Write for Output<W> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Plain(w) => w.write(buf),
            Output::Gzip(w) => w.write(buf),
        }
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Plain(w) => w.flush(),
            Output::Gzip(w) => w.flush(),
        }
    }
}
