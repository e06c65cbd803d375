use super::BUFSIZE;
use crate::error::{Error, ErrorKind, Result, TransportError};
use crate::policy::{BufPolicy, StdPolicy};
use crate::transport::{Input, InputOptions};
use log::{debug, trace};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

/// Wraps `buffer_redux::BufReader`, managing buffer growth based on a
/// [`BufPolicy`](crate::policy::BufPolicy) and the relocation of buffer
/// contents. Does not implement `std::io::BufRead`.
///
/// The unconsumed part of the buffer is called the *window*. Compacting and
/// growing only happen inside [`ensure_available`](ChunkedBuffer::ensure_available),
/// which takes `&mut self`; slices previously obtained from
/// [`window`](ChunkedBuffer::window) can therefore never observe a
/// relocation.
pub struct ChunkedBuffer<R, P = StdPolicy>
where
    R: io::Read,
{
    buf_reader: buffer_redux::BufReader<Input<R>>,
    buf_policy: P,
    compressed: bool,
    eof: bool,
    // Number of bytes consumed since the start of the input
    file_offset: u64,
}

impl<R> ChunkedBuffer<R>
where
    R: io::Read,
{
    #[inline]
    pub fn new(input: Input<R>) -> Self {
        Self::with_capacity(input, BUFSIZE)
    }

    /// Creates a buffer with a given initial capacity. The minimum allowed
    /// capacity is 3.
    #[inline]
    pub fn with_capacity(input: Input<R>, capacity: usize) -> Self {
        assert!(capacity >= 3);
        ChunkedBuffer {
            compressed: input.is_compressed(),
            buf_reader: buffer_redux::BufReader::with_capacity(capacity, input),
            buf_policy: StdPolicy,
            eof: false,
            file_offset: 0,
        }
    }
}

impl<R, P> ChunkedBuffer<R, P>
where
    R: io::Read,
    P: BufPolicy,
{
    #[inline]
    pub fn set_policy<T: BufPolicy>(self, buf_policy: T) -> ChunkedBuffer<R, T> {
        ChunkedBuffer {
            buf_reader: self.buf_reader,
            buf_policy,
            compressed: self.compressed,
            eof: self.eof,
            file_offset: self.file_offset,
        }
    }

    #[inline]
    pub fn policy(&self) -> &P {
        &self.buf_policy
    }

    /// Unconsumed bytes
    #[inline]
    pub fn window(&self) -> &[u8] {
        self.buf_reader.buffer()
    }

    #[inline]
    pub fn available(&self) -> usize {
        self.buf_reader.buf_len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf_reader.capacity()
    }

    /// Returns `true` if the end of the input was reached. There may
    /// still be unconsumed bytes in the window.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    #[inline]
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Offset of the window start within the (decompressed) input
    #[inline]
    pub fn file_offset(&self) -> u64 {
        self.file_offset
    }

    /// Marks `n` bytes at the start of the window as consumed.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        assert!(n <= self.available());
        self.buf_reader.consume(n);
        self.file_offset += n as u64;
    }

    /// Pulls data from the input until at least `min_bytes` unconsumed
    /// bytes are present. Returns `false` if the input ended before.
    pub fn ensure_available(&mut self, min_bytes: usize) -> Result<bool> {
        while self.available() < min_bytes {
            if self.eof {
                return Ok(false);
            }
            self.refill()?;
        }
        Ok(true)
    }

    // Moves the window to the buffer start, grows if the window occupies
    // the whole buffer and then reads until the buffer is full or the input
    // ends.
    fn refill(&mut self) -> Result<()> {
        self.buf_reader.make_room();
        if self.available() >= self.capacity() {
            self.grow()?;
        }
        let n = self.fill()?;
        trace!(
            "refilled buffer with {} bytes ({} available, capacity {})",
            n,
            self.available(),
            self.capacity()
        );
        Ok(())
    }

    fn grow(&mut self) -> Result<()> {
        let cap = self.capacity();
        match self.buf_policy.grow_to(cap) {
            Some(new_size) if new_size > cap => {
                debug!("growing buffer from {} to {} bytes", cap, new_size);
                self.buf_reader.reserve(new_size - cap);
                Ok(())
            }
            _ => Err(Error::new(ErrorKind::BufferLimit)),
        }
    }

    // Code adapted from `io::Read::read_exact`
    fn fill(&mut self) -> Result<usize> {
        let mut num_read = 0;
        while self.buf_reader.capacity() > self.buf_reader.buf_len() {
            match self.buf_reader.read_into_buf() {
                Ok(0) => {
                    trace!("end of input at byte {}", self.file_offset + self.available() as u64);
                    self.eof = true;
                    break;
                }
                Ok(n) => num_read += n,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(Input::<R>::classify_error(self.compressed, e).into()),
            }
        }
        Ok(num_read)
    }
}

impl<R, P> ChunkedBuffer<R, P>
where
    R: io::Read + io::Seek,
    P: BufPolicy,
{
    /// Discards the buffer contents and continues reading at the given
    /// offset of the input. Only possible with uncompressed input.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        if self.compressed {
            return Err(Error::config("cannot seek within gzip compressed input"));
        }
        let n = self.available();
        self.buf_reader.consume(n);
        self.buf_reader.get_mut().seek_to(offset)?;
        self.file_offset = offset;
        self.eof = false;
        Ok(())
    }
}

/// Recognized options for opening a reader
#[derive(Debug, Clone)]
pub struct ReaderOptions<P = StdPolicy> {
    pub(crate) capacity: usize,
    pub(crate) policy: P,
    pub(crate) input: InputOptions,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            capacity: BUFSIZE,
            policy: StdPolicy,
            input: InputOptions::default(),
        }
    }
}

impl<P: BufPolicy> ReaderOptions<P> {
    pub(crate) fn with_policy<T: BufPolicy>(self, policy: T) -> ReaderOptions<T> {
        ReaderOptions {
            capacity: self.capacity,
            policy,
            input: self.input,
        }
    }

    pub(crate) fn open<R: io::Read>(self, reader: R) -> Result<ChunkedBuffer<R, P>> {
        if self.capacity < 3 {
            return Err(Error::config(format!(
                "buffer capacity must be at least 3 bytes, got {}",
                self.capacity
            )));
        }
        let input = Input::new(reader, self.input)
            .map_err(|e| Input::<R>::classify_error(self.input.compressed, e))?;
        Ok(ChunkedBuffer::with_capacity(input, self.capacity).set_policy(self.policy))
    }

    pub(crate) fn open_path<F: AsRef<Path>>(self, path: F) -> Result<ChunkedBuffer<File, P>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TransportError::from_open(e, path.to_path_buf()))?;
        debug!("reading from {}", path.display());
        self.open(file)
    }
}
