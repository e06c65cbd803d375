#![allow(dead_code)]

use std::io;

/// Returns at most one byte per `read()` call, so that every record
/// crosses several chunk boundaries.
pub struct OneByteReader<R>(pub R);

impl<R: io::Read> io::Read for OneByteReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(1);
        self.0.read(&mut buf[..n])
    }
}

/// Returns an error after a number of bytes were read
pub struct FailingReader<R> {
    pub inner: R,
    pub remaining: usize,
}

impl<R: io::Read> io::Read for FailingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken"));
        }
        let n = buf.len().min(self.remaining);
        let n = self.inner.read(&mut buf[..n])?;
        self.remaining -= n;
        Ok(n)
    }
}

#[macro_export]
macro_rules! validate_position {
    ($position:expr, $expected:expr) => {
        assert_eq!($position.line(), $expected.line(), "line mismatch");
        assert_eq!($position.byte(), $expected.byte(), "byte offset mismatch");
        assert_eq!(
            $position.record(),
            $expected.record(),
            "record index mismatch"
        );
    };
}

/// Runs the block with readers of all initial capacities from 3 to 199,
/// and additionally with an input delivered byte by byte.
#[macro_export]
macro_rules! test_reader {
    ($Builder:path, $input:expr, $reader:ident, $block:block) => {
        for cap in 3..200 {
            let res = std::panic::catch_unwind(|| {
                #[allow(unused_mut)]
                let mut $reader = <$Builder>::new().capacity(cap).from_reader($input).unwrap();
                $block
            });
            if res.is_err() {
                panic!("Reader failed at capacity {}", cap);
            }
        }
        let res = std::panic::catch_unwind(|| {
            #[allow(unused_mut)]
            let mut $reader = <$Builder>::new()
                .capacity(3)
                .from_reader($crate::common::OneByteReader($input))
                .unwrap();
            $block
        });
        if res.is_err() {
            panic!("Reader failed with one-byte reads");
        }
    };
}
