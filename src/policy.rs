//! Buffer growth policies
//!
//! Every record must fit into the reader's buffer as a whole. If it
//! doesn't, the buffer grows according to a [`BufPolicy`](BufPolicy).
//! The default [`StdPolicy`](StdPolicy) never refuses to grow; a limit can
//! be imposed with [`DoubleUntilLimited`](DoubleUntilLimited), in which case
//! readers return [`ErrorKind::BufferLimit`](crate::ErrorKind::BufferLimit).
//!
//! # Example
//!
//! ```no_run
//! use seqvar_io::fasta::{ReaderBuilder, Record};
//! use seqvar_io::policy::BufPolicy;
//!
//! struct Max1G;
//!
//! // Doubles each time, but refuses to grow above 1 GiB.
//! impl BufPolicy for Max1G {
//!     fn grow_to(&mut self, current_size: usize) -> Option<usize> {
//!         if current_size > 1 << 30 {
//!             return None
//!         }
//!         Some(current_size * 2)
//!     }
//! }
//!
//! let mut reader = ReaderBuilder::new()
//!     .policy(Max1G)
//!     .from_path("genome.fa")
//!     .unwrap();
//!
//! while let Some(record) = reader.next() {
//!     println!("{}", record.unwrap().id().unwrap());
//! }
//! ```

/// Policy that decides how a buffer should grow
///
/// Takes the current buffer size in bytes and returns the new
/// size the buffer should grow to. Returning `None` instead indicates
/// that the buffer has grown too big.
pub trait BufPolicy: Send {
    fn grow_to(&mut self, current_size: usize) -> Option<usize>;
}

/// Standard buffer policy: This policy corresponds to
/// `DoubleUntil(8 * 1024 * 1024)`, meaning that buffer size
/// doubles until it reaches 8 MiB. Above, it will
/// increase in steps of 8 MiB. Buffer size is not limited.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdPolicy;

impl BufPolicy for StdPolicy {
    fn grow_to(&mut self, current_size: usize) -> Option<usize> {
        Some(if current_size < 1 << 23 {
            current_size * 2
        } else {
            current_size + (1 << 23)
        })
    }
}

/// Buffer size doubles until it reaches a given limit
/// (in bytes). Above, it will increase linearly in
/// steps of 'limit'. Buffer size is not limited.
#[derive(Debug, Clone, Copy)]
pub struct DoubleUntil(pub usize);

impl BufPolicy for DoubleUntil {
    fn grow_to(&mut self, current_size: usize) -> Option<usize> {
        Some(if current_size < self.0 {
            current_size * 2
        } else {
            current_size + self.0
        })
    }
}

/// Like [`DoubleUntil`](DoubleUntil), but buffer size is additionally
/// limited to `limit` bytes.
#[derive(Debug, Clone, Copy)]
pub struct DoubleUntilLimited {
    double_until: usize,
    limit: usize,
}

impl DoubleUntilLimited {
    pub fn new(double_until: usize, limit: usize) -> Self {
        DoubleUntilLimited {
            double_until,
            limit,
        }
    }
}

impl BufPolicy for DoubleUntilLimited {
    fn grow_to(&mut self, current_size: usize) -> Option<usize> {
        let new_size = if current_size < self.double_until {
            current_size * 2
        } else {
            current_size + self.double_until
        };
        if new_size <= self.limit {
            Some(new_size)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_policy() {
        let mut p = StdPolicy;
        assert_eq!(p.grow_to(4), Some(8));
        assert_eq!(p.grow_to(1 << 23), Some(1 << 24));
    }

    #[test]
    fn limited() {
        let mut p = DoubleUntilLimited::new(4, 10);
        assert_eq!(p.grow_to(2), Some(4));
        assert_eq!(p.grow_to(4), Some(8));
        assert_eq!(p.grow_to(8), None);
    }
}
