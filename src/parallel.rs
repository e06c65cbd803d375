//! Processing of several inputs in parallel
//!
//! A reader is a single-pass sequential stream and does no background work.
//! Throughput scales by giving each worker thread its own reader, which is
//! what [`process_parallel`](process_parallel) does.
//!
//! # Example
//!
//! Counts the records of several FASTA files:
//!
//! ```no_run
//! use seqvar_io::fasta::Reader;
//! use seqvar_io::parallel::process_parallel;
//!
//! let paths = vec!["a.fasta", "b.fasta.gz", "c.fasta"];
//!
//! let counts = process_parallel(paths, 2, |path| -> seqvar_io::Result<usize> {
//!     let mut reader = Reader::from_path(path)?;
//!     let mut n = 0;
//!     while let Some(record) = reader.next() {
//!         record?;
//!         n += 1;
//!     }
//!     Ok(n)
//! });
//!
//! for count in counts {
//!     println!("{}", count.unwrap());
//! }
//! ```

use log::debug;
use std::sync::mpsc;

/// Applies `func` to every input on a pool of `n_threads` worker threads
/// and returns the results in input order. With `n_threads == 0`, a single
/// thread is used.
///
/// Errors are not treated in a special way: if `func` returns a `Result`,
/// every input is still processed, and each error ends up at the position
/// of its input.
pub fn process_parallel<I, T, F>(inputs: I, n_threads: u32, func: F) -> Vec<T>
where
    I: IntoIterator,
    I::Item: Send,
    T: Send,
    F: Fn(I::Item) -> T + Sync,
{
    let n_threads = n_threads.max(1);
    let (send, recv) = mpsc::channel();
    let mut pool = scoped_threadpool::Pool::new(n_threads);
    let mut n = 0;

    pool.scoped(|scope| {
        let func = &func;
        for (i, input) in inputs.into_iter().enumerate() {
            let send = send.clone();
            scope.execute(move || {
                // receiver outlives the scope
                send.send((i, func(input))).ok();
            });
            n += 1;
        }
    });
    drop(send);
    debug!("processed {} inputs using {} threads", n, n_threads);

    let mut results: Vec<_> = recv.into_iter().collect();
    debug_assert_eq!(results.len(), n);
    results.sort_unstable_by_key(|(i, _)| *i);
    results.into_iter().map(|(_, res)| res).collect()
}
