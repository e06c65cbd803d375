macro_rules! try_opt {
    ($expr: expr) => {
        match $expr {
            Ok(item) => item,
            Err(e) => return Some(Err(::std::convert::From::from(e))),
        }
    };
}

// Builder with the options shared by all readers. `$Reader` needs a
// `from_buffer(ChunkedBuffer<R, P>) -> Result<Self>` constructor.
macro_rules! impl_reader_builder {
    ($Builder:ident, $Reader:ident, $format:expr, $module:expr, $example_path:expr) => {
        #[doc = concat!("Configures and opens a ", $format, " [`", stringify!($Reader), "`](", stringify!($Reader), ").")]
        ///
        /// Recognized options are the initial buffer capacity (default: 64 KiB),
        /// the buffer growth [`policy`](crate::policy) (default: unlimited) and
        /// whether the input is gzip compressed. By default, compression is
        /// autodetected from the first two bytes.
        ///
        /// # Example
        ///
        /// ```no_run
        #[doc = concat!("use seqvar_io::", $module, "::", stringify!($Builder), ";")]
        ///
        #[doc = concat!("let reader = ", stringify!($Builder), "::new()")]
        ///     .capacity(1 << 20)
        ///     .autodetect(false)
        #[doc = concat!("    .from_path(\"", $example_path, "\")")]
        ///     .unwrap();
        /// ```
        #[derive(Debug, Clone)]
        pub struct $Builder<P = crate::policy::StdPolicy> {
            options: crate::core::ReaderOptions<P>,
        }

        impl $Builder {
            #[inline]
            pub fn new() -> Self {
                $Builder {
                    options: crate::core::ReaderOptions::default(),
                }
            }
        }

        impl Default for $Builder {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<P> $Builder<P>
        where
            P: crate::policy::BufPolicy,
        {
            /// Initial buffer capacity. The minimum allowed capacity is 3.
            #[inline]
            pub fn capacity(mut self, capacity: usize) -> Self {
                self.options.capacity = capacity;
                self
            }

            /// Applies a buffer growth policy
            #[inline]
            pub fn policy<T: crate::policy::BufPolicy>(self, policy: T) -> $Builder<T> {
                $Builder {
                    options: self.options.with_policy(policy),
                }
            }

            /// Always treat the input as gzip compressed
            #[inline]
            pub fn compressed(mut self, compressed: bool) -> Self {
                self.options.input.compressed = compressed;
                self
            }

            /// Decompress the input if it starts with the gzip magic bytes
            /// (default: `true`)
            #[inline]
            pub fn autodetect(mut self, autodetect: bool) -> Self {
                self.options.input.autodetect = autodetect;
                self
            }

            pub fn from_reader<R: std::io::Read>(self, reader: R) -> crate::Result<$Reader<R, P>> {
                $Reader::from_buffer(self.options.open(reader)?)
            }

            pub fn from_path<F: AsRef<std::path::Path>>(
                self,
                path: F,
            ) -> crate::Result<$Reader<std::fs::File, P>> {
                $Reader::from_buffer(self.options.open_path(path)?)
            }

            pub fn from_source(
                self,
                source: crate::transport::Source,
            ) -> crate::Result<$Reader<Box<dyn std::io::Read + Send>, P>> {
                log::debug!("opening {} reader from {:?}", $format, source);
                $Reader::from_buffer(self.options.open(source.open()?)?)
            }
        }
    };
}

macro_rules! impl_records_iter {
    ($Reader:ident, $OwnedRecord:ty) => {
        /// Borrowed iterator of `OwnedRecord`
        pub struct RecordsIter<'a, R, P = crate::policy::StdPolicy>
        where
            R: std::io::Read,
            P: crate::policy::BufPolicy,
        {
            rdr: &'a mut $Reader<R, P>,
        }

        impl<'a, R, P> Iterator for RecordsIter<'a, R, P>
        where
            R: std::io::Read,
            P: crate::policy::BufPolicy,
        {
            type Item = crate::Result<$OwnedRecord>;

            fn next(&mut self) -> Option<Self::Item> {
                self.rdr.next().map(|rec| rec.map(|r| r.to_owned_record()))
            }
        }

        /// Iterator of `OwnedRecord` that owns the underlying reader
        pub struct RecordsIntoIter<R, P = crate::policy::StdPolicy>
        where
            R: std::io::Read,
            P: crate::policy::BufPolicy,
        {
            rdr: $Reader<R, P>,
        }

        impl<R, P> Iterator for RecordsIntoIter<R, P>
        where
            R: std::io::Read,
            P: crate::policy::BufPolicy,
        {
            type Item = crate::Result<$OwnedRecord>;

            fn next(&mut self) -> Option<Self::Item> {
                self.rdr.next().map(|rec| rec.map(|r| r.to_owned_record()))
            }
        }
    };
}
