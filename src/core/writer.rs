use super::BUFSIZE;
use crate::error::{OrderingError, Result, TransportError};
use crate::transport::{Output, Sink};
use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Life cycle of a writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriterState {
    Created,
    HeaderWritten,
    Writing,
}

type Inner<W> = BufWriter<Output<W>>;

/// Buffered, optionally compressed output that enforces the order
/// header -> records. Dropping it without calling `finish()` flushes
/// the output on a best-effort basis.
pub(crate) struct CoreWriter<W: Write> {
    out: Option<Inner<W>>,
    state: WriterState,
    records: u64,
}

impl<W: Write> CoreWriter<W> {
    pub fn new(writer: W, compressed: bool) -> Self {
        CoreWriter {
            out: Some(BufWriter::with_capacity(BUFSIZE, Output::new(writer, compressed))),
            state: WriterState::Created,
            records: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> WriterState {
        self.state
    }

    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records
    }

    pub fn write_header_with<F>(&mut self, func: F) -> Result<()>
    where
        F: FnOnce(&mut Inner<W>) -> io::Result<()>,
    {
        match self.state {
            WriterState::Created => {}
            WriterState::HeaderWritten => return Err(OrderingError::HeaderAlreadyWritten.into()),
            WriterState::Writing => return Err(OrderingError::HeaderAfterRecords.into()),
        }
        func(self.out()?)?;
        self.state = WriterState::HeaderWritten;
        Ok(())
    }

    pub fn write_record_with<F>(&mut self, header_required: bool, func: F) -> Result<()>
    where
        F: FnOnce(&mut Inner<W>) -> io::Result<()>,
    {
        if header_required && self.state == WriterState::Created {
            return Err(OrderingError::RecordBeforeHeader.into());
        }
        func(self.out()?)?;
        self.state = WriterState::Writing;
        self.records += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out()?.flush()?;
        Ok(())
    }

    /// Flushes all buffered data, finishes compression and returns the
    /// underlying writer.
    pub fn finish(mut self) -> Result<W> {
        let inner = match self.out.take() {
            Some(out) => finish_output(out)?,
            None => return Err(already_finished().into()),
        };
        debug!("finished output after {} records", self.records);
        Ok(inner)
    }

    fn out(&mut self) -> io::Result<&mut Inner<W>> {
        self.out.as_mut().ok_or_else(already_finished)
    }
}

impl<W: Write> Drop for CoreWriter<W> {
    fn drop(&mut self) {
        if let Some(out) = self.out.take() {
            if let Err(e) = finish_output(out) {
                warn!("output could not be flushed when dropping the writer: {}", e);
            }
        }
    }
}

/// Creates a file for writing. Unless `compressed` is given, the output is
/// compressed if the file name ends with `.gz` or `.bgz`.
pub(crate) fn create_path(path: &Path, compressed: Option<bool>) -> Result<CoreWriter<File>> {
    let compress = compressed.unwrap_or_else(|| Sink::from_path(path).implies_compression());
    let file = File::create(path).map_err(|e| TransportError::from_open(e, path.to_path_buf()))?;
    debug!("writing to {} (gzip: {})", path.display(), compress);
    Ok(CoreWriter::new(file, compress))
}

pub(crate) fn open_sink(
    sink: Sink,
    compressed: Option<bool>,
) -> Result<CoreWriter<Box<dyn Write + Send>>> {
    let compress = compressed.unwrap_or_else(|| sink.implies_compression());
    debug!("writing to {:?} (gzip: {})", sink, compress);
    Ok(CoreWriter::new(sink.open()?, compress))
}

fn finish_output<W: Write>(out: Inner<W>) -> io::Result<W> {
    out.into_inner().map_err(|e| e.into_error())?.finish()
}

fn already_finished() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "writer already finished")
}
