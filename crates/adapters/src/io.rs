//! Bridges between `std::io` and the stream protocol

use std::io::{ErrorKind, Read, Write};

use dcrypt_stream_api::error::{IoResultExt, Result};
use dcrypt_stream_api::{ReadStream, StreamConfig, WriteStream};

use crate::window::Window;

/// Source that buffers reads from a [`Read`] implementation
pub struct IoReader<R> {
    inner: R,
    buf: Window,
    eof: bool,
}

impl<R: Read> IoReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, StreamConfig::default().window_capacity)
    }

    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            buf: Window::new(capacity.max(1)),
            eof: false,
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill(&mut self) -> Result<()> {
        self.buf.clear();
        loop {
            match self.inner.read(self.buf.spare_mut()) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => return self.buf.commit(n, "IoReader::next_read"),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).map_io_err("IoReader::next_read"),
            }
        }
    }
}

impl<R: Read> ReadStream for IoReader<R> {
    fn next_read(&mut self) -> Result<Option<&[u8]>> {
        if self.buf.is_empty() && !self.eof {
            self.fill()?;
        }
        if self.buf.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.buf.filled()))
    }

    fn advance_read(&mut self, bytes: usize) -> Result<()> {
        self.buf.consume(bytes, "IoReader::advance_read")
    }
}

/// Sink that buffers writes to a [`Write`] implementation.
///
/// Buffered bytes reach the inner writer when the buffer fills, on
/// [`flush`](Self::flush) and on [`into_inner`](Self::into_inner).
pub struct IoWriter<W: Write> {
    inner: W,
    buf: Window,
}

impl<W: Write> IoWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_capacity(inner, StreamConfig::default().window_capacity)
    }

    pub fn with_capacity(inner: W, capacity: usize) -> Self {
        Self {
            inner,
            buf: Window::new(capacity.max(1)),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Writes out buffered bytes and flushes the inner writer
    pub fn flush(&mut self) -> Result<()> {
        self.drain()?;
        self.inner.flush().map_io_err("IoWriter::flush")
    }

    /// Flushes and returns the inner writer
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.inner)
    }

    fn drain(&mut self) -> Result<()> {
        if !self.buf.is_empty() {
            self.inner
                .write_all(self.buf.filled())
                .map_io_err("IoWriter::drain")?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl<W: Write> WriteStream for IoWriter<W> {
    fn next_write(&mut self) -> Result<&mut [u8]> {
        if self.buf.spare() == 0 {
            self.drain()?;
        }
        Ok(self.buf.spare_mut())
    }

    fn advance_write(&mut self, bytes: usize) -> Result<()> {
        self.buf.commit(bytes, "IoWriter::advance_write")
    }
}
