//! Instrumented stream endpoints

use dcrypt_stream_api::{Error, ReadStream, Result, WriteStream};

/// Sink wrapper recording the size of every committed write
#[derive(Debug, Default)]
pub struct AlignmentRecorder<W> {
    pub inner: W,
    pub writes: Vec<usize>,
}

impl<W> AlignmentRecorder<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            writes: Vec::new(),
        }
    }

    /// Whether every recorded write was a multiple of `block_size`
    pub fn aligned_to(&self, block_size: usize) -> bool {
        self.writes.iter().all(|n| n % block_size == 0)
    }
}

impl<W: WriteStream> WriteStream for AlignmentRecorder<W> {
    fn next_write(&mut self) -> Result<&mut [u8]> {
        self.inner.next_write()
    }

    fn advance_write(&mut self, bytes: usize) -> Result<()> {
        self.writes.push(bytes);
        self.inner.advance_write(bytes)
    }
}

/// Sink that accepts `budget` bytes and then fails every commit
#[derive(Debug)]
pub struct FailingSink {
    budget: usize,
    scratch: Vec<u8>,
}

impl FailingSink {
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            scratch: vec![0u8; 64],
        }
    }
}

impl WriteStream for FailingSink {
    fn next_write(&mut self) -> Result<&mut [u8]> {
        Ok(self.scratch.as_mut_slice())
    }

    fn advance_write(&mut self, bytes: usize) -> Result<()> {
        if bytes > self.budget {
            return Err(Error::Io {
                context: "failing sink",
                message: "disk full".into(),
            });
        }
        self.budget -= bytes;
        Ok(())
    }
}

/// Source that yields `data` and then fails instead of signalling the end
#[derive(Debug)]
pub struct FailingSource {
    data: Vec<u8>,
    pos: usize,
}

impl FailingSource {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }
}

impl ReadStream for FailingSource {
    fn next_read(&mut self) -> Result<Option<&[u8]>> {
        if self.pos == self.data.len() {
            return Err(Error::Io {
                context: "failing source",
                message: "connection reset".into(),
            });
        }
        Ok(Some(&self.data[self.pos..]))
    }

    fn advance_read(&mut self, bytes: usize) -> Result<()> {
        self.pos += bytes.min(self.data.len() - self.pos);
        Ok(())
    }
}

/// Source that counts pulls, for checking that a flushed decryptor leaves
/// its source alone
#[derive(Debug)]
pub struct CountingSource<R> {
    pub inner: R,
    pub pulls: usize,
}

impl<R> CountingSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, pulls: 0 }
    }
}

impl<R: ReadStream> ReadStream for CountingSource<R> {
    fn next_read(&mut self) -> Result<Option<&[u8]>> {
        self.pulls += 1;
        self.inner.next_read()
    }

    fn advance_read(&mut self, bytes: usize) -> Result<()> {
        self.inner.advance_read(bytes)
    }
}
