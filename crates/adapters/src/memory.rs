//! In-memory endpoints of the stream protocol

use dcrypt_stream_api::error::{validate, Result};
use dcrypt_stream_api::{ReadStream, WriteStream};
use dcrypt_stream_params::DEFAULT_WINDOW_CAPACITY;

/// Source over a borrowed byte slice.
///
/// Spans can be capped to exercise consumers against short reads.
#[derive(Debug, Clone)]
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
    max_span: usize,
}

impl<'a> SliceReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            max_span: usize::MAX,
        }
    }

    /// Hands out at most `max_span` bytes per span (at least one)
    pub fn with_max_span(data: &'a [u8], max_span: usize) -> Self {
        Self {
            data,
            pos: 0,
            max_span: max_span.max(1),
        }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn span_len(&self) -> usize {
        self.remaining().min(self.max_span)
    }
}

impl ReadStream for SliceReader<'_> {
    fn next_read(&mut self) -> Result<Option<&[u8]>> {
        if self.remaining() == 0 {
            return Ok(None);
        }
        let end = self.pos + self.span_len();
        Ok(Some(&self.data[self.pos..end]))
    }

    fn advance_read(&mut self, bytes: usize) -> Result<()> {
        validate::advance("SliceReader::advance_read", bytes, self.span_len())?;
        self.pos += bytes;
        Ok(())
    }
}

/// Growable sink collecting everything written into a `Vec<u8>`.
///
/// Each span offers `span` bytes of fresh capacity.
#[derive(Debug, Clone)]
pub struct VecWriter {
    buf: Vec<u8>,
    len: usize,
    span: usize,
}

impl Default for VecWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl VecWriter {
    pub fn new() -> Self {
        Self::with_span(DEFAULT_WINDOW_CAPACITY)
    }

    /// Offers `span` bytes per call (at least one)
    pub fn with_span(span: usize) -> Self {
        Self {
            buf: Vec::new(),
            len: 0,
            span: span.max(1),
        }
    }

    /// Bytes committed so far
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn into_inner(mut self) -> Vec<u8> {
        self.buf.truncate(self.len);
        self.buf
    }
}

impl WriteStream for VecWriter {
    fn next_write(&mut self) -> Result<&mut [u8]> {
        let end = self.len + self.span;
        if self.buf.len() < end {
            self.buf.resize(end, 0);
        }
        Ok(&mut self.buf[self.len..end])
    }

    fn advance_write(&mut self, bytes: usize) -> Result<()> {
        let offered = self.buf.len().saturating_sub(self.len).min(self.span);
        validate::advance("VecWriter::advance_write", bytes, offered)?;
        self.len += bytes;
        Ok(())
    }
}
