//! The chunked stream protocol
//!
//! Readers hand out views over bytes they already hold and are told how
//! many were consumed; writers hand out writable capacity and are told how
//! many bytes were filled. No data is copied by the protocol itself.
//!
//! Between a `next_*` call and the matching `advance_*` call the span must
//! stay the same: calling `next_*` again without advancing returns a view
//! over the same bytes. Callers must advance by exactly the number of bytes
//! consumed or produced, never more than the span length.
//!
//! Implementations are not required to be thread safe; one instance must
//! not be driven from several threads at once.

use crate::error::{Error, Result};

/// Source side of the chunked stream protocol
pub trait ReadStream {
    /// Returns the next contiguous run of readable bytes.
    ///
    /// `Ok(None)` signals the end of the stream. The call may refill the
    /// stream's internal buffer but never consumes bytes.
    fn next_read(&mut self) -> Result<Option<&[u8]>>;

    /// Commits consumption of `bytes` from the span last returned by
    /// [`next_read`](Self::next_read).
    fn advance_read(&mut self, bytes: usize) -> Result<()>;
}

/// Sink side of the chunked stream protocol
pub trait WriteStream {
    /// Returns writable capacity the caller may fill.
    fn next_write(&mut self) -> Result<&mut [u8]>;

    /// Commits that `bytes` were written into the span last returned by
    /// [`next_write`](Self::next_write).
    fn advance_write(&mut self, bytes: usize) -> Result<()>;
}

impl<T: ReadStream + ?Sized> ReadStream for &mut T {
    fn next_read(&mut self) -> Result<Option<&[u8]>> {
        (**self).next_read()
    }

    fn advance_read(&mut self, bytes: usize) -> Result<()> {
        (**self).advance_read(bytes)
    }
}

impl<T: ReadStream + ?Sized> ReadStream for Box<T> {
    fn next_read(&mut self) -> Result<Option<&[u8]>> {
        (**self).next_read()
    }

    fn advance_read(&mut self, bytes: usize) -> Result<()> {
        (**self).advance_read(bytes)
    }
}

impl<T: WriteStream + ?Sized> WriteStream for &mut T {
    fn next_write(&mut self) -> Result<&mut [u8]> {
        (**self).next_write()
    }

    fn advance_write(&mut self, bytes: usize) -> Result<()> {
        (**self).advance_write(bytes)
    }
}

impl<T: WriteStream + ?Sized> WriteStream for Box<T> {
    fn next_write(&mut self) -> Result<&mut [u8]> {
        (**self).next_write()
    }

    fn advance_write(&mut self, bytes: usize) -> Result<()> {
        (**self).advance_write(bytes)
    }
}

/// Copies `data` through the sink's write protocol until every byte has
/// been delivered or the sink fails.
pub fn write_all<W: WriteStream + ?Sized>(sink: &mut W, mut data: &[u8]) -> Result<()> {
    while !data.is_empty() {
        let span = sink.next_write()?;
        if span.is_empty() {
            return Err(Error::Io {
                context: "write_all",
                message: "sink offered no writable space".into(),
            });
        }
        let n = span.len().min(data.len());
        span[..n].copy_from_slice(&data[..n]);
        sink.advance_write(n)?;
        data = &data[n..];
    }
    Ok(())
}

/// Drains `source` into `out` until the end of the stream.
///
/// Returns the number of bytes appended.
pub fn read_to_end<R: ReadStream + ?Sized>(source: &mut R, out: &mut Vec<u8>) -> Result<usize> {
    let start = out.len();
    loop {
        let n = match source.next_read()? {
            Some(span) if !span.is_empty() => {
                out.extend_from_slice(span);
                span.len()
            }
            _ => break,
        };
        source.advance_read(n)?;
    }
    Ok(out.len() - start)
}
