//! Fixed-capacity window buffer
//!
//! A window holds one valid region `[start, end)` inside a byte array
//! allocated once at construction. Unconsumed tails are compacted to the
//! front instead of wrapping around.

use zeroize::Zeroize;

use dcrypt_stream_api::error::{validate, Result};

/// Byte array with a cursor-tracked valid region
pub struct Window {
    data: Box<[u8]>,
    start: usize,
    end: usize,
}

impl Window {
    /// Allocates a zeroed window of `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            start: 0,
            end: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of valid bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Writable bytes after the valid region
    pub fn spare(&self) -> usize {
        self.data.len() - self.end
    }

    /// The valid region
    pub fn filled(&self) -> &[u8] {
        &self.data[self.start..self.end]
    }

    pub fn filled_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.start..self.end]
    }

    /// Writable capacity after the valid region
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.end..]
    }

    /// Read-only view of the writable capacity
    pub fn spare_ref(&self) -> &[u8] {
        &self.data[self.end..]
    }

    /// Extends the valid region by `bytes` already written into the spare area
    pub fn commit(&mut self, bytes: usize, operation: &'static str) -> Result<()> {
        validate::advance(operation, bytes, self.spare())?;
        self.end += bytes;
        self.check();
        Ok(())
    }

    /// Drops `bytes` from the front of the valid region
    pub fn consume(&mut self, bytes: usize, operation: &'static str) -> Result<()> {
        validate::advance(operation, bytes, self.len())?;
        self.start += bytes;
        self.check();
        Ok(())
    }

    /// Copies as much of `src` as fits and returns the number of bytes taken
    pub fn fill_from(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.spare());
        self.data[self.end..self.end + n].copy_from_slice(&src[..n]);
        self.end += n;
        n
    }

    /// Keeps only the first `len` valid bytes
    pub fn truncate(&mut self, len: usize, operation: &'static str) -> Result<()> {
        validate::advance(operation, len, self.len())?;
        self.end = self.start + len;
        self.check();
        Ok(())
    }

    /// Drops `bytes` from the front and moves the rest to index 0
    pub fn shift_out(&mut self, bytes: usize, operation: &'static str) -> Result<()> {
        self.consume(bytes, operation)?;
        self.compact();
        Ok(())
    }

    /// Moves the valid region to index 0
    pub fn compact(&mut self) {
        if self.start > 0 {
            self.data.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        self.check();
    }

    /// Empties the window, resetting both cursors to the front
    pub fn clear(&mut self) {
        self.start = 0;
        self.end = 0;
    }

    #[inline]
    fn check(&self) {
        debug_assert!(self.start <= self.end && self.end <= self.data.len());
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}
