//! The cipher primitive contract
//!
//! A provider turns [`SessionParams`] into a [`CipherSession`]. Adapters
//! depend only on these traits, so interchangeable providers can be
//! selected when the library is built.

use crate::error::Result;
use crate::types::SessionParams;

/// Key-scheduled transform state owned by exactly one adapter
///
/// Sessions are created once and never re-initialized. Streaming-mode
/// sessions are length preserving and accept any byte count; block-mode
/// sessions accept only multiples of [`block_size`](Self::block_size) and
/// carry their chaining state across calls.
pub trait CipherSession {
    /// Transform alignment: 1 for streaming sessions
    fn block_size(&self) -> usize;

    /// Transforms `buffer` in place, returning the number of bytes produced
    fn transform_in_place(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Transforms `src` into the front of `dst`, returning the number of
    /// bytes produced. `dst` must be at least as long as `src`.
    fn transform(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize>;
}

/// Factory for cipher sessions
pub trait CipherProvider {
    /// Session type produced by this provider
    type Session: CipherSession;

    /// Provider name used in diagnostics
    const NAME: &'static str;

    /// One-time process-wide setup. Must be idempotent.
    fn initialize() -> Result<()>;

    /// Creates a session for `params`
    fn init(params: &SessionParams<'_>) -> Result<Self::Session>;
}
