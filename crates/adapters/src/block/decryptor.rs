use dcrypt_stream_api::error::{validate, Error, Result};
use dcrypt_stream_api::stream::read_to_end;
use dcrypt_stream_api::{
    CipherProvider, CipherSession, Direction, KeySpec, Mode, ReadStream, StreamConfig,
};
use dcrypt_stream_cipher::{initialize_library, DefaultProvider};

use super::releasable;
use crate::padding;
use crate::window::Window;

/// Decrypting source for block ciphers.
///
/// Ciphertext pulled from the wrapped source is decrypted only up to the
/// last complete block, which stays withheld: until the source is known to
/// be exhausted, any block might be the final one carrying the padding.
/// Reads report the end of the stream once the source dries up, after
/// which [`flush`](Self::flush) decrypts the withheld block, verifies and
/// strips the padding, and makes the remaining plaintext readable.
/// A source or cipher error leaves the decryptor failed.
pub struct BlockDecryptor<R, P: CipherProvider = DefaultProvider> {
    source: R,
    session: P::Session,
    block_size: usize,
    ciphertext: Window,
    plaintext: Window,
    exhausted: bool,
    flushed: bool,
    failed: bool,
}

impl<R: ReadStream> BlockDecryptor<R> {
    /// Wraps `source` using the default provider and window size
    pub fn new(source: R, spec: &KeySpec<'_>) -> Result<Self> {
        Self::with_config(source, spec, &StreamConfig::default())
    }
}

impl<R: ReadStream, P: CipherProvider> BlockDecryptor<R, P> {
    /// Wraps `source` using the cipher provider `P` and the given window sizing
    pub fn with_config(source: R, spec: &KeySpec<'_>, config: &StreamConfig) -> Result<Self> {
        initialize_library()?;
        let session = P::init(&spec.session(Direction::Decrypt, Mode::Block))?;
        let block_size = session.block_size();
        config.validate_block(block_size)?;
        tracing::debug!(
            algorithm = spec.algorithm.name(),
            provider = P::NAME,
            block_size,
            window = config.window_capacity,
            "block decryptor ready"
        );
        Ok(Self {
            source,
            session,
            block_size,
            ciphertext: Window::new(config.window_capacity),
            plaintext: Window::new(config.window_capacity),
            exhausted: false,
            flushed: false,
            failed: false,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Decrypted bytes not yet consumed by the caller
    pub fn buffered(&self) -> usize {
        self.plaintext.len()
    }

    /// Ciphertext bytes held back from decryption
    pub fn withheld(&self) -> usize {
        self.ciphertext.len()
    }

    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    /// Whether the wrapped source has reported the end of the stream
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    /// Decrypts the withheld ciphertext and strips the padding trailer.
    ///
    /// Call once the source is exhausted, that is after
    /// [`next_read`](ReadStream::next_read) has returned `None`. Flushing
    /// earlier is a contract violation and leaves the decryptor untouched.
    /// Plaintext that becomes available is served by subsequent reads; the
    /// source is never pulled again.
    pub fn flush(&mut self) -> Result<()> {
        validate::contract(
            !self.failed,
            "BlockDecryptor::flush",
            "decryptor failed on an earlier read",
        )?;
        validate::contract(!self.flushed, "BlockDecryptor::flush", "decryptor already flushed")?;
        validate::contract(self.exhausted, "BlockDecryptor::flush", "source not exhausted")?;
        self.flushed = true;
        self.finalize()
            .inspect_err(|e| tracing::error!(error = %e, "block decryptor rejected stream tail"))
    }

    /// Reads the whole stream into `out`, flushing at the end.
    ///
    /// Returns the number of plaintext bytes appended.
    pub fn read_to_end(&mut self, out: &mut Vec<u8>) -> Result<usize> {
        let mut total = read_to_end(self, out)?;
        if !self.flushed {
            self.flush()?;
            total += read_to_end(self, out)?;
        }
        Ok(total)
    }

    fn finalize(&mut self) -> Result<()> {
        let pending = self.ciphertext.len();
        if pending == 0 {
            return Err(corrupted("stream ended without a padding block".into()));
        }
        if pending % self.block_size != 0 {
            return Err(corrupted(format!(
                "{} trailing ciphertext bytes are not a multiple of the {} byte block",
                pending, self.block_size
            )));
        }

        if self.plaintext.spare() < pending {
            self.plaintext.compact();
        }
        if self.plaintext.spare() < pending {
            return Err(Error::BufferExhausted {
                context: "BlockDecryptor::flush",
                required: pending,
                capacity: self.plaintext.spare(),
            });
        }

        let produced = self
            .session
            .transform(self.ciphertext.filled(), self.plaintext.spare_mut())?;
        self.ciphertext.clear();
        let trailer = padding::strip(&self.plaintext.spare_ref()[..produced], self.block_size)?;
        self.plaintext
            .commit(produced - trailer, "BlockDecryptor::flush")?;
        tracing::debug!(produced, trailer, "block decryptor flushed");
        Ok(())
    }

    /// Pulls source spans until plaintext is available or the source ends.
    ///
    /// Returns `false` when no plaintext could be produced.
    fn decrypt(&mut self) -> Result<bool> {
        self.plaintext.clear();
        while !self.exhausted && self.plaintext.is_empty() && self.ciphertext.spare() > 0 {
            let copied = match self.source.next_read()? {
                Some(span) if !span.is_empty() => self.ciphertext.fill_from(span),
                _ => {
                    tracing::debug!(
                        withheld = self.ciphertext.len(),
                        "block decryptor source exhausted"
                    );
                    self.exhausted = true;
                    break;
                }
            };
            self.source.advance_read(copied)?;

            let ready = releasable(self.ciphertext.len(), self.block_size);
            if ready > 0 {
                let produced = self
                    .session
                    .transform(&self.ciphertext.filled()[..ready], self.plaintext.spare_mut())?;
                self.plaintext.commit(produced, "BlockDecryptor::decrypt")?;
                self.ciphertext.shift_out(ready, "BlockDecryptor::decrypt")?;
                tracing::trace!(
                    ready,
                    withheld = self.ciphertext.len(),
                    "block decryptor released plaintext"
                );
            }
            debug_assert!(self.ciphertext.len() < 2 * self.block_size);
        }
        Ok(!self.plaintext.is_empty())
    }
}

impl<R: ReadStream, P: CipherProvider> ReadStream for BlockDecryptor<R, P> {
    fn next_read(&mut self) -> Result<Option<&[u8]>> {
        validate::contract(
            !self.failed,
            "BlockDecryptor::next_read",
            "decryptor failed on an earlier read",
        )?;
        if self.plaintext.is_empty() && !self.flushed {
            match self.decrypt() {
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "block decryptor failed, stream is incomplete");
                    self.plaintext.clear();
                    self.failed = true;
                    return Err(e);
                }
            }
        }
        if self.plaintext.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.plaintext.filled()))
    }

    fn advance_read(&mut self, bytes: usize) -> Result<()> {
        self.plaintext
            .consume(bytes, "BlockDecryptor::advance_read")
    }
}

fn corrupted(details: String) -> Error {
    Error::Corrupted {
        context: "BlockDecryptor::flush",
        details,
    }
}
