use dcrypt_stream_api::error::{validate, Result};
use dcrypt_stream_api::stream::write_all;
use dcrypt_stream_api::{
    CipherProvider, CipherSession, Direction, KeySpec, Mode, StreamConfig, WriteStream,
};
use dcrypt_stream_cipher::{initialize_library, DefaultProvider};

use crate::padding;
use crate::window::Window;

/// Encrypting sink for block ciphers.
///
/// Plaintext is written into an internal window. Whenever a whole block is
/// available, the aligned prefix is encrypted and forwarded to the wrapped
/// sink; the remainder (always shorter than one block) is moved to the
/// front of the window. [`flush`](Self::flush) appends the padding trailer
/// and must be called exactly once after the last write.
///
/// Blocks are consumed and the chaining state advances before the sink
/// accepts them, so after any sink or cipher error the encryptor is
/// failed and refuses further writes and flushes.
pub struct BlockEncryptor<W, P: CipherProvider = DefaultProvider> {
    sink: W,
    session: P::Session,
    block_size: usize,
    pending: Window,
    output: Window,
    lifecycle: Lifecycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Flushed,
    Failed,
}

/// Unflushed encryptors lose the tail of their stream when dropped
struct Lifecycle {
    state: State,
}

impl Lifecycle {
    fn ensure_open(&self, operation: &'static str) -> Result<()> {
        match self.state {
            State::Open => Ok(()),
            State::Flushed => validate::contract(false, operation, "encryptor already flushed"),
            State::Failed => {
                validate::contract(false, operation, "encryptor failed on an earlier write")
            }
        }
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        if self.state == State::Open {
            tracing::warn!("block encryptor dropped before flush, stream tail was never written");
        }
    }
}

impl<W: WriteStream> BlockEncryptor<W> {
    /// Wraps `sink` using the default provider and window size
    pub fn new(sink: W, spec: &KeySpec<'_>) -> Result<Self> {
        Self::with_config(sink, spec, &StreamConfig::default())
    }
}

impl<W: WriteStream, P: CipherProvider> BlockEncryptor<W, P> {
    /// Wraps `sink` using the cipher provider `P` and the given window sizing
    pub fn with_config(sink: W, spec: &KeySpec<'_>, config: &StreamConfig) -> Result<Self> {
        initialize_library()?;
        let session = P::init(&spec.session(Direction::Encrypt, Mode::Block))?;
        let block_size = session.block_size();
        config.validate_block(block_size)?;
        tracing::debug!(
            algorithm = spec.algorithm.name(),
            provider = P::NAME,
            block_size,
            window = config.window_capacity,
            "block encryptor ready"
        );
        Ok(Self {
            sink,
            session,
            block_size,
            pending: Window::new(config.window_capacity),
            output: Window::new(config.window_capacity),
            lifecycle: Lifecycle { state: State::Open },
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Plaintext bytes waiting for a complete block
    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    pub fn is_flushed(&self) -> bool {
        self.lifecycle.state == State::Flushed
    }

    /// Whether an earlier write failed and the encryptor is unusable
    pub fn is_failed(&self) -> bool {
        self.lifecycle.state == State::Failed
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Returns the wrapped sink, discarding any unflushed plaintext
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Writes all of `data` through the encryptor
    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        write_all(self, data)
    }

    /// Pads the stream and forwards the final blocks to the sink.
    ///
    /// The trailer must fit in the window next to the carried remainder;
    /// otherwise [`Error::BufferExhausted`](dcrypt_stream_api::Error) is
    /// returned. Flushing twice, or after a failed write, is a contract
    /// violation.
    pub fn flush(&mut self) -> Result<()> {
        self.lifecycle.ensure_open("BlockEncryptor::flush")?;
        self.lifecycle.state = State::Flushed;

        let data_len = self.pending.len();
        let trailer = padding::write_trailer(self.pending.spare_mut(), data_len, self.block_size)?;
        tracing::debug!(data_len, trailer, "block encryptor flushing");
        self.forward(trailer)?;
        debug_assert!(self.pending.is_empty());
        Ok(())
    }

    /// Flushes and returns the wrapped sink
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.into_inner())
    }

    /// Commits `bytes` of new plaintext and forwards every whole block
    fn forward(&mut self, bytes: usize) -> Result<()> {
        self.pending.commit(bytes, "BlockEncryptor::advance_write")?;
        self.emit().inspect_err(|e| {
            tracing::error!(error = %e, "block encryptor failed, stream is incomplete");
            self.lifecycle.state = State::Failed;
        })
    }

    /// Encrypts the aligned prefix of the pending window and delivers it
    fn emit(&mut self) -> Result<()> {
        let total = self.pending.len();
        let aligned = total - total % self.block_size;
        if aligned == 0 {
            return Ok(());
        }

        self.output.clear();
        let produced = self
            .session
            .transform(&self.pending.filled()[..aligned], self.output.spare_mut())?;
        self.output.commit(produced, "BlockEncryptor::forward")?;
        self.pending.shift_out(aligned, "BlockEncryptor::forward")?;
        debug_assert!(self.pending.len() < self.block_size);
        tracing::trace!(aligned, produced, carried = self.pending.len(), "block encryptor forwarding");

        write_all(&mut self.sink, self.output.filled())
    }
}

impl<W: WriteStream, P: CipherProvider> WriteStream for BlockEncryptor<W, P> {
    fn next_write(&mut self) -> Result<&mut [u8]> {
        self.lifecycle.ensure_open("BlockEncryptor::next_write")?;
        Ok(self.pending.spare_mut())
    }

    fn advance_write(&mut self, bytes: usize) -> Result<()> {
        self.lifecycle.ensure_open("BlockEncryptor::advance_write")?;
        self.forward(bytes)
    }
}
