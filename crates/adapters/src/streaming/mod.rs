//! Adapters for stream ciphers
//!
//! Stream ciphers have an alignment of one byte, so nothing is ever held
//! back: every byte handed over is transformed and passed along at once.

use dcrypt_stream_api::error::{validate, Result};
use dcrypt_stream_api::{
    CipherProvider, CipherSession, Direction, KeySpec, Mode, ReadStream, StreamConfig,
    WriteStream,
};
use dcrypt_stream_cipher::{initialize_library, DefaultProvider};

use crate::window::Window;

/// Encrypting sink that transforms in place inside the wrapped sink's span.
///
/// The span returned by [`next_write`](WriteStream::next_write) is the
/// wrapped sink's own span. On [`advance_write`](WriteStream::advance_write)
/// the committed bytes are encrypted where they lie and then committed to
/// the wrapped sink, so the adapter owns no buffer at all.
///
/// A failed commit leaves the keystream ahead of the sink, so after any
/// error from the sink or the cipher the encryptor refuses further writes.
pub struct StreamEncryptor<W, P: CipherProvider = DefaultProvider> {
    sink: W,
    session: P::Session,
    failed: bool,
}

impl<W: WriteStream> StreamEncryptor<W> {
    /// Wraps `sink` using the default cipher provider
    pub fn new(sink: W, spec: &KeySpec<'_>) -> Result<Self> {
        Self::with_provider(sink, spec)
    }
}

impl<W: WriteStream, P: CipherProvider> StreamEncryptor<W, P> {
    /// Wraps `sink` using the cipher provider `P`
    pub fn with_provider(sink: W, spec: &KeySpec<'_>) -> Result<Self> {
        initialize_library()?;
        let session = P::init(&spec.session(Direction::Encrypt, Mode::Streaming))?;
        tracing::debug!(
            algorithm = spec.algorithm.name(),
            provider = P::NAME,
            "stream encryptor ready"
        );
        Ok(Self {
            sink,
            session,
            failed: false,
        })
    }

    /// Whether an earlier write failed and the encryptor is unusable
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: WriteStream, P: CipherProvider> WriteStream for StreamEncryptor<W, P> {
    fn next_write(&mut self) -> Result<&mut [u8]> {
        validate::contract(
            !self.failed,
            "StreamEncryptor::next_write",
            "encryptor failed on an earlier write",
        )?;
        self.sink.next_write()
    }

    fn advance_write(&mut self, bytes: usize) -> Result<()> {
        validate::contract(
            !self.failed,
            "StreamEncryptor::advance_write",
            "encryptor failed on an earlier write",
        )?;
        // The sink span is stable until advanced, so this is the span the
        // caller just filled.
        let span = self.sink.next_write()?;
        validate::advance("StreamEncryptor::advance_write", bytes, span.len())?;
        let result = self
            .session
            .transform_in_place(&mut span[..bytes])
            .and_then(|produced| {
                tracing::trace!(bytes, produced, "stream encryptor transformed span");
                self.sink.advance_write(produced)
            });
        if result.is_err() {
            self.failed = true;
        }
        result
    }
}

/// Decrypting source that copies the wrapped source's spans into a window.
///
/// The window is refilled only once the caller has consumed all of it, so
/// the span handed out stays stable between calls. After a source or cipher
/// failure the keystream position is unknown and reads are refused.
pub struct StreamDecryptor<R, P: CipherProvider = DefaultProvider> {
    source: R,
    session: P::Session,
    window: Window,
    failed: bool,
}

impl<R: ReadStream> StreamDecryptor<R> {
    /// Wraps `source` using the default provider and window size
    pub fn new(source: R, spec: &KeySpec<'_>) -> Result<Self> {
        Self::with_config(source, spec, &StreamConfig::default())
    }
}

impl<R: ReadStream, P: CipherProvider> StreamDecryptor<R, P> {
    /// Wraps `source` using the cipher provider `P` and the given window sizing
    pub fn with_config(source: R, spec: &KeySpec<'_>, config: &StreamConfig) -> Result<Self> {
        config.validate_streaming()?;
        initialize_library()?;
        let session = P::init(&spec.session(Direction::Decrypt, Mode::Streaming))?;
        tracing::debug!(
            algorithm = spec.algorithm.name(),
            provider = P::NAME,
            window = config.window_capacity,
            "stream decryptor ready"
        );
        Ok(Self {
            source,
            session,
            window: Window::new(config.window_capacity),
            failed: false,
        })
    }

    /// Whether an earlier read failed and the decryptor is unusable
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

    /// Decrypted bytes not yet consumed by the caller
    pub fn buffered(&self) -> usize {
        self.window.len()
    }

    /// Pulls one span from the source and decrypts it into the window.
    ///
    /// Returns `false` once the source is exhausted.
    fn refill(&mut self) -> Result<bool> {
        self.window.clear();
        let copied = match self.source.next_read()? {
            Some(span) if !span.is_empty() => self.window.fill_from(span),
            _ => return Ok(false),
        };
        self.source.advance_read(copied)?;

        let produced = self.session.transform_in_place(self.window.filled_mut())?;
        self.window.truncate(produced, "StreamDecryptor::refill")?;
        tracing::trace!(copied, produced, "stream decryptor refilled window");
        Ok(true)
    }
}

impl<R: ReadStream, P: CipherProvider> ReadStream for StreamDecryptor<R, P> {
    fn next_read(&mut self) -> Result<Option<&[u8]>> {
        validate::contract(
            !self.failed,
            "StreamDecryptor::next_read",
            "decryptor failed on an earlier read",
        )?;
        if self.window.is_empty() {
            match self.refill() {
                Ok(true) => {}
                Ok(false) => return Ok(None),
                Err(e) => {
                    // Never serve bytes that were copied but not decrypted
                    self.window.clear();
                    self.failed = true;
                    return Err(e);
                }
            }
        }
        Ok(Some(self.window.filled()))
    }

    fn advance_read(&mut self, bytes: usize) -> Result<()> {
        self.window
            .consume(bytes, "StreamDecryptor::advance_read")
    }
}
