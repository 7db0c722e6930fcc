//! OpenSSL provider
//!
//! Uses `symm::Crypter` with padding disabled, so block-mode sessions behave
//! exactly like the pure-Rust CBC sessions: whole blocks in, whole blocks out.

use core::fmt;

use ::openssl::error::ErrorStack;
use ::openssl::symm::{Cipher, Crypter, Mode as SymmMode};
use zeroize::Zeroize;

use dcrypt_stream_api::error::{validate, Error, Result};
use dcrypt_stream_api::{
    Algorithm, CipherProvider, CipherSession, Direction, Mode, SessionParams,
};
use dcrypt_stream_params::{OPENSSL_CHACHA20_IV_SIZE, STREAMING_ALIGNMENT};

fn select_cipher(algorithm: Algorithm, mode: Mode) -> Result<Cipher> {
    Ok(match (algorithm, mode) {
        (Algorithm::Aes128, Mode::Streaming) => Cipher::aes_128_ctr(),
        (Algorithm::Aes192, Mode::Streaming) => Cipher::aes_192_ctr(),
        (Algorithm::Aes256, Mode::Streaming) => Cipher::aes_256_ctr(),
        (Algorithm::Aes128, Mode::Block) => Cipher::aes_128_cbc(),
        (Algorithm::Aes192, Mode::Block) => Cipher::aes_192_cbc(),
        (Algorithm::Aes256, Mode::Block) => Cipher::aes_256_cbc(),
        (Algorithm::ChaCha20, Mode::Streaming) => Cipher::chacha20(),
        (Algorithm::ChaCha20, Mode::Block) => {
            return Err(Error::CipherInit {
                algorithm: algorithm.name(),
                reason: "block mode is not supported".into(),
            })
        }
    })
}

fn transform_error(e: ErrorStack) -> Error {
    Error::Cipher {
        context: "openssl update",
        message: e.to_string(),
    }
}

/// Cipher session backed by an OpenSSL `Crypter`
pub struct OpenSslSession {
    crypter: Crypter,
    algorithm: Algorithm,
    block_size: usize,
    // Crypter::update needs one spare cipher block of output room
    cipher_block: usize,
    scratch: Vec<u8>,
}

impl OpenSslSession {
    /// Runs `src` through the crypter into the scratch buffer
    fn update(&mut self, src: &[u8]) -> Result<usize> {
        validate::aligned("openssl input", src.len(), self.block_size)?;
        let needed = src.len() + self.cipher_block;
        if self.scratch.len() < needed {
            // Grows to the adapter's window size on first use, then stays put
            self.scratch.resize(needed, 0);
        }
        let produced = self
            .crypter
            .update(src, &mut self.scratch[..needed])
            .map_err(transform_error)?;
        tracing::trace!(provider = OpenSslProvider::NAME, bytes = produced, "transform");
        Ok(produced)
    }
}

impl CipherSession for OpenSslSession {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn transform_in_place(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let produced = self.update(buffer)?;
        validate::min_length("transform output", buffer.len(), produced)?;
        buffer[..produced].copy_from_slice(&self.scratch[..produced]);
        Ok(produced)
    }

    fn transform(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        validate::min_length("transform output", dst.len(), src.len())?;
        let produced = self.update(src)?;
        dst[..produced].copy_from_slice(&self.scratch[..produced]);
        Ok(produced)
    }
}

impl Drop for OpenSslSession {
    fn drop(&mut self) {
        self.scratch.zeroize();
    }
}

impl fmt::Debug for OpenSslSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenSslSession")
            .field("algorithm", &self.algorithm)
            .field("block_size", &self.block_size)
            .finish_non_exhaustive()
    }
}

/// Cipher provider backed by the system OpenSSL library
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSslProvider;

impl CipherProvider for OpenSslProvider {
    type Session = OpenSslSession;

    const NAME: &'static str = "openssl";

    fn initialize() -> Result<()> {
        ::openssl::init();
        Ok(())
    }

    fn init(params: &SessionParams<'_>) -> Result<Self::Session> {
        params.validate()?;
        let cipher = select_cipher(params.algorithm, params.mode)?;

        // OpenSSL takes the 32-bit block counter in front of the ChaCha20 nonce
        let mut chacha_iv = [0u8; OPENSSL_CHACHA20_IV_SIZE];
        let iv = if params.algorithm == Algorithm::ChaCha20 {
            chacha_iv[OPENSSL_CHACHA20_IV_SIZE - params.iv.len()..].copy_from_slice(params.iv);
            &chacha_iv[..]
        } else {
            params.iv
        };

        let direction = match params.direction {
            Direction::Encrypt => SymmMode::Encrypt,
            Direction::Decrypt => SymmMode::Decrypt,
        };
        let mut crypter =
            Crypter::new(cipher, direction, params.key, Some(iv)).map_err(|e| Error::CipherInit {
                algorithm: params.algorithm.name(),
                reason: e.to_string(),
            })?;
        crypter.pad(false);
        chacha_iv.zeroize();

        let block_size = match params.mode {
            Mode::Streaming => STREAMING_ALIGNMENT,
            Mode::Block => params.algorithm.block_size(),
        };

        tracing::debug!(
            provider = Self::NAME,
            algorithm = %params.algorithm,
            direction = ?params.direction,
            mode = ?params.mode,
            "cipher session created"
        );

        Ok(OpenSslSession {
            crypter,
            algorithm: params.algorithm,
            block_size,
            cipher_block: cipher.block_size(),
            scratch: Vec::new(),
        })
    }
}
