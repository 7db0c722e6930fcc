//! Pure-Rust provider built on the RustCrypto cipher crates
//!
//! Streaming mode is AES-CTR with a 128-bit big-endian counter, or native
//! ChaCha20. Block mode is AES-CBC without padding; chaining state carries
//! across transform calls so a stream may be fed in any whole-block split.

use core::fmt;

use aes::{Aes128, Aes192, Aes256, Block};
use cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};

use dcrypt_stream_api::error::{validate, Error, Result};
use dcrypt_stream_api::{
    Algorithm, CipherProvider, CipherSession, Direction, Mode, SessionParams,
};
use dcrypt_stream_params::{AES_BLOCK_SIZE, STREAMING_ALIGNMENT};

type Aes128Ctr = ctr::Ctr128BE<Aes128>;
type Aes192Ctr = ctr::Ctr128BE<Aes192>;
type Aes256Ctr = ctr::Ctr128BE<Aes256>;

macro_rules! each_aes {
    ($value:expr, $kind:ident, $c:ident => $body:expr) => {
        match $value {
            $kind::Aes128($c) => $body,
            $kind::Aes192($c) => $body,
            $kind::Aes256($c) => $body,
        }
    };
}

fn init_error<E>(algorithm: Algorithm) -> impl FnOnce(E) -> Error {
    move |_| Error::CipherInit {
        algorithm: algorithm.name(),
        reason: "key or iv rejected by cipher".into(),
    }
}

enum Keystream {
    Aes128(Aes128Ctr),
    Aes192(Aes192Ctr),
    Aes256(Aes256Ctr),
    ChaCha20(chacha20::ChaCha20),
}

impl Keystream {
    fn new(params: &SessionParams<'_>) -> Result<Self> {
        let (key, iv) = (params.key, params.iv);
        let err = init_error(params.algorithm);
        Ok(match params.algorithm {
            Algorithm::Aes128 => Self::Aes128(Aes128Ctr::new_from_slices(key, iv).map_err(err)?),
            Algorithm::Aes192 => Self::Aes192(Aes192Ctr::new_from_slices(key, iv).map_err(err)?),
            Algorithm::Aes256 => Self::Aes256(Aes256Ctr::new_from_slices(key, iv).map_err(err)?),
            Algorithm::ChaCha20 => {
                Self::ChaCha20(chacha20::ChaCha20::new_from_slices(key, iv).map_err(err)?)
            }
        })
    }

    fn apply(&mut self, buffer: &mut [u8]) {
        match self {
            Self::Aes128(c) => c.apply_keystream(buffer),
            Self::Aes192(c) => c.apply_keystream(buffer),
            Self::Aes256(c) => c.apply_keystream(buffer),
            Self::ChaCha20(c) => c.apply_keystream(buffer),
        }
    }
}

enum CbcEncrypt {
    Aes128(cbc::Encryptor<Aes128>),
    Aes192(cbc::Encryptor<Aes192>),
    Aes256(cbc::Encryptor<Aes256>),
}

impl CbcEncrypt {
    fn new(params: &SessionParams<'_>) -> Result<Self> {
        let (key, iv) = (params.key, params.iv);
        let err = init_error(params.algorithm);
        Ok(match params.algorithm {
            Algorithm::Aes128 => Self::Aes128(cbc::Encryptor::new_from_slices(key, iv).map_err(err)?),
            Algorithm::Aes192 => Self::Aes192(cbc::Encryptor::new_from_slices(key, iv).map_err(err)?),
            Algorithm::Aes256 => Self::Aes256(cbc::Encryptor::new_from_slices(key, iv).map_err(err)?),
            Algorithm::ChaCha20 => return Err(no_block_mode(params.algorithm)),
        })
    }

    fn apply(&mut self, block: &mut Block) {
        each_aes!(self, CbcEncrypt, c => c.encrypt_block_mut(block))
    }
}

enum CbcDecrypt {
    Aes128(cbc::Decryptor<Aes128>),
    Aes192(cbc::Decryptor<Aes192>),
    Aes256(cbc::Decryptor<Aes256>),
}

impl CbcDecrypt {
    fn new(params: &SessionParams<'_>) -> Result<Self> {
        let (key, iv) = (params.key, params.iv);
        let err = init_error(params.algorithm);
        Ok(match params.algorithm {
            Algorithm::Aes128 => Self::Aes128(cbc::Decryptor::new_from_slices(key, iv).map_err(err)?),
            Algorithm::Aes192 => Self::Aes192(cbc::Decryptor::new_from_slices(key, iv).map_err(err)?),
            Algorithm::Aes256 => Self::Aes256(cbc::Decryptor::new_from_slices(key, iv).map_err(err)?),
            Algorithm::ChaCha20 => return Err(no_block_mode(params.algorithm)),
        })
    }

    fn apply(&mut self, block: &mut Block) {
        each_aes!(self, CbcDecrypt, c => c.decrypt_block_mut(block))
    }
}

fn no_block_mode(algorithm: Algorithm) -> Error {
    Error::CipherInit {
        algorithm: algorithm.name(),
        reason: "block mode is not supported".into(),
    }
}

enum Engine {
    Stream(Keystream),
    CbcEncrypt(CbcEncrypt),
    CbcDecrypt(CbcDecrypt),
}

/// Cipher session backed by the RustCrypto crates
pub struct RustCryptoSession {
    engine: Engine,
    algorithm: Algorithm,
    block_size: usize,
}

impl fmt::Debug for RustCryptoSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RustCryptoSession")
            .field("algorithm", &self.algorithm)
            .field("block_size", &self.block_size)
            .finish_non_exhaustive()
    }
}

impl CipherSession for RustCryptoSession {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn transform_in_place(&mut self, buffer: &mut [u8]) -> Result<usize> {
        match &mut self.engine {
            Engine::Stream(keystream) => keystream.apply(buffer),
            Engine::CbcEncrypt(cbc) => {
                validate::aligned("CBC encrypt input", buffer.len(), AES_BLOCK_SIZE)?;
                for chunk in buffer.chunks_exact_mut(AES_BLOCK_SIZE) {
                    cbc.apply(Block::from_mut_slice(chunk));
                }
            }
            Engine::CbcDecrypt(cbc) => {
                validate::aligned("CBC decrypt input", buffer.len(), AES_BLOCK_SIZE)?;
                for chunk in buffer.chunks_exact_mut(AES_BLOCK_SIZE) {
                    cbc.apply(Block::from_mut_slice(chunk));
                }
            }
        }
        tracing::trace!(provider = RustCryptoProvider::NAME, bytes = buffer.len(), "transform");
        Ok(buffer.len())
    }

    fn transform(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        validate::min_length("transform output", dst.len(), src.len())?;
        validate::aligned("transform input", src.len(), self.block_size)?;
        let out = &mut dst[..src.len()];
        out.copy_from_slice(src);
        self.transform_in_place(out)
    }
}

/// Pure-Rust cipher provider
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoProvider;

impl CipherProvider for RustCryptoProvider {
    type Session = RustCryptoSession;

    const NAME: &'static str = "rustcrypto";

    fn initialize() -> Result<()> {
        Ok(())
    }

    fn init(params: &SessionParams<'_>) -> Result<Self::Session> {
        params.validate()?;

        let (engine, block_size) = match (params.mode, params.direction) {
            (Mode::Streaming, _) => (Engine::Stream(Keystream::new(params)?), STREAMING_ALIGNMENT),
            (Mode::Block, Direction::Encrypt) => (
                Engine::CbcEncrypt(CbcEncrypt::new(params)?),
                params.algorithm.block_size(),
            ),
            (Mode::Block, Direction::Decrypt) => (
                Engine::CbcDecrypt(CbcDecrypt::new(params)?),
                params.algorithm.block_size(),
            ),
        };

        tracing::debug!(
            provider = Self::NAME,
            algorithm = %params.algorithm,
            direction = ?params.direction,
            mode = ?params.mode,
            "cipher session created"
        );

        Ok(RustCryptoSession {
            engine,
            algorithm: params.algorithm,
            block_size,
        })
    }
}
