//! Core types for cipher sessions

use core::fmt;

use dcrypt_stream_params as params;

use crate::error::{validate, Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cipher algorithms a provider may implement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    /// AES with a 128-bit key
    Aes128,
    /// AES with a 192-bit key
    Aes192,
    /// AES with a 256-bit key
    Aes256,
    /// ChaCha20 with a 96-bit nonce (streaming mode only)
    ChaCha20,
}

impl Algorithm {
    /// Returns the name of this algorithm
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aes128 => "AES-128",
            Self::Aes192 => "AES-192",
            Self::Aes256 => "AES-256",
            Self::ChaCha20 => "ChaCha20",
        }
    }

    /// Required key length in bytes
    pub const fn key_size(self) -> usize {
        match self {
            Self::Aes128 => params::AES128_KEY_SIZE,
            Self::Aes192 => params::AES192_KEY_SIZE,
            Self::Aes256 => params::AES256_KEY_SIZE,
            Self::ChaCha20 => params::CHACHA20_KEY_SIZE,
        }
    }

    /// Required IV (or nonce) length in bytes
    pub const fn iv_size(self) -> usize {
        match self {
            Self::Aes128 | Self::Aes192 | Self::Aes256 => params::AES_IV_SIZE,
            Self::ChaCha20 => params::CHACHA20_NONCE_SIZE,
        }
    }

    /// Alignment required by a block-mode session of this algorithm
    pub const fn block_size(self) -> usize {
        match self {
            Self::Aes128 | Self::Aes192 | Self::Aes256 => params::AES_BLOCK_SIZE,
            Self::ChaCha20 => params::STREAMING_ALIGNMENT,
        }
    }

    /// Whether the algorithm has a block (chained, unpadded) mode
    pub const fn supports_block_mode(self) -> bool {
        !matches!(self, Self::ChaCha20)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction a session transforms data in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// How a session processes data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Any byte count can be transformed (CTR for AES, native ChaCha20)
    Streaming,
    /// Only whole blocks can be transformed (CBC without padding for AES)
    Block,
}

/// Key material and algorithm choice for an adapter
///
/// Direction and mode are fixed by the adapter it is handed to.
#[derive(Clone, Copy)]
pub struct KeySpec<'a> {
    pub algorithm: Algorithm,
    pub key: &'a [u8],
    pub iv: &'a [u8],
}

impl<'a> KeySpec<'a> {
    pub fn new(algorithm: Algorithm, key: &'a [u8], iv: &'a [u8]) -> Self {
        Self { algorithm, key, iv }
    }

    /// Build the full session parameters for one adapter
    pub fn session(&self, direction: Direction, mode: Mode) -> SessionParams<'a> {
        SessionParams {
            algorithm: self.algorithm,
            key: self.key,
            iv: self.iv,
            direction,
            mode,
        }
    }
}

impl fmt::Debug for KeySpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySpec")
            .field("algorithm", &self.algorithm)
            .field("key", &"[REDACTED]")
            .field("iv", &"[REDACTED]")
            .finish()
    }
}

/// Everything a provider needs to initialize one cipher session
#[derive(Clone, Copy)]
pub struct SessionParams<'a> {
    pub algorithm: Algorithm,
    pub key: &'a [u8],
    pub iv: &'a [u8],
    pub direction: Direction,
    pub mode: Mode,
}

impl SessionParams<'_> {
    /// Check key length, IV length and mode support
    pub fn validate(&self) -> Result<()> {
        let algorithm = self.algorithm.name();
        validate::length("cipher key", self.key.len(), self.algorithm.key_size()).map_err(
            |e| Error::CipherInit {
                algorithm,
                reason: e.to_string(),
            },
        )?;
        validate::length("cipher iv", self.iv.len(), self.algorithm.iv_size()).map_err(|e| {
            Error::CipherInit {
                algorithm,
                reason: e.to_string(),
            }
        })?;
        if self.mode == Mode::Block && !self.algorithm.supports_block_mode() {
            return Err(Error::CipherInit {
                algorithm,
                reason: "block mode is not supported".into(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for SessionParams<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionParams")
            .field("algorithm", &self.algorithm)
            .field("direction", &self.direction)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
