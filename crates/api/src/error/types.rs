//! Error type definitions for streaming cipher operations

use thiserror::Error as ThisError;

/// Primary error type for the streaming layer
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// A caller broke the chunked stream protocol or used a finished adapter
    #[error("{operation}: contract violation: {reason}")]
    ContractViolation {
        operation: &'static str,
        reason: &'static str,
    },

    /// A caller tried to advance past the span it was handed
    #[error("{operation}: cannot advance {requested} bytes, only {available} available")]
    AdvanceOutOfBounds {
        operation: &'static str,
        requested: usize,
        available: usize,
    },

    /// The wrapped source or sink failed
    #[error("{context}: I/O failure: {message}")]
    Io {
        context: &'static str,
        message: String,
    },

    /// Ciphertext is truncated, tampered with, or was produced by a
    /// differently configured encryptor
    #[error("{context}: corrupted stream: {details}")]
    Corrupted {
        context: &'static str,
        details: String,
    },

    /// A fixed window cannot hold what the operation must place in it
    #[error("{context}: buffer exhausted (need {required} bytes, capacity {capacity})")]
    BufferExhausted {
        context: &'static str,
        required: usize,
        capacity: usize,
    },

    /// The cipher provider rejected the session parameters
    #[error("cipher initialization failed for {algorithm}: {reason}")]
    CipherInit {
        algorithm: &'static str,
        reason: String,
    },

    /// Invalid length error with context
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Adapter configuration does not fit the cipher
    #[error("{context}: invalid configuration: {reason}")]
    Config {
        context: &'static str,
        reason: String,
    },

    /// The cipher provider failed while transforming data
    #[error("{context}: cipher transform failed: {message}")]
    Cipher {
        context: &'static str,
        message: String,
    },
}

/// Broad category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller bug: protocol misuse
    Contract,
    /// Wrapped stream failure, propagated without retry
    Io,
    /// Untrustworthy stream contents or an impossible buffer state
    Corruption,
    /// Bad keys, IVs, algorithms or window sizing
    Configuration,
    /// Provider failure during a transform
    Cipher,
}

/// Result type for streaming cipher operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Returns the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ContractViolation { .. } | Self::AdvanceOutOfBounds { .. } => ErrorKind::Contract,
            Self::Io { .. } => ErrorKind::Io,
            Self::Corrupted { .. } | Self::BufferExhausted { .. } => ErrorKind::Corruption,
            Self::CipherInit { .. } | Self::InvalidLength { .. } | Self::Config { .. } => {
                ErrorKind::Configuration
            }
            Self::Cipher { .. } => ErrorKind::Cipher,
        }
    }

    /// Whether the adapter that produced this error can no longer be trusted.
    ///
    /// Fatal errors must never be "corrected" by the caller: the stream
    /// contents are corrupt or the adapter is misconfigured for its cipher.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Corruption
    }
}
