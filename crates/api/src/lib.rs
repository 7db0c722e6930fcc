//! Public API traits and types for the dcrypt-stream library
//!
//! This crate provides the public API surface shared by the cipher
//! providers and the stream adapters: the chunked stream protocol, the
//! cipher primitive contract, the error system and configuration.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use config::StreamConfig;
pub use error::{Error, ErrorKind, Result};
pub use types::*;

pub use traits::{CipherProvider, CipherSession, ReadStream, WriteStream};

// Re-export trait modules for direct access
pub use traits::{cipher, stream};
