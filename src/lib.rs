//! # dcrypt-stream
//!
//! Buffered cipher streams over a pull-based chunked read/write protocol.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dcrypt-stream = "0.3"
//! ```
//!
//! ```
//! use dcrypt_stream::prelude::*;
//!
//! let key = [0x2bu8; 16];
//! let iv = [0x00u8; 16];
//! let spec = KeySpec::new(Algorithm::Aes128, &key, &iv);
//!
//! let mut enc = BlockEncryptor::new(VecWriter::new(), &spec)?;
//! enc.write_all(b"twenty bytes of data")?;
//! let ciphertext = enc.finish()?.into_inner();
//! assert_eq!(ciphertext.len(), 32);
//!
//! let mut dec = BlockDecryptor::new(SliceReader::new(&ciphertext), &spec)?;
//! let mut plaintext = Vec::new();
//! dec.read_to_end(&mut plaintext)?;
//! assert_eq!(plaintext, b"twenty bytes of data");
//! # Ok::<(), dcrypt_stream::api::Error>(())
//! ```
//!
//! ## Features
//!
//! - `openssl`: OpenSSL cipher provider, used as the default provider
//! - `serde`: Serialize/Deserialize for configuration and algorithm types
//! - `strict-contracts`: panic on stream protocol violations
//! - `full`: `openssl` and `serde`
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`dcrypt-stream-params`]: Cipher and window size constants
//! - [`dcrypt-stream-api`]: Stream protocol, cipher contract, errors and configuration
//! - [`dcrypt-stream-cipher`]: Cipher providers and library bootstrap
//! - [`dcrypt-stream-adapters`]: Encrypting and decrypting stream adapters

pub use dcrypt_stream_adapters as adapters;
pub use dcrypt_stream_api as api;
pub use dcrypt_stream_cipher as cipher;
pub use dcrypt_stream_params as params;

pub use cipher::{initialize_library, is_initialized};

/// Common imports for dcrypt-stream users
pub mod prelude {
    pub use crate::api::{Error, ErrorKind, Result};

    pub use crate::api::{Algorithm, KeySpec, StreamConfig};

    pub use crate::api::stream::{read_to_end, write_all};
    pub use crate::api::{CipherProvider, CipherSession, ReadStream, WriteStream};

    pub use crate::adapters::{
        BlockDecryptor, BlockEncryptor, IoReader, IoWriter, SliceReader, StreamDecryptor,
        StreamEncryptor, VecWriter,
    };

    pub use crate::cipher::{DefaultProvider, RustCryptoProvider};

    #[cfg(feature = "openssl")]
    pub use crate::cipher::OpenSslProvider;
}
