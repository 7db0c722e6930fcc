//! Cipher providers for the dcrypt-stream library
//!
//! Implementations of the [`CipherProvider`] contract. The pure-Rust
//! [`RustCryptoProvider`] is always available; the `openssl` feature adds
//! [`OpenSslProvider`] and makes it the [`DefaultProvider`].
//!
//! Both providers produce identical output for identical parameters, so a
//! stream encrypted through one can be decrypted through the other.

#![forbid(unsafe_code)]

pub mod bootstrap;
pub mod rustcrypto;

#[cfg(feature = "openssl")]
pub mod ossl;

pub use bootstrap::{initialize_library, is_initialized};
pub use dcrypt_stream_api::{CipherProvider, CipherSession};
pub use rustcrypto::{RustCryptoProvider, RustCryptoSession};

#[cfg(feature = "openssl")]
pub use ossl::{OpenSslProvider, OpenSslSession};

/// Provider used by adapters unless another one is named
#[cfg(feature = "openssl")]
pub type DefaultProvider = OpenSslProvider;

/// Provider used by adapters unless another one is named
#[cfg(not(feature = "openssl"))]
pub type DefaultProvider = RustCryptoProvider;
