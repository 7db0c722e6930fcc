//! Process-wide library initialization

use std::sync::OnceLock;

use dcrypt_stream_api::error::Result;
use dcrypt_stream_api::CipherProvider;

use crate::{DefaultProvider, RustCryptoProvider};

static STATE: OnceLock<Result<()>> = OnceLock::new();

/// Initializes every compiled-in cipher provider.
///
/// Safe to call any number of times from any thread; only the first call
/// does work and every call reports its outcome. Adapters call this before
/// creating their session.
pub fn initialize_library() -> Result<()> {
    STATE.get_or_init(initialize_providers).clone()
}

/// Whether [`initialize_library`] has run successfully
pub fn is_initialized() -> bool {
    matches!(STATE.get(), Some(Ok(())))
}

fn initialize_providers() -> Result<()> {
    RustCryptoProvider::initialize()?;
    #[cfg(feature = "openssl")]
    crate::OpenSslProvider::initialize()?;

    tracing::debug!(default_provider = DefaultProvider::NAME, "cipher providers initialized");
    Ok(())
}
