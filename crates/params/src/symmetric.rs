//! Constants for symmetric encryption algorithms

/// AES-128 key size in bytes
pub const AES128_KEY_SIZE: usize = 16;

/// AES-192 key size in bytes
pub const AES192_KEY_SIZE: usize = 24;

/// AES-256 key size in bytes
pub const AES256_KEY_SIZE: usize = 32;

/// AES block size in bytes
pub const AES_BLOCK_SIZE: usize = 16;

/// AES IV size in bytes (CBC IV and CTR initial counter block)
pub const AES_IV_SIZE: usize = 16;

/// ChaCha20 key size in bytes
pub const CHACHA20_KEY_SIZE: usize = 32;

/// ChaCha20 nonce size in bytes
pub const CHACHA20_NONCE_SIZE: usize = 12;

/// Length of the IV OpenSSL expects for ChaCha20 (32-bit counter + nonce)
pub const OPENSSL_CHACHA20_IV_SIZE: usize = 16;

/// Transform alignment of any streaming-mode session
pub const STREAMING_ALIGNMENT: usize = 1;
