//! Adapters for block ciphers with padding
//!
//! Block-mode sessions only accept whole blocks. The encryptor carries a
//! partial block forward between writes and pads on flush; the decryptor
//! withholds the trailing block until flush, because only then is it known
//! to be the one holding the padding trailer.

mod decryptor;
mod encryptor;

pub use decryptor::BlockDecryptor;
pub use encryptor::BlockEncryptor;

/// Length of the prefix of `pending` ciphertext bytes that may be decrypted
/// while keeping at least one complete block withheld
pub(crate) fn releasable(pending: usize, block_size: usize) -> usize {
    (pending / block_size).saturating_sub(1) * block_size
}
