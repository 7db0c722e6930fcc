//! Fixtures shared by the dcrypt-stream integration tests and benchmarks
pub mod sinks;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use dcrypt_stream_api::Algorithm;

/// Deterministic pseudo-random bytes for `seed`
pub fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut out = vec![0u8; len];
    rng.fill_bytes(&mut out);
    out
}

/// Key and IV of the right sizes for `algorithm`
pub struct Material {
    pub key: Vec<u8>,
    pub iv: Vec<u8>,
}

impl Material {
    pub fn random(algorithm: Algorithm, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut key = vec![0u8; algorithm.key_size()];
        let mut iv = vec![0u8; algorithm.iv_size()];
        rng.fill_bytes(&mut key);
        rng.fill_bytes(&mut iv);
        Self { key, iv }
    }

    pub fn spec(&self, algorithm: Algorithm) -> dcrypt_stream_api::KeySpec<'_> {
        dcrypt_stream_api::KeySpec::new(algorithm, &self.key, &self.iv)
    }
}

pub const ALL_ALGORITHMS: [Algorithm; 4] = [
    Algorithm::Aes128,
    Algorithm::Aes192,
    Algorithm::Aes256,
    Algorithm::ChaCha20,
];

pub const BLOCK_ALGORITHMS: [Algorithm; 3] = [Algorithm::Aes128, Algorithm::Aes192, Algorithm::Aes256];
