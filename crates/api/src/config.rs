//! Adapter configuration

use dcrypt_stream_params::{DEFAULT_WINDOW_CAPACITY, MAX_PADDED_BLOCK_SIZE, MIN_WINDOW_BLOCKS};

use crate::error::{validate, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sizing of the fixed windows an adapter allocates at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreamConfig {
    /// Capacity in bytes of every window buffer the adapter owns
    pub window_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
        }
    }
}

impl StreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window_capacity(mut self, window_capacity: usize) -> Self {
        self.window_capacity = window_capacity;
        self
    }

    /// Validate the configuration for a streaming-mode adapter
    pub fn validate_streaming(&self) -> Result<()> {
        validate::config(
            self.window_capacity > 0,
            "stream config",
            "window capacity must be non-zero",
        )
    }

    /// Validate the configuration for a block-mode adapter of `block_size`
    pub fn validate_block(&self, block_size: usize) -> Result<()> {
        validate::config(block_size > 0, "stream config", "block size must be non-zero")?;
        validate::config(
            block_size <= MAX_PADDED_BLOCK_SIZE,
            "stream config",
            format!(
                "block size {} cannot be encoded in a padding byte (max {})",
                block_size, MAX_PADDED_BLOCK_SIZE
            ),
        )?;
        let required = block_size * MIN_WINDOW_BLOCKS;
        validate::config(
            self.window_capacity >= required,
            "stream config",
            format!(
                "window capacity {} is below {} bytes for block size {}",
                self.window_capacity, required, block_size
            ),
        )
    }
}
