//! Constant values for dcrypt-stream
//!
//! Sizes for the supported cipher algorithms and the sizing rules of the
//! fixed-capacity windows used by the stream adapters.

#![no_std]

pub mod symmetric;
pub mod window;

pub use symmetric::*;
pub use window::*;
