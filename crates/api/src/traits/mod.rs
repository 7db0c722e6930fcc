//! Trait definitions for the streaming layer

pub mod cipher;
pub mod stream;

pub use cipher::{CipherProvider, CipherSession};
pub use stream::{ReadStream, WriteStream};
