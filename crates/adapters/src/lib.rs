//! Buffered cipher adapters for the chunked stream protocol
//!
//! Four adapters sit between an application and a wrapped byte stream:
//!
//! - [`StreamEncryptor`] transforms in place inside the sink's own span.
//! - [`StreamDecryptor`] copies source spans into a window and decrypts there.
//! - [`BlockEncryptor`] accumulates until whole blocks are available, carries
//!   the remainder forward and pads on [`flush`](BlockEncryptor::flush).
//! - [`BlockDecryptor`] withholds the trailing block until
//!   [`flush`](BlockDecryptor::flush) proves it final and strips the padding.
//!
//! Every buffer is allocated at construction and never grows.
//!
//! Adapters are single-threaded: do not drive one instance from several
//! threads at once. Distinct instances share nothing.

#![forbid(unsafe_code)]

pub mod block;
pub mod io;
pub mod memory;
pub mod padding;
pub mod streaming;
pub mod window;

pub use block::{BlockDecryptor, BlockEncryptor};
pub use io::{IoReader, IoWriter};
pub use memory::{SliceReader, VecWriter};
pub use streaming::{StreamDecryptor, StreamEncryptor};
pub use window::Window;
