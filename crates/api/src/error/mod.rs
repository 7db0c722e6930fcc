//! Error handling for the streaming layer

pub mod types;
pub mod validate;

// Re-export the primary error type and result
pub use types::{Error, ErrorKind, Result};

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io {
            context: "I/O operation",
            message: e.to_string(),
        }
    }
}

/// Extension trait attaching a context to `std::io` failures
pub trait IoResultExt<T> {
    /// Convert a Result with IO Error to a Result with API Error
    fn map_io_err(self, context: &'static str) -> Result<T>;
}

impl<T> IoResultExt<T> for core::result::Result<T, std::io::Error> {
    fn map_io_err(self, context: &'static str) -> Result<T> {
        self.map_err(|e| Error::Io {
            context,
            message: e.to_string(),
        })
    }
}
