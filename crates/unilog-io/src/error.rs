//! Error types for image I/O.

use std::io;
use thiserror::Error;
use unilog_core::{Classify, ErrorKind};

/// Image I/O error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Extension or signature not recognized.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Color type or bit depth the engine does not handle.
    #[error("unsupported pixel layout: {0}")]
    UnsupportedLayout(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    Decode(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    Encode(String),

    /// Buffer does not match the declared dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Result type for image I/O.
pub type IoResult<T> = Result<T, IoError>;

impl Classify for IoError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(e) => ErrorKind::from_io(e),
            Self::Decode(_) | Self::Encode(_) => ErrorKind::Io,
            Self::UnsupportedFormat(_) | Self::UnsupportedLayout(_) | Self::InvalidImage(_) => {
                ErrorKind::Other
            }
        }
    }
}
