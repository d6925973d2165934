//! Comparator errors.

use thiserror::Error;
use unilog_color::ColorError;
use unilog_core::{Classify, CoreError, ErrorKind};
use unilog_io::IoError;

/// Result type for comparisons.
pub type CompareResult<T> = Result<T, CompareError>;

/// Errors raised while comparing images.
#[derive(Debug, Error)]
pub enum CompareError {
    /// Width, height or channel count differ.
    #[error("image dimensions differ: {a} vs {b}")]
    DimensionMismatch {
        /// Shape of the first image (`WxHxC`).
        a: String,
        /// Shape of the second image.
        b: String,
    },

    /// Loading or writing an image failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Color space lookup failed.
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Directory listing or batch plumbing failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl Classify for CompareError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            Self::Io(e) => e.kind(),
            Self::Color(e) => e.kind(),
            Self::Core(e) => e.kind(),
        }
    }
}

impl From<std::io::Error> for CompareError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(IoError::Io(e))
    }
}
