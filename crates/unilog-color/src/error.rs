//! Error types for the color space model.

use thiserror::Error;
use unilog_core::{Classify, ErrorKind};

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;

/// Errors from name lookup and matrix construction.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Name not in the registry.
    #[error("unknown color space '{name}' (available: {available})")]
    UnknownColorSpace {
        /// The name as given.
        name: String,
        /// Comma-separated registry names.
        available: String,
    },

    /// Chromatic adaptation name not recognised.
    #[error(transparent)]
    UnknownCat(#[from] unilog_math::UnknownCat),

    /// A gamut's primaries do not span a triangle.
    #[error("gamut {0} has a singular primary matrix")]
    SingularGamut(&'static str),
}

impl Classify for ColorError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownColorSpace { .. } => ErrorKind::UnknownColorSpace,
            Self::UnknownCat(_) | Self::SingularGamut(_) => ErrorKind::Other,
        }
    }
}
