//! LUT error types.

use thiserror::Error;
use unilog_color::ColorError;
use unilog_core::{Classify, CoreError, ErrorKind};

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur during LUT operations.
#[derive(Debug, Error)]
pub enum LutError {
    /// Grid size below 2.
    #[error("invalid LUT size {0} (must be at least 2)")]
    InvalidSize(usize),

    /// Unparseable header, keyword or body line.
    #[error("malformed LUT: {0}")]
    Malformed(String),

    /// Body does not hold `size^3` entries.
    #[error("expected {expected} table entries, found {found}")]
    SizeMismatch {
        /// `size^3`
        expected: usize,
        /// Entries actually present
        found: usize,
    },

    /// NaN or infinity in a parsed or computed value.
    #[error("non-finite value {0}")]
    NonFinite(String),

    /// Table with zero nodes.
    #[error("LUT has no nodes")]
    EmptyTable,

    /// Invalid combination of inputs (for example two directories).
    #[error("{0}")]
    InvalidInput(String),

    /// Color space lookup or bridge construction failed.
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Directory listing or batch plumbing failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Classify for LutError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Malformed(_) => ErrorKind::MalformedFile,
            Self::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            Self::NonFinite(_) => ErrorKind::NonFiniteValue,
            Self::EmptyTable => ErrorKind::EmptyTable,
            Self::InvalidSize(_) | Self::InvalidInput(_) => ErrorKind::Other,
            Self::Color(e) => e.kind(),
            Self::Core(e) => e.kind(),
            Self::Io(e) => ErrorKind::from_io(e),
        }
    }
}
