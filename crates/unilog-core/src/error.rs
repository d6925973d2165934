//! Error kinds shared across the workspace.
//!
//! Each library crate has its own `thiserror` enum. Those enums implement
//! [`Classify`] so that adapters (the CLI, batch reports) can reduce any
//! failure to one [`ErrorKind`] and a process exit code without knowing
//! the concrete error type.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code used when a batch finished but at least one item failed.
pub const BATCH_FAILED_EXIT: u8 = 10;

/// The closed set of failure kinds an engine operation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A color space name is not in the registry.
    UnknownColorSpace,
    /// A LUT file has a missing or unparseable header or body line.
    MalformedFile,
    /// A LUT body does not hold exactly `N^3` entries.
    SizeMismatch,
    /// A parsed or generated value is NaN or infinite.
    NonFiniteValue,
    /// A table with zero nodes was passed to an operation.
    EmptyTable,
    /// Two images differ in width, height or channel count.
    DimensionMismatch,
    /// An input path does not exist.
    FileNotFound,
    /// Any other I/O failure (permissions, disk full, codec errors).
    Io,
    /// Usage errors and everything not covered above.
    Other,
}

impl ErrorKind {
    /// Process exit code for this kind.
    ///
    /// ```rust
    /// use unilog_core::ErrorKind;
    ///
    /// assert_eq!(ErrorKind::MalformedFile.exit_code(), 3);
    /// assert_eq!(ErrorKind::Other.exit_code(), 1);
    /// ```
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Other => 1,
            Self::UnknownColorSpace => 2,
            Self::MalformedFile => 3,
            Self::SizeMismatch => 4,
            Self::NonFiniteValue => 5,
            Self::EmptyTable => 6,
            Self::DimensionMismatch => 7,
            Self::FileNotFound => 8,
            Self::Io => 9,
        }
    }

    /// Short identifier used in batch reports and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::UnknownColorSpace => "UnknownColorSpace",
            Self::MalformedFile => "MalformedFile",
            Self::SizeMismatch => "SizeMismatch",
            Self::NonFiniteValue => "NonFiniteValue",
            Self::EmptyTable => "EmptyTable",
            Self::DimensionMismatch => "DimensionMismatch",
            Self::FileNotFound => "FileNotFound",
            Self::Io => "Io",
            Self::Other => "Other",
        }
    }

    /// Maps a std I/O error to `FileNotFound` or `Io`.
    pub fn from_io(err: &std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound
        } else {
            Self::Io
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reduces a concrete error to an [`ErrorKind`].
pub trait Classify {
    /// The kind this error belongs to.
    fn kind(&self) -> ErrorKind;
}

impl Classify for std::io::Error {
    fn kind(&self) -> ErrorKind {
        ErrorKind::from_io(self)
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by settings loading and batch plumbing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Settings file could not be parsed or holds invalid values.
    #[error("invalid settings: {0}")]
    Settings(String),

    /// A path expected to be a directory is not one.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A required input path does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Worker pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(String),

    /// Underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Classify for CoreError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound(_) | Self::NotADirectory(_) => ErrorKind::FileNotFound,
            Self::Io(e) => ErrorKind::from_io(e),
            Self::Settings(_) | Self::ThreadPool(_) => ErrorKind::Other,
        }
    }
}
