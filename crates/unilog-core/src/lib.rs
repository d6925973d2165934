//! # unilog-core
//!
//! Shared building blocks for the unilog LUT engine.
//!
//! Every other crate in the workspace depends on this one for a handful of things:
//!
//! - [`ErrorKind`] / [`Classify`] - the closed set of failure kinds an
//!   operation can report, each with a stable process exit code
//! - [`Settings`] - engine defaults (grid size, domain, JND threshold,
//!   worker counts) passed explicitly into each operation
//! - [`batch`] - a bounded worker pool with cooperative cancellation and
//!   per-item reporting, plus the "pair files by name" helper used by
//!   directory modes
//! - [`write_atomic`] - all-or-nothing file output
//!
//! # Usage
//!
//! ```rust
//! use unilog_core::{BatchRunner, ErrorKind};
//!
//! let runner = BatchRunner::new(2);
//! let units = vec![("a".to_string(), 1), ("b".to_string(), 2)];
//! let report = runner
//!     .run(units, |x| Ok::<_, std::io::Error>(x * 10))
//!     .unwrap();
//! assert!(report.is_success());
//! assert_eq!(ErrorKind::UnknownColorSpace.exit_code(), 2);
//! ```
//!
//! # Dependencies
//!
//! - [`rayon`] - Worker pool for batch forms
//! - [`serde`] / [`serde_yaml`] - Settings files
//! - [`glob`] - Directory listing by extension
//! - [`thiserror`] - Error handling
//!
//! # Used By
//!
//! - `unilog-color`, `unilog-lut`, `unilog-io`, `unilog-compare`
//! - `unilog-cli` - exit codes and settings

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod batch;
mod error;
mod fsutil;
mod settings;

pub use batch::{
    pair_by_name, list_files, BatchItem, BatchOutcome, BatchReport, BatchRunner, CancelToken,
    Pairing,
};
pub use error::{Classify, CoreError, CoreResult, ErrorKind, BATCH_FAILED_EXIT};
pub use fsutil::write_atomic;
pub use settings::Settings;
