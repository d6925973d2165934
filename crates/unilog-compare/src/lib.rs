//! # unilog-compare
//!
//! Scores the difference between two renders of the same frame, for
//! example a clip graded through a bridge LUT against the same clip
//! graded natively.
//!
//! [`compare`] reports three views of the difference:
//!
//! - raw per-channel statistics in native sample units
//! - a perceptual score on the 8-bit scale with a JND count
//! - CIEDE2000 after decoding the pixels with an assumed log space
//!
//! [`heatmap`] renders where the images differ, and [`compare_dirs`]
//! runs the comparison over same-named files in two directories.
//!
//! # Usage
//!
//! ```rust
//! use unilog_compare::{compare, CompareOptions};
//! use unilog_io::Image;
//!
//! let img = Image::from_u8(1, 1, 3, vec![12, 34, 56]).unwrap();
//! let report = compare(&img, &img, &CompareOptions::default()).unwrap();
//! assert!(report.is_identical());
//! ```
//!
//! # Dependencies
//!
//! - `unilog-io` - image loading
//! - `unilog-color` - curves, gamut matrices, CIEDE2000
//! - `unilog-core` - batch runner and error kinds
//! - [`rayon`] - parallel pixel loops

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod batch;
mod diff;
mod error;
pub mod heatmap;
mod report;

pub use batch::{compare_dirs, heatmap_name, heatmap_names, DirComparison};
pub use diff::{compare, compare_files};
pub use error::{CompareError, CompareResult};
pub use heatmap::{heatmap, write_heatmap};
pub use report::{CompareOptions, DifferenceReport};
