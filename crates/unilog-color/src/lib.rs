//! # unilog-color
//!
//! The color space model behind every LUT the engine generates.
//!
//! A [`LogSpace`] is a camera log encoding: a transfer [`Curve`] paired
//! with gamut [`Primaries`]. The registry is a closed enum; names are
//! parsed once at the edge with [`FromStr`](std::str::FromStr).
//!
//! The four primitive operations:
//!
//! - [`to_linear`] / [`to_log`] - apply the space's curve per channel
//! - [`gamut_to_reference`] / [`reference_to_gamut`] - move linear RGB to
//!   and from CIE XYZ (D65)
//!
//! [`Bridge`] chains them for a source/target pair with the matrices
//! precomputed, which is what the LUT generator evaluates at every node.
//!
//! [`lab`] holds CIELAB conversion and CIEDE2000 for image comparison.
//!
//! # Usage
//!
//! ```rust
//! use unilog_color::{Bridge, LogSpace};
//! use unilog_math::Cat;
//!
//! let src: LogSpace = "slog3".parse().unwrap();
//! let bridge = Bridge::new(src, LogSpace::LogC4, Cat::Cat02).unwrap();
//! let out = bridge.apply([0.41, 0.41, 0.41]);
//! assert!(out.iter().all(|v| v.is_finite()));
//! ```
//!
//! # Dependencies
//!
//! - `unilog-transfer` - log curves
//! - `unilog-primaries` - gamut matrices
//! - `unilog-math` - matrix algebra and chromatic adaptation
//! - [`thiserror`] - error types
//!
//! # Used By
//!
//! - `unilog-lut` - bridge LUT generation
//! - `unilog-compare` - Delta E

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod bridge;
mod error;
pub mod lab;
mod space;

pub use bridge::{
    gamut_to_reference, reference_to_gamut, to_linear, to_log, to_reference_matrix, Bridge,
};
pub use error::{ColorError, ColorResult};
pub use lab::{delta_e_2000, xyz_to_lab, Lab};
pub use space::LogSpace;

pub use unilog_math::{Cat, Mat3, Vec3};
pub use unilog_primaries::{reference_white, Primaries};
pub use unilog_transfer::Curve;
