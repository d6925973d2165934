//! # unilog-math
//!
//! Linear algebra for the LUT engine.
//!
//! - [`Vec3`] - RGB / XYZ triplets
//! - [`Mat3`] - 3x3 transforms (RGB to XYZ, gamut to gamut)
//! - [`Cat`] and [`adapt_matrix`] - chromatic adaptation between white points
//!
//! Everything is `f64`. Bridge tables are evaluated through several chained
//! matrices and log curves, and the extra precision keeps node values
//! stable when they are finally stored as `f32`.
//!
//! # Design
//!
//! Matrices are row-major and act on column vectors:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! Conversion to and from [`glam::DMat3`] / [`glam::DVec3`] is provided for
//! callers that already hold glam values.
//!
//! # Usage
//!
//! ```rust
//! use unilog_math::{adapt_matrix, Cat, Mat3, Vec3, D65};
//!
//! let m = adapt_matrix(Cat::Cat02, D65, D65);
//! let v = m * Vec3::new(0.2, 0.3, 0.4);
//! assert!((v.y - 0.3).abs() < 1e-12);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - interop types
//!
//! # Used By
//!
//! - `unilog-primaries` - RGB/XYZ matrix generation
//! - `unilog-color` - gamut bridges, Lab conversion

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod adapt;
mod mat3;
mod vec3;

pub use adapt::*;
pub use mat3::*;
pub use vec3::*;
