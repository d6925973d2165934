//! # unilog-lut
//!
//! The LUT algebra: a dense 3D table type and the operations over it.
//!
//! - [`Lut3D`] - `N^3` RGB nodes over a per-channel domain
//! - [`cube`] - `.cube` parsing and serialization
//! - [`sampler`] - trilinear evaluation, exact at grid nodes
//! - [`generate`] - log-to-log bridge tables
//! - [`compose`] - concatenation of two tables, plus directory modes
//! - [`resize`] - resampling to another grid size
//! - [`LutRange`] - value range and clipping analysis
//!
//! Every operation is a pure function from tables (or paths) to a new
//! table. Grid sizes and domains of the inputs need not match.
//!
//! # Usage
//!
//! ```rust
//! use unilog_lut::{compose, Lut3D};
//!
//! let a = Lut3D::identity(17).unwrap();
//! let b = Lut3D::identity(5).unwrap();
//! let c = compose::concatenate(&a, &b, Some(9)).unwrap();
//! assert_eq!(c.size, 9);
//! let out = c.apply([0.25, 0.5, 0.75]);
//! assert!((out[1] - 0.5).abs() < 1e-6);
//! ```
//!
//! # Dependencies
//!
//! - `unilog-color` - bridges for generation
//! - `unilog-core` - batch runner, atomic writes, error kinds
//! - [`rayon`] - parallel node evaluation
//! - [`thiserror`] - error handling
//!
//! # Used By
//!
//! - `unilog-cli`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod analysis;
pub mod compose;
pub mod cube;
mod error;
pub mod generate;
mod lut3d;
pub mod resize;
pub mod sampler;

pub use analysis::LutRange;
pub use compose::concatenate;
pub use error::{LutError, LutResult};
pub use generate::{generate, GenerateOptions, GenerateRequest};
pub use lut3d::Lut3D;
pub use resize::resize;
pub use sampler::evaluate;
