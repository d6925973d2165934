//! Log-to-log bridge tables.
//!
//! Node `(r, g, b)` of a generated table holds the source-to-target
//! bridge evaluated at the node's own coordinate:
//!
//! ```text
//! target_log = encode_t(M_t^-1 * M_s * decode_s(source_log))
//! ```
//!
//! # Example
//!
//! ```rust
//! use unilog_color::LogSpace;
//! use unilog_lut::{generate, GenerateOptions};
//!
//! let lut = generate(LogSpace::SLog3, LogSpace::LogC4, 17, &GenerateOptions::default()).unwrap();
//! assert_eq!(lut.size, 17);
//! assert_eq!(lut.title.as_deref(), Some("S-Log3_to_LogC4"));
//! ```

use crate::{cube, Lut3D, LutRange, LutResult};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use unilog_color::{Bridge, Cat, LogSpace};
use unilog_core::{BatchReport, BatchRunner};

/// Options for [`generate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateOptions {
    /// Chromatic adaptation used for the gamut matrices.
    pub cat: Cat,
    /// Clamp every output value to `[0, 1]`.
    pub clip: bool,
    /// Input domain minimum of the generated table.
    pub domain_min: [f32; 3],
    /// Input domain maximum of the generated table.
    pub domain_max: [f32; 3],
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            cat: Cat::Cat02,
            clip: false,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
        }
    }
}

/// Builds the `size^3` bridge table from `source` to `target`.
///
/// Fails with `NonFinite` if the bridge produces NaN or infinity at any
/// node (only possible for extreme domains).
pub fn generate(
    source: LogSpace,
    target: LogSpace,
    size: usize,
    opts: &GenerateOptions,
) -> LutResult<Lut3D> {
    trace!(%source, %target, size, cat = %opts.cat, clip = opts.clip, "generate");

    let bridge = Bridge::new(source, target, opts.cat)?;
    let clip = opts.clip;
    let lut = Lut3D::from_fn(size, opts.domain_min, opts.domain_max, |c| {
        let out = bridge.apply(c);
        if clip { out.map(|v| v.clamp(0.0, 1.0)) } else { out }
    })?
    .with_title(format!("{}_to_{}", source.name(), target.name()));

    let range = LutRange::of(&lut);
    debug!(%source, %target, %range, "generated");
    Ok(lut)
}

/// Default output file name: `{source}_to_{target}_{size}.cube`, with
/// spaces turned into underscores and dots removed.
pub fn default_file_name(source: LogSpace, target: LogSpace, size: usize) -> String {
    format!(
        "{}_to_{}_{}.{}",
        source.file_token(),
        target.file_token(),
        size,
        cube::EXTENSION
    )
}

/// One unit of a generation batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Source space.
    pub source: LogSpace,
    /// Target space.
    pub target: LogSpace,
    /// Grid size.
    pub size: usize,
}

impl GenerateRequest {
    /// File name this request is written to.
    pub fn file_name(&self) -> String {
        default_file_name(self.source, self.target, self.size)
    }
}

/// Requests from `source` to every other registered space, or to the
/// spaces in `targets` when given. `source` itself is always skipped.
pub fn all_targets(source: LogSpace, size: usize, targets: Option<&[LogSpace]>) -> Vec<GenerateRequest> {
    let pool: &[LogSpace] = targets.unwrap_or(&LogSpace::ALL);
    pool.iter()
        .copied()
        .filter(|&t| t != source)
        .map(|target| GenerateRequest {
            source,
            target,
            size,
        })
        .collect()
}

/// Generates and writes every request into `output_dir`.
///
/// Each item is independent: a failure is recorded in the report and the
/// rest still run. The value of a successful item is the written path.
pub fn generate_batch(
    requests: Vec<GenerateRequest>,
    opts: &GenerateOptions,
    runner: &BatchRunner,
    output_dir: &Path,
) -> LutResult<BatchReport<PathBuf>> {
    trace!(count = requests.len(), dir = %output_dir.display(), "generate_batch");
    std::fs::create_dir_all(output_dir)?;

    let units = requests
        .into_iter()
        .map(|req| (req.file_name(), req))
        .collect();

    let report = runner.run(units, |req: GenerateRequest| -> LutResult<PathBuf> {
        let lut = generate(req.source, req.target, req.size, opts)?;
        let path = output_dir.join(req.file_name());
        cube::write(&path, &lut)?;
        Ok(path)
    })?;
    Ok(report)
}
