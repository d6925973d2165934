//! Directory comparison.

use crate::{heatmap, CompareOptions, CompareResult, DifferenceReport};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use unilog_core::{pair_by_name, BatchReport, BatchRunner};
use unilog_io::SUPPORTED_EXTENSIONS;

/// Result of comparing two directories.
#[derive(Debug, Clone, PartialEq)]
pub struct DirComparison {
    /// One item per file name present in both directories.
    pub report: BatchReport<DifferenceReport>,
    /// Names found only in the first directory.
    pub only_in_a: Vec<String>,
    /// Names found only in the second directory.
    pub only_in_b: Vec<String>,
}

impl DirComparison {
    /// True when every pair compared without error and nothing was
    /// left unmatched.
    pub fn is_complete(&self) -> bool {
        self.report.is_success() && self.only_in_a.is_empty() && self.only_in_b.is_empty()
    }
}

/// Heatmap file name for an input: `{stem}_diff.png`.
pub fn heatmap_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}_diff.png")
}

/// Heatmap names for a set of paired file names, in order.
///
/// Names whose stems collide (`shot.png`, `shot.tif`) keep their full file
/// name instead (`shot.png_diff.png`, `shot.tif_diff.png`).
pub fn heatmap_names<'a>(file_names: impl IntoIterator<Item = &'a str> + Clone) -> Vec<String> {
    let mut stems: HashMap<String, usize> = HashMap::new();
    for name in file_names.clone() {
        *stems.entry(heatmap_name(name)).or_default() += 1;
    }
    file_names
        .into_iter()
        .map(|name| {
            let short = heatmap_name(name);
            if stems[&short] > 1 {
                format!("{name}_diff.png")
            } else {
                short
            }
        })
        .collect()
}

/// Compares every same-named image pair in `dir_a` and `dir_b`.
///
/// Each pair holds two full images in memory, so `runner` should be
/// sized for that. When `heatmap_dir` is given a heatmap named by
/// [`heatmap_names`] is written there for every pair.
pub fn compare_dirs(
    dir_a: &Path,
    dir_b: &Path,
    opts: &CompareOptions,
    runner: &BatchRunner,
    heatmap_dir: Option<&Path>,
) -> CompareResult<DirComparison> {
    let pairing = pair_by_name(dir_a, dir_b, SUPPORTED_EXTENSIONS)?;
    for name in &pairing.only_in_a {
        warn!(%name, dir = %dir_b.display(), "no counterpart");
    }
    for name in &pairing.only_in_b {
        warn!(%name, dir = %dir_a.display(), "no counterpart");
    }
    if let Some(dir) = heatmap_dir {
        std::fs::create_dir_all(dir)?;
    }

    let names = heatmap_names(pairing.pairs.iter().map(|(name, _, _)| name.as_str()));
    let units: Vec<(String, (PathBuf, PathBuf, String))> = pairing
        .pairs
        .into_iter()
        .zip(names)
        .map(|((name, a, b), map)| (name, (a, b, map)))
        .collect();
    info!(pairs = units.len(), workers = runner.workers(), "comparing directories");

    let report = runner.run(
        units,
        |(a, b, map): (PathBuf, PathBuf, String)| -> CompareResult<DifferenceReport> {
            let img_a = unilog_io::read(&a)?;
            let img_b = unilog_io::read(&b)?;
            let report = crate::compare(&img_a, &img_b, opts)?;
            if let Some(dir) = heatmap_dir {
                heatmap::write_heatmap(&dir.join(map), &img_a, &img_b, opts.amplify)?;
            }
            Ok(report)
        },
    )?;

    Ok(DirComparison {
        report,
        only_in_a: pairing.only_in_a,
        only_in_b: pairing.only_in_b,
    })
}
