//! Resampling a table to another grid size.

use crate::{sampler, Lut3D, LutError, LutResult};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Resamples `table` onto a `new_size` grid over the same domain.
///
/// Each new node is the trilinear value of the old table at that node's
/// coordinate. Resizing to the current size returns an exact copy.
///
/// ```rust
/// use unilog_lut::{resize, Lut3D};
///
/// let lut = Lut3D::identity(65).unwrap();
/// let small = resize(&lut, 33).unwrap();
/// assert_eq!(small.size, 33);
/// ```
pub fn resize(table: &Lut3D, new_size: usize) -> LutResult<Lut3D> {
    if new_size < 2 {
        return Err(LutError::InvalidSize(new_size));
    }
    if table.is_empty() {
        return Err(LutError::EmptyTable);
    }
    table.validate()?;
    trace!(from = table.size, to = new_size, "resize");

    if new_size == table.size {
        return Ok(table.clone());
    }

    let mut out = Lut3D::from_fn(new_size, table.domain_min, table.domain_max, |c| {
        sampler::evaluate(table, c)
    })?;
    out.title = table.title.clone();
    Ok(out)
}

/// Default output path: `{stem}_{new_size}.cube` beside the input.
pub fn default_resize_path(input: &Path, new_size: usize) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_{new_size}.{}", crate::cube::EXTENSION))
}
