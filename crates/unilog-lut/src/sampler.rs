//! Trilinear evaluation of a [`Lut3D`].
//!
//! Input is clamped per channel to the table's domain, rescaled to grid
//! units `[0, N-1]`, and blended from the eight surrounding nodes.
//!
//! Positions within [`SNAP_EPSILON`] grid units of an integer snap to it
//! first, so a coordinate that lands on a node (up to the rounding of the
//! domain rescale) reproduces the stored value bit for bit. The base cell
//! is clamped to `N-2`, which makes the far weight exactly 1 on the upper
//! edge.

use crate::Lut3D;

/// Distance in grid units below which a position snaps to the node.
pub const SNAP_EPSILON: f64 = 1e-4;

/// Base cell index and fractional weight along one axis.
#[inline]
fn locate(x: f64, min: f64, max: f64, size: usize) -> (usize, f64) {
    let n = (size - 1) as f64;
    let t = ((x.clamp(min, max) - min) / (max - min)) * n;
    let nearest = t.round();
    let t = if (t - nearest).abs() < SNAP_EPSILON { nearest } else { t };

    let base = (t.floor() as usize).min(size - 2);
    (base, t - base as f64)
}

/// Evaluates `table` at `rgb` by trilinear interpolation.
///
/// ```rust
/// use unilog_lut::{evaluate, Lut3D};
///
/// let lut = Lut3D::identity(2).unwrap();
/// assert_eq!(evaluate(&lut, [0.5, 0.5, 0.5]), [0.5, 0.5, 0.5]);
/// ```
pub fn evaluate(table: &Lut3D, rgb: [f64; 3]) -> [f64; 3] {
    let size = table.size;
    let (ri, rf) = locate(rgb[0], table.domain_min[0] as f64, table.domain_max[0] as f64, size);
    let (gi, gf) = locate(rgb[1], table.domain_min[1] as f64, table.domain_max[1] as f64, size);
    let (bi, bf) = locate(rgb[2], table.domain_min[2] as f64, table.domain_max[2] as f64, size);

    let at = |r: usize, g: usize, b: usize| table.node(r, g, b).map(f64::from);
    let c000 = at(ri, gi, bi);
    let c100 = at(ri + 1, gi, bi);
    let c010 = at(ri, gi + 1, bi);
    let c110 = at(ri + 1, gi + 1, bi);
    let c001 = at(ri, gi, bi + 1);
    let c101 = at(ri + 1, gi, bi + 1);
    let c011 = at(ri, gi + 1, bi + 1);
    let c111 = at(ri + 1, gi + 1, bi + 1);

    let lerp = |a: f64, b: f64, t: f64| a * (1.0 - t) + b * t;
    std::array::from_fn(|i| {
        let c00 = lerp(c000[i], c100[i], rf);
        let c10 = lerp(c010[i], c110[i], rf);
        let c01 = lerp(c001[i], c101[i], rf);
        let c11 = lerp(c011[i], c111[i], rf);
        lerp(lerp(c00, c10, gf), lerp(c01, c11, gf), bf)
    })
}
