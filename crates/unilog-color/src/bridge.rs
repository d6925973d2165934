//! Curve and gamut operations, and the log-to-log bridge.
//!
//! ```text
//! target_log = to_log(target, reference_to_gamut(target,
//!              gamut_to_reference(source, to_linear(source, source_log))))
//! ```
//!
//! Values outside the nominal signal range are extrapolated with the same
//! formulas. Nothing here clamps.

use crate::{ColorError, ColorResult, LogSpace};
use tracing::trace;
use unilog_math::{adapt_matrix, Cat, Mat3, Vec3};
use unilog_primaries::{reference_white, rgb_to_xyz_matrix};

/// Decodes log RGB to scene-linear RGB with the space's curve.
#[inline]
pub fn to_linear(space: LogSpace, log_rgb: [f64; 3]) -> [f64; 3] {
    space.curve().decode_rgb(log_rgb)
}

/// Encodes scene-linear RGB to log RGB with the space's curve.
#[inline]
pub fn to_log(space: LogSpace, linear_rgb: [f64; 3]) -> [f64; 3] {
    space.curve().encode_rgb(linear_rgb)
}

/// Matrix from the space's linear RGB to reference XYZ (D65).
///
/// Per-pixel callers should build this once rather than calling
/// [`gamut_to_reference`] in a loop.
pub fn to_reference_matrix(space: LogSpace, cat: Cat) -> ColorResult<Mat3> {
    let gamut = space.gamut();
    let to_xyz = rgb_to_xyz_matrix(gamut).ok_or(ColorError::SingularGamut(gamut.name))?;
    Ok(adapt_matrix(cat, gamut.white_xyz(), reference_white()) * to_xyz)
}

/// Matrix from reference XYZ (D65) to the space's linear RGB.
fn from_reference_matrix(space: LogSpace, cat: Cat) -> ColorResult<Mat3> {
    to_reference_matrix(space, cat)?
        .inverse()
        .ok_or(ColorError::SingularGamut(space.gamut().name))
}

/// Linear RGB in `space`'s gamut to reference XYZ (CAT02 adaptation).
pub fn gamut_to_reference(space: LogSpace, rgb: [f64; 3]) -> ColorResult<[f64; 3]> {
    let m = to_reference_matrix(space, Cat::default())?;
    Ok((m * Vec3::from_array(rgb)).to_array())
}

/// Reference XYZ to linear RGB in `space`'s gamut (CAT02 adaptation).
pub fn reference_to_gamut(space: LogSpace, xyz: [f64; 3]) -> ColorResult<[f64; 3]> {
    let m = from_reference_matrix(space, Cat::default())?;
    Ok((m * Vec3::from_array(xyz)).to_array())
}

/// Precomputed source-to-target conversion.
///
/// The two gamut matrices are folded into one, so [`apply`](Self::apply)
/// is two curve evaluations and one matrix multiply per triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bridge {
    source: LogSpace,
    target: LogSpace,
    gamut: Mat3,
}

impl Bridge {
    /// Builds the bridge from `source` to `target` using `cat` for white
    /// point adaptation.
    pub fn new(source: LogSpace, target: LogSpace, cat: Cat) -> ColorResult<Self> {
        trace!(%source, %target, %cat, "Bridge::new");
        let gamut = if source == target {
            Mat3::IDENTITY
        } else {
            from_reference_matrix(target, cat)? * to_reference_matrix(source, cat)?
        };
        Ok(Self {
            source,
            target,
            gamut,
        })
    }

    /// Source space.
    pub fn source(&self) -> LogSpace {
        self.source
    }

    /// Target space.
    pub fn target(&self) -> LogSpace {
        self.target
    }

    /// Combined linear gamut matrix (source RGB to target RGB).
    pub fn gamut_matrix(&self) -> Mat3 {
        self.gamut
    }

    /// Converts one source-log triple to target log.
    #[inline]
    pub fn apply(&self, source_log: [f64; 3]) -> [f64; 3] {
        let linear = Vec3::from_array(to_linear(self.source, source_log));
        to_log(self.target, (self.gamut * linear).to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn identity_bridge() {
        for space in LogSpace::ALL {
            let b = Bridge::new(space, space, Cat::Cat02).unwrap();
            for v in [0.0, 0.1, 0.4, 0.7, 1.0] {
                let out = b.apply([v, 0.5, 1.0 - v]);
                assert_abs_diff_eq!(out[0], v, epsilon = 1e-9);
                assert_abs_diff_eq!(out[1], 0.5, epsilon = 1e-9);
                assert_abs_diff_eq!(out[2], 1.0 - v, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn neutral_stays_neutral() {
        // All gamuts share D65, so equal RGB maps to equal RGB.
        let b = Bridge::new(LogSpace::SLog3, LogSpace::LogC4, Cat::Cat02).unwrap();
        let grey = LogSpace::SLog3.curve().middle_gray();
        let out = b.apply([grey; 3]);
        let expected = LogSpace::LogC4.curve().middle_gray();
        for c in out {
            assert_abs_diff_eq!(c, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn same_primaries_only_change_curve() {
        // F-Log and N-Log both use BT.2020 primaries.
        let b = Bridge::new(LogSpace::FLog, LogSpace::NLog, Cat::Bradford).unwrap();
        let m = b.gamut_matrix();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(m.m[i][j], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn bridge_matches_primitives() {
        let src = LogSpace::VLog;
        let tgt = LogSpace::DaVinciIntermediate;
        let x = [0.3, 0.45, 0.6];
        let chained = to_log(
            tgt,
            reference_to_gamut(tgt, gamut_to_reference(src, to_linear(src, x)).unwrap()).unwrap(),
        );
        let bridged = Bridge::new(src, tgt, Cat::Cat02).unwrap().apply(x);
        for c in 0..3 {
            assert_abs_diff_eq!(chained[c], bridged[c], epsilon = 1e-12);
        }
    }

    #[test]
    fn reference_white_from_unit_rgb() {
        let xyz = gamut_to_reference(LogSpace::LogC4, [1.0; 3]).unwrap();
        let w = reference_white();
        assert_abs_diff_eq!(xyz[0], w.x, epsilon = 1e-12);
        assert_abs_diff_eq!(xyz[2], w.z, epsilon = 1e-12);
    }
}
