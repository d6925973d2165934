//! Chromatic adaptation transforms (CAT).
//!
//! Every log space the engine knows is D65-referred, so in practice the
//! bridge adapts D65 to D65 and the matrix is the identity. The transform
//! is still carried through so that a gamut with another white point can
//! be registered without touching the bridge code.

use crate::{Mat3, Vec3};
use std::fmt;
use std::str::FromStr;

/// CIE D65 white point (XYZ, Y = 1).
pub const D65: Vec3 = Vec3::new(0.95047, 1.0, 1.08883);

/// CIE D50 white point (XYZ, Y = 1).
pub const D50: Vec3 = Vec3::new(0.96422, 1.0, 0.82521);

/// Bradford cone response matrix.
pub const BRADFORD: Mat3 = Mat3::from_rows([
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
]);

/// CAT02 matrix from CIECAM02.
pub const CAT02: Mat3 = Mat3::from_rows([
    [0.7328, 0.4296, -0.1624],
    [-0.7036, 1.6975, 0.0061],
    [0.0030, 0.0136, 0.9834],
]);

/// Von Kries (Hunt-Pointer-Estevez) matrix.
pub const VON_KRIES: Mat3 = Mat3::from_rows([
    [0.40024, 0.70760, -0.08081],
    [-0.22630, 1.16532, 0.04570],
    [0.00000, 0.00000, 0.91822],
]);

/// Selectable adaptation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cat {
    /// Bradford.
    Bradford,
    /// CAT02 (default).
    #[default]
    Cat02,
    /// Von Kries.
    VonKries,
    /// Plain XYZ scaling.
    XyzScaling,
}

impl Cat {
    /// All methods, in display order.
    pub const ALL: [Cat; 4] = [Cat::Bradford, Cat::Cat02, Cat::VonKries, Cat::XyzScaling];

    /// Cone response matrix for this method.
    pub const fn matrix(self) -> Mat3 {
        match self {
            Cat::Bradford => BRADFORD,
            Cat::Cat02 => CAT02,
            Cat::VonKries => VON_KRIES,
            Cat::XyzScaling => Mat3::IDENTITY,
        }
    }

    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Cat::Bradford => "Bradford",
            Cat::Cat02 => "CAT02",
            Cat::VonKries => "VonKries",
            Cat::XyzScaling => "XyzScaling",
        }
    }
}

impl fmt::Display for Cat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised CAT name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCat(pub String);

impl fmt::Display for UnknownCat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown chromatic adaptation '{}' (expected Bradford, CAT02, VonKries or XyzScaling)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCat {}

impl FromStr for Cat {
    type Err = UnknownCat;

    /// Case-insensitive; spaces, dashes and underscores are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "bradford" => Ok(Cat::Bradford),
            "cat02" => Ok(Cat::Cat02),
            "vonkries" => Ok(Cat::VonKries),
            "xyzscaling" | "xyz" => Ok(Cat::XyzScaling),
            _ => Err(UnknownCat(s.to_string())),
        }
    }
}

/// Matrix adapting XYZ under `src_white` to XYZ under `dst_white`.
///
/// Computed as `M^-1 * diag(dst_cone / src_cone) * M`.
///
/// ```rust
/// use unilog_math::{adapt_matrix, Cat, D50, D65};
///
/// let m = adapt_matrix(Cat::Bradford, D65, D50);
/// let w = m * D65;
/// assert!((w.z - D50.z).abs() < 1e-9);
/// ```
pub fn adapt_matrix(cat: Cat, src_white: Vec3, dst_white: Vec3) -> Mat3 {
    if src_white == dst_white {
        return Mat3::IDENTITY;
    }
    let m = cat.matrix();
    let Some(m_inv) = m.inverse() else {
        return Mat3::IDENTITY;
    };
    let src = m * src_white;
    let dst = m * dst_white;
    let scale = Mat3::diagonal(dst.x / src.x, dst.y / src.y, dst.z / src.z);
    m_inv * scale * m
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn same_white_is_identity() {
        for cat in Cat::ALL {
            assert_eq!(adapt_matrix(cat, D65, D65), Mat3::IDENTITY);
        }
    }

    #[test]
    fn maps_white_to_white() {
        for cat in Cat::ALL {
            let w = adapt_matrix(cat, D65, D50) * D65;
            assert_abs_diff_eq!(w.x, D50.x, epsilon = 1e-9);
            assert_abs_diff_eq!(w.y, D50.y, epsilon = 1e-9);
            assert_abs_diff_eq!(w.z, D50.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("cat02".parse::<Cat>().unwrap(), Cat::Cat02);
        assert_eq!("Von-Kries".parse::<Cat>().unwrap(), Cat::VonKries);
        assert_eq!("XYZ_Scaling".parse::<Cat>().unwrap(), Cat::XyzScaling);
        assert!("hunt".parse::<Cat>().is_err());
    }
}
