//! # unilog-primaries
//!
//! Chromaticities of the camera gamuts the engine bridges between, and the
//! RGB to XYZ matrices derived from them.
//!
//! A gamut is three primaries plus a white point, each a CIE xy pair. The
//! normalized primary matrix is built the usual way: primaries become
//! XYZ columns (Y = 1), then each column is scaled so that RGB (1,1,1)
//! lands on the white point.
//!
//! Several camera gamuts have primaries outside the spectral locus
//! (negative y for blue, green y > 1). That is expected; the matrix is
//! still well defined.
//!
//! # Usage
//!
//! ```rust
//! use unilog_primaries::{rgb_to_xyz_matrix, AWG4};
//! use unilog_math::Vec3;
//!
//! let m = rgb_to_xyz_matrix(&AWG4).unwrap();
//! let white = m * Vec3::splat(1.0);
//! assert!((white.y - 1.0).abs() < 1e-12);
//! ```
//!
//! # Dependencies
//!
//! - `unilog-math` - matrix operations
//!
//! # Used By
//!
//! - `unilog-color` - log space registry

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use unilog_math::{Mat3, Vec3};

/// RGB primaries and white point as CIE xy chromaticities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y)
    pub r: (f64, f64),
    /// Green primary (x, y)
    pub g: (f64, f64),
    /// Blue primary (x, y)
    pub b: (f64, f64),
    /// White point (x, y)
    pub w: (f64, f64),
    /// Gamut name
    pub name: &'static str,
}

impl Primaries {
    /// White point as XYZ with Y = 1.
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w)
    }
}

/// CIE D65 white point.
pub const D65_XY: (f64, f64) = (0.3127, 0.3290);

/// D65 as XYZ, derived from [`D65_XY`] with the same arithmetic as
/// [`Primaries::white_xyz`], so D65 gamuts compare equal to it.
pub fn reference_white() -> Vec3 {
    xy_to_xyz(D65_XY)
}

/// Sony S-Gamut3.
pub const S_GAMUT3: Primaries = Primaries {
    r: (0.730, 0.280),
    g: (0.140, 0.855),
    b: (0.100, -0.050),
    w: D65_XY,
    name: "S-Gamut3",
};

/// Sony S-Gamut3.Cine.
pub const S_GAMUT3_CINE: Primaries = Primaries {
    r: (0.766, 0.275),
    g: (0.225, 0.800),
    b: (0.089, -0.087),
    w: D65_XY,
    name: "S-Gamut3.Cine",
};

/// ITU-R BT.2020.
pub const BT2020: Primaries = Primaries {
    r: (0.708, 0.292),
    g: (0.170, 0.797),
    b: (0.131, 0.046),
    w: D65_XY,
    name: "BT.2020",
};

/// Fujifilm F-Gamut. Same primaries as BT.2020.
pub const F_GAMUT: Primaries = Primaries {
    name: "F-Gamut",
    ..BT2020
};

/// Fujifilm F-Gamut C.
pub const F_GAMUT_C: Primaries = Primaries {
    r: (0.7347, 0.2653),
    g: (0.0263, 0.9737),
    b: (0.1173, -0.0224),
    w: D65_XY,
    name: "F-Gamut C",
};

/// Canon Cinema Gamut.
pub const CINEMA_GAMUT: Primaries = Primaries {
    r: (0.740, 0.270),
    g: (0.170, 1.140),
    b: (0.080, -0.100),
    w: D65_XY,
    name: "Cinema Gamut",
};

/// ARRI Wide Gamut 3.
pub const AWG3: Primaries = Primaries {
    r: (0.6840, 0.3130),
    g: (0.2210, 0.8480),
    b: (0.0861, -0.1020),
    w: D65_XY,
    name: "ARRI Wide Gamut 3",
};

/// ARRI Wide Gamut 4.
pub const AWG4: Primaries = Primaries {
    r: (0.7347, 0.2653),
    g: (0.1424, 0.8576),
    b: (0.0991, -0.0308),
    w: D65_XY,
    name: "ARRI Wide Gamut 4",
};

/// Panasonic V-Gamut.
pub const V_GAMUT: Primaries = Primaries {
    r: (0.730, 0.280),
    g: (0.165, 0.840),
    b: (0.100, -0.030),
    w: D65_XY,
    name: "V-Gamut",
};

/// Nikon N-Gamut. Same primaries as BT.2020.
pub const N_GAMUT: Primaries = Primaries {
    name: "N-Gamut",
    ..BT2020
};

/// DaVinci Wide Gamut.
pub const DAVINCI_WIDE_GAMUT: Primaries = Primaries {
    r: (0.8000, 0.3130),
    g: (0.1682, 0.9877),
    b: (0.0790, -0.1155),
    w: D65_XY,
    name: "DaVinci Wide Gamut",
};

/// RED Wide Gamut RGB.
pub const RED_WIDE_GAMUT: Primaries = Primaries {
    r: (0.780308, 0.304253),
    g: (0.121595, 1.493994),
    b: (0.095612, -0.084589),
    w: D65_XY,
    name: "RED Wide Gamut RGB",
};

/// xy chromaticity to XYZ with Y = 1.
fn xy_to_xyz((x, y): (f64, f64)) -> Vec3 {
    if y.abs() < 1e-12 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Normalized primary matrix: RGB to XYZ under the gamut's own white.
///
/// `None` when the primaries are collinear (no gamut triangle).
pub fn rgb_to_xyz_matrix(p: &Primaries) -> Option<Mat3> {
    let r = xy_to_xyz(p.r);
    let g = xy_to_xyz(p.g);
    let b = xy_to_xyz(p.b);
    let s = Mat3::from_cols(r, g, b).inverse()? * p.white_xyz();
    Some(Mat3::from_cols(r * s.x, g * s.y, b * s.z))
}

/// XYZ to RGB, the inverse of [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(p: &Primaries) -> Option<Mat3> {
    rgb_to_xyz_matrix(p)?.inverse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ALL: [Primaries; 12] = [
        S_GAMUT3,
        S_GAMUT3_CINE,
        BT2020,
        F_GAMUT,
        F_GAMUT_C,
        CINEMA_GAMUT,
        AWG3,
        AWG4,
        V_GAMUT,
        N_GAMUT,
        DAVINCI_WIDE_GAMUT,
        RED_WIDE_GAMUT,
    ];

    #[test]
    fn white_maps_to_white() {
        let w = reference_white();
        for p in ALL {
            let m = rgb_to_xyz_matrix(&p).unwrap();
            let out = m * Vec3::splat(1.0);
            assert_abs_diff_eq!(out.x, w.x, epsilon = 1e-12);
            assert_abs_diff_eq!(out.y, w.y, epsilon = 1e-12);
            assert_abs_diff_eq!(out.z, w.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn roundtrip_through_xyz() {
        for p in ALL {
            let fwd = rgb_to_xyz_matrix(&p).unwrap();
            let inv = xyz_to_rgb_matrix(&p).unwrap();
            let rgb = Vec3::new(0.2, 0.7, 0.05);
            let back = inv * (fwd * rgb);
            assert_abs_diff_eq!(back.x, rgb.x, epsilon = 1e-12);
            assert_abs_diff_eq!(back.z, rgb.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn bt2020_luminance_row() {
        // Published BT.2020 luma coefficients.
        let m = rgb_to_xyz_matrix(&BT2020).unwrap();
        assert_abs_diff_eq!(m.m[1][0], 0.2627, epsilon = 1e-4);
        assert_abs_diff_eq!(m.m[1][1], 0.6780, epsilon = 1e-4);
        assert_abs_diff_eq!(m.m[1][2], 0.0593, epsilon = 1e-4);
    }

    #[test]
    fn collinear_primaries_rejected() {
        let flat = Primaries {
            r: (0.1, 0.1),
            g: (0.2, 0.2),
            b: (0.3, 0.3),
            w: D65_XY,
            name: "flat",
        };
        assert!(rgb_to_xyz_matrix(&flat).is_none());
    }
}
