//! # unilog-transfer
//!
//! Camera log transfer functions.
//!
//! Each module exposes scene-linear to log (`encode`) and log to
//! scene-linear (`decode`) for one manufacturer curve. All functions are
//! pure `f64` math, monotonic, and extrapolate outside the nominal signal
//! range with the same formula (no clamping).
//!
//! | Curve | Module | 18% grey |
//! |-------|--------|----------|
//! | Sony S-Log3 | [`s_log3`] | 0.411 |
//! | Fujifilm F-Log / F-Log2 | [`f_log`] | 0.459 / 0.391 |
//! | Canon Log 2 / Log 3 | [`canon_log`] | 0.398 / 0.343 |
//! | ARRI LogC3 (EI 800) | [`log_c`] | 0.391 |
//! | ARRI LogC4 | [`log_c4`] | 0.278 |
//! | Panasonic V-Log | [`v_log`] | 0.423 |
//! | Nikon N-Log | [`n_log`] | 0.364 |
//! | Leica L-Log | [`l_log`] | 0.435 |
//! | DaVinci Intermediate | [`davinci_intermediate`] | 0.336 |
//! | RED Log3G10 | [`red_log`] | 0.333 |
//!
//! [`Curve`] is the closed enum over all of them, used by the color
//! space registry.
//!
//! # Usage
//!
//! ```rust
//! use unilog_transfer::Curve;
//!
//! let log = Curve::SLog3.encode(0.18);
//! assert!((Curve::SLog3.decode(log) - 0.18).abs() < 1e-12);
//! ```
//!
//! # Used By
//!
//! - `unilog-color` - log space registry and bridges

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod canon_log;
pub mod davinci_intermediate;
pub mod f_log;
pub mod l_log;
pub mod log_c;
pub mod log_c4;
pub mod n_log;
pub mod red_log;
pub mod s_log3;
pub mod v_log;

/// A camera log transfer curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// Sony S-Log3.
    SLog3,
    /// Fujifilm F-Log.
    FLog,
    /// Fujifilm F-Log2.
    FLog2,
    /// Canon Log 2.
    CLog2,
    /// Canon Log 3.
    CLog3,
    /// ARRI LogC3, EI 800.
    LogC3,
    /// ARRI LogC4.
    LogC4,
    /// Panasonic V-Log.
    VLog,
    /// Nikon N-Log.
    NLog,
    /// Leica L-Log.
    LLog,
    /// Blackmagic DaVinci Intermediate.
    DaVinciIntermediate,
    /// RED Log3G10.
    Log3G10,
}

impl Curve {
    /// Every curve.
    pub const ALL: [Curve; 12] = [
        Curve::SLog3,
        Curve::FLog,
        Curve::FLog2,
        Curve::CLog2,
        Curve::CLog3,
        Curve::LogC3,
        Curve::LogC4,
        Curve::VLog,
        Curve::NLog,
        Curve::LLog,
        Curve::DaVinciIntermediate,
        Curve::Log3G10,
    ];

    /// Scene-linear to log.
    pub fn encode(self, linear: f64) -> f64 {
        match self {
            Curve::SLog3 => s_log3::encode(linear),
            Curve::FLog => f_log::flog_encode(linear),
            Curve::FLog2 => f_log::flog2_encode(linear),
            Curve::CLog2 => canon_log::clog2_encode(linear),
            Curve::CLog3 => canon_log::clog3_encode(linear),
            Curve::LogC3 => log_c::encode(linear),
            Curve::LogC4 => log_c4::encode(linear),
            Curve::VLog => v_log::encode(linear),
            Curve::NLog => n_log::encode(linear),
            Curve::LLog => l_log::encode(linear),
            Curve::DaVinciIntermediate => davinci_intermediate::encode(linear),
            Curve::Log3G10 => red_log::log3g10_encode(linear),
        }
    }

    /// Log to scene-linear.
    pub fn decode(self, log: f64) -> f64 {
        match self {
            Curve::SLog3 => s_log3::decode(log),
            Curve::FLog => f_log::flog_decode(log),
            Curve::FLog2 => f_log::flog2_decode(log),
            Curve::CLog2 => canon_log::clog2_decode(log),
            Curve::CLog3 => canon_log::clog3_decode(log),
            Curve::LogC3 => log_c::decode(log),
            Curve::LogC4 => log_c4::decode(log),
            Curve::VLog => v_log::decode(log),
            Curve::NLog => n_log::decode(log),
            Curve::LLog => l_log::decode(log),
            Curve::DaVinciIntermediate => davinci_intermediate::decode(log),
            Curve::Log3G10 => red_log::log3g10_decode(log),
        }
    }

    /// Encodes each channel.
    #[inline]
    pub fn encode_rgb(self, rgb: [f64; 3]) -> [f64; 3] {
        rgb.map(|v| self.encode(v))
    }

    /// Decodes each channel.
    #[inline]
    pub fn decode_rgb(self, rgb: [f64; 3]) -> [f64; 3] {
        rgb.map(|v| self.decode(v))
    }

    /// Code value of 18% grey.
    pub fn middle_gray(self) -> f64 {
        self.encode(0.18)
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Curve::SLog3 => "S-Log3",
            Curve::FLog => "F-Log",
            Curve::FLog2 => "F-Log2",
            Curve::CLog2 => "Canon Log 2",
            Curve::CLog3 => "Canon Log 3",
            Curve::LogC3 => "ARRI LogC3",
            Curve::LogC4 => "ARRI LogC4",
            Curve::VLog => "V-Log",
            Curve::NLog => "N-Log",
            Curve::LLog => "L-Log",
            Curve::DaVinciIntermediate => "DaVinci Intermediate",
            Curve::Log3G10 => "Log3G10",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINEARS: [f64; 9] = [0.0, 0.001, 0.01, 0.05, 0.18, 0.5, 1.0, 4.0, 16.0];

    #[test]
    fn all_curves_roundtrip() {
        for curve in Curve::ALL {
            for &x in &LINEARS {
                let back = curve.decode(curve.encode(x));
                assert!(
                    (back - x).abs() <= 1e-9 * x.abs().max(1.0),
                    "{}: {x} -> {back}",
                    curve.name()
                );
            }
        }
    }

    #[test]
    fn all_curves_monotonic() {
        for curve in Curve::ALL {
            let mut prev = curve.encode(-0.005);
            for i in 1..=2000 {
                let x = -0.005 + i as f64 * 0.005;
                let y = curve.encode(x);
                assert!(y > prev, "{} not increasing at {x}", curve.name());
                prev = y;
            }
        }
    }

    #[test]
    fn middle_gray_in_signal_range() {
        for curve in Curve::ALL {
            let g = curve.middle_gray();
            assert!(g > 0.25 && g < 0.5, "{}: {g}", curve.name());
        }
    }

    #[test]
    fn rgb_helpers() {
        let rgb = Curve::LogC4.encode_rgb([0.18, 0.0, 1.0]);
        let back = Curve::LogC4.decode_rgb(rgb);
        for (a, b) in back.iter().zip([0.18, 0.0, 1.0]) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
