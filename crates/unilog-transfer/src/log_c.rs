//! ARRI LogC3 at EI 800.
//!
//! LogC3 parameters depend on exposure index; EI 800 is the camera's
//! base setting and the one editing applications assume for "LogC3".
//!
//! # Reference
//!
//! ARRI, "ALEXA Log C Curve - Usage in VFX" (2017)

const CUT: f64 = 0.010591;
const A: f64 = 5.555556;
const B: f64 = 0.052272;
const C: f64 = 0.247190;
const D: f64 = 0.385537;
const E: f64 = 5.367655;
const F: f64 = 0.092809;

/// Linear to LogC3.
///
/// ```rust
/// use unilog_transfer::log_c::encode;
///
/// assert!((encode(0.18) - 0.391).abs() < 0.001);
/// ```
#[inline]
pub fn encode(linear: f64) -> f64 {
    if linear > CUT {
        C * (A * linear + B).log10() + D
    } else {
        E * linear + F
    }
}

/// LogC3 to linear.
#[inline]
pub fn decode(log: f64) -> f64 {
    if log > E * CUT + F {
        (10.0_f64.powf((log - D) / C) - B) / A
    } else {
        (log - F) / E
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn black_and_grey() {
        assert_abs_diff_eq!(encode(0.0), F, epsilon = 1e-12);
        assert_abs_diff_eq!(encode(0.18), 0.391, epsilon = 0.001);
    }

    #[test]
    fn roundtrip() {
        for &x in &[-0.01, 0.0, 0.005, 0.18, 1.0, 30.0] {
            assert_abs_diff_eq!(decode(encode(x)), x, epsilon = 1e-10);
        }
    }
}
