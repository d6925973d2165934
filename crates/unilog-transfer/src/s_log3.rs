//! Sony S-Log3.
//!
//! Code values are the 10-bit figures from Sony's technical summary
//! divided by 1023. 18% grey maps to 420/1023.
//!
//! # Reference
//!
//! Sony, "Technical Summary for S-Gamut3.Cine/S-Log3 and S-Gamut3/S-Log3"

const CUT: f64 = 0.01125;
const CUT_CODE: f64 = 171.2102946929;

/// Linear to S-Log3.
///
/// ```rust
/// use unilog_transfer::s_log3::encode;
///
/// assert!((encode(0.18) - 420.0 / 1023.0).abs() < 1e-12);
/// ```
#[inline]
pub fn encode(linear: f64) -> f64 {
    if linear >= CUT {
        (420.0 + 261.5 * ((linear + 0.01) / 0.19).log10()) / 1023.0
    } else {
        (linear * (CUT_CODE - 95.0) / CUT + 95.0) / 1023.0
    }
}

/// S-Log3 to linear.
#[inline]
pub fn decode(log: f64) -> f64 {
    let code = log * 1023.0;
    if code >= CUT_CODE {
        10.0_f64.powf((code - 420.0) / 261.5) * 0.19 - 0.01
    } else {
        (code - 95.0) * CUT / (CUT_CODE - 95.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn black_code() {
        assert_abs_diff_eq!(encode(0.0), 95.0 / 1023.0, epsilon = 1e-12);
    }

    #[test]
    fn continuous_at_cut() {
        assert_abs_diff_eq!(encode(CUT - 1e-12), encode(CUT), epsilon = 1e-6);
    }

    #[test]
    fn roundtrip() {
        for &x in &[0.0, 0.005, 0.18, 0.9, 8.0] {
            assert_abs_diff_eq!(decode(encode(x)), x, epsilon = 1e-10);
        }
    }
}
