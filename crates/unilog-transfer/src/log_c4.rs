//! ARRI LogC4.
//!
//! Base-2 log with a linear extension below `LIN_SIDE_BREAK` that is C1
//! continuous with the log segment. LogC4 has a single curve for all
//! exposure indices.
//!
//! # Reference
//!
//! ARRI, "LogC4 Logarithmic Color Space Specification" (2022)

const LIN_SIDE_SLOPE: f64 = 2231.82630906769;
const LIN_SIDE_OFFSET: f64 = 64.0;
const LOG_SIDE_SLOPE: f64 = 0.0647954196341293;
const LOG_SIDE_OFFSET: f64 = -0.295908392682586;
const LIN_SIDE_BREAK: f64 = -0.0180569961199113;

/// Slope, offset and log-side break of the linear extension.
fn linear_segment() -> (f64, f64, f64) {
    let at_break = LIN_SIDE_SLOPE * LIN_SIDE_BREAK + LIN_SIDE_OFFSET;
    let log_break = LOG_SIDE_SLOPE * at_break.log2() + LOG_SIDE_OFFSET;
    let slope = LOG_SIDE_SLOPE * LIN_SIDE_SLOPE / (at_break * std::f64::consts::LN_2);
    let offset = log_break - slope * LIN_SIDE_BREAK;
    (slope, offset, log_break)
}

/// Linear to LogC4.
///
/// ```rust
/// use unilog_transfer::log_c4;
///
/// assert!((log_c4::encode(0.18) - 0.2784).abs() < 1e-3);
/// ```
#[inline]
pub fn encode(linear: f64) -> f64 {
    if linear >= LIN_SIDE_BREAK {
        LOG_SIDE_SLOPE * (LIN_SIDE_SLOPE * linear + LIN_SIDE_OFFSET).log2() + LOG_SIDE_OFFSET
    } else {
        let (slope, offset, _) = linear_segment();
        slope * linear + offset
    }
}

/// LogC4 to linear.
#[inline]
pub fn decode(log: f64) -> f64 {
    let (slope, offset, log_break) = linear_segment();
    if log >= log_break {
        (2.0_f64.powf((log - LOG_SIDE_OFFSET) / LOG_SIDE_SLOPE) - LIN_SIDE_OFFSET) / LIN_SIDE_SLOPE
    } else {
        (log - offset) / slope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn published_points() {
        assert_abs_diff_eq!(encode(0.18), 0.2784, epsilon = 1e-3);
        assert_abs_diff_eq!(encode(0.0), 0.0929, epsilon = 1e-3);
    }

    #[test]
    fn continuous_at_break() {
        let (slope, offset, log_break) = linear_segment();
        assert_abs_diff_eq!(encode(LIN_SIDE_BREAK), log_break, epsilon = 1e-12);
        assert_abs_diff_eq!(slope * LIN_SIDE_BREAK + offset, log_break, epsilon = 1e-12);
    }

    #[test]
    fn roundtrip_below_break() {
        for &x in &[-0.1, -0.02, 0.0, 0.18, 100.0] {
            assert_abs_diff_eq!(decode(encode(x)), x, epsilon = 1e-9);
        }
    }
}
