//! Canon Log 2 and Canon Log 3.
//!
//! Both curves take scene reflectance divided by 0.9 (so that a perfect
//! reflector reads 1/0.9) and are odd-symmetric around their black code
//! value.

mod clog2 {
    pub const CUT: f64 = 0.092864125;
    pub const LOG_SLOPE: f64 = 0.24136077;
    pub const LIN_SCALE: f64 = 87.099375;
}

mod clog3 {
    pub const CUT_LOW: f64 = 0.097465473;
    pub const CUT_HIGH: f64 = 0.15277891;
    pub const LIN_BREAK: f64 = 0.014;
    pub const LOG_OFFSET_NEG: f64 = 0.12783901;
    pub const LOG_OFFSET_POS: f64 = 0.12240537;
    pub const LOG_SLOPE: f64 = 0.36726845;
    pub const LIN_SCALE: f64 = 14.98325;
    pub const LIN_SLOPE: f64 = 1.9754798;
    pub const LIN_OFFSET: f64 = 0.12512219;
}

const NORM: f64 = 0.9;

/// Linear to Canon Log 2.
#[inline]
pub fn clog2_encode(linear: f64) -> f64 {
    use clog2::*;
    let x = linear / NORM;
    if x < 0.0 {
        CUT - LOG_SLOPE * (-x * LIN_SCALE + 1.0).log10()
    } else {
        CUT + LOG_SLOPE * (x * LIN_SCALE + 1.0).log10()
    }
}

/// Canon Log 2 to linear.
#[inline]
pub fn clog2_decode(log: f64) -> f64 {
    use clog2::*;
    let x = if log < CUT {
        -(10.0_f64.powf((CUT - log) / LOG_SLOPE) - 1.0) / LIN_SCALE
    } else {
        (10.0_f64.powf((log - CUT) / LOG_SLOPE) - 1.0) / LIN_SCALE
    };
    x * NORM
}

/// Linear to Canon Log 3.
///
/// Three segments: negative log, a short linear section around black,
/// positive log.
#[inline]
pub fn clog3_encode(linear: f64) -> f64 {
    use clog3::*;
    let x = linear / NORM;
    if x < -LIN_BREAK {
        LOG_OFFSET_NEG - LOG_SLOPE * (-x * LIN_SCALE + 1.0).log10()
    } else if x <= LIN_BREAK {
        x * LIN_SLOPE + LIN_OFFSET
    } else {
        LOG_OFFSET_POS + LOG_SLOPE * (x * LIN_SCALE + 1.0).log10()
    }
}

/// Canon Log 3 to linear.
#[inline]
pub fn clog3_decode(log: f64) -> f64 {
    use clog3::*;
    let x = if log < CUT_LOW {
        -(10.0_f64.powf((LOG_OFFSET_NEG - log) / LOG_SLOPE) - 1.0) / LIN_SCALE
    } else if log <= CUT_HIGH {
        (log - LIN_OFFSET) / LIN_SLOPE
    } else {
        (10.0_f64.powf((log - LOG_OFFSET_POS) / LOG_SLOPE) - 1.0) / LIN_SCALE
    };
    x * NORM
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn middle_gray() {
        assert_abs_diff_eq!(clog2_encode(0.18), 0.398, epsilon = 0.005);
        assert_abs_diff_eq!(clog3_encode(0.18), 0.343, epsilon = 0.005);
    }

    #[test]
    fn clog3_segments_meet() {
        let lo = clog3::LIN_BREAK * NORM;
        assert_abs_diff_eq!(clog3_encode(lo), clog3::CUT_HIGH, epsilon = 1e-6);
        assert_abs_diff_eq!(clog3_encode(-lo), clog3::CUT_LOW, epsilon = 1e-6);
    }

    #[test]
    fn roundtrip_including_negatives() {
        for &x in &[-0.05, -0.01, 0.0, 0.01, 0.18, 1.0, 12.0] {
            assert_abs_diff_eq!(clog2_decode(clog2_encode(x)), x, epsilon = 1e-10);
            assert_abs_diff_eq!(clog3_decode(clog3_encode(x)), x, epsilon = 1e-10);
        }
    }
}
