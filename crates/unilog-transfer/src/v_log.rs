//! Panasonic V-Log.
//!
//! # Reference
//!
//! Panasonic, "V-Log/V-Gamut Reference Manual" (2014)

const CUT1: f64 = 0.01;
const CUT2: f64 = 0.181;
const B: f64 = 0.00873;
const C: f64 = 0.241514;
const D: f64 = 0.598206;

/// Linear to V-Log.
#[inline]
pub fn encode(linear: f64) -> f64 {
    if linear < CUT1 {
        5.6 * linear + 0.125
    } else {
        C * (linear + B).log10() + D
    }
}

/// V-Log to linear.
#[inline]
pub fn decode(log: f64) -> f64 {
    if log < CUT2 {
        (log - 0.125) / 5.6
    } else {
        10.0_f64.powf((log - D) / C) - B
    }
}
