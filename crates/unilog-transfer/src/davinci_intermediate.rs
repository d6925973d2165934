//! Blackmagic DaVinci Intermediate.
//!
//! # Reference
//!
//! Blackmagic Design, "DaVinci Resolve 17 Wide Gamut Intermediate" (2021)

const A: f64 = 0.0075;
const B: f64 = 7.0;
const C: f64 = 0.07329248;
const M: f64 = 10.44426855;
const LIN_CUT: f64 = 0.00262409;
const LOG_CUT: f64 = 0.02740668;

/// Linear to DaVinci Intermediate.
///
/// ```rust
/// use unilog_transfer::davinci_intermediate::encode;
///
/// assert!((encode(0.18) - 0.336).abs() < 1e-3);
/// ```
#[inline]
pub fn encode(linear: f64) -> f64 {
    if linear > LIN_CUT {
        ((linear + A).log2() + B) * C
    } else {
        linear * M
    }
}

/// DaVinci Intermediate to linear.
#[inline]
pub fn decode(log: f64) -> f64 {
    if log > LOG_CUT {
        2.0_f64.powf(log / C - B) - A
    } else {
        log / M
    }
}
