//! Nikon N-Log.
//!
//! A cube-root toe joined to a natural-log shoulder at `CUT1`. The toe
//! uses `cbrt` so slightly negative inputs stay finite.
//!
//! # Reference
//!
//! Nikon, "N-Log Specification Document" Ver.1.0.0 (2018)

const CUT1: f64 = 0.328;
const CUT2: f64 = 452.0 / 1023.0;
const A: f64 = 650.0 / 1023.0;
const B: f64 = 0.0075;
const C: f64 = 150.0 / 1023.0;
const D: f64 = 619.0 / 1023.0;

/// Linear to N-Log.
///
/// ```rust
/// use unilog_transfer::n_log::encode;
///
/// assert!((encode(0.18) - 0.3637).abs() < 1e-3);
/// ```
#[inline]
pub fn encode(linear: f64) -> f64 {
    if linear < CUT1 {
        A * (linear + B).cbrt()
    } else {
        C * linear.ln() + D
    }
}

/// N-Log to linear.
#[inline]
pub fn decode(log: f64) -> f64 {
    if log < CUT2 {
        (log / A).powi(3) - B
    } else {
        ((log - D) / C).exp()
    }
}
