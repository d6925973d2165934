//! Leica L-Log.
//!
//! # Reference
//!
//! Leica Camera AG, "L-Log Reference Manual" (2022)

const CUT1: f64 = 0.006;
const CUT2: f64 = 0.138;
const A: f64 = 8.0;
const B: f64 = 0.09;
const C: f64 = 0.27;
const D: f64 = 1.3;
const E: f64 = 0.0115;
const F: f64 = 0.6;

/// Linear to L-Log.
#[inline]
pub fn encode(linear: f64) -> f64 {
    if linear <= CUT1 {
        A * linear + B
    } else {
        C * (D * linear + E).log10() + F
    }
}

/// L-Log to linear.
#[inline]
pub fn decode(log: f64) -> f64 {
    if log <= CUT2 {
        (log - B) / A
    } else {
        (10.0_f64.powf((log - F) / C) - E) / D
    }
}
