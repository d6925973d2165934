//! RED Log3G10.
//!
//! Ten stops above 18% grey reach code value 1.0 and 18% grey sits at
//! exactly 1/3. Below -0.01 the curve continues as a straight line.
//!
//! # Reference
//!
//! RED Digital Cinema, "White Paper on REDWideGamutRGB and Log3G10" (2017)

const A: f64 = 0.224282;
const B: f64 = 155.975327;
const C: f64 = 0.01;
const G: f64 = 15.1927;

/// Linear to Log3G10.
///
/// ```rust
/// use unilog_transfer::red_log::log3g10_encode;
///
/// assert!((log3g10_encode(0.18) - 1.0 / 3.0).abs() < 1e-4);
/// ```
#[inline]
pub fn log3g10_encode(linear: f64) -> f64 {
    let x = linear + C;
    if x < 0.0 {
        x * G
    } else {
        A * (x * B + 1.0).log10()
    }
}

/// Log3G10 to linear.
#[inline]
pub fn log3g10_decode(log: f64) -> f64 {
    let x = if log < 0.0 {
        log / G
    } else {
        (10.0_f64.powf(log / A) - 1.0) / B
    };
    x - C
}
