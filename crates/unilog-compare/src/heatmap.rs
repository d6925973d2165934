//! Difference heatmaps.
//!
//! Each pixel's largest normalized channel difference, times a gain,
//! is mapped onto a black-red-yellow-white ramp.

use crate::{CompareError, CompareResult};
use rayon::prelude::*;
use std::path::Path;
use tracing::trace;
use unilog_io::Image;

/// Maps `t` in `[0, 1]` to black, red, yellow, white.
pub fn ramp(t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0) * 3.0;
    let (r, g, b) = if t < 1.0 {
        (t, 0.0, 0.0)
    } else if t < 2.0 {
        (1.0, t - 1.0, 0.0)
    } else {
        (1.0, 1.0, t - 2.0)
    };
    [r, g, b].map(|v| (v * 255.0).round() as u8)
}

/// Builds an 8-bit RGB heatmap of the difference between two images.
pub fn heatmap(a: &Image, b: &Image, amplify: f32) -> CompareResult<Image> {
    if !a.same_shape(b) {
        return Err(CompareError::DimensionMismatch {
            a: format!("{}x{}x{}", a.width, a.height, a.channels),
            b: format!("{}x{}x{}", b.width, b.height, b.channels),
        });
    }
    trace!(amplify, "heatmap");

    let depth = a.bit_depth().max(b.bit_depth());
    let max_value = f32::from(depth.max_value());
    let channels = a.channels;

    let data: Vec<u8> = (0..a.pixel_count())
        .into_par_iter()
        .flat_map_iter(|p| {
            let base = p * channels;
            let d = (0..channels)
                .map(|c| a.sample_at(base + c, depth).abs_diff(b.sample_at(base + c, depth)))
                .max()
                .unwrap_or(0);
            ramp(f32::from(d) / max_value * amplify)
        })
        .collect();

    Ok(Image::from_u8(a.width, a.height, 3, data)?)
}

/// Writes the heatmap of `a` against `b` as a PNG.
pub fn write_heatmap(path: &Path, a: &Image, b: &Image, amplify: f32) -> CompareResult<()> {
    let map = heatmap(a, b, amplify)?;
    unilog_io::png::write(path, &map)?;
    Ok(())
}
