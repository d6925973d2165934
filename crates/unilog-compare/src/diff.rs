//! Pixel statistics.

use crate::{CompareError, CompareOptions, CompareResult, DifferenceReport};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, trace};
use unilog_color::{reference_white, to_linear, to_reference_matrix, xyz_to_lab, delta_e_2000, Lab, Mat3, Vec3};
use unilog_io::{BitDepth, Image};

/// Partial sums over a run of pixels.
#[derive(Debug, Clone, Copy, Default)]
struct Acc {
    raw_sum: f64,
    raw_sq: f64,
    raw_max: u16,
    perc_sum: f64,
    perc_max: f64,
    jnd_pixels: usize,
    differing: usize,
    de_sum: f64,
    de_max: f64,
}

impl Acc {
    fn merge(self, o: Self) -> Self {
        Self {
            raw_sum: self.raw_sum + o.raw_sum,
            raw_sq: self.raw_sq + o.raw_sq,
            raw_max: self.raw_max.max(o.raw_max),
            perc_sum: self.perc_sum + o.perc_sum,
            perc_max: self.perc_max.max(o.perc_max),
            jnd_pixels: self.jnd_pixels + o.jnd_pixels,
            differing: self.differing + o.differing,
            de_sum: self.de_sum + o.de_sum,
            de_max: self.de_max.max(o.de_max),
        }
    }
}

/// Converts one pixel of log-encoded samples to CIELAB.
struct LabConverter {
    space: unilog_color::LogSpace,
    to_xyz: Mat3,
    white: Vec3,
}

impl LabConverter {
    fn lab(&self, rgb: [f64; 3]) -> Lab {
        let linear = Vec3::from_array(to_linear(self.space, rgb));
        xyz_to_lab((self.to_xyz * linear).to_array(), self.white)
    }
}

/// Shape string used in errors and logs.
fn shape(img: &Image) -> String {
    format!("{}x{}x{}", img.width, img.height, img.channels)
}

/// Compares two images.
///
/// Both must have the same width, height and channel count. When bit
/// depths differ the 8-bit image is promoted to 16-bit units.
///
/// ```rust
/// use unilog_compare::{compare, CompareOptions};
/// use unilog_io::Image;
///
/// let a = Image::from_u8(2, 1, 3, vec![10, 20, 30, 40, 50, 60]).unwrap();
/// let b = Image::from_u8(2, 1, 3, vec![10, 20, 30, 40, 50, 66]).unwrap();
/// let report = compare(&a, &b, &CompareOptions::default()).unwrap();
/// assert_eq!(report.raw_max, 6.0);
/// assert_eq!(report.jnd_pixels, 1);
/// ```
pub fn compare(a: &Image, b: &Image, opts: &CompareOptions) -> CompareResult<DifferenceReport> {
    if !a.same_shape(b) {
        return Err(CompareError::DimensionMismatch {
            a: shape(a),
            b: shape(b),
        });
    }
    trace!(shape = %shape(a), space = %opts.space, "compare");

    let depth = a.bit_depth().max(b.bit_depth());
    let max_value = f64::from(depth.max_value());
    let to_8bit = 255.0 / max_value;
    let channels = a.channels;
    let color_channels = a.color_channels();
    let pixels = a.pixel_count();

    let converter = LabConverter {
        space: opts.space,
        to_xyz: to_reference_matrix(opts.space, opts.cat)?,
        white: reference_white(),
    };
    let normalized = |img: &Image, base: usize| -> [f64; 3] {
        let v = |c: usize| f64::from(img.sample_at(base + c, depth)) / max_value;
        if color_channels == 1 {
            [v(0); 3]
        } else {
            [v(0), v(1), v(2)]
        }
    };

    let acc = (0..pixels)
        .into_par_iter()
        .fold(Acc::default, |mut acc, p| {
            let base = p * channels;
            let mut pixel_max = 0u16;
            let mut color_differs = false;
            for c in 0..channels {
                let d = a.sample_at(base + c, depth).abs_diff(b.sample_at(base + c, depth));
                let df = f64::from(d);
                acc.raw_sum += df;
                acc.raw_sq += df * df;
                pixel_max = pixel_max.max(d);
                if c < color_channels && d != 0 {
                    color_differs = true;
                }
            }
            acc.raw_max = acc.raw_max.max(pixel_max);
            if pixel_max == 0 {
                return acc;
            }

            acc.differing += 1;
            let score = f64::from(pixel_max) * to_8bit;
            acc.perc_sum += score;
            acc.perc_max = acc.perc_max.max(score);
            if score > opts.jnd_threshold {
                acc.jnd_pixels += 1;
            }
            if color_differs {
                let de = delta_e_2000(
                    converter.lab(normalized(a, base)),
                    converter.lab(normalized(b, base)),
                );
                acc.de_sum += de;
                acc.de_max = acc.de_max.max(de);
            }
            acc
        })
        .reduce(Acc::default, Acc::merge);

    let report = finish(acc, pixels, channels, depth, opts.jnd_threshold);
    debug!(
        differing = report.differing_pixels,
        jnd = report.jnd_pixels,
        delta_e_max = report.delta_e_max,
        "compared"
    );
    Ok(report)
}

fn finish(acc: Acc, pixels: usize, channels: usize, depth: BitDepth, jnd_threshold: f64) -> DifferenceReport {
    let mut report = DifferenceReport {
        pixel_count: pixels,
        channels,
        bit_depth: depth.bits(),
        raw_max: f64::from(acc.raw_max),
        perceptual_max: acc.perc_max,
        jnd_threshold,
        jnd_pixels: acc.jnd_pixels,
        jnd_exceeded: acc.jnd_pixels > 0,
        differing_pixels: acc.differing,
        delta_e_max: acc.de_max,
        ..Default::default()
    };
    if pixels == 0 {
        return report;
    }

    let n = pixels as f64;
    let samples = (pixels * channels) as f64;
    let mean = acc.raw_sum / samples;
    report.raw_mean = mean;
    report.raw_std = (acc.raw_sq / samples - mean * mean).max(0.0).sqrt();
    report.perceptual_mean = acc.perc_sum / n;
    report.differing_percent = 100.0 * acc.differing as f64 / n;
    report.delta_e_mean = acc.de_sum / n;
    report
}

/// Loads two images and compares them.
pub fn compare_files(a: &Path, b: &Path, opts: &CompareOptions) -> CompareResult<DifferenceReport> {
    let img_a = unilog_io::read(a)?;
    let img_b = unilog_io::read(b)?;
    compare(&img_a, &img_b, opts)
}
