//! Comparison options and the difference report.

use crate::CompareResult;
use std::fmt;
use unilog_color::{Cat, LogSpace};
use unilog_core::Settings;

/// How two images are scored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    /// Log space the pixel values are assumed to be encoded in.
    pub space: LogSpace,
    /// Chromatic adaptation for the space's gamut matrix.
    pub cat: Cat,
    /// Perceptual score above which a pixel counts as visibly different
    /// (8-bit levels).
    pub jnd_threshold: f64,
    /// Heatmap gain.
    pub amplify: f32,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            space: LogSpace::LogC4,
            cat: Cat::Cat02,
            jnd_threshold: 2.0,
            amplify: 1.0,
        }
    }
}

impl CompareOptions {
    /// Options taken from engine settings.
    pub fn from_settings(settings: &Settings) -> CompareResult<Self> {
        Ok(Self {
            space: settings.intermediate.parse()?,
            cat: settings
                .cat
                .parse::<Cat>()
                .map_err(unilog_color::ColorError::from)?,
            jnd_threshold: settings.jnd_threshold,
            amplify: settings.amplify,
        })
    }
}

/// Statistics of one image comparison.
///
/// Raw figures are in native sample units of the common bit depth;
/// perceptual figures are on the 8-bit scale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DifferenceReport {
    /// Pixels compared.
    pub pixel_count: usize,
    /// Channels per pixel.
    pub channels: usize,
    /// Bit depth the raw statistics are expressed in.
    pub bit_depth: u32,
    /// Mean absolute per-channel difference.
    pub raw_mean: f64,
    /// Largest absolute per-channel difference.
    pub raw_max: f64,
    /// Population standard deviation of the per-channel differences.
    pub raw_std: f64,
    /// Mean of each pixel's largest channel difference, 8-bit scale.
    pub perceptual_mean: f64,
    /// Largest per-pixel score, 8-bit scale.
    pub perceptual_max: f64,
    /// Threshold the JND count was taken against.
    pub jnd_threshold: f64,
    /// Pixels whose score exceeds the threshold.
    pub jnd_pixels: usize,
    /// True when any pixel exceeds the threshold.
    pub jnd_exceeded: bool,
    /// Pixels with any nonzero channel difference.
    pub differing_pixels: usize,
    /// `differing_pixels` as a percentage of all pixels.
    pub differing_percent: f64,
    /// Mean CIEDE2000 difference.
    pub delta_e_mean: f64,
    /// Largest CIEDE2000 difference.
    pub delta_e_max: f64,
}

impl DifferenceReport {
    /// True when every sample matched.
    pub fn is_identical(&self) -> bool {
        self.differing_pixels == 0
    }
}

impl fmt::Display for DifferenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Pixels:            {} x {} channels ({}-bit)", self.pixel_count, self.channels, self.bit_depth)?;
        writeln!(
            f,
            "  Pixels differ:     {} ({:.2}%)",
            self.differing_pixels, self.differing_percent
        )?;
        writeln!(
            f,
            "  Raw difference:    mean {:.4}  max {:.0}  std {:.4}",
            self.raw_mean, self.raw_max, self.raw_std
        )?;
        writeln!(
            f,
            "  Perceptual (8-bit): mean {:.4}  max {:.4}",
            self.perceptual_mean, self.perceptual_max
        )?;
        writeln!(
            f,
            "  JND > {:.2}:        {} pixels{}",
            self.jnd_threshold,
            self.jnd_pixels,
            if self.jnd_exceeded { " (visible)" } else { "" }
        )?;
        write!(
            f,
            "  Delta E 2000:      mean {:.4}  max {:.4}",
            self.delta_e_mean, self.delta_e_max
        )
    }
}
