//! Engine settings.
//!
//! Defaults that would otherwise be ambient process state (grid size,
//! domain, the intermediate space, comparator thresholds, worker counts)
//! live in [`Settings`]. Adapters load them once and pass them into each
//! operation.
//!
//! # File format
//!
//! ```yaml
//! lut_size: 33
//! intermediate: LogC4
//! cat: CAT02
//! jnd_threshold: 2.0
//! workers: 4
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine defaults passed explicitly into operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Grid size for generated tables.
    pub lut_size: usize,
    /// Lower domain bound for generated tables.
    pub domain_min: [f32; 3],
    /// Upper domain bound for generated tables.
    pub domain_max: [f32; 3],
    /// Name of the intermediate log space (the working space).
    pub intermediate: String,
    /// Chromatic adaptation transform name.
    pub cat: String,
    /// Just-noticeable difference threshold in 8-bit levels.
    pub jnd_threshold: f64,
    /// Heatmap amplification factor.
    pub amplify: f32,
    /// Worker threads for batch forms (0 = all cores).
    pub workers: usize,
    /// Upper bound on full-resolution images loaded at once.
    pub max_images_in_flight: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lut_size: 65,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            intermediate: "LogC4".to_string(),
            cat: "CAT02".to_string(),
            jnd_threshold: 2.0,
            amplify: 1.0,
            workers: 0,
            max_images_in_flight: 8,
        }
    }
}

impl Settings {
    /// Parses settings from YAML text and validates them.
    ///
    /// ```rust
    /// use unilog_core::Settings;
    ///
    /// let s = Settings::from_yaml_str("lut_size: 33\n").unwrap();
    /// assert_eq!(s.lut_size, 33);
    /// assert_eq!(s.intermediate, "LogC4");
    /// ```
    pub fn from_yaml_str(text: &str) -> CoreResult<Self> {
        // An empty document deserializes to unit, not to a defaulted struct.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self =
            serde_yaml::from_str(text).map_err(|e| CoreError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CoreError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading settings");
        Self::from_yaml_str(&text)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> CoreResult<()> {
        if self.lut_size < 2 {
            return Err(CoreError::Settings(format!(
                "lut_size must be at least 2, got {}",
                self.lut_size
            )));
        }
        for c in 0..3 {
            let (lo, hi) = (self.domain_min[c], self.domain_max[c]);
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(CoreError::Settings(format!(
                    "domain channel {c} must satisfy min < max, got [{lo}, {hi}]"
                )));
            }
        }
        if !(self.jnd_threshold.is_finite() && self.jnd_threshold >= 0.0) {
            return Err(CoreError::Settings("jnd_threshold must be >= 0".into()));
        }
        if !(self.amplify.is_finite() && self.amplify > 0.0) {
            return Err(CoreError::Settings("amplify must be > 0".into()));
        }
        if self.max_images_in_flight < 2 {
            return Err(CoreError::Settings(
                "max_images_in_flight must be at least 2".into(),
            ));
        }
        Ok(())
    }

    /// Worker count for image comparison batches.
    ///
    /// Each unit holds two full images, so the pool never exceeds
    /// `max_images_in_flight / 2` even when more workers are requested.
    pub fn compare_workers(&self) -> usize {
        let cap = (self.max_images_in_flight / 2).max(1);
        match self.workers {
            0 => cap,
            n => n.min(cap),
        }
    }
}
