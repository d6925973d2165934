//! Value range analysis.

use crate::Lut3D;

/// Range of the stored values of a table.
///
/// Reported after concatenation, where chaining two tables can push
/// values outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LutRange {
    /// Smallest stored channel value.
    pub min: f32,
    /// Largest stored channel value.
    pub max: f32,
    /// Percentage of channel values outside `[0, 1]`.
    pub clipped_percent: f64,
}

impl LutRange {
    /// Scans every channel of every node.
    ///
    /// An empty table yields all zeros.
    pub fn of(lut: &Lut3D) -> Self {
        if lut.data.is_empty() {
            return Self {
                min: 0.0,
                max: 0.0,
                clipped_percent: 0.0,
            };
        }

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut clipped = 0usize;
        for &v in lut.data.iter().flatten() {
            min = min.min(v);
            max = max.max(v);
            if !(0.0..=1.0).contains(&v) {
                clipped += 1;
            }
        }

        let total = lut.data.len() * 3;
        Self {
            min,
            max,
            clipped_percent: 100.0 * clipped as f64 / total as f64,
        }
    }

    /// True when any value lies outside `[0, 1]`.
    pub fn is_clipped(&self) -> bool {
        self.clipped_percent > 0.0
    }
}

impl std::fmt::Display for LutRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.6}, {:.6}], {:.2}% outside [0, 1]",
            self.min, self.max, self.clipped_percent
        )
    }
}
