//! 3-dimensional lookup table.

use crate::{sampler, LutError, LutResult};
use rayon::prelude::*;

/// A 3-dimensional lookup table.
///
/// # Structure
///
/// - `size^3` entries, each an RGB output triple
/// - Stored in file order: R varies fastest, then G, then B
/// - Node `(r, g, b)` sits at input coordinate
///   `domain_min + (domain_max - domain_min) * (r, g, b) / (size - 1)`
///
/// # Example
///
/// ```rust
/// use unilog_lut::Lut3D;
///
/// let lut = Lut3D::identity(33).unwrap();
/// assert_eq!(lut.node(32, 0, 0), [1.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3D {
    /// Node values, flattened as `r + size * (g + size * b)`.
    pub data: Vec<[f32; 3]>,
    /// Nodes per axis.
    pub size: usize,
    /// Input domain minimum (per channel).
    pub domain_min: [f32; 3],
    /// Input domain maximum (per channel).
    pub domain_max: [f32; 3],
    /// Optional title carried through `.cube` files.
    pub title: Option<String>,
}

impl Lut3D {
    /// Identity table over `[0, 1]`.
    pub fn identity(size: usize) -> LutResult<Self> {
        Self::from_fn(size, [0.0; 3], [1.0; 3], |c| c)
    }

    /// Wraps raw node data, which must hold exactly `size^3` entries.
    pub fn from_data(data: Vec<[f32; 3]>, size: usize) -> LutResult<Self> {
        if size < 2 {
            return Err(LutError::InvalidSize(size));
        }
        let expected = size * size * size;
        if data.len() != expected {
            return Err(LutError::SizeMismatch {
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            data,
            size,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            title: None,
        })
    }

    /// Builds a table by evaluating `f` at every node coordinate.
    ///
    /// Nodes are evaluated in parallel. Fails with `NonFinite` if any
    /// output is NaN or infinite once stored as `f32`.
    pub fn from_fn<F>(size: usize, domain_min: [f32; 3], domain_max: [f32; 3], f: F) -> LutResult<Self>
    where
        F: Fn([f64; 3]) -> [f64; 3] + Sync,
    {
        if size < 2 {
            return Err(LutError::InvalidSize(size));
        }
        check_domain(domain_min, domain_max)?;

        let grid = Grid::new(size, domain_min, domain_max);
        let data: Vec<[f32; 3]> = (0..size * size * size)
            .into_par_iter()
            .map(|i| f(grid.coord_of(i)).map(|v| v as f32))
            .collect();

        if let Some(i) = data.iter().position(|v| !v.iter().all(|c| c.is_finite())) {
            let (r, g, b) = grid.split(i);
            return Err(LutError::NonFinite(format!("at node ({r}, {g}, {b})")));
        }

        Ok(Self {
            data,
            size,
            domain_min,
            domain_max,
            title: None,
        })
    }

    /// Sets the input domain.
    pub fn with_domain(mut self, min: [f32; 3], max: [f32; 3]) -> Self {
        self.domain_min = min;
        self.domain_max = max;
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Number of nodes.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.data.len()
    }

    /// True when the table holds no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.size == 0
    }

    /// True when the domain is `[0, 1]` on every channel.
    pub fn has_unit_domain(&self) -> bool {
        self.domain_min == [0.0; 3] && self.domain_max == [1.0; 3]
    }

    /// Flat index of node `(r, g, b)`.
    #[inline]
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        r + self.size * (g + self.size * b)
    }

    /// Stored value of node `(r, g, b)`.
    #[inline]
    pub fn node(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        self.data[self.index(r, g, b)]
    }

    /// Input coordinate of node `(r, g, b)`.
    pub fn node_coord(&self, r: usize, g: usize, b: usize) -> [f64; 3] {
        Grid::new(self.size, self.domain_min, self.domain_max).coord([r, g, b])
    }

    /// Trilinear lookup of an `f32` triple.
    ///
    /// See [`sampler::evaluate`] for the exact semantics.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        sampler::evaluate(self, rgb.map(f64::from)).map(|v| v as f32)
    }

    /// Checks the structural invariants: size, entry count, finite values
    /// and an increasing domain.
    pub fn validate(&self) -> LutResult<()> {
        if self.size < 2 {
            return Err(LutError::InvalidSize(self.size));
        }
        let expected = self.size * self.size * self.size;
        if self.data.len() != expected {
            return Err(LutError::SizeMismatch {
                expected,
                found: self.data.len(),
            });
        }
        check_domain(self.domain_min, self.domain_max)?;
        if let Some(i) = self.data.iter().position(|v| !v.iter().all(|c| c.is_finite())) {
            return Err(LutError::NonFinite(format!("at entry {i}")));
        }
        Ok(())
    }
}

fn check_domain(min: [f32; 3], max: [f32; 3]) -> LutResult<()> {
    for c in 0..3 {
        if !(min[c].is_finite() && max[c].is_finite() && min[c] < max[c]) {
            return Err(LutError::Malformed(format!(
                "domain channel {c} must satisfy min < max, got [{}, {}]",
                min[c], max[c]
            )));
        }
    }
    Ok(())
}

/// Node-to-coordinate mapping for one grid.
#[derive(Debug, Clone, Copy)]
struct Grid {
    size: usize,
    min: [f64; 3],
    span: [f64; 3],
}

impl Grid {
    fn new(size: usize, min: [f32; 3], max: [f32; 3]) -> Self {
        let min = min.map(f64::from);
        let max = max.map(f64::from);
        Self {
            size,
            min,
            span: [max[0] - min[0], max[1] - min[1], max[2] - min[2]],
        }
    }

    fn split(&self, i: usize) -> (usize, usize, usize) {
        (i % self.size, (i / self.size) % self.size, i / (self.size * self.size))
    }

    fn coord(&self, idx: [usize; 3]) -> [f64; 3] {
        let n = (self.size - 1) as f64;
        std::array::from_fn(|c| {
            // Keep the end points exact.
            if idx[c] == self.size - 1 {
                self.min[c] + self.span[c]
            } else {
                self.min[c] + self.span[c] * (idx[c] as f64 / n)
            }
        })
    }

    fn coord_of(&self, i: usize) -> [f64; 3] {
        let (r, g, b) = self.split(i);
        self.coord([r, g, b])
    }
}
