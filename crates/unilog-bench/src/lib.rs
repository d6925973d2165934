//! Benchmark fixtures for the unilog crates.
//!
//! Run with: `cargo bench -p unilog-bench`

use unilog_io::Image;

/// Evenly spaced samples over `[0, 1]`.
pub fn ramp_values(count: usize) -> Vec<f64> {
    let denom = count.saturating_sub(1).max(1) as f64;
    (0..count).map(|i| i as f64 / denom).collect()
}

/// Pseudo-random RGB triples in `[0, 1]` from a fixed LCG seed.
pub fn scattered_rgb(count: usize) -> Vec<[f64; 3]> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 40) as f64 / (1u64 << 24) as f64
    };
    (0..count).map(|_| [next(), next(), next()]).collect()
}

/// A 16-bit RGB gradient, optionally nudged so two renders differ.
pub fn gradient_image(width: u32, height: u32, offset: u16) -> Image {
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 65535 / width.max(1)) as u16;
            let g = (y * 65535 / height.max(1)) as u16;
            let b = r / 2 + g / 2;
            data.extend_from_slice(&[r.saturating_add(offset), g, b]);
        }
    }
    // Shape and length are consistent by construction.
    match Image::from_u16(width, height, 3, data) {
        Ok(img) => img,
        Err(e) => panic!("fixture image: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_have_expected_shape() {
        assert_eq!(ramp_values(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(scattered_rgb(100).iter().flatten().all(|v| (0.0..1.0).contains(v)));
        let img = gradient_image(8, 4, 0);
        assert_eq!(img.pixel_count(), 32);
    }
}
