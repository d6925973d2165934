//! In-memory integer image.

use crate::{IoError, IoResult};

/// Bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BitDepth {
    /// 8 bits per channel.
    Eight,
    /// 16 bits per channel.
    Sixteen,
}

impl BitDepth {
    /// Number of bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Eight => 8,
            Self::Sixteen => 16,
        }
    }

    /// Largest sample value.
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Eight => u8::MAX as u16,
            Self::Sixteen => u16::MAX,
        }
    }
}

/// Interleaved sample storage.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    /// 8-bit samples.
    U8(Vec<u8>),
    /// 16-bit samples.
    U16(Vec<u16>),
}

impl PixelData {
    /// Number of samples.
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
        }
    }

    /// True when there are no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A decoded image: `width * height` pixels of `channels` interleaved
/// samples, row-major.
///
/// Channel counts are 1 (grey), 3 (RGB) or 4 (RGBA).
///
/// ```rust
/// use unilog_io::{BitDepth, Image};
///
/// let img = Image::from_u8(2, 1, 3, vec![0, 128, 255, 10, 20, 30]).unwrap();
/// assert_eq!(img.bit_depth(), BitDepth::Eight);
/// assert_eq!(img.sample(1), 128);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Samples per pixel.
    pub channels: usize,
    /// Sample buffer.
    pub data: PixelData,
}

impl Image {
    /// Wraps a sample buffer, checking the channel count and length.
    pub fn new(width: u32, height: u32, channels: usize, data: PixelData) -> IoResult<Self> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(IoError::UnsupportedLayout(format!(
                "{channels} channels (expected 1, 3 or 4)"
            )));
        }
        let expected = width as usize * height as usize * channels;
        if data.len() != expected {
            return Err(IoError::InvalidImage(format!(
                "{width}x{height}x{channels} needs {expected} samples, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// 8-bit image.
    pub fn from_u8(width: u32, height: u32, channels: usize, data: Vec<u8>) -> IoResult<Self> {
        Self::new(width, height, channels, PixelData::U8(data))
    }

    /// 16-bit image.
    pub fn from_u16(width: u32, height: u32, channels: usize, data: Vec<u16>) -> IoResult<Self> {
        Self::new(width, height, channels, PixelData::U16(data))
    }

    /// Bits per channel.
    pub fn bit_depth(&self) -> BitDepth {
        match self.data {
            PixelData::U8(_) => BitDepth::Eight,
            PixelData::U16(_) => BitDepth::Sixteen,
        }
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Color channels, excluding alpha.
    pub fn color_channels(&self) -> usize {
        self.channels.min(3)
    }

    /// True when both images have the same width, height and channel count.
    pub fn same_shape(&self, other: &Image) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    /// Sample `i` in native units.
    #[inline]
    pub fn sample(&self, i: usize) -> u16 {
        match &self.data {
            PixelData::U8(v) => u16::from(v[i]),
            PixelData::U16(v) => v[i],
        }
    }

    /// Sample `i` expressed at `depth`. 8-bit values are promoted to
    /// 16-bit units by `x * 257`, which maps 255 onto 65535.
    #[inline]
    pub fn sample_at(&self, i: usize, depth: BitDepth) -> u16 {
        match (&self.data, depth) {
            (PixelData::U8(v), BitDepth::Sixteen) => u16::from(v[i]) * 257,
            _ => self.sample(i),
        }
    }

    /// Sample `i` normalized to `[0, 1]`.
    #[inline]
    pub fn normalized(&self, i: usize) -> f64 {
        f64::from(self.sample(i)) / f64::from(self.bit_depth().max_value())
    }
}
