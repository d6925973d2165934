//! PNG reading and writing.
//!
//! Reads 8- and 16-bit grey, grey+alpha, RGB and RGBA. Palette and
//! sub-byte grey images are expanded to 8 bits; grey+alpha becomes RGBA.
//! Writes 8- or 16-bit grey, RGB or RGBA.

use crate::{Image, IoError, IoResult, PixelData};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Reads a PNG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::Decode(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::Decode("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::Decode(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];

    let (channels, data) = match (info.color_type, info.bit_depth) {
        (png::ColorType::Grayscale, png::BitDepth::Eight) => (1, PixelData::U8(bytes.to_vec())),
        (png::ColorType::Rgb, png::BitDepth::Eight) => (3, PixelData::U8(bytes.to_vec())),
        (png::ColorType::Rgba, png::BitDepth::Eight) => (4, PixelData::U8(bytes.to_vec())),
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            (4, PixelData::U8(grey_alpha_to_rgba(bytes)))
        }
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => (1, PixelData::U16(be_to_u16(bytes))),
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => (3, PixelData::U16(be_to_u16(bytes))),
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => (4, PixelData::U16(be_to_u16(bytes))),
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Sixteen) => {
            (4, PixelData::U16(grey_alpha_to_rgba(&be_to_u16(bytes))))
        }
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedLayout(format!("{color_type:?} {bit_depth:?}")));
        }
    };

    Image::new(info.width, info.height, channels, data)
}

/// Writes an image as PNG at its own bit depth.
///
/// Output goes through a temporary sibling file that is renamed into
/// place on success.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    unilog_core::write_atomic(path, |w| encode(w, image))
}

/// Encodes an image as PNG into any writer.
pub fn encode<W: Write>(writer: W, image: &Image) -> IoResult<()> {
    let color_type = match image.channels {
        1 => png::ColorType::Grayscale,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => return Err(IoError::Encode(format!("unsupported channel count: {n}"))),
    };

    let mut encoder = png::Encoder::new(writer, image.width, image.height);
    encoder.set_color(color_type);
    encoder.set_compression(png::Compression::default());

    let bytes: std::borrow::Cow<'_, [u8]> = match &image.data {
        PixelData::U8(v) => {
            encoder.set_depth(png::BitDepth::Eight);
            v.as_slice().into()
        }
        PixelData::U16(v) => {
            encoder.set_depth(png::BitDepth::Sixteen);
            v.iter().flat_map(|s| s.to_be_bytes()).collect::<Vec<u8>>().into()
        }
    };

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::Encode(e.to_string()))?;
    png_writer
        .write_image_data(&bytes)
        .map_err(|e| IoError::Encode(e.to_string()))?;
    png_writer.finish().map_err(|e| IoError::Encode(e.to_string()))?;
    Ok(())
}

fn be_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect()
}

fn grey_alpha_to_rgba<T: Copy>(samples: &[T]) -> Vec<T> {
    samples
        .chunks_exact(2)
        .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_rgb8() {
        let (w, h) = (16u32, 8u32);
        let data: Vec<u8> = (0..w * h * 3).map(|i| (i * 7 % 256) as u8).collect();
        let image = Image::from_u8(w, h, 3, data).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        write(&path, &image).unwrap();
        assert_eq!(read(&path).unwrap(), image);
    }

    #[test]
    fn roundtrip_rgba16() {
        let data: Vec<u16> = (0..4 * 4 * 4).map(|i| (i * 1021) as u16).collect();
        let image = Image::from_u16(4, 4, 4, data).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("rgba16.png");
        write(&path, &image).unwrap();
        assert_eq!(read(&path).unwrap(), image);
    }

    #[test]
    fn grey_stays_single_channel() {
        let image = Image::from_u8(3, 1, 1, vec![0, 100, 255]).unwrap();
        let mut buf = Vec::new();
        encode(&mut buf, &image).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("grey.png");
        std::fs::write(&path, buf).unwrap();
        let back = read(&path).unwrap();
        assert_eq!(back.channels, 1);
        assert_eq!(back, image);
    }

    #[test]
    fn garbage_is_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(matches!(read(&path), Err(IoError::Decode(_))));
    }
}
