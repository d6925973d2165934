//! TIFF reading and writing.
//!
//! Reads 8- and 16-bit grey, grey+alpha, RGB and RGBA strips or tiles;
//! grey+alpha becomes RGBA. Writes at the image's own bit depth.

use crate::{Image, IoError, IoResult, PixelData};
use std::fs::File;
use std::io::{BufReader, Seek, Write};
use std::path::Path;

fn decode_err(e: tiff::TiffError) -> IoError {
    IoError::Decode(e.to_string())
}

fn encode_err(e: tiff::TiffError) -> IoError {
    IoError::Encode(e.to_string())
}

/// Reads a TIFF file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    use tiff::decoder::{Decoder, DecodingResult};
    use tiff::ColorType;

    let file = File::open(path.as_ref())?;
    let mut decoder = Decoder::new(BufReader::new(file)).map_err(decode_err)?;
    let (width, height) = decoder.dimensions().map_err(decode_err)?;
    let color_type = decoder.colortype().map_err(decode_err)?;
    let result = decoder.read_image().map_err(decode_err)?;

    let (channels, data) = match (color_type, result) {
        (ColorType::Gray(8), DecodingResult::U8(buf)) => (1, PixelData::U8(buf)),
        (ColorType::RGB(8), DecodingResult::U8(buf)) => (3, PixelData::U8(buf)),
        (ColorType::RGBA(8), DecodingResult::U8(buf)) => (4, PixelData::U8(buf)),
        (ColorType::GrayA(8), DecodingResult::U8(buf)) => (4, PixelData::U8(grey_alpha_to_rgba(&buf))),
        (ColorType::Gray(16), DecodingResult::U16(buf)) => (1, PixelData::U16(buf)),
        (ColorType::RGB(16), DecodingResult::U16(buf)) => (3, PixelData::U16(buf)),
        (ColorType::RGBA(16), DecodingResult::U16(buf)) => (4, PixelData::U16(buf)),
        (ColorType::GrayA(16), DecodingResult::U16(buf)) => {
            (4, PixelData::U16(grey_alpha_to_rgba(&buf)))
        }
        (ct, _) => {
            return Err(IoError::UnsupportedLayout(format!("TIFF color type {ct:?}")));
        }
    };

    Image::new(width, height, channels, data)
}

/// Writes an image as TIFF at its own bit depth.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    unilog_core::write_atomic(path, |w| encode(w, image))
}

/// Encodes an image as TIFF into a seekable writer.
pub fn encode<W: Write + Seek>(writer: W, image: &Image) -> IoResult<()> {
    use tiff::encoder::{colortype, TiffEncoder};

    let mut encoder = TiffEncoder::new(writer).map_err(encode_err)?;
    let (w, h) = (image.width, image.height);

    let result = match (&image.data, image.channels) {
        (PixelData::U8(d), 1) => encoder.write_image::<colortype::Gray8>(w, h, d),
        (PixelData::U8(d), 3) => encoder.write_image::<colortype::RGB8>(w, h, d),
        (PixelData::U8(d), 4) => encoder.write_image::<colortype::RGBA8>(w, h, d),
        (PixelData::U16(d), 1) => encoder.write_image::<colortype::Gray16>(w, h, d),
        (PixelData::U16(d), 3) => encoder.write_image::<colortype::RGB16>(w, h, d),
        (PixelData::U16(d), 4) => encoder.write_image::<colortype::RGBA16>(w, h, d),
        (_, n) => return Err(IoError::Encode(format!("unsupported channel count: {n}"))),
    };
    result.map_err(encode_err)
}

fn grey_alpha_to_rgba<T: Copy>(samples: &[T]) -> Vec<T> {
    samples
        .chunks_exact(2)
        .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
        .collect()
}
