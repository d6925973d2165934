//! # unilog-io
//!
//! Integer image I/O for the comparator.
//!
//! Reads and writes 8- and 16-bit PNG and TIFF into an [`Image`]:
//! width, height, 1/3/4 interleaved channels and a `u8` or `u16` buffer.
//! The format is detected from the file signature, then the extension.
//!
//! # Usage
//!
//! ```rust,no_run
//! use unilog_io::{read, write};
//!
//! let image = read("render.tif")?;
//! write("render.png", &image)?;
//! # Ok::<(), unilog_io::IoError>(())
//! ```
//!
//! # Dependencies
//!
//! - [`png`] / [`tiff`] - codecs
//! - `unilog-core` - atomic writes, error kinds
//! - [`thiserror`] - error handling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod format;
mod image;
pub mod png;
pub mod tiff;

pub use error::{IoError, IoResult};
pub use format::{Format, SUPPORTED_EXTENSIONS};
pub use image::{BitDepth, Image, PixelData};

use std::path::Path;
use tracing::trace;

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

/// Reads an image, detecting the format.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    trace!(path = %path.display(), "read image");
    match Format::detect(path)? {
        Format::Png => png::read(path),
        Format::Tiff => tiff::read(path),
        Format::Unknown => Err(unsupported(path)),
    }
}

/// Writes an image in the format named by the extension.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let path = path.as_ref();
    trace!(path = %path.display(), "write image");
    match Format::from_extension(path) {
        Format::Png => png::write(path, image),
        Format::Tiff => tiff::write(path, image),
        Format::Unknown => Err(unsupported(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unilog_core::{Classify, ErrorKind};

    #[test]
    fn dispatch_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let image = Image::from_u8(2, 2, 3, vec![7; 12]).unwrap();
        for name in ["a.png", "a.tif", "a.TIFF"] {
            let path = dir.path().join(name);
            write(&path, &image).unwrap();
            assert_eq!(read(&path).unwrap(), image, "{name}");
        }
        assert!(matches!(
            write(dir.path().join("a.jpg"), &image),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn signature_wins_over_extension() {
        let dir = tempfile::tempdir().unwrap();
        let image = Image::from_u8(1, 1, 1, vec![42]).unwrap();
        let png_path = dir.path().join("real.png");
        write(&png_path, &image).unwrap();
        let misnamed = dir.path().join("misnamed.tif");
        std::fs::copy(&png_path, &misnamed).unwrap();
        assert_eq!(read(&misnamed).unwrap(), image);
    }

    #[test]
    fn missing_file() {
        let err = read("/no/such/image.png").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }
}
