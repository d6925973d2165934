//! Format detection from magic bytes and extensions.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Image formats the comparator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PNG.
    Png,
    /// TIFF.
    Tiff,
    /// Anything else.
    Unknown,
}

/// Extensions taking part in directory comparisons.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "tif", "tiff"];

impl Format {
    /// Detects the format, trying the file signature first and the
    /// extension second.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        match Self::from_magic_bytes(path)? {
            Format::Unknown => Ok(Self::from_extension(path)),
            known => Ok(known),
        }
    }

    /// Detects the format from the extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => Format::Png,
            Some("tif" | "tiff") => Format::Tiff,
            _ => Format::Unknown,
        }
    }

    /// Detects the format from the first bytes of the file.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut header = [0u8; 8];
        let mut file = File::open(path)?;
        let n = file.read(&mut header)?;
        Ok(Self::from_signature(&header[..n]))
    }

    fn from_signature(bytes: &[u8]) -> Self {
        const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";
        if bytes.starts_with(PNG) {
            Format::Png
        } else if bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*") {
            Format::Tiff
        } else {
            Format::Unknown
        }
    }
}
