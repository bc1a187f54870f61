//! Format sniffing
//!
//! Only two containers are handled: PNG and binary PNM. Files are told
//! apart by their leading bytes; names are only a fallback for writing.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Container format of an image file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Neither PNG nor binary PNM
    #[default]
    Unknown,
    Png,
    /// Binary PNM (P5 graymap or P6 pixmap)
    Pnm,
}

impl ImageFormat {
    /// Extension used when writing this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Pnm => "pnm",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Self::Png,
            "pnm" | "ppm" | "pgm" => Self::Pnm,
            _ => Self::Unknown,
        }
    }

    /// Guess the format from a path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map_or(Self::Unknown, Self::from_extension)
    }
}

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const PNM_GRAY: &[u8] = b"P5";
const PNM_COLOR: &[u8] = b"P6";

/// Sniff the format of the file at `path` from its first bytes.
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 8];
    let n = file.read(&mut header)?;
    detect_format_from_bytes(&header[..n])
}

/// Sniff the format of an in-memory image.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "too few bytes to identify an image".to_string(),
        ));
    }

    let format = if data.starts_with(PNG_SIGNATURE) {
        ImageFormat::Png
    } else if data.starts_with(PNM_GRAY) || data.starts_with(PNM_COLOR) {
        ImageFormat::Pnm
    } else {
        ImageFormat::Unknown
    };
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert_eq!(detect_format_from_bytes(&header).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_detect_pnm() {
        assert_eq!(
            detect_format_from_bytes(b"P6\n2 2\n255\n").unwrap(),
            ImageFormat::Pnm
        );
        assert_eq!(
            detect_format_from_bytes(b"P5 1 1 255 ").unwrap(),
            ImageFormat::Pnm
        );
        // ASCII variants are not recognized
        assert_eq!(
            detect_format_from_bytes(b"P3\n").unwrap(),
            ImageFormat::Unknown
        );
    }

    #[test]
    fn test_detect_too_short() {
        assert!(detect_format_from_bytes(&[0x89]).is_err());
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(ImageFormat::from_path("a/b.PNG"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path("seg.ppm"), ImageFormat::Pnm);
        assert_eq!(ImageFormat::from_path("noext"), ImageFormat::Unknown);
    }
}
