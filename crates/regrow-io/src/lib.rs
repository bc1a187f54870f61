//! regrow-io - Image I/O for the segmentation engine
//!
//! Decodes source images into [`PixelGrid`]s and encodes rendered
//! segmentations back to files. Supported formats:
//!
//! - PNG (feature `png-format`, on by default)
//! - Binary PNM: P5 / P6 (feature `pnm`, on by default)
//!
//! # Examples
//!
//! ```
//! use regrow_core::{Color, PixelGrid};
//! use regrow_io::{ImageFormat, read_image_mem, write_image_mem};
//!
//! let grid = PixelGrid::from_fn(4, 4, |p| Color::gray((p.row * 60) as u8)).unwrap();
//! let bytes = write_image_mem(&grid, ImageFormat::Pnm).unwrap();
//! let decoded = read_image_mem(&bytes).unwrap();
//! assert_eq!(decoded.data(), grid.data());
//! ```

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use regrow_core::PixelGrid;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path
///
/// The format is detected from the file contents, not the extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelGrid> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path)?;
    read_image_format(BufReader::new(file), format)
}

/// Read an image from an in-memory buffer
pub fn read_image_mem(data: &[u8]) -> IoResult<PixelGrid> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

#[allow(unused_variables)]
fn read_image_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<PixelGrid> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => crate::png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => crate::pnm::read_pnm(reader),
        other => Err(IoError::UnsupportedFormat(format!(
            "cannot read format {:?}",
            other
        ))),
    }
}

/// Write an image to a file path
///
/// `ImageFormat::Unknown` falls back to the format implied by the path's
/// extension.
pub fn write_image<P: AsRef<Path>>(grid: &PixelGrid, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let format = match format {
        ImageFormat::Unknown => ImageFormat::from_path(path),
        f => f,
    };
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_format(grid, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into an in-memory buffer
pub fn write_image_mem(grid: &PixelGrid, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_format(grid, &mut buf, format)?;
    Ok(buf)
}

#[allow(unused_variables)]
fn write_image_format<W: Write>(grid: &PixelGrid, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => crate::png::write_png(grid, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => crate::pnm::write_pnm(grid, writer),
        other => Err(IoError::UnsupportedFormat(format!(
            "cannot write format {:?}",
            other
        ))),
    }
}
