//! PNG image format support
//!
//! Decoding normalizes every PNG flavor (palette, low bit depth gray,
//! 16-bit samples, alpha) down to 8-bit RGB, since segmentation only
//! compares color channels. Encoding always writes 8-bit RGB.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use regrow_core::{Color, PixelGrid};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PixelGrid> {
    let mut decoder = Decoder::new(reader);
    // Expand palettes and sub-byte gray, strip 16-bit samples to 8
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }
    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "palette was not expanded".to_string(),
            ));
        }
    };

    // Read image data
    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    if bytes_per_row < width as usize * samples || data.len() < bytes_per_row * height as usize {
        return Err(IoError::InvalidData("truncated PNG frame".to_string()));
    }

    let mut colors = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..];
        for x in 0..width as usize {
            let idx = x * samples;
            let color = match samples {
                1 | 2 => Color::gray(row[idx]),
                _ => Color::new(row[idx], row[idx + 1], row[idx + 2]),
            };
            colors.push(color);
        }
    }

    Ok(PixelGrid::from_colors(width, height, colors)?)
}

/// Write a PNG image as 8-bit RGB
pub fn write_png<W: Write>(grid: &PixelGrid, writer: W) -> IoResult<()> {
    let width = grid.width();
    let height = grid.height();

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let data: Vec<u8> = grid.data().iter().flat_map(|c| c.channels()).collect();

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use regrow_core::Point;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_rgb() {
        let grid = PixelGrid::from_fn(5, 3, |p| {
            Color::new((p.col * 40) as u8, (p.row * 80) as u8, 7)
        })
        .unwrap();

        let mut buf = Vec::new();
        write_png(&grid, &mut buf).unwrap();
        let decoded = read_png(Cursor::new(buf)).unwrap();

        assert_eq!(decoded.dimensions(), (5, 3));
        assert_eq!(decoded.data(), grid.data());
    }

    #[test]
    fn test_png_grayscale_expands_to_rgb() {
        let mut buf = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buf, 2, 1);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Eight);
            let mut w = encoder.write_header().unwrap();
            w.write_image_data(&[10, 200]).unwrap();
        }
        let decoded = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(decoded.get(Point::new(0, 0)), Some(Color::gray(10)));
        assert_eq!(decoded.get(Point::new(0, 1)), Some(Color::gray(200)));
    }

    #[test]
    fn test_png_rgba_drops_alpha() {
        let mut buf = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buf, 1, 1);
            encoder.set_color(ColorType::Rgba);
            encoder.set_depth(BitDepth::Eight);
            let mut w = encoder.write_header().unwrap();
            w.write_image_data(&[1, 2, 3, 0]).unwrap();
        }
        let decoded = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(decoded.get(Point::new(0, 0)), Some(Color::new(1, 2, 3)));
    }

    #[test]
    fn test_png_garbage_is_decode_error() {
        let result = read_png(Cursor::new(vec![0u8; 16]));
        assert!(matches!(result, Err(IoError::DecodeError(_))));
    }
}
