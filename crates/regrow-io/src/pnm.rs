//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P5 binary) and PPM (P6 binary) images, and writes PPM.
//! ASCII variants (P1/P2/P3), PBM and PAM (P7) are not supported.
//! Samples with `maxval` other than 255 are rescaled to 8 bits.

use crate::{IoError, IoResult};
use regrow_core::{Color, PixelGrid};
use std::io::{BufRead, Read, Write};

/// Parsed PNM header
struct PnmHeader {
    magic: [u8; 2],
    width: u32,
    height: u32,
    maxval: u32,
}

/// Read the next whitespace-delimited header token, skipping `#` comments.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            break;
        }
        let b = byte[0];
        if b == b'#' {
            // Skip to end of line
            let mut discard = Vec::new();
            reader.read_until(b'\n', &mut discard)?;
            if !token.is_empty() {
                break;
            }
            continue;
        }
        if b.is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            break;
        }
        token.push(b);
    }
    if token.is_empty() {
        return Err(IoError::InvalidData("truncated PNM header".to_string()));
    }
    String::from_utf8(token).map_err(|_| IoError::InvalidData("non-ASCII PNM header".to_string()))
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse::<u32>()
        .map_err(|_| IoError::InvalidData(format!("invalid PNM {}: {:?}", what, token)))
}

fn read_header<R: BufRead>(reader: &mut R) -> IoResult<PnmHeader> {
    let magic_token = read_token(reader)?;
    let magic: [u8; 2] = match magic_token.as_bytes() {
        b"P5" => *b"P5",
        b"P6" => *b"P6",
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM variant: {}",
                String::from_utf8_lossy(other)
            )));
        }
    };
    let width = read_number(reader, "width")?;
    let height = read_number(reader, "height")?;
    let maxval = read_number(reader, "maxval")?;
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("invalid PNM maxval: {}", maxval)));
    }
    Ok(PnmHeader {
        magic,
        width,
        height,
        maxval,
    })
}

/// Read a binary PNM image (P5/P6) from a reader.
///
/// Gray images are returned with all three channels equal.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<PixelGrid> {
    let header = read_header(&mut reader)?;
    let channels = if &header.magic == b"P6" { 3 } else { 1 };
    let bytes_per_sample = if header.maxval > 255 { 2 } else { 1 };
    if header.width == 0 || header.height == 0 {
        return Err(IoError::InvalidData(format!(
            "invalid PNM dimensions: {}x{}",
            header.width, header.height
        )));
    }
    let len = (header.width as usize)
        .checked_mul(header.height as usize)
        .and_then(|n| n.checked_mul(channels * bytes_per_sample))
        .ok_or_else(|| {
            IoError::InvalidData(format!(
                "PNM raster too large: {}x{}",
                header.width, header.height
            ))
        })?;

    // Grow the buffer with the data actually present, not the header's claim
    let mut raw = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut raw)?;
    if raw.len() < len {
        return Err(IoError::DecodeError(format!(
            "PNM raster truncated: {} of {} bytes",
            raw.len(),
            len
        )));
    }

    let maxval = header.maxval;
    let scale = |v: u32| -> u8 {
        if maxval == 255 {
            v as u8
        } else {
            ((v.min(maxval) * 255 + maxval / 2) / maxval) as u8
        }
    };

    let samples: Vec<u8> = if bytes_per_sample == 2 {
        raw.chunks_exact(2)
            .map(|b| scale(((b[0] as u32) << 8) | b[1] as u32))
            .collect()
    } else {
        raw.iter().map(|&b| scale(b as u32)).collect()
    };

    let colors = if channels == 3 {
        samples
            .chunks_exact(3)
            .map(|c| Color::new(c[0], c[1], c[2]))
            .collect()
    } else {
        samples.into_iter().map(Color::gray).collect()
    };

    Ok(PixelGrid::from_colors(header.width, header.height, colors)?)
}

/// Write a `PixelGrid` as a binary PPM (P6, maxval 255).
pub fn write_pnm<W: Write>(grid: &PixelGrid, mut writer: W) -> IoResult<()> {
    write!(writer, "P6\n{} {}\n255\n", grid.width(), grid.height())?;
    let data: Vec<u8> = grid.data().iter().flat_map(|c| c.channels()).collect();
    writer.write_all(&data)?;
    writer.flush()?;
    Ok(())
}
