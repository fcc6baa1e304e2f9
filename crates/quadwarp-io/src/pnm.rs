//! PNM (Portable aNyMap) format support
//!
//! Only the binary variants are handled: P5 (graymap) loads as 8 bpp and
//! P6 (pixmap) as 32 bpp RGB. Sample values above 255 are not supported.

use crate::{IoError, IoResult};
use quadwarp_core::{Pix, PixMut, PixelDepth, color};
use std::io::{BufRead, Write};

/// Read one whitespace-delimited header token, skipping `#` comments.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut in_comment = false;
    let mut byte = [0u8; 1];

    loop {
        if reader.read(&mut byte)? == 0 {
            if token.is_empty() {
                return Err(IoError::InvalidData("PNM header is truncated".to_string()));
            }
            return Ok(token);
        }
        let c = byte[0];
        if in_comment {
            in_comment = c != b'\n' && c != b'\r';
            continue;
        }
        match c {
            b'#' if token.is_empty() => in_comment = true,
            c if c.is_ascii_whitespace() => {
                if !token.is_empty() {
                    return Ok(token);
                }
            }
            c => token.push(c as char),
        }
    }
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("invalid PNM {}: {:?}", what, token)))
}

/// Read a binary PNM image
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Pix> {
    let magic = read_token(&mut reader)?;
    let (depth, samples) = match magic.as_str() {
        "P5" => (PixelDepth::Bit8, 1usize),
        "P6" => (PixelDepth::Bit32, 3usize),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM type: {}",
                other
            )));
        }
    };

    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;
    let maxval = read_number(&mut reader, "maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNM maxval: {}",
            maxval
        )));
    }

    let mut pix_mut = PixMut::new(width, height, depth)?;

    let row_bytes = width as usize * samples;
    let mut row = vec![0u8; row_bytes];
    for y in 0..height {
        reader
            .read_exact(&mut row)
            .map_err(|e| IoError::DecodeError(format!("PNM data error at row {}: {}", y, e)))?;
        for (x, px) in (0..width).zip(row.chunks_exact(samples)) {
            let val = match *px {
                [g] => g as u32,
                [r, g, b] => color::compose_rgb(r, g, b),
                _ => unreachable!(),
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Write a binary PNM image
///
/// 8 bpp images are written as P5, 32 bpp as P6. Alpha is dropped.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (magic, samples) = match pix.depth() {
        PixelDepth::Bit8 => ("P5", 1usize),
        PixelDepth::Bit32 => ("P6", 3usize),
    };

    write!(writer, "{}\n{} {}\n255\n", magic, width, height)?;

    let mut row = vec![0u8; width as usize * samples];
    for y in 0..height {
        for (&pixel, out) in pix.row_data(y).iter().zip(row.chunks_exact_mut(samples)) {
            if samples == 1 {
                out[0] = pixel as u8;
            } else {
                let (r, g, b) = color::extract_rgb(pixel);
                out.copy_from_slice(&[r, g, b]);
            }
        }
        writer.write_all(&row)?;
    }
    writer.flush()?;

    Ok(())
}
