//! PNG image format support
//!
//! Every PNG variant is normalized to 8 bits per sample on read: low bit
//! depth gray is expanded, 16-bit samples are stripped and palettes are
//! expanded to RGB(A). Gray images load as 8 bpp, everything else as
//! 32 bpp RGB or RGBA.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use quadwarp_core::{Pix, PixMut, PixelDepth, color};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let width = reader.info().width;
    let height = reader.info().height;
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }

    let (pix_depth, spp, samples) = match color_type {
        ColorType::Grayscale => (PixelDepth::Bit8, 1, 1),
        ColorType::GrayscaleAlpha => (PixelDepth::Bit32, 4, 2),
        ColorType::Rgb => (PixelDepth::Bit32, 3, 3),
        ColorType::Rgba => (PixelDepth::Bit32, 4, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = PixMut::new(width, height, pix_depth)?;
    pix_mut.set_spp(spp);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    if data.len() < bytes_per_row * height as usize || bytes_per_row < width as usize * samples {
        return Err(IoError::InvalidData("PNG frame is truncated".to_string()));
    }

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..][..width as usize * samples];
        for (x, px) in (0..width).zip(row.chunks_exact(samples)) {
            let val = match *px {
                [g] => g as u32,
                [g, a] => color::compose_rgba(g, g, g, a),
                [r, g, b] => color::compose_rgb(r, g, b),
                [r, g, b, a] => color::compose_rgba(r, g, b, a),
                _ => unreachable!(),
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// 8 bpp images are written as gray, 32 bpp as RGB, or RGBA when the
/// image carries four samples per pixel.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, samples) = match pix.depth() {
        PixelDepth::Bit8 => (ColorType::Grayscale, 1),
        PixelDepth::Bit32 if pix.spp() == 4 => (ColorType::Rgba, 4),
        PixelDepth::Bit32 => (ColorType::Rgb, 3),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = width as usize * samples;
    let mut data = vec![0u8; bytes_per_row * height as usize];

    for (y, out_row) in (0..height).zip(data.chunks_exact_mut(bytes_per_row)) {
        for (&pixel, out) in pix.row_data(y).iter().zip(out_row.chunks_exact_mut(samples)) {
            match color_type {
                ColorType::Grayscale => out[0] = pixel as u8,
                ColorType::Rgb => {
                    let (r, g, b) = color::extract_rgb(pixel);
                    out.copy_from_slice(&[r, g, b]);
                }
                _ => {
                    let (r, g, b, a) = color::extract_rgba(pixel);
                    out.copy_from_slice(&[r, g, b, a]);
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let mut pix_mut = PixMut::new(10, 10, PixelDepth::Bit8).unwrap();
        for y in 0..10 {
            for x in 0..10 {
                pix_mut.set_pixel(x, y, (x + y) * 10).unwrap();
            }
        }
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.width(), 10);
        assert_eq!(pix2.height(), 10);
        assert_eq!(pix2.depth(), PixelDepth::Bit8);
        assert!(pix.equals(&pix2));
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut pix_mut = PixMut::new(5, 5, PixelDepth::Bit32).unwrap();
        pix_mut.set_all(color::compose_rgb(0, 0, 0));
        pix_mut.set_rgb(0, 0, 255, 0, 0).unwrap();
        pix_mut.set_rgb(1, 1, 0, 255, 0).unwrap();
        pix_mut.set_rgb(2, 2, 0, 0, 255).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.depth(), PixelDepth::Bit32);
        assert_eq!(pix2.spp(), 3);
        assert_eq!(pix2.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(pix2.get_rgb(1, 1), Some((0, 255, 0)));
        assert_eq!(pix2.get_rgb(2, 2), Some((0, 0, 255)));
        assert_eq!(pix2.get_rgb(4, 4), Some((0, 0, 0)));
    }

    #[test]
    fn test_png_roundtrip_rgba() {
        let mut pix_mut = PixMut::new(3, 2, PixelDepth::Bit32).unwrap();
        pix_mut.set_spp(4);
        pix_mut
            .set_pixel(1, 1, color::compose_rgba(10, 20, 30, 128))
            .unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.spp(), 4);
        assert_eq!(
            pix2.get_pixel(1, 1).map(color::extract_rgba),
            Some((10, 20, 30, 128))
        );
        assert_eq!(pix2.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_read_png_garbage() {
        assert!(matches!(
            read_png(Cursor::new(b"not a png".to_vec())),
            Err(IoError::DecodeError(_))
        ));
    }
}
