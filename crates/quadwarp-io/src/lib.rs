//! quadwarp-io - Image I/O for quadwarp
//!
//! Supported formats:
//!
//! - PNG (feature `png-format`)
//! - Binary PNM, P5 and P6 (feature `pnm`)
//!
//! # Examples
//!
//! ```no_run
//! use quadwarp_io::{ImageFormat, read_image, write_image};
//!
//! let pix = read_image("input.png").unwrap();
//! write_image(&pix, "output.png", ImageFormat::Png).unwrap();
//! ```

mod error;
pub mod format;

#[cfg(feature = "png-format")]
pub mod png;

#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use quadwarp_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;

/// Read an image from a file, detecting the format from its header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let mut data = Vec::new();
    BufReader::new(File::open(path)?).read_to_end(&mut data)?;
    read_image_mem(&data)
}

/// Read an image from memory, detecting the format from its header.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

/// Decode an image of a known format from a reader.
pub fn read_image_format<R: Read>(reader: R, format: ImageFormat) -> IoResult<Pix> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => {
            let mut data = Vec::new();
            let mut reader = reader;
            reader.read_to_end(&mut data)?;
            png::read_png(Cursor::new(data))
        }

        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(BufReader::new(reader)),

        _ => Err(IoError::UnsupportedFormat(format!(
            "cannot read {:?} images",
            format
        ))),
    }
}

/// Write an image to a file in the given format.
///
/// [`ImageFormat::Unknown`] falls back to the path's extension.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let format = match format {
        ImageFormat::Unknown => ImageFormat::from_path(&path),
        known => known,
    };
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_format(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into memory.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_format(pix, &mut buf, format)?;
    Ok(buf)
}

/// Encode an image to a writer.
pub fn write_image_format<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),

        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, writer),

        _ => {
            let _ = (pix, writer);
            Err(IoError::UnsupportedFormat(format!(
                "cannot write {:?} images",
                format
            )))
        }
    }
}
