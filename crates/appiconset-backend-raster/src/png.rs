//! Deterministic PNG encoder.
//!
//! Uses fixed compression settings so the same pixels always encode to the same
//! bytes. The render cache and repeated runs over a populated asset catalog both
//! rely on that.

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use std::io::Write;
use thiserror::Error;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

fn bytes_per_pixel(color_type: ColorType) -> Result<usize, PngError> {
    match color_type {
        ColorType::Rgb => Ok(3),
        ColorType::Rgba => Ok(4),
        other => Err(PngError::InvalidDimensions(format!(
            "{:?} color not supported",
            other
        ))),
    }
}

/// Encode raw 8-bit pixel data to any writer.
pub fn write_raw_to_writer<W: Write>(
    data: &[u8],
    width: u32,
    height: u32,
    color_type: ColorType,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    if width == 0 || height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "{}x{} has no pixels",
            width, height
        )));
    }

    let expected_size = width as usize * height as usize * bytes_per_pixel(color_type)?;
    if data.len() != expected_size {
        return Err(PngError::InvalidDimensions(format!(
            "Expected {} bytes for {}x{} {:?}, got {}",
            expected_size,
            width,
            height,
            color_type,
            data.len()
        )));
    }

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    // The png crate writes no timestamps or other variable metadata.
    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(data)?;

    Ok(())
}

/// Encode RGBA8 pixels to a PNG byte vector.
pub fn encode_rgba(
    data: &[u8],
    width: u32,
    height: u32,
    config: &PngConfig,
) -> Result<Vec<u8>, PngError> {
    let mut out = Vec::new();
    write_raw_to_writer(data, width, height, ColorType::Rgba, &mut out, config)?;
    Ok(out)
}

/// Encode RGB8 pixels to a PNG byte vector.
pub fn encode_rgb(
    data: &[u8],
    width: u32,
    height: u32,
    config: &PngConfig,
) -> Result<Vec<u8>, PngError> {
    let mut out = Vec::new();
    write_raw_to_writer(data, width, height, ColorType::Rgb, &mut out, config)?;
    Ok(out)
}

/// First eight bytes of every PNG file.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// The zero-length `IEND` chunk with its CRC; every complete PNG ends with it.
const IEND_TRAILER: [u8; 12] = [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xae, 0x42, 0x60, 0x82];

/// Whether `data` starts with the PNG signature and ends with the `IEND` chunk.
///
/// Cheap structural check that catches truncated files without decoding them.
pub fn is_complete_png(data: &[u8]) -> bool {
    data.len() >= PNG_SIGNATURE.len() + IEND_TRAILER.len()
        && data.starts_with(&PNG_SIGNATURE)
        && data.ends_with(&IEND_TRAILER)
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
