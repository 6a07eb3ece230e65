//! JPEG encoding and saving.

use std::path::Path;

use image::RgbImage;
use jpeg_encoder::{ColorType, Encoder};

use crate::error::SiteError;

/// JPEG encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegSettings {
    /// Quality, 1-100.
    pub quality: u8,
    /// Emit progressive scans.
    pub progressive: bool,
    /// Compute optimized Huffman tables.
    pub optimize: bool,
}

impl Default for JpegSettings {
    fn default() -> Self {
        Self { quality: 82, progressive: true, optimize: true }
    }
}

impl JpegSettings {
    /// Default settings at a different quality.
    #[must_use]
    pub fn with_quality(quality: u8) -> Self {
        Self { quality, ..Self::default() }
    }
}

/// Encode `image` as JPEG bytes.
///
/// # Errors
///
/// Returns an error if the image exceeds JPEG's 65535px limit or encoding fails.
pub fn encode_jpeg(image: &RgbImage, settings: JpegSettings) -> Result<Vec<u8>, SiteError> {
    let (width, height) = image.dimensions();
    let too_large =
        || SiteError::Encode(format!("{width}x{height} exceeds the 65535px JPEG limit"));
    let width = u16::try_from(width).map_err(|_| too_large())?;
    let height = u16::try_from(height).map_err(|_| too_large())?;

    let mut bytes = Vec::new();
    let mut encoder = Encoder::new(&mut bytes, settings.quality);
    encoder.set_progressive(settings.progressive);
    encoder.set_optimized_huffman_tables(settings.optimize);
    encoder
        .encode(image.as_raw(), width, height, ColorType::Rgb)
        .map_err(|e| SiteError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Encode `image` and write it to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if encoding fails or the file cannot be written.
pub fn save_jpeg(image: &RgbImage, path: &Path, settings: JpegSettings) -> Result<(), SiteError> {
    let bytes = encode_jpeg(image, settings)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
