// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster codec: decode photos into RGBA buffers and encode rectified output
// for storage or transport.

use std::io::Cursor;

use drawerscan_core::error::DrawerscanError;
use image::{DynamicImage, ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Encoded form of the rectified raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Lossy, no alpha; unset pixels come out black.
    Jpeg { quality: u8 },
    /// Lossless, keeps the transparent border.
    Png,
}

impl OutputFormat {
    /// MIME type for the encoded bytes.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg { .. } => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg { .. } => "jpg",
            Self::Png => "png",
        }
    }
}

/// Decode raw encoded bytes (JPEG, PNG, ...) into an image.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode(data: &[u8]) -> Result<DynamicImage, DrawerscanError> {
    let image = image::load_from_memory(data)
        .map_err(|err| DrawerscanError::Resource(format!("failed to decode image: {}", err)))?;
    debug!(
        width = image.width(),
        height = image.height(),
        "Image decoded from bytes"
    );
    Ok(image)
}

/// Load and decode an image file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open(path: impl AsRef<std::path::Path>) -> Result<DynamicImage, DrawerscanError> {
    image::open(path.as_ref()).map_err(|err| {
        DrawerscanError::Resource(format!(
            "failed to open {}: {}",
            path.as_ref().display(),
            err
        ))
    })
}

/// Encode `image` in the requested format.
pub fn encode(image: &RgbaImage, format: OutputFormat) -> Result<Vec<u8>, DrawerscanError> {
    match format {
        OutputFormat::Jpeg { quality } => to_jpeg_bytes(image, quality),
        OutputFormat::Png => to_png_bytes(image),
    }
}

/// Encode as JPEG with the given quality (1-100). Alpha is dropped.
pub fn to_jpeg_bytes(image: &RgbaImage, quality: u8) -> Result<Vec<u8>, DrawerscanError> {
    let mut buffer = Vec::new();
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|err| DrawerscanError::Encode(format!("JPEG encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Encode as PNG, keeping the alpha channel.
pub fn to_png_bytes(image: &RgbaImage) -> Result<Vec<u8>, DrawerscanError> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|err| DrawerscanError::Encode(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}
