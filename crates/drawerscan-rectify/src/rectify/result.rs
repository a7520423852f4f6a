// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectification output and its serializable record.

use drawerscan_core::error::DrawerscanError;
use drawerscan_core::{
    CompanionMetadata, ExifSummary, PerspectiveStrength, PxPerMm, Quad, TargetSize, round_to,
};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::geometry::Homography;
use crate::raster::codec::{self, OutputFormat};
use crate::rectify::quality::QualityMetrics;

/// Output of a single rectification call. Owned by the caller.
#[derive(Debug, Clone)]
pub struct RectificationResult {
    /// Rectified raster, exactly `target` in size.
    pub image: RgbaImage,
    /// Source-to-target transform, `h33 == 1`.
    pub homography: Homography,
    /// Validated quad, rounded to 2 decimals.
    pub quad: Quad,
    pub target: TargetSize,
    pub quality: QualityMetrics,
    /// Effective output resolution; only known when physical size was given.
    pub px_per_mm: Option<PxPerMm>,
}

impl RectificationResult {
    pub fn fit_error_px(&self) -> f64 {
        self.quality.fit_error_px
    }

    pub fn perspective(&self) -> PerspectiveStrength {
        self.quality.perspective
    }

    /// Encode the rectified raster.
    pub fn encode(&self, format: OutputFormat) -> Result<Vec<u8>, DrawerscanError> {
        codec::encode(&self.image, format)
    }

    /// Serializable summary with transmission rounding applied.
    pub fn record(&self, metadata: &CompanionMetadata) -> RectificationRecord {
        RectificationRecord {
            quad_px: self.quad.rounded(2).to_array(),
            homography: *self.homography.rounded(8).coefficients(),
            target_size_px: self.target.to_array(),
            px_per_mm_after_rect: self.px_per_mm,
            fit_error_px: Some(self.quality.fit_error_px)
                .filter(|e| e.is_finite())
                .map(|e| round_to(e, 4)),
            projective_strength: round_to(self.quality.projective_strength, 8),
            perspective: self.quality.perspective,
            exif: metadata.exif.clone(),
            orig_size_px: metadata.orig_size_px,
        }
    }
}

/// Persisted / transmitted form of a [`RectificationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectificationRecord {
    pub quad_px: [[f64; 2]; 4],
    pub homography: [f64; 9],
    pub target_size_px: [u32; 2],
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub px_per_mm_after_rect: Option<PxPerMm>,
    /// `null` when a corner mapped to infinity.
    pub fit_error_px: Option<f64>,
    pub projective_strength: f64,
    pub perspective: PerspectiveStrength,
    #[serde(skip_serializing_if = "ExifSummary::is_empty", default)]
    pub exif: ExifSummary,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub orig_size_px: Option<[u32; 2]>,
}

impl RectificationRecord {
    pub fn to_json(&self) -> Result<String, DrawerscanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rebuild the homography. Callers should still treat `h33` as arbitrary.
    pub fn homography(&self) -> Homography {
        Homography::from_coefficients(self.homography)
    }
}
