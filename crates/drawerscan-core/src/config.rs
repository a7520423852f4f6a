// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectification configuration.

use serde::{Deserialize, Serialize};

use crate::error::{DrawerscanError, Result};

/// Tunables for a rectification call.
///
/// Missing fields in a serialized config fall back to [`RectifyConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectifyConfig {
    /// Output pixels per millimetre when the drawer size is known.
    pub resolution_px_per_mm: f64,
    /// Longest output side when the size has to be estimated from the quad.
    pub max_estimation_dimension_px: u32,
    /// Upper bound on output `width * height`.
    pub pixel_budget: u64,
    /// Smallest accepted quad area, in square pixels.
    pub min_quad_area_px: f64,
    /// Floor for each side of an estimated target.
    pub min_estimated_side_px: u32,
    /// JPEG quality (1-100) for the encoded output.
    pub jpeg_quality: u8,
}

impl RectifyConfig {
    pub const DEFAULT_RESOLUTION_PX_PER_MM: f64 = 15.0;
    pub const DEFAULT_MAX_ESTIMATION_DIMENSION_PX: u32 = 1200;
    pub const DEFAULT_PIXEL_BUDGET: u64 = 16_000_000;
    pub const DEFAULT_MIN_QUAD_AREA_PX: f64 = 25.0;
    pub const DEFAULT_MIN_ESTIMATED_SIDE_PX: u32 = 40;
    pub const DEFAULT_JPEG_QUALITY: u8 = 92;

    /// Check every value is in range.
    pub fn validate(&self) -> Result<()> {
        if !self.resolution_px_per_mm.is_finite() || self.resolution_px_per_mm <= 0.0 {
            return Err(DrawerscanError::InvalidConfig(format!(
                "resolution_px_per_mm must be positive, got {}",
                self.resolution_px_per_mm
            )));
        }
        if self.max_estimation_dimension_px == 0 {
            return Err(DrawerscanError::InvalidConfig(
                "max_estimation_dimension_px must be at least 1".into(),
            ));
        }
        if self.pixel_budget == 0 {
            return Err(DrawerscanError::InvalidConfig(
                "pixel_budget must be at least 1".into(),
            ));
        }
        if !self.min_quad_area_px.is_finite() || self.min_quad_area_px < 0.0 {
            return Err(DrawerscanError::InvalidConfig(format!(
                "min_quad_area_px must be non-negative, got {}",
                self.min_quad_area_px
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(DrawerscanError::InvalidConfig(format!(
                "jpeg_quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

impl Default for RectifyConfig {
    fn default() -> Self {
        Self {
            resolution_px_per_mm: Self::DEFAULT_RESOLUTION_PX_PER_MM,
            max_estimation_dimension_px: Self::DEFAULT_MAX_ESTIMATION_DIMENSION_PX,
            pixel_budget: Self::DEFAULT_PIXEL_BUDGET,
            min_quad_area_px: Self::DEFAULT_MIN_QUAD_AREA_PX,
            min_estimated_side_px: Self::DEFAULT_MIN_ESTIMATED_SIDE_PX,
            jpeg_quality: Self::DEFAULT_JPEG_QUALITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(RectifyConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: RectifyConfig =
            serde_json::from_str(r#"{ "resolution_px_per_mm": 10.0 }"#).unwrap();
        assert_eq!(config.resolution_px_per_mm, 10.0);
        assert_eq!(config.pixel_budget, 16_000_000);
        assert_eq!(config.max_estimation_dimension_px, 1200);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let bad_resolution = RectifyConfig {
            resolution_px_per_mm: 0.0,
            ..RectifyConfig::default()
        };
        assert!(matches!(
            bad_resolution.validate(),
            Err(DrawerscanError::InvalidConfig(_))
        ));

        let bad_budget = RectifyConfig {
            pixel_budget: 0,
            ..RectifyConfig::default()
        };
        assert!(bad_budget.validate().is_err());

        let bad_quality = RectifyConfig {
            jpeg_quality: 0,
            ..RectifyConfig::default()
        };
        assert!(bad_quality.validate().is_err());
    }
}
