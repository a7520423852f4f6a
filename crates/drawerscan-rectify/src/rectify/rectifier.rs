// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectification pipeline: validate the user's outline, size the output,
// estimate and invert the homography, warp, and assess the fit.

use std::borrow::Cow;
use std::sync::atomic::AtomicU64;

use drawerscan_core::error::{DrawerscanError, Result};
use drawerscan_core::{PhysicalDimensions, Point2D, PxPerMm, RasterSize, RectifyConfig, TargetSize};
use image::{DynamicImage, RgbaImage};
use tracing::{debug, info, instrument, warn};

use crate::geometry::{homography, quad, target};
use crate::raster::{codec, warp};
use crate::rectify::quality;
use crate::rectify::result::RectificationResult;

/// Turns a photo plus a drawer outline into a flat, upright raster.
///
/// Holds only configuration, so one instance can serve concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct Rectifier {
    config: RectifyConfig,
}

impl Rectifier {
    // -- Construction ---------------------------------------------------------

    /// Create a rectifier, rejecting out-of-range configuration up front.
    pub fn new(config: RectifyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RectifyConfig {
        &self.config
    }

    // -- Pipeline -------------------------------------------------------------

    /// Decode `data` and rectify it.
    ///
    /// Decoding failures surface as [`DrawerscanError::Resource`] before any
    /// geometry is looked at.
    #[instrument(skip(self, data, corners), fields(data_len = data.len()))]
    pub fn rectify_bytes(
        &self,
        data: &[u8],
        corners: &[Point2D],
        physical: Option<PhysicalDimensions>,
    ) -> Result<RectificationResult> {
        let source = codec::decode(data)?;
        self.rectify(&source, corners, physical)
    }

    /// Rectify an already-decoded photo.
    ///
    /// `corners` may be in any order. `physical` fixes the output scale when
    /// the drawer's size is known; otherwise proportions come from the
    /// outline itself.
    pub fn rectify(
        &self,
        source: &DynamicImage,
        corners: &[Point2D],
        physical: Option<PhysicalDimensions>,
    ) -> Result<RectificationResult> {
        self.rectify_with_progress(source, corners, physical, None)
    }

    /// Same as [`Rectifier::rectify`], counting finished output rows into
    /// `rows_done` so another thread can watch progress.
    #[instrument(
        skip(self, source, corners, rows_done),
        fields(width = source.width(), height = source.height())
    )]
    pub fn rectify_with_progress(
        &self,
        source: &DynamicImage,
        corners: &[Point2D],
        physical: Option<PhysicalDimensions>,
        rows_done: Option<&AtomicU64>,
    ) -> Result<RectificationResult> {
        info!("Starting rectification");

        if let Some(dims) = physical {
            if !dims.is_valid() {
                return Err(DrawerscanError::InvalidConfig(format!(
                    "drawer dimensions must be positive, got {} x {} mm",
                    dims.width_mm, dims.length_mm
                )));
            }
        }

        // Step 1: Validate and order the outline.
        let bounds = RasterSize::new(source.width(), source.height());
        let quad = quad::validate(corners, bounds, self.config.min_quad_area_px).map_err(|err| {
            warn!(%err, "Outline rejected");
            err
        })?;
        debug!(?quad, "Outline validated");

        // Step 2: Size the output.
        let target = target::compute(&quad, physical, &self.config);
        info!(
            target_w = target.width,
            target_h = target.height,
            known_size = physical.is_some(),
            "Target size chosen"
        );
        if target.width < 2 || target.height < 2 {
            // A 1 px side collapses the destination corners onto a line.
            return Err(DrawerscanError::InvalidConfig(format!(
                "output would be {} x {} px; each side needs at least 2 px, \
                 raise the resolution or check the drawer dimensions",
                target.width, target.height
            )));
        }

        // Step 3: Estimate H and its inverse.
        let homography = homography::estimate(&quad, target).map_err(|err| {
            warn!(%err, "Homography estimation failed");
            err
        })?;
        let inverse = homography.inverse()?;

        // Step 4: Resample.
        let rgba: Cow<'_, RgbaImage> = match source {
            DynamicImage::ImageRgba8(img) => Cow::Borrowed(img),
            other => Cow::Owned(other.to_rgba8()),
        };
        let image = warp::warp_with_progress(&rgba, &inverse, target, rows_done);

        // Step 5: Check the fit.
        let quality = quality::assess(&homography, &quad, target);
        info!(
            fit_error_px = quality.fit_error_px,
            projective_strength = quality.projective_strength,
            perspective = %quality.perspective,
            "Rectification complete"
        );

        Ok(RectificationResult {
            image,
            homography,
            quad: quad.rounded(2),
            target,
            quality,
            px_per_mm: physical.map(|dims| px_per_mm(target, dims)),
        })
    }
}

/// Output pixels per millimetre along each axis after budget capping.
fn px_per_mm(target: TargetSize, dims: PhysicalDimensions) -> PxPerMm {
    PxPerMm {
        x: f64::from(target.width) / dims.width_mm,
        y: f64::from(target.height) / dims.length_mm,
    }
}

// -- Tests --------------------------------------------------------------------
