// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// drawerscan-rectify: perspective rectification of drawer photos.
//
// Provides the geometry (linear solves, quad validation, target sizing,
// homography estimation), raster handling (decode, encode, parallel warp),
// and the `Rectifier` pipeline that ties them together.

pub mod geometry;
pub mod raster;
pub mod rectify;

// Re-export the primary types so callers can use `drawerscan_rectify::Rectifier` etc.
pub use geometry::Homography;
pub use raster::OutputFormat;
pub use rectify::{QualityMetrics, RectificationRecord, RectificationResult, Rectifier};
