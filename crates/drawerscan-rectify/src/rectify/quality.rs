// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fit and perspective diagnostics for an estimated homography.

use drawerscan_core::{PerspectiveStrength, Quad, TargetSize};
use serde::{Deserialize, Serialize};

use crate::geometry::Homography;

/// How well a homography fits its corners, and how much perspective it
/// removes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Mean distance (px) between each quad corner mapped through H and its
    /// target corner. Infinite if any corner maps to infinity.
    pub fit_error_px: f64,
    /// `sqrt(h31² + h32²)` of the normalized homography.
    pub projective_strength: f64,
    pub perspective: PerspectiveStrength,
}

/// Measure `homography` against the correspondences it was built from.
pub fn assess(homography: &Homography, quad: &Quad, target: TargetSize) -> QualityMetrics {
    let fit_error_px = quad
        .points()
        .iter()
        .zip(target.corners().iter())
        .map(|(src, dst)| {
            homography
                .map_point(*src)
                .map_or(f64::INFINITY, |mapped| mapped.distance(*dst))
        })
        .sum::<f64>()
        / 4.0;

    let projective_strength = homography.projective_magnitude();
    QualityMetrics {
        fit_error_px,
        projective_strength,
        perspective: PerspectiveStrength::from_magnitude(projective_strength),
    }
}
