// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Projective transform between the photo plane and the rectified drawer
// plane, estimated with the Direct Linear Transform.

use drawerscan_core::{Point2D, Quad, Singular, TargetSize, round_to};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::linalg::{self, Matrix3, SINGULAR_EPSILON};

/// A 3x3 homography stored row-major.
///
/// Estimation fixes `h33 = 1`, but coefficients that went through rounding or
/// transport need not keep it; every consumer here divides by `h33` first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Homography {
    coefficients: Matrix3,
}

impl Homography {
    pub const IDENTITY: Self = Self {
        coefficients: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    pub const fn from_coefficients(coefficients: Matrix3) -> Self {
        Self { coefficients }
    }

    /// Row-major coefficients as stored.
    pub fn coefficients(&self) -> &Matrix3 {
        &self.coefficients
    }

    /// Scale so that `h33 == 1`.
    pub fn normalized(&self) -> Result<Self, Singular> {
        let h33 = self.coefficients[8];
        if !h33.is_finite() || h33.abs() < SINGULAR_EPSILON {
            return Err(Singular { pivot: h33.abs() });
        }
        Ok(Self {
            coefficients: self.coefficients.map(|c| c / h33),
        })
    }

    /// Inverse transform (maps the other way).
    pub fn inverse(&self) -> Result<Self, Singular> {
        let inv = linalg::invert3x3(&self.coefficients)?;
        Self::from_coefficients(inv).normalized()
    }

    /// Map `p` through the transform, dividing by the homogeneous `w`.
    ///
    /// Returns `None` when `w` is (near) zero, i.e. `p` maps to infinity.
    pub fn map_point(&self, p: Point2D) -> Option<Point2D> {
        let m = &self.coefficients;
        let x = m[0] * p.x + m[1] * p.y + m[2];
        let y = m[3] * p.x + m[4] * p.y + m[5];
        let w = m[6] * p.x + m[7] * p.y + m[8];
        if !w.is_finite() || w.abs() < SINGULAR_EPSILON {
            return None;
        }
        let mapped = Point2D::new(x / w, y / w);
        mapped.is_finite().then_some(mapped)
    }

    /// `sqrt(h31² + h32²)` after dividing by `h33`; zero for an affine map.
    ///
    /// Infinite when `h33` vanishes.
    pub fn projective_magnitude(&self) -> f64 {
        match self.normalized() {
            Ok(h) => h.coefficients[6].hypot(h.coefficients[7]),
            Err(_) => f64::INFINITY,
        }
    }

    /// Copy with every coefficient rounded to `decimals` places.
    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            coefficients: self.coefficients.map(|c| round_to(c, decimals)),
        }
    }
}

/// Estimate the homography taking `quad` onto the `target` rectangle, corner
/// for corner (top-left to `(0,0)`, top-right to `(w-1,0)`, ...).
pub fn estimate(quad: &Quad, target: TargetSize) -> Result<Homography, Singular> {
    estimate_from_correspondences(&quad.points(), &target.corners())
}

/// Solve the 8x8 DLT system for the homography mapping each `src[i]` onto
/// `dst[i]`, with `h33` fixed to 1.
///
/// Both point sets are first conditioned (centroid to the origin, mean
/// distance √2) so the system stays well scaled for multi-megapixel photos.
/// With four correspondences the solution is unique, so conditioning does not
/// change the result, only its accuracy.
pub fn estimate_from_correspondences(
    src: &[Point2D; 4],
    dst: &[Point2D; 4],
) -> Result<Homography, Singular> {
    let (src_n, src_t) = condition(src)?;
    let (dst_n, dst_t) = condition(dst)?;

    let mut system = Vec::with_capacity(8);
    for (s, d) in src_n.iter().zip(dst_n.iter()) {
        let (x, y, u, v) = (s.x, s.y, d.x, d.y);
        system.push(vec![x, y, 1.0, 0.0, 0.0, 0.0, -u * x, -u * y, u]);
        system.push(vec![0.0, 0.0, 0.0, x, y, 1.0, -v * x, -v * y, v]);
    }
    let h = linalg::solve(system)?;

    let conditioned = [h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0];
    let dst_t_inv = linalg::invert3x3(&dst_t)?;
    let full = linalg::multiply3x3(&linalg::multiply3x3(&dst_t_inv, &conditioned), &src_t);

    let homography = Homography::from_coefficients(full).normalized()?;
    debug!(coefficients = ?homography.coefficients(), "Homography estimated");
    Ok(homography)
}

/// Similarity transform moving the centroid of `points` to the origin and
/// scaling their mean distance from it to √2.
fn condition(points: &[Point2D; 4]) -> Result<([Point2D; 4], Matrix3), Singular> {
    let cx = points.iter().map(|p| p.x).sum::<f64>() / 4.0;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / 4.0;
    let centroid = Point2D::new(cx, cy);
    let mean_dist = points.iter().map(|p| p.distance(centroid)).sum::<f64>() / 4.0;
    if !mean_dist.is_finite() || mean_dist < SINGULAR_EPSILON {
        return Err(Singular { pivot: mean_dist });
    }

    let s = std::f64::consts::SQRT_2 / mean_dist;
    let transform = [s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0];
    let conditioned = points.map(|p| Point2D::new(s * (p.x - cx), s * (p.y - cy)));
    Ok((conditioned, transform))
}
