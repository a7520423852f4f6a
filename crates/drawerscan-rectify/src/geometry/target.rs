// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output raster sizing from physical dimensions or quad geometry, capped to a
// pixel budget.

use drawerscan_core::{PhysicalDimensions, Quad, RectifyConfig, TargetSize};
use tracing::debug;

/// Work out the output raster size for `quad`.
///
/// With known physical dimensions the size is `mm * resolution_px_per_mm`
/// per axis. Otherwise the mean opposite-edge lengths of the quad give the
/// proportions, scaled down so the longer side fits
/// `max_estimation_dimension_px`, with each side floored at
/// `min_estimated_side_px`. Either way the result is then shrunk uniformly to
/// fit `pixel_budget`.
pub fn compute(
    quad: &Quad,
    physical: Option<PhysicalDimensions>,
    config: &RectifyConfig,
) -> TargetSize {
    let (width, height) = match physical {
        Some(dims) => (
            (dims.width_mm * config.resolution_px_per_mm).round(),
            (dims.length_mm * config.resolution_px_per_mm).round(),
        ),
        None => estimate_from_quad(quad, config),
    };
    let (width, height) = (width.max(1.0), height.max(1.0));

    let (width, height) = cap_to_budget(width, height, config.pixel_budget);
    debug!(width, height, known = physical.is_some(), "Target size computed");
    TargetSize::new(width, height)
}

/// Pixel-space proportions from the quad's averaged opposite edges.
fn estimate_from_quad(quad: &Quad, config: &RectifyConfig) -> (f64, f64) {
    let top = quad.top_left.distance(quad.top_right);
    let bottom = quad.bottom_left.distance(quad.bottom_right);
    let left = quad.top_left.distance(quad.bottom_left);
    let right = quad.top_right.distance(quad.bottom_right);

    let mut width = (top + bottom) / 2.0;
    let mut height = (left + right) / 2.0;

    let longest = width.max(height);
    let max_dim = f64::from(config.max_estimation_dimension_px);
    if longest > max_dim {
        let scale = max_dim / longest;
        width *= scale;
        height *= scale;
    }

    let floor = f64::from(config.min_estimated_side_px);
    (width.round().max(floor), height.round().max(floor))
}

/// Shrink `width x height` by `sqrt(budget / area)` when it exceeds `budget`.
///
/// Rounding is tried first; if it lands over the budget both sides are
/// floored instead. A side pinned at 1 px can still leave the other side over
/// budget, so the longer side is finally cut to `budget / shorter`.
fn cap_to_budget(width: f64, height: f64, budget: u64) -> (u32, u32) {
    let budget_f = budget as f64;
    let area = width * height;
    if area <= budget_f {
        return (to_u32(width), to_u32(height));
    }

    let scale = (budget_f / area).sqrt();
    let (w, h) = (width * scale, height * scale);
    let (rw, rh) = (w.round().max(1.0), h.round().max(1.0));
    let (w, h) = if rw * rh <= budget_f {
        (to_u32(rw), to_u32(rh))
    } else {
        (to_u32(w.floor().max(1.0)), to_u32(h.floor().max(1.0)))
    };
    clamp_longer_side(w, h, budget)
}

fn clamp_longer_side(w: u32, h: u32, budget: u64) -> (u32, u32) {
    if u64::from(w) * u64::from(h) <= budget {
        return (w, h);
    }
    let fit = |shorter: u32| {
        let limit = (budget / u64::from(shorter)).max(1);
        u32::try_from(limit).unwrap_or(u32::MAX)
    };
    if w >= h {
        (fit(h).min(w), h)
    } else {
        (w, fit(w).min(h))
    }
}

fn to_u32(value: f64) -> u32 {
    value.clamp(1.0, f64::from(u32::MAX)) as u32
}
