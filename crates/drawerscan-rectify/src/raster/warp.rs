// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inverse-mapped bilinear warp, parallel over output rows.

use std::sync::atomic::{AtomicU64, Ordering};

use drawerscan_core::{Point2D, TargetSize};
use image::RgbaImage;
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::geometry::Homography;

const CHANNELS: usize = 4;

/// Resample `source` into a `target`-sized raster.
///
/// `inverse` maps destination pixels back into the source. Each destination
/// pixel is bilinearly interpolated from its four source neighbours on every
/// channel. Pixels that land outside `[0, w-1) x [0, h-1)` of the source are
/// left fully transparent.
pub fn warp(source: &RgbaImage, inverse: &Homography, target: TargetSize) -> RgbaImage {
    warp_with_progress(source, inverse, target, None)
}

/// Same as [`warp`], bumping `rows_done` once per finished output row.
///
/// Rows complete in no particular order; only the count is meaningful.
#[instrument(skip(source, inverse, rows_done), fields(target_w = target.width, target_h = target.height))]
pub fn warp_with_progress(
    source: &RgbaImage,
    inverse: &Homography,
    target: TargetSize,
    rows_done: Option<&AtomicU64>,
) -> RgbaImage {
    let mut output = RgbaImage::new(target.width, target.height);
    let stride = target.width as usize * CHANNELS;

    let buffer: &mut [u8] = &mut output;
    buffer
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            warp_row(source, inverse, y as u32, row);
            if let Some(counter) = rows_done {
                counter.fetch_add(1, Ordering::Relaxed);
            }
        });

    debug!("Warp complete");
    output
}

/// Fill one destination row. `row` holds exactly `width * 4` bytes.
fn warp_row(source: &RgbaImage, inverse: &Homography, y: u32, row: &mut [u8]) {
    for (x, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let dst = Point2D::new(x as f64, f64::from(y));
        let Some(src) = inverse.map_point(dst) else {
            continue;
        };
        if let Some(sample) = sample_bilinear(source, src.x, src.y) {
            pixel.copy_from_slice(&sample);
        }
    }
}

/// Bilinear sample at `(u, v)`; `None` outside `[0, w-1) x [0, h-1)`.
pub fn sample_bilinear(source: &RgbaImage, u: f64, v: f64) -> Option<[u8; CHANNELS]> {
    let max_u = f64::from(source.width()) - 1.0;
    let max_v = f64::from(source.height()) - 1.0;
    if !(u >= 0.0 && u < max_u && v >= 0.0 && v < max_v) {
        return None;
    }

    let (x0, y0) = (u.floor() as u32, v.floor() as u32);
    let (fx, fy) = (u - f64::from(x0), v - f64::from(y0));

    let p00 = source.get_pixel(x0, y0).0;
    let p10 = source.get_pixel(x0 + 1, y0).0;
    let p01 = source.get_pixel(x0, y0 + 1).0;
    let p11 = source.get_pixel(x0 + 1, y0 + 1).0;

    Some(std::array::from_fn(|c| {
        let top = f64::from(p00[c]) * (1.0 - fx) + f64::from(p10[c]) * fx;
        let bottom = f64::from(p01[c]) * (1.0 - fx) + f64::from(p11[c]) * fx;
        (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8
    }))
}
