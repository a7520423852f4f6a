// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the drawerscan-rectify crate: homography
// estimation on its own and the full rectification pipeline on a synthetic
// photo.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgba, RgbaImage};

use drawerscan_core::{PhysicalDimensions, Point2D, Quad, TargetSize};
use drawerscan_rectify::Rectifier;
use drawerscan_rectify::geometry::homography;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// 1600x1200 photo of a light drawer floor on a dark bench.
fn synthetic_photo() -> DynamicImage {
    let img = RgbaImage::from_fn(1600, 1200, |x, y| {
        if (200..1400).contains(&x) && (150..1050).contains(&y) {
            Rgba([225, 215, 195, 255])
        } else {
            Rgba([40, 45, 50, 255])
        }
    });
    DynamicImage::ImageRgba8(img)
}

/// Outline of a drawer shot from above the front edge.
fn tilted_corners() -> Vec<Point2D> {
    vec![
        Point2D::new(420.0, 180.0),
        Point2D::new(1180.0, 190.0),
        Point2D::new(1420.0, 1040.0),
        Point2D::new(170.0, 1030.0),
    ]
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_homography_estimate(c: &mut Criterion) {
    let quad = Quad::from_ordered([
        Point2D::new(420.0, 180.0),
        Point2D::new(1180.0, 190.0),
        Point2D::new(1420.0, 1040.0),
        Point2D::new(170.0, 1030.0),
    ]);
    let target = TargetSize::new(900, 600);

    c.bench_function("homography_estimate", |b| {
        b.iter(|| black_box(homography::estimate(black_box(&quad), black_box(target))));
    });
}

/// Full pipeline with a known 60 x 40 cm drawer at 15 px/mm (9000x6000,
/// capped to the 16 Mpx budget), plus the estimated-size path.
fn bench_rectify(c: &mut Criterion) {
    let photo = synthetic_photo();
    let corners = tilted_corners();
    let rectifier = Rectifier::default();

    c.bench_function("rectify_estimated (1600x1200)", |b| {
        b.iter(|| black_box(rectifier.rectify(black_box(&photo), &corners, None)));
    });

    let mut group = c.benchmark_group("rectify_physical");
    group.sample_size(10);
    group.bench_function("600x400mm (1600x1200)", |b| {
        b.iter(|| {
            black_box(rectifier.rectify(
                black_box(&photo),
                &corners,
                Some(PhysicalDimensions::new(600.0, 400.0)),
            ))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_homography_estimate, bench_rectify);
criterion_main!(benches);
