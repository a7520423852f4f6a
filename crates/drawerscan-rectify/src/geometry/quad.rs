// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral validation: bounds, distinctness, canonical ordering,
// convexity, and minimum area.

use std::cmp::Ordering;

use drawerscan_core::{Point2D, Quad, RasterSize, ValidationError};
use tracing::debug;

/// Validate four user-placed corners and return them in canonical order.
///
/// Checks run in this order and the first failure is returned:
///
/// 1. exactly four points
/// 2. every point inside `[0, width] x [0, height]`
/// 3. no two points round to the same integer pixel
/// 4. after canonical ordering, all edge cross products share one sign
/// 5. shoelace area at least `min_area`
pub fn validate(
    points: &[Point2D],
    bounds: RasterSize,
    min_area: f64,
) -> Result<Quad, ValidationError> {
    let points: [Point2D; 4] = points
        .try_into()
        .map_err(|_| ValidationError::WrongPointCount {
            found: points.len(),
        })?;

    check_bounds(&points, bounds)?;
    check_distinct(&points)?;

    let ordered = canonical_order(points);
    if !is_convex(&ordered) {
        debug!(?ordered, "Rejecting non-convex quadrilateral");
        return Err(ValidationError::NonConvex);
    }

    let area = shoelace_area(&ordered);
    if area < min_area {
        return Err(ValidationError::AreaTooSmall { area, min_area });
    }

    Ok(Quad::from_ordered(ordered))
}

fn check_bounds(points: &[Point2D; 4], bounds: RasterSize) -> Result<(), ValidationError> {
    let max_x = f64::from(bounds.width);
    let max_y = f64::from(bounds.height);
    for (index, p) in points.iter().enumerate() {
        let inside = p.is_finite() && (0.0..=max_x).contains(&p.x) && (0.0..=max_y).contains(&p.y);
        if !inside {
            return Err(ValidationError::OutOfBounds {
                index,
                x: p.x,
                y: p.y,
                width: bounds.width,
                height: bounds.height,
            });
        }
    }
    Ok(())
}

fn check_distinct(points: &[Point2D; 4]) -> Result<(), ValidationError> {
    let pixels = points.map(|p| (p.x.round() as i64, p.y.round() as i64));
    for first in 0..pixels.len() {
        for second in (first + 1)..pixels.len() {
            if pixels[first] == pixels[second] {
                return Err(ValidationError::DuplicatePoints { first, second });
            }
        }
    }
    Ok(())
}

/// Order points as top-left, top-right, bottom-right, bottom-left.
///
/// Sorts by `y` then `x`; the upper pair is split left-to-right and the lower
/// pair right-to-left, so the walk goes clockwise on screen. Strongly rotated
/// outlines can come out crossed, which the convexity check then rejects.
pub fn canonical_order(points: [Point2D; 4]) -> [Point2D; 4] {
    let mut sorted = points;
    sorted.sort_by(|a, b| cmp_f64(a.y, b.y).then_with(|| cmp_f64(a.x, b.x)));

    let mut top = [sorted[0], sorted[1]];
    top.sort_by(|a, b| cmp_f64(a.x, b.x));
    let mut bottom = [sorted[2], sorted[3]];
    bottom.sort_by(|a, b| cmp_f64(b.x, a.x));

    [top[0], top[1], bottom[0], bottom[1]]
}

/// Z component of `(b - a) x (c - b)` at each vertex `b` of the closed walk.
pub fn edge_cross_products(points: &[Point2D; 4]) -> [f64; 4] {
    std::array::from_fn(|i| {
        let a = points[(i + 3) % 4];
        let b = points[i];
        let c = points[(i + 1) % 4];
        let (e1x, e1y) = (b.x - a.x, b.y - a.y);
        let (e2x, e2y) = (c.x - b.x, c.y - b.y);
        e1x * e2y - e1y * e2x
    })
}

/// True when every turn of the walk goes the same way. Collinear vertices
/// (zero cross product) count as a failure.
pub fn is_convex(points: &[Point2D; 4]) -> bool {
    let crosses = edge_cross_products(points);
    crosses.iter().all(|&c| c > 0.0) || crosses.iter().all(|&c| c < 0.0)
}

/// Unsigned polygon area via the shoelace formula. Vertices must be in walk
/// order (either handedness).
pub fn shoelace_area(points: &[Point2D; 4]) -> f64 {
    let twice: f64 = (0..4)
        .map(|i| {
            let p = points[i];
            let q = points[(i + 1) % 4];
            p.x * q.y - q.x * p.y
        })
        .sum();
    twice.abs() / 2.0
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: RasterSize = RasterSize::new(400, 300);

    fn pts(raw: [(f64, f64); 4]) -> Vec<Point2D> {
        raw.iter().map(|&p| Point2D::from(p)).collect()
    }

    #[test]
    fn orders_shuffled_rectangle() {
        let quad = validate(
            &pts([(300.0, 250.0), (20.0, 10.0), (20.0, 250.0), (300.0, 10.0)]),
            BOUNDS,
            25.0,
        )
        .unwrap();
        assert_eq!(quad.top_left, Point2D::new(20.0, 10.0));
        assert_eq!(quad.top_right, Point2D::new(300.0, 10.0));
        assert_eq!(quad.bottom_right, Point2D::new(300.0, 250.0));
        assert_eq!(quad.bottom_left, Point2D::new(20.0, 250.0));
    }

    #[test]
    fn validated_quad_turns_one_way() {
        let cases = [
            [(40.0, 30.0), (350.0, 55.0), (380.0, 280.0), (10.0, 260.0)],
            [(120.0, 20.0), (280.0, 25.0), (390.0, 290.0), (5.0, 295.0)],
            [(10.0, 10.0), (390.0, 10.0), (300.0, 100.0), (100.0, 100.0)],
            [(200.0, 0.0), (400.0, 150.0), (200.0, 300.0), (0.0, 150.0)],
        ];
        for raw in cases {
            let quad = validate(&pts(raw), BOUNDS, 25.0).unwrap();
            let crosses = edge_cross_products(&quad.points());
            assert!(crosses.iter().all(|&c| c > 0.0), "{crosses:?}");
        }
    }

    #[test]
    fn rejects_wrong_point_count() {
        let points = pts([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let err = validate(&points[..3], BOUNDS, 25.0).unwrap_err();
        assert_eq!(err, ValidationError::WrongPointCount { found: 3 });
    }

    #[test]
    fn rejects_point_outside_image() {
        let err = validate(
            &pts([(0.0, 0.0), (401.0, 0.0), (400.0, 300.0), (0.0, 300.0)]),
            BOUNDS,
            25.0,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfBounds { index: 1, .. }));
    }

    #[test]
    fn accepts_points_on_the_image_border() {
        assert!(validate(
            &pts([(0.0, 0.0), (400.0, 0.0), (400.0, 300.0), (0.0, 300.0)]),
            BOUNDS,
            25.0,
        )
        .is_ok());
    }

    #[test]
    fn rejects_nan_coordinates() {
        let err = validate(
            &pts([(f64::NAN, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]),
            BOUNDS,
            25.0,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfBounds { index: 0, .. }));
    }

    #[test]
    fn rejects_points_sharing_a_pixel() {
        let err = validate(
            &pts([(10.2, 10.4), (100.0, 10.0), (9.8, 9.6), (10.0, 100.0)]),
            BOUNDS,
            25.0,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::DuplicatePoints { first: 0, second: 2 });
    }

    #[test]
    fn rejects_collinear_points() {
        let err = validate(
            &pts([(10.0, 10.0), (50.0, 50.0), (90.0, 90.0), (130.0, 130.0)]),
            BOUNDS,
            25.0,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonConvex | ValidationError::AreaTooSmall { .. }
        ));
    }

    #[test]
    fn rejects_nearly_collinear_points_by_area() {
        // Convex but only a sliver: area = 0.5 * 200 * 0.2 = 20 px²
        let err = validate(
            &pts([(10.0, 100.0), (100.0, 99.9), (210.0, 100.0), (120.0, 100.1)]),
            BOUNDS,
            25.0,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::AreaTooSmall { .. }));
    }

    #[test]
    fn bowtie_walk_is_not_convex() {
        // Top-left, top-right, bottom-left, bottom-right: edges cross.
        let bowtie = [
            Point2D::new(0.0, 0.0),
            Point2D::new(100.0, 0.0),
            Point2D::new(0.0, 100.0),
            Point2D::new(100.0, 100.0),
        ];
        assert!(!is_convex(&bowtie));
        assert!(is_convex(&canonical_order(bowtie)));
    }

    #[test]
    fn rejects_outline_that_orders_into_a_crossing() {
        let err = validate(
            &pts([(0.0, 0.0), (100.0, 60.0), (10.0, 50.0), (90.0, 100.0)]),
            BOUNDS,
            25.0,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::NonConvex);
    }

    #[test]
    fn rejects_dart_shaped_outline() {
        // The third point sits inside the triangle formed by the others.
        let err = validate(
            &pts([(0.0, 0.0), (100.0, 0.0), (50.0, 20.0), (50.0, 100.0)]),
            BOUNDS,
            25.0,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::NonConvex);
    }

    #[test]
    fn rejects_tiny_quad() {
        let err = validate(
            &pts([(10.0, 10.0), (14.0, 10.0), (14.0, 14.0), (10.0, 14.0)]),
            BOUNDS,
            25.0,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::AreaTooSmall {
                area: 16.0,
                min_area: 25.0
            }
        );
    }

    #[test]
    fn shoelace_of_rectangle() {
        let rect = [
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 5.0),
            Point2D::new(0.0, 5.0),
        ];
        assert!((shoelace_area(&rect) - 50.0).abs() < 1e-12);
    }
}
