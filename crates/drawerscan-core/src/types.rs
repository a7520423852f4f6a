// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Drawerscan rectification engine.

use serde::{Deserialize, Serialize};

/// A point in source-image pixel coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Round both coordinates to `decimals` places.
    pub fn rounded(&self, decimals: i32) -> Self {
        Self::new(round_to(self.x, decimals), round_to(self.y, decimals))
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A quadrilateral in canonical order: top-left, top-right, bottom-right,
/// bottom-left (clockwise on screen).
///
/// Only the validator constructs quads from arbitrary input; anything holding
/// a `Quad` may assume it is convex, in bounds, and of non-trivial area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub top_left: Point2D,
    pub top_right: Point2D,
    pub bottom_right: Point2D,
    pub bottom_left: Point2D,
}

impl Quad {
    /// Build from points already in canonical order.
    pub fn from_ordered(points: [Point2D; 4]) -> Self {
        let [top_left, top_right, bottom_right, bottom_left] = points;
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Corners in canonical order.
    pub fn points(&self) -> [Point2D; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Copy with every coordinate rounded to `decimals` places.
    pub fn rounded(&self, decimals: i32) -> Self {
        Self::from_ordered(self.points().map(|p| p.rounded(decimals)))
    }

    /// `[[x, y]; 4]` in canonical order.
    pub fn to_array(&self) -> [[f64; 2]; 4] {
        self.points().map(|p| [p.x, p.y])
    }
}

/// Dimensions of a raster in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterSize {
    pub width: u32,
    pub height: u32,
}

impl RasterSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Output raster size. Both sides are at least 1 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Total pixel count.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Rectangle corners in canonical quad order, using inclusive pixel
    /// centres: `(0,0), (w-1,0), (w-1,h-1), (0,h-1)`.
    pub fn corners(&self) -> [Point2D; 4] {
        let right = f64::from(self.width) - 1.0;
        let bottom = f64::from(self.height) - 1.0;
        [
            Point2D::new(0.0, 0.0),
            Point2D::new(right, 0.0),
            Point2D::new(right, bottom),
            Point2D::new(0.0, bottom),
        ]
    }

    pub fn to_array(&self) -> [u32; 2] {
        [self.width, self.height]
    }
}

/// Known physical size of the drawer opening, in millimetres.
///
/// `width_mm` runs along the quad's top edge, `length_mm` along its left edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalDimensions {
    pub width_mm: f64,
    pub length_mm: f64,
}

impl PhysicalDimensions {
    pub const fn new(width_mm: f64, length_mm: f64) -> Self {
        Self {
            width_mm,
            length_mm,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.width_mm.is_finite()
            && self.length_mm.is_finite()
            && self.width_mm > 0.0
            && self.length_mm > 0.0
    }
}

/// Effective output resolution once the pixel budget has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PxPerMm {
    pub x: f64,
    pub y: f64,
}

/// Qualitative strength of the perspective distortion in a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerspectiveStrength {
    None,
    VeryWeak,
    Weak,
    Moderate,
    Strong,
}

impl PerspectiveStrength {
    /// Upper bounds (exclusive) of the magnitude bins, weakest first.
    pub const THRESHOLDS: [(f64, Self); 4] = [
        (1e-6, Self::None),
        (1e-4, Self::VeryWeak),
        (5e-4, Self::Weak),
        (1.5e-3, Self::Moderate),
    ];

    /// Bin a projective magnitude `sqrt(h31² + h32²)`.
    pub fn from_magnitude(magnitude: f64) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(limit, _)| magnitude < *limit)
            .map_or(Self::Strong, |(_, label)| *label)
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::VeryWeak => "very weak",
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }
}

impl std::fmt::Display for PerspectiveStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Camera settings read from the original file's EXIF block by an external
/// reader. Passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExifSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_length_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f_number: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso: Option<u32>,
}

impl ExifSummary {
    pub fn is_empty(&self) -> bool {
        self.focal_length_mm.is_none() && self.f_number.is_none() && self.iso.is_none()
    }
}

/// Metadata produced by collaborators and carried alongside a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanionMetadata {
    #[serde(skip_serializing_if = "ExifSummary::is_empty", default)]
    pub exif: ExifSummary,
    /// Size of the untouched source file, `[w, h]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig_size_px: Option<[u32; 2]>,
}

/// Round `value` to `decimals` decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_corners_use_last_pixel_index() {
        let corners = TargetSize::new(100, 50).corners();
        assert_eq!(corners[0], Point2D::new(0.0, 0.0));
        assert_eq!(corners[1], Point2D::new(99.0, 0.0));
        assert_eq!(corners[2], Point2D::new(99.0, 49.0));
        assert_eq!(corners[3], Point2D::new(0.0, 49.0));
    }

    #[test]
    fn target_size_is_at_least_one_pixel() {
        let size = TargetSize::new(0, 0);
        assert_eq!((size.width, size.height), (1, 1));
        assert_eq!(size.area(), 1);
    }

    #[test]
    fn quad_rounding_keeps_order() {
        let quad = Quad::from_ordered([
            Point2D::new(1.234_56, 2.345_67),
            Point2D::new(10.0, 2.0),
            Point2D::new(10.005, 9.994),
            Point2D::new(1.0, 9.0),
        ]);
        let rounded = quad.rounded(2);
        assert_eq!(rounded.top_left, Point2D::new(1.23, 2.35));
        assert_eq!(rounded.to_array()[3], [1.0, 9.0]);
    }

    #[test]
    fn perspective_bins() {
        assert_eq!(PerspectiveStrength::from_magnitude(0.0), PerspectiveStrength::None);
        assert_eq!(PerspectiveStrength::from_magnitude(5e-5), PerspectiveStrength::VeryWeak);
        assert_eq!(PerspectiveStrength::from_magnitude(2e-4), PerspectiveStrength::Weak);
        assert_eq!(PerspectiveStrength::from_magnitude(1e-3), PerspectiveStrength::Moderate);
        assert_eq!(PerspectiveStrength::from_magnitude(0.01), PerspectiveStrength::Strong);
        assert_eq!(PerspectiveStrength::VeryWeak.to_string(), "very weak");
    }

    #[test]
    fn physical_dimensions_validity() {
        assert!(PhysicalDimensions::new(210.0, 297.0).is_valid());
        assert!(!PhysicalDimensions::new(0.0, 297.0).is_valid());
        assert!(!PhysicalDimensions::new(210.0, f64::NAN).is_valid());
    }

    #[test]
    fn empty_metadata_serializes_compactly() {
        let json = serde_json::to_string(&CompanionMetadata::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
