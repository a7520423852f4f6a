// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Drawerscan.

use thiserror::Error;

/// Why a set of corner points was rejected before any numerical work.
///
/// Variants are listed in the order the checks run; the validator reports
/// the first one that fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("a quadrilateral needs exactly 4 points, got {found}")]
    WrongPointCount { found: usize },

    #[error("point {index} at ({x}, {y}) lies outside the {width}x{height} source image")]
    OutOfBounds {
        index: usize,
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },

    #[error("points {first} and {second} round to the same pixel")]
    DuplicatePoints { first: usize, second: usize },

    #[error("quadrilateral is not convex or is self-intersecting")]
    NonConvex,

    #[error("quadrilateral area {area:.2} px² is below the minimum of {min_area:.2} px²")]
    AreaTooSmall { area: f64, min_area: f64 },
}

/// A linear system or 3x3 matrix had no numerically stable solution.
///
/// `pivot` is the magnitude of the pivot (or determinant) that failed the
/// epsilon test.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("matrix is singular (pivot magnitude {pivot:e})")]
pub struct Singular {
    pub pivot: f64,
}

/// Top-level error type for all Drawerscan operations.
#[derive(Debug, Error)]
pub enum DrawerscanError {
    // -- Geometry / numerics --
    #[error("invalid quadrilateral: {0}")]
    Validation(#[from] ValidationError),

    #[error("no stable perspective transform: {0}")]
    Singular(#[from] Singular),

    // -- Rasters --
    #[error("failed to decode source image: {0}")]
    Resource(String),

    #[error("failed to encode rectified image: {0}")]
    Encode(String),

    // -- Inputs --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DrawerscanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts_and_keeps_message() {
        let err: DrawerscanError = ValidationError::NonConvex.into();
        assert!(matches!(err, DrawerscanError::Validation(ValidationError::NonConvex)));
        assert_eq!(
            err.to_string(),
            "invalid quadrilateral: quadrilateral is not convex or is self-intersecting"
        );
    }

    #[test]
    fn singular_converts() {
        let err: DrawerscanError = Singular { pivot: 0.0 }.into();
        assert!(matches!(err, DrawerscanError::Singular(_)));
    }

    #[test]
    fn area_message_is_rounded() {
        let err = ValidationError::AreaTooSmall {
            area: 3.14159,
            min_area: 25.0,
        };
        assert_eq!(
            err.to_string(),
            "quadrilateral area 3.14 px² is below the minimum of 25.00 px²"
        );
    }
}
