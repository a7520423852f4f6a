// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometry module: linear solves, quad validation, target sizing, and
// homography estimation.

pub mod homography;
pub mod linalg;
pub mod quad;
pub mod target;

pub use homography::Homography;
