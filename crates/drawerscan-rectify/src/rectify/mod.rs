// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectify module: the end-to-end pipeline, its quality checks, and the
// result/record types it produces.

pub mod quality;
pub mod rectifier;
pub mod result;

pub use quality::QualityMetrics;
pub use rectifier::Rectifier;
pub use result::{RectificationRecord, RectificationResult};
