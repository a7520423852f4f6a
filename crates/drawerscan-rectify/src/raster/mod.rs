// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module: decoding, encoding, and perspective warping of pixel buffers.

pub mod codec;
pub mod warp;

pub use codec::OutputFormat;
