// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the corner-adjustment screen.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity tells the caller whether reshaping the outline can fix it.

use crate::error::{DrawerscanError, ValidationError};

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user can fix it by moving the corner handles and trying again.
    ActionRequired,
    /// The photo or settings themselves are unusable.
    Permanent,
    /// Something outside the engine failed (disk, serialization).
    Transient,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether adjusting the outline and calling again can succeed.
    pub adjustable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `DrawerscanError` into a `HumanError` for display.
pub fn humanize_error(err: &DrawerscanError) -> HumanError {
    match err {
        DrawerscanError::Validation(inner) => humanize_validation(inner),

        DrawerscanError::Singular(_) => HumanError {
            message: "We couldn't straighten this outline.".into(),
            suggestion: "The corners are too close to a straight line. Spread them out so they sit on the drawer's four corners.".into(),
            adjustable: true,
            severity: Severity::ActionRequired,
        },

        DrawerscanError::Resource(detail) => HumanError {
            message: "We couldn't open this photo.".into(),
            suggestion: format!("Try taking the photo again or saving it as a JPEG. ({detail})"),
            adjustable: false,
            severity: Severity::Permanent,
        },

        DrawerscanError::Encode(detail) => HumanError {
            message: "We couldn't save the straightened photo.".into(),
            suggestion: format!("Try a smaller drawer size or a different format. ({detail})"),
            adjustable: false,
            severity: Severity::Permanent,
        },

        DrawerscanError::InvalidConfig(detail) => HumanError {
            message: "Some measurements don't look right.".into(),
            suggestion: format!("Check the drawer width, length and resolution settings. ({detail})"),
            adjustable: false,
            severity: Severity::Permanent,
        },

        DrawerscanError::Io(err) => HumanError {
            message: "We couldn't read or write a file.".into(),
            suggestion: format!("Check the file exists and you have permission to use it. ({err})"),
            adjustable: false,
            severity: Severity::Transient,
        },

        DrawerscanError::Serialization(err) => HumanError {
            message: "We couldn't read the saved settings.".into(),
            suggestion: format!("The settings file may be damaged. ({err})"),
            adjustable: false,
            severity: Severity::Transient,
        },
    }
}

fn humanize_validation(err: &ValidationError) -> HumanError {
    let (message, suggestion) = match err {
        ValidationError::WrongPointCount { found } => (
            "The outline needs four corners.".to_string(),
            format!("Place one handle on each corner of the drawer ({found} were given)."),
        ),
        ValidationError::OutOfBounds { index, .. } => (
            "A corner is outside the photo.".to_string(),
            format!("Drag corner {} back inside the picture.", index + 1),
        ),
        ValidationError::DuplicatePoints { .. } => (
            "Two corners are on top of each other.".to_string(),
            "Move the corners apart so each one sits on a different corner of the drawer."
                .to_string(),
        ),
        ValidationError::NonConvex => (
            "The outline is twisted.".to_string(),
            "Make sure the corners go around the drawer without the edges crossing.".to_string(),
        ),
        ValidationError::AreaTooSmall { .. } => (
            "The outline is too small.".to_string(),
            "Drag the corners out to the edges of the drawer.".to_string(),
        ),
    };
    HumanError {
        message,
        suggestion,
        adjustable: true,
        severity: Severity::ActionRequired,
    }
}
