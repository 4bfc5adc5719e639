//! Subject model for organizing schedule entries and tasks.
//!
//! Subjects let a student group their classes and assignments (Calculus,
//! Physics, etc.) with an associated color used to tint grid cells.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A subject (course) owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique identifier (database primary key)
    pub id: Option<i64>,
    /// Owning user (provided by the external auth layer)
    pub user_id: String,
    /// Display name of the subject
    pub name: String,
    /// Hex color code used to tint grid cells (e.g. "#3B82F6")
    pub color: String,
    pub created_at: Option<DateTime<Local>>,
}

impl Subject {
    /// Create a new subject with the given name and color.
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            name: name.into(),
            color: color.into(),
            created_at: None,
        }
    }

    /// Validate the subject data.
    pub fn validate(&self) -> Result<(), SubjectValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SubjectValidationError::EmptyName);
        }
        if name.len() > 100 {
            return Err(SubjectValidationError::NameTooLong);
        }

        if !is_valid_hex_color(&self.color) {
            return Err(SubjectValidationError::InvalidColor);
        }

        Ok(())
    }
}

/// Validation errors for Subject.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubjectValidationError {
    #[error("Subject name cannot be empty")]
    EmptyName,
    #[error("Subject name must be 100 characters or less")]
    NameTooLong,
    #[error("Invalid color format (use hex like #3B82F6)")]
    InvalidColor,
}

/// Check if a string is a valid hex color code.
fn is_valid_hex_color(color: &str) -> bool {
    let color = color.trim();
    if !color.starts_with('#') {
        return false;
    }
    let hex = &color[1..];
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// The color choices offered when creating a subject.
pub const SUBJECT_PALETTE: [&str; 8] = [
    "#3B82F6", // blue
    "#10B981", // emerald
    "#F59E0B", // amber
    "#EF4444", // red
    "#8B5CF6", // violet
    "#EC4899", // pink
    "#06B6D4", // cyan
    "#84CC16", // lime
];

/// Default color applied when the caller does not pick one.
pub const DEFAULT_SUBJECT_COLOR: &str = "#3B82F6";
