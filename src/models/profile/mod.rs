//! Profile model: per-user account details and notification preferences.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A student's profile row, keyed by the external auth user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Degree program (e.g. "Systems Engineering")
    pub program: Option<String>,
    /// Semester number, 1..=12 when present
    pub semester: Option<i32>,
    pub notifications_enabled: bool,
    /// Opaque push subscription blob handed to us by the push client.
    /// Stored as-is; delivery is handled by an external push service.
    pub push_subscription: Option<serde_json::Value>,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Profile {
    /// Fresh profile with notifications on and nothing else filled in.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: None,
            email: None,
            program: None,
            semester: None,
            notifications_enabled: true,
            push_subscription: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(semester) = self.semester {
            if !(1..=12).contains(&semester) {
                return Err("Semester must be between 1 and 12".to_string());
            }
        }
        Ok(())
    }

    /// Name to greet the user with, falling back to the email local part.
    pub fn display_name(&self) -> &str {
        if let Some(name) = self.name.as_deref() {
            if !name.is_empty() {
                return name.split(' ').next().unwrap_or(name);
            }
        }
        self.email
            .as_deref()
            .and_then(|e| e.split('@').next())
            .unwrap_or("Student")
    }
}
