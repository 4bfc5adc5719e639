//! Reminder model: one-shot alerts scheduled at a point in time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};

/// What a reminder refers to. Stored lowercase in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReminderKind {
    #[default]
    Manual,
    Task,
    Class,
}

impl ReminderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderKind::Manual => "manual",
            ReminderKind::Task => "task",
            ReminderKind::Class => "class",
        }
    }
}

impl FromStr for ReminderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(ReminderKind::Manual),
            "task" => Ok(ReminderKind::Task),
            "class" => Ok(ReminderKind::Class),
            other => Err(format!("Unknown reminder kind: {}", other)),
        }
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled reminder owned by one user.
///
/// Reminders are one-shot: the dispatcher deactivates them after firing.
/// Users can also toggle `active` off ahead of time to mute one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: Option<i64>,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: DateTime<Local>,
    pub kind: ReminderKind,
    pub active: bool,
    /// Set when the reminder was spawned from a task
    pub task_id: Option<i64>,
    pub created_at: Option<DateTime<Local>>,
}

impl Reminder {
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        scheduled_at: DateTime<Local>,
    ) -> Result<Self, String> {
        let reminder = Self {
            id: None,
            user_id: user_id.into(),
            title: title.into(),
            description: None,
            scheduled_at,
            kind: ReminderKind::default(),
            active: true,
            task_id: None,
            created_at: None,
        };

        reminder.validate()?;
        Ok(reminder)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_kind(mut self, kind: ReminderKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_task(mut self, task_id: i64) -> Self {
        self.task_id = Some(task_id);
        self.kind = ReminderKind::Task;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Reminder title cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn is_due(&self, now: DateTime<Local>) -> bool {
        self.active && self.scheduled_at <= now
    }
}

/// Split reminders into (upcoming, past) relative to `now`, for display.
pub fn split_upcoming_past(
    reminders: &[Reminder],
    now: DateTime<Local>,
) -> (Vec<&Reminder>, Vec<&Reminder>) {
    reminders.iter().partition(|r| r.scheduled_at >= now)
}
