//! Task model: assignments and to-dos with a due date and priority.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate};

/// Task priority. Stored lowercase in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Sort rank, lower sorts first (High before Low).
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("Unknown priority: {}", other)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task owned by one user, optionally linked to a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Option<i64>,
    pub user_id: String,
    pub subject_id: Option<i64>,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Task {
    /// Create a new pending task with the default priority.
    pub fn new(
        user_id: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
    ) -> Result<Self, String> {
        let task = Self {
            id: None,
            user_id: user_id.into(),
            subject_id: None,
            description: description.into(),
            due_date,
            priority: Priority::default(),
            completed: false,
            created_at: None,
            updated_at: None,
        };

        task.validate()?;
        Ok(task)
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_subject(mut self, subject_id: i64) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    /// Validate the task.
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("Task description cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date < today
    }
}

/// Display filter for task lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    All,
    #[default]
    Pending,
    Completed,
}

/// Filter tasks for display. Pure; the full list is fetched once and
/// filtered client-side.
pub fn filter_tasks(tasks: &[Task], filter: TaskFilter) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| match filter {
            TaskFilter::All => true,
            TaskFilter::Pending => !t.completed,
            TaskFilter::Completed => t.completed,
        })
        .collect()
}

pub fn pending_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}

pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}
