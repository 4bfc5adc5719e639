//! Dashboard summary: the "today at a glance" queries.

use anyhow::Result;
use chrono::{DateTime, Duration, Local};
use rusqlite::Connection;

use crate::models::reminder::Reminder;
use crate::models::schedule_entry::ScheduleEntry;
use crate::models::task::Task;
use crate::services::reminder::ReminderService;
use crate::services::schedule::ScheduleService;
use crate::services::task::TaskService;
use crate::utils::date::day_index;

/// Pending tasks shown on the dashboard.
const DUE_SOON_LIMIT: usize = 5;
/// Upcoming reminders shown on the dashboard.
const UPCOMING_LIMIT: usize = 3;

/// Everything the dashboard view needs for one user.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    /// Today's classes, earliest first
    pub today_entries: Vec<ScheduleEntry>,
    /// Pending tasks due within the next 7 days, at most 5
    pub due_soon_tasks: Vec<Task>,
    /// Active reminders within the next 24 hours, at most 3
    pub upcoming_reminders: Vec<Reminder>,
    pub pending_task_total: usize,
    pub active_reminder_total: usize,
}

pub struct DashboardService<'a> {
    conn: &'a Connection,
}

impl<'a> DashboardService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Build the summary as of `now`.
    pub fn summary(&self, user_id: &str, now: DateTime<Local>) -> Result<DashboardSummary> {
        let today = now.date_naive();

        let today_entries =
            ScheduleService::new(self.conn).entries_for_day(user_id, day_index(today))?;

        let tasks = TaskService::new(self.conn).list_for_user(user_id)?;
        let pending_task_total = tasks.iter().filter(|t| !t.completed).count();
        let due_soon_tasks = tasks
            .into_iter()
            .filter(|t| !t.completed)
            .filter(|t| {
                let days = (t.due_date - today).num_days();
                (0..=7).contains(&days)
            })
            .take(DUE_SOON_LIMIT)
            .collect();

        let reminders = ReminderService::new(self.conn).list_for_user(user_id)?;
        let active_reminder_total = reminders.iter().filter(|r| r.active).count();
        let upcoming_reminders = reminders
            .into_iter()
            .filter(|r| r.active)
            .filter(|r| {
                let until = r.scheduled_at - now;
                until >= Duration::zero() && until <= Duration::hours(24)
            })
            .take(UPCOMING_LIMIT)
            .collect();

        Ok(DashboardSummary {
            today_entries,
            due_soon_tasks,
            upcoming_reminders,
            pending_task_total,
            active_reminder_total,
        })
    }
}
