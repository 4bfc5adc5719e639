//! Due-reminder dispatcher.
//!
//! Scans the whole reminders table (all users) for active reminders whose
//! scheduled time has passed, records an inbox notification for each, and
//! raises a desktop alert when the owning profile allows it. Reminders are
//! one-shot: a dispatched reminder is deactivated in the same pass.
//!
//! The clock and the alert sink are injectable so tests can drive ticks
//! deterministically.

use std::time::Duration as StdDuration;

use anyhow::Result;
use chrono::{DateTime, Duration, Local};
use rusqlite::{params, Connection};

use super::map_reminder_row;
use crate::models::notification::InboxNotification;
use crate::models::reminder::{Reminder, ReminderKind};
use crate::services::notification::{NotificationService, NotificationUrgency};
use crate::services::notification::inbox::InboxService;
use crate::services::shared::to_local_datetime;

/// Outcome of one dispatcher pass.
#[derive(Debug, Clone, Default)]
pub struct DispatchTickResult {
    /// Reminder ids dispatched this tick
    pub dispatched: Vec<i64>,
    /// (reminder id, error) pairs where the desktop alert failed
    pub failed_alerts: Vec<(i64, String)>,
    /// Time until the next active reminder comes due, if any
    pub next_due_in: Option<StdDuration>,
}

impl DispatchTickResult {
    pub fn dispatched_count(&self) -> usize {
        self.dispatched.len()
    }
}

/// Periodic dispatcher for due reminders.
pub struct ReminderDispatcher {
    startup_ready_at: Option<DateTime<Local>>,
}

impl Default for ReminderDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderDispatcher {
    pub fn new() -> Self {
        Self::with_startup_delay(Duration::seconds(5))
    }

    /// Delay the first pass so a freshly started process does not fire a
    /// burst of alerts before the desktop session settles.
    pub fn with_startup_delay(startup_delay: Duration) -> Self {
        let startup_ready_at = if startup_delay <= Duration::zero() {
            None
        } else {
            Some(Local::now() + startup_delay)
        };

        Self { startup_ready_at }
    }

    /// Run one pass against the wall clock, alerting via the system
    /// notification facility.
    pub fn tick(&mut self, conn: &Connection) -> Result<DispatchTickResult> {
        let notifier = NotificationService::new();
        self.tick_with_alerter_at(conn, Local::now(), |reminder| {
            let urgency = match reminder.kind {
                ReminderKind::Task => NotificationUrgency::Critical,
                _ => NotificationUrgency::Normal,
            };
            notifier.show_reminder_alert(&reminder.title, &alert_body(reminder), urgency)
        })
    }

    /// Run one pass at an injected `now` with an injected alert sink.
    pub fn tick_with_alerter_at<F>(
        &mut self,
        conn: &Connection,
        now: DateTime<Local>,
        mut alerter: F,
    ) -> Result<DispatchTickResult>
    where
        F: FnMut(&Reminder) -> Result<()>,
    {
        if let Some(ready_at) = self.startup_ready_at {
            if now < ready_at {
                let wait = (ready_at - now)
                    .to_std()
                    .unwrap_or_else(|_| StdDuration::from_secs(0));
                return Ok(DispatchTickResult {
                    next_due_in: Some(wait),
                    ..DispatchTickResult::default()
                });
            }

            self.startup_ready_at = None;
        }

        let due = due_reminders(conn, now)?;
        let inbox = InboxService::new(conn);

        let mut result = DispatchTickResult::default();

        for reminder in due {
            let Some(reminder_id) = reminder.id else {
                continue;
            };

            // The inbox row is the durable record; it lands whether or not
            // the desktop alert goes through.
            inbox.record(InboxNotification::new(
                &reminder.user_id,
                &reminder.title,
                alert_body(&reminder),
            ))?;

            if notifications_enabled(conn, &reminder.user_id)? {
                if let Err(err) = alerter(&reminder) {
                    log::warn!("Desktop alert failed for reminder {}: {}", reminder_id, err);
                    result.failed_alerts.push((reminder_id, err.to_string()));
                }
            }

            conn.execute(
                "UPDATE reminders SET active = 0 WHERE id = ?",
                params![reminder_id],
            )?;

            result.dispatched.push(reminder_id);
        }

        result.next_due_in = next_due_in(conn, now)?;

        Ok(result)
    }
}

fn alert_body(reminder: &Reminder) -> String {
    match &reminder.description {
        Some(description) => description.clone(),
        None => format!("Scheduled for {}", reminder.scheduled_at.format("%H:%M")),
    }
}

fn due_reminders(conn: &Connection, now: DateTime<Local>) -> Result<Vec<Reminder>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, title, description, scheduled_at, kind,
                active, task_id, created_at
         FROM reminders
         WHERE active = 1 AND scheduled_at <= ?
         ORDER BY scheduled_at ASC",
    )?;

    let reminders = stmt
        .query_map([now.to_rfc3339()], map_reminder_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(reminders)
}

fn notifications_enabled(conn: &Connection, user_id: &str) -> Result<bool> {
    let result = conn.query_row(
        "SELECT notifications_enabled FROM profiles WHERE user_id = ?",
        [user_id],
        |row| row.get::<_, i32>(0),
    );

    match result {
        Ok(value) => Ok(value != 0),
        // No profile row yet: notifications default on
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(true),
        Err(e) => Err(e.into()),
    }
}

fn next_due_in(conn: &Connection, now: DateTime<Local>) -> Result<Option<StdDuration>> {
    let earliest: Option<String> = conn.query_row(
        "SELECT MIN(scheduled_at) FROM reminders WHERE active = 1",
        [],
        |row| row.get(0),
    )?;

    let Some(earliest) = earliest else {
        return Ok(None);
    };

    let due_at = to_local_datetime(earliest)?;
    let delta = due_at - now;

    Ok(Some(if delta <= Duration::zero() {
        StdDuration::from_secs(0)
    } else {
        delta.to_std().unwrap_or_else(|_| StdDuration::from_secs(0))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reminder::Reminder;
    use crate::services::database::Database;
    use crate::services::notification::inbox::InboxService;
    use crate::services::reminder::ReminderService;
    use chrono::TimeZone;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, h, m, 0).unwrap()
    }

    fn create_reminder(conn: &Connection, user: &str, title: &str, when: DateTime<Local>) -> i64 {
        let service = ReminderService::new(conn);
        service
            .create(Reminder::new(user, title, when).unwrap())
            .unwrap()
            .id
            .unwrap()
    }

    fn no_delay() -> ReminderDispatcher {
        ReminderDispatcher::with_startup_delay(Duration::zero())
    }

    #[test]
    fn test_tick_dispatches_due_reminders_once() {
        let db = setup_test_db();
        let conn = db.connection();

        let due = create_reminder(conn, "user-1", "due", at(9, 0));
        create_reminder(conn, "user-1", "future", at(18, 0));

        let mut dispatcher = no_delay();
        let mut alerted = Vec::new();

        let first = dispatcher
            .tick_with_alerter_at(conn, at(10, 0), |r| {
                alerted.push(r.title.clone());
                Ok(())
            })
            .unwrap();

        assert_eq!(first.dispatched, vec![due]);
        assert_eq!(alerted, vec!["due"]);

        // The fired reminder is deactivated; a second pass is quiet.
        let second = dispatcher
            .tick_with_alerter_at(conn, at(10, 5), |_| {
                panic!("nothing should fire twice");
            })
            .unwrap();

        assert_eq!(second.dispatched_count(), 0);
        assert!(second.next_due_in.is_some());
    }

    #[test]
    fn test_tick_reports_time_until_next_reminder() {
        let db = setup_test_db();
        let conn = db.connection();

        create_reminder(conn, "user-1", "evening", at(18, 0));

        let mut dispatcher = no_delay();
        let result = dispatcher
            .tick_with_alerter_at(conn, at(17, 0), |_| Ok(()))
            .unwrap();

        assert_eq!(result.dispatched_count(), 0);
        assert_eq!(result.next_due_in, Some(StdDuration::from_secs(3600)));
    }

    #[test]
    fn test_tick_records_inbox_notification() {
        let db = setup_test_db();
        let conn = db.connection();

        create_reminder(conn, "user-1", "Study session", at(9, 0));

        let mut dispatcher = no_delay();
        dispatcher
            .tick_with_alerter_at(conn, at(10, 0), |_| Ok(()))
            .unwrap();

        let inbox = InboxService::new(conn);
        let notifications = inbox.list_recent("user-1").unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "Study session");
        assert!(!notifications[0].read);
    }

    #[test]
    fn test_disabled_profile_skips_alert_but_keeps_inbox_record() {
        let db = setup_test_db();
        let conn = db.connection();

        conn.execute(
            "INSERT INTO profiles (user_id, notifications_enabled) VALUES ('user-1', 0)",
            [],
        )
        .unwrap();
        create_reminder(conn, "user-1", "muted user", at(9, 0));

        let mut dispatcher = no_delay();
        let mut alert_count = 0;

        let result = dispatcher
            .tick_with_alerter_at(conn, at(10, 0), |_| {
                alert_count += 1;
                Ok(())
            })
            .unwrap();

        assert_eq!(result.dispatched_count(), 1);
        assert_eq!(alert_count, 0);

        let inbox = InboxService::new(conn);
        assert_eq!(inbox.list_recent("user-1").unwrap().len(), 1);
    }

    #[test]
    fn test_alert_failure_still_deactivates_reminder() {
        let db = setup_test_db();
        let conn = db.connection();

        let id = create_reminder(conn, "user-1", "flaky", at(9, 0));

        let mut dispatcher = no_delay();
        let result = dispatcher
            .tick_with_alerter_at(conn, at(10, 0), |_| anyhow::bail!("display unavailable"))
            .unwrap();

        assert_eq!(result.dispatched, vec![id]);
        assert_eq!(result.failed_alerts.len(), 1);
        assert!(result.failed_alerts[0].1.contains("display unavailable"));

        let service = ReminderService::new(conn);
        assert!(!service.get("user-1", id).unwrap().unwrap().active);
    }

    #[test]
    fn test_tick_defers_until_startup_delay_elapses() {
        let db = setup_test_db();
        let conn = db.connection();

        create_reminder(conn, "user-1", "due", at(9, 0));

        let mut dispatcher = ReminderDispatcher::with_startup_delay(Duration::seconds(20));
        dispatcher.startup_ready_at = Some(at(10, 0) + Duration::seconds(20));

        let before_ready = dispatcher
            .tick_with_alerter_at(conn, at(10, 0), |_| Ok(()))
            .unwrap();

        assert_eq!(before_ready.dispatched_count(), 0);
        assert!(before_ready.next_due_in.is_some());

        let after_ready = dispatcher
            .tick_with_alerter_at(conn, at(10, 1), |_| Ok(()))
            .unwrap();

        assert_eq!(after_ready.dispatched_count(), 1);
    }

    #[test]
    fn test_reminders_of_multiple_users_dispatch_in_one_pass() {
        let db = setup_test_db();
        let conn = db.connection();

        create_reminder(conn, "user-1", "a", at(8, 0));
        create_reminder(conn, "user-2", "b", at(9, 0));

        let mut dispatcher = no_delay();
        let result = dispatcher
            .tick_with_alerter_at(conn, at(10, 0), |_| Ok(()))
            .unwrap();

        assert_eq!(result.dispatched_count(), 2);
    }
}
