//! Reminder service: CRUD and the due-reminder dispatcher.

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{params, Connection, Row};

use crate::models::reminder::{Reminder, ReminderKind};
use crate::services::shared::to_local_datetime;

pub mod dispatch;

pub use dispatch::{DispatchTickResult, ReminderDispatcher};

/// Service for managing reminders stored in SQLite.
pub struct ReminderService<'a> {
    conn: &'a Connection,
}

impl<'a> ReminderService<'a> {
    /// Create a new ReminderService with the given database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new reminder.
    pub fn create(&self, mut reminder: Reminder) -> Result<Reminder> {
        reminder.validate().map_err(|e| anyhow!(e))?;

        let now = Local::now();

        self.conn
            .execute(
                "INSERT INTO reminders (
                    user_id, title, description, scheduled_at, kind, active,
                    task_id, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    reminder.user_id,
                    reminder.title,
                    reminder.description,
                    reminder.scheduled_at.to_rfc3339(),
                    reminder.kind.as_str(),
                    reminder.active as i32,
                    reminder.task_id,
                    now.to_rfc3339(),
                ],
            )
            .context("Failed to insert reminder")?;

        reminder.id = Some(self.conn.last_insert_rowid());
        reminder.created_at = Some(now);

        Ok(reminder)
    }

    /// Retrieve one of the user's reminders by id.
    pub fn get(&self, user_id: &str, id: i64) -> Result<Option<Reminder>> {
        let result = self.conn.query_row(
            "SELECT id, user_id, title, description, scheduled_at, kind,
                    active, task_id, created_at
             FROM reminders WHERE id = ? AND user_id = ?",
            params![id, user_id],
            map_reminder_row,
        );

        match result {
            Ok(reminder) => Ok(Some(reminder)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List the user's reminders ordered by scheduled time.
    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<Reminder>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, title, description, scheduled_at, kind,
                    active, task_id, created_at
             FROM reminders
             WHERE user_id = ?
             ORDER BY scheduled_at ASC",
        )?;

        let reminders = stmt
            .query_map([user_id], map_reminder_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(reminders)
    }

    /// Mute or re-arm one of the user's reminders.
    pub fn set_active(&self, user_id: &str, id: i64, active: bool) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE reminders SET active = ? WHERE id = ? AND user_id = ?",
                params![active as i32, id, user_id],
            )
            .context("Failed to update reminder")?;

        if rows_affected == 0 {
            return Err(anyhow!("Reminder with id {} not found", id));
        }

        Ok(())
    }

    /// Delete one of the user's reminders by id.
    pub fn delete(&self, user_id: &str, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                "DELETE FROM reminders WHERE id = ? AND user_id = ?",
                params![id, user_id],
            )
            .context("Failed to delete reminder")?;

        if rows_affected == 0 {
            return Err(anyhow!("Reminder with id {} not found", id));
        }

        Ok(())
    }
}

pub(crate) fn map_reminder_row(row: &Row<'_>) -> Result<Reminder, rusqlite::Error> {
    let kind: String = row.get(5)?;

    Ok(Reminder {
        id: Some(row.get(0)?),
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        scheduled_at: to_local_datetime(row.get::<_, String>(4)?)?,
        kind: kind.parse::<ReminderKind>().unwrap_or_default(),
        active: row.get::<_, i32>(6)? != 0,
        task_id: row.get(7)?,
        created_at: Some(to_local_datetime(row.get::<_, String>(8)?)?),
    })
}
