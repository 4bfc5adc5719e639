//! Persistent notification inbox.
//!
//! Every dispatched reminder leaves a row here so the user can review
//! alerts they missed. The in-app list shows the 20 newest.

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, Row};

use crate::models::notification::InboxNotification;
use crate::services::shared::to_local_datetime;

/// How many notifications the inbox list returns.
pub const INBOX_LIMIT: usize = 20;

/// Service for the per-user notification inbox.
pub struct InboxService<'a> {
    conn: &'a Connection,
}

impl<'a> InboxService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Record a delivered notification.
    pub fn record(&self, mut notification: InboxNotification) -> Result<InboxNotification> {
        let now = chrono::Local::now();

        self.conn
            .execute(
                "INSERT INTO notifications (user_id, title, message, is_read, created_at)
                 VALUES (?, ?, ?, 0, ?)",
                params![
                    notification.user_id,
                    notification.title,
                    notification.message,
                    now.to_rfc3339(),
                ],
            )
            .context("Failed to insert notification")?;

        notification.id = Some(self.conn.last_insert_rowid());
        notification.read = false;
        notification.created_at = Some(now);

        Ok(notification)
    }

    /// The user's newest notifications, most recent first.
    pub fn list_recent(&self, user_id: &str) -> Result<Vec<InboxNotification>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, title, message, is_read, created_at
             FROM notifications
             WHERE user_id = ?
             ORDER BY created_at DESC
             LIMIT ?",
        )?;

        let notifications = stmt
            .query_map(params![user_id, INBOX_LIMIT as i64], map_notification_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notifications)
    }

    /// Mark one of the user's notifications as read.
    pub fn mark_read(&self, user_id: &str, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE notifications SET is_read = 1 WHERE id = ? AND user_id = ?",
                params![id, user_id],
            )
            .context("Failed to update notification")?;

        if rows_affected == 0 {
            return Err(anyhow!("Notification with id {} not found", id));
        }

        Ok(())
    }
}

fn map_notification_row(row: &Row<'_>) -> Result<InboxNotification, rusqlite::Error> {
    Ok(InboxNotification {
        id: Some(row.get(0)?),
        user_id: row.get(1)?,
        title: row.get(2)?,
        message: row.get(3)?,
        read: row.get::<_, i32>(4)? != 0,
        created_at: Some(to_local_datetime(row.get::<_, String>(5)?)?),
    })
}
