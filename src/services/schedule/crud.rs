use super::ScheduleService;
use crate::models::schedule_entry::ScheduleEntry;
use crate::services::shared::to_local_datetime;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{self, params};

impl<'a> ScheduleService<'a> {
    /// Create a new schedule entry for its owning user.
    ///
    /// Entries are created and deleted wholesale; there is no update.
    pub fn create(&self, mut entry: ScheduleEntry) -> Result<ScheduleEntry> {
        entry.validate().map_err(|e| anyhow!(e))?;

        let now = Local::now();

        self.conn
            .execute(
                "INSERT INTO schedule_entries (
                    user_id, subject_id, day_of_week, start_time, end_time,
                    room, instructor, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    entry.user_id,
                    entry.subject_id,
                    entry.day_of_week,
                    entry.start_time,
                    entry.end_time,
                    entry.room,
                    entry.instructor,
                    now.to_rfc3339(),
                ],
            )
            .context("Failed to insert schedule entry")?;

        entry.id = Some(self.conn.last_insert_rowid());
        entry.created_at = Some(now);

        Ok(entry)
    }

    /// Retrieve one of the user's entries by id.
    pub fn get(&self, user_id: &str, id: i64) -> Result<Option<ScheduleEntry>> {
        let result = self.conn.query_row(
            "SELECT id, user_id, subject_id, day_of_week, start_time, end_time,
                    room, instructor, created_at
             FROM schedule_entries WHERE id = ? AND user_id = ?",
            params![id, user_id],
            |row| {
                Ok(ScheduleEntry {
                    id: Some(row.get(0)?),
                    user_id: row.get(1)?,
                    subject_id: row.get(2)?,
                    day_of_week: row.get(3)?,
                    start_time: row.get(4)?,
                    end_time: row.get(5)?,
                    room: row.get(6)?,
                    instructor: row.get(7)?,
                    created_at: Some(to_local_datetime(row.get::<_, String>(8)?)?),
                })
            },
        );

        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete one of the user's entries by id.
    pub fn delete(&self, user_id: &str, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                "DELETE FROM schedule_entries WHERE id = ? AND user_id = ?",
                params![id, user_id],
            )
            .context("Failed to delete schedule entry")?;

        if rows_affected == 0 {
            return Err(anyhow!("Schedule entry with id {} not found", id));
        }

        Ok(())
    }
}
