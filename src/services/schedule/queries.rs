use super::ScheduleService;
use crate::models::schedule_entry::ScheduleEntry;
use crate::services::shared::to_local_datetime;
use anyhow::Result;
use rusqlite::{self, params, Row};

impl<'a> ScheduleService<'a> {
    /// List the user's whole week, ordered by day then start time.
    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<ScheduleEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, subject_id, day_of_week, start_time, end_time,
                    room, instructor, created_at
             FROM schedule_entries
             WHERE user_id = ?
             ORDER BY day_of_week ASC, start_time ASC",
        )?;

        let entries = stmt
            .query_map([user_id], map_entry_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }

    /// List the user's entries for one day of the week, ordered by start time.
    pub fn entries_for_day(&self, user_id: &str, day_of_week: u8) -> Result<Vec<ScheduleEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, subject_id, day_of_week, start_time, end_time,
                    room, instructor, created_at
             FROM schedule_entries
             WHERE user_id = ? AND day_of_week = ?
             ORDER BY start_time ASC",
        )?;

        let entries = stmt
            .query_map(params![user_id, day_of_week], map_entry_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }
}

fn map_entry_row(row: &Row<'_>) -> Result<ScheduleEntry, rusqlite::Error> {
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
}
