//! Subject service for CRUD operations on a user's subjects.
//!
//! Deleting a subject cascades to its schedule entries and tasks via the
//! foreign keys declared in the schema, so one delete removes the whole
//! footprint of a course.

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection};

use crate::models::subject::Subject;
use crate::services::shared::to_local_datetime;

/// Service for managing subjects.
pub struct SubjectService<'a> {
    conn: &'a Connection,
}

impl<'a> SubjectService<'a> {
    /// Create a new SubjectService with the given database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new subject.
    pub fn create(&self, subject: Subject) -> Result<Subject> {
        subject.validate().map_err(|e| anyhow!("{}", e))?;

        let now = chrono::Local::now();

        self.conn
            .execute(
                "INSERT INTO subjects (user_id, name, color, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    subject.user_id,
                    subject.name.trim(),
                    subject.color,
                    now.to_rfc3339(),
                ],
            )
            .context("Failed to insert subject")?;

        let id = self.conn.last_insert_rowid();
        self.get(&subject.user_id, id)?
            .ok_or_else(|| anyhow!("Subject with id {} not found after insert", id))
    }

    /// Get one of the user's subjects by id.
    pub fn get(&self, user_id: &str, id: i64) -> Result<Option<Subject>> {
        let result = self.conn.query_row(
            "SELECT id, user_id, name, color, created_at
             FROM subjects WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
            |row| {
                Ok(Subject {
                    id: Some(row.get(0)?),
                    user_id: row.get(1)?,
                    name: row.get(2)?,
                    color: row.get(3)?,
                    created_at: Some(to_local_datetime(row.get::<_, String>(4)?)?),
                })
            },
        );

        match result {
            Ok(subject) => Ok(Some(subject)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List the user's subjects ordered by name.
    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<Subject>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, name, color, created_at
             FROM subjects
             WHERE user_id = ?1
             ORDER BY name ASC",
        )?;

        let subjects = stmt
            .query_map([user_id], |row| {
                Ok(Subject {
                    id: Some(row.get(0)?),
                    user_id: row.get(1)?,
                    name: row.get(2)?,
                    color: row.get(3)?,
                    created_at: Some(to_local_datetime(row.get::<_, String>(4)?)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to fetch subjects")?;

        Ok(subjects)
    }

    /// Delete one of the user's subjects.
    ///
    /// Schedule entries and tasks referencing it go with it.
    pub fn delete(&self, user_id: &str, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                "DELETE FROM subjects WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
            )
            .context("Failed to delete subject")?;

        if rows_affected == 0 {
            return Err(anyhow!("Subject with id {} not found", id));
        }

        log::info!("Deleted subject {} and its dependent rows", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule_entry::ScheduleEntry;
    use crate::models::task::Task;
    use crate::services::database::Database;
    use crate::services::schedule::ScheduleService;
    use crate::services::task::TaskService;
    use chrono::NaiveDate;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    #[test]
    fn test_create_and_get_subject() {
        let db = setup_test_db();
        let service = SubjectService::new(db.connection());

        let created = service
            .create(Subject::new("user-1", "Calculus I", "#3B82F6"))
            .unwrap();

        assert!(created.id.is_some());
        assert_eq!(created.name, "Calculus I");
        assert!(created.created_at.is_some());
    }

    #[test]
    fn test_create_trims_name() {
        let db = setup_test_db();
        let service = SubjectService::new(db.connection());

        let created = service
            .create(Subject::new("user-1", "  Physics  ", "#10B981"))
            .unwrap();

        assert_eq!(created.name, "Physics");
    }

    #[test]
    fn test_create_rejects_invalid_color() {
        let db = setup_test_db();
        let service = SubjectService::new(db.connection());

        let result = service.create(Subject::new("user-1", "Physics", "green"));
        assert!(result.is_err());
    }

    #[test]
    fn test_list_is_scoped_and_ordered() {
        let db = setup_test_db();
        let service = SubjectService::new(db.connection());

        service
            .create(Subject::new("user-1", "Physics", "#10B981"))
            .unwrap();
        service
            .create(Subject::new("user-1", "Algebra", "#3B82F6"))
            .unwrap();
        service
            .create(Subject::new("user-2", "Chemistry", "#EF4444"))
            .unwrap();

        let subjects = service.list_for_user("user-1").unwrap();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0].name, "Algebra");
        assert_eq!(subjects[1].name, "Physics");
    }

    #[test]
    fn test_delete_requires_owner() {
        let db = setup_test_db();
        let service = SubjectService::new(db.connection());

        let created = service
            .create(Subject::new("user-1", "Physics", "#10B981"))
            .unwrap();
        let id = created.id.unwrap();

        assert!(service.delete("user-2", id).is_err());
        assert!(service.delete("user-1", id).is_ok());
        assert!(service.get("user-1", id).unwrap().is_none());
    }

    #[test]
    fn test_delete_cascades_to_entries_and_tasks() {
        let db = setup_test_db();
        let subjects = SubjectService::new(db.connection());
        let schedule = ScheduleService::new(db.connection());
        let tasks = TaskService::new(db.connection());

        let subject = subjects
            .create(Subject::new("user-1", "Physics", "#10B981"))
            .unwrap();
        let subject_id = subject.id.unwrap();

        let entry = schedule
            .create(
                ScheduleEntry::builder()
                    .user_id("user-1")
                    .subject_id(subject_id)
                    .day_of_week(1)
                    .start_time("08:00:00")
                    .end_time("10:00:00")
                    .build()
                    .unwrap(),
            )
            .unwrap();

        let due = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let task = tasks
            .create(
                Task::new("user-1", "Lab report", due)
                    .unwrap()
                    .with_subject(subject_id),
            )
            .unwrap();

        subjects.delete("user-1", subject_id).unwrap();

        assert!(schedule.get("user-1", entry.id.unwrap()).unwrap().is_none());
        assert!(tasks.get("user-1", task.id.unwrap()).unwrap().is_none());
    }
}
