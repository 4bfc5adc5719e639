//! Task service for CRUD operations on a user's assignments.

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{params, Connection, Row};

use crate::models::task::{Priority, Task};
use crate::services::shared::{to_local_datetime, to_naive_date};

/// Service for managing tasks stored in SQLite.
pub struct TaskService<'a> {
    conn: &'a Connection,
}

impl<'a> TaskService<'a> {
    /// Create a new TaskService with the given database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new task.
    pub fn create(&self, mut task: Task) -> Result<Task> {
        task.validate().map_err(|e| anyhow!(e))?;

        let now = Local::now();

        self.conn
            .execute(
                "INSERT INTO tasks (
                    user_id, subject_id, description, due_date, priority,
                    completed, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    task.user_id,
                    task.subject_id,
                    task.description,
                    task.due_date.format("%Y-%m-%d").to_string(),
                    task.priority.as_str(),
                    task.completed as i32,
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                ],
            )
            .context("Failed to insert task")?;

        task.id = Some(self.conn.last_insert_rowid());
        task.created_at = Some(now);
        task.updated_at = Some(now);

        Ok(task)
    }

    /// Retrieve one of the user's tasks by id.
    pub fn get(&self, user_id: &str, id: i64) -> Result<Option<Task>> {
        let result = self.conn.query_row(
            "SELECT id, user_id, subject_id, description, due_date, priority,
                    completed, created_at, updated_at
             FROM tasks WHERE id = ? AND user_id = ?",
            params![id, user_id],
            map_task_row,
        );

        match result {
            Ok(task) => Ok(Some(task)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List the user's tasks: earliest due date first, higher priority
    /// first within a date.
    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, subject_id, description, due_date, priority,
                    completed, created_at, updated_at
             FROM tasks
             WHERE user_id = ?
             ORDER BY due_date ASC,
                      CASE priority
                          WHEN 'high' THEN 0
                          WHEN 'medium' THEN 1
                          ELSE 2
                      END ASC",
        )?;

        let tasks = stmt
            .query_map([user_id], map_task_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tasks)
    }

    /// Mark one of the user's tasks as completed or pending again.
    pub fn set_completed(&self, user_id: &str, id: i64, completed: bool) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE tasks SET completed = ?, updated_at = ?
                 WHERE id = ? AND user_id = ?",
                params![completed as i32, Local::now().to_rfc3339(), id, user_id],
            )
            .context("Failed to update task")?;

        if rows_affected == 0 {
            return Err(anyhow!("Task with id {} not found", id));
        }

        Ok(())
    }

    /// Delete one of the user's tasks by id.
    pub fn delete(&self, user_id: &str, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                "DELETE FROM tasks WHERE id = ? AND user_id = ?",
                params![id, user_id],
            )
            .context("Failed to delete task")?;

        if rows_affected == 0 {
            return Err(anyhow!("Task with id {} not found", id));
        }

        Ok(())
    }
}

fn map_task_row(row: &Row<'_>) -> Result<Task, rusqlite::Error> {
    let priority: String = row.get(5)?;

    Ok(Task {
        id: Some(row.get(0)?),
        user_id: row.get(1)?,
        subject_id: row.get(2)?,
        description: row.get(3)?,
        due_date: to_naive_date(row.get::<_, String>(4)?)?,
        // Unknown stored values fall back to the default priority
        priority: priority.parse::<Priority>().unwrap_or_default(),
        completed: row.get::<_, i32>(6)? != 0,
        created_at: Some(to_local_datetime(row.get::<_, String>(7)?)?),
        updated_at: Some(to_local_datetime(row.get::<_, String>(8)?)?),
    })
}
