use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_profiles_table(conn)?;
    run_profile_migrations(conn)?;
    create_subjects_table(conn)?;
    create_schedule_entries_table(conn)?;
    create_tasks_table(conn)?;
    create_reminders_table(conn)?;
    run_reminder_migrations(conn)?;
    create_notifications_table(conn)?;
    create_indexes(conn)?;
    Ok(())
}

fn create_profiles_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS profiles (
            user_id TEXT PRIMARY KEY,
            name TEXT,
            email TEXT,
            program TEXT,
            semester INTEGER,
            notifications_enabled INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create profiles table")?;

    Ok(())
}

fn run_profile_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "profiles",
        "push_subscription",
        "ALTER TABLE profiles ADD COLUMN push_subscription TEXT",
    )?;

    Ok(())
}

fn create_subjects_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS subjects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            color TEXT NOT NULL DEFAULT '#3B82F6',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create subjects table")?;

    Ok(())
}

fn create_schedule_entries_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schedule_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            subject_id INTEGER REFERENCES subjects(id) ON DELETE CASCADE,
            day_of_week INTEGER NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            room TEXT,
            instructor TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create schedule_entries table")?;

    Ok(())
}

fn create_tasks_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            subject_id INTEGER REFERENCES subjects(id) ON DELETE CASCADE,
            description TEXT NOT NULL,
            due_date TEXT NOT NULL,
            priority TEXT NOT NULL DEFAULT 'medium',
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create tasks table")?;

    Ok(())
}

fn create_reminders_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS reminders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            scheduled_at TEXT NOT NULL,
            kind TEXT NOT NULL DEFAULT 'manual',
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create reminders table")?;

    Ok(())
}

fn run_reminder_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "reminders",
        "task_id",
        "ALTER TABLE reminders ADD COLUMN task_id INTEGER REFERENCES tasks(id) ON DELETE SET NULL",
    )?;

    Ok(())
}

fn create_notifications_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS notifications (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            message TEXT NOT NULL,
            is_read INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create notifications table")?;

    Ok(())
}

fn create_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_subjects_user ON subjects(user_id);
         CREATE INDEX IF NOT EXISTS idx_schedule_entries_user ON schedule_entries(user_id);
         CREATE INDEX IF NOT EXISTS idx_tasks_user ON tasks(user_id);
         CREATE INDEX IF NOT EXISTS idx_reminders_user ON reminders(user_id);
         CREATE INDEX IF NOT EXISTS idx_reminders_due ON reminders(active, scheduled_at);
         CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_id);",
    )
    .context("Failed to create indexes")?;

    Ok(())
}
