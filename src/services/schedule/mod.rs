//! Weekly schedule service entry point.
//! Database-backed operations over one user's recurring class entries,
//! organized across focused submodules.

use rusqlite::Connection;

pub mod crud;
pub mod queries;

/// Service for managing schedule entries stored in SQLite.
pub struct ScheduleService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> ScheduleService<'a> {
    /// Create a new ScheduleService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}
