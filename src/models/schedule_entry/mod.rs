// Schedule entry module
// Weekly recurring class slot owned by one user

use chrono::{DateTime, Local};

use crate::utils::date::parse_clock_time;

/// One recurring weekly class: a day of the week plus a clock-time range.
///
/// Times are stored as "HH:MM:SS" strings exactly as persisted; the grid
/// engine converts them to minutes when laying out the week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub id: Option<i64>,
    pub user_id: String,
    pub subject_id: Option<i64>,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub instructor: Option<String>,
    pub created_at: Option<DateTime<Local>>,
}

impl ScheduleEntry {
    /// Create a new entry with required fields.
    ///
    /// # Arguments
    /// * `user_id` - Owning user identifier
    /// * `day_of_week` - 0 = Sunday .. 6 = Saturday
    /// * `start_time` / `end_time` - "HH:MM" or "HH:MM:SS" clock strings
    ///
    /// # Returns
    /// Returns `Result<ScheduleEntry, String>` with validation
    ///
    /// # Examples
    /// ```
    /// use unitask::models::schedule_entry::ScheduleEntry;
    ///
    /// let entry = ScheduleEntry::new("user-1", 1, "08:00:00", "10:00:00").unwrap();
    /// assert_eq!(entry.day_of_week, 1);
    /// ```
    pub fn new(
        user_id: impl Into<String>,
        day_of_week: u8,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Result<Self, String> {
        let entry = Self {
            id: None,
            user_id: user_id.into(),
            subject_id: None,
            day_of_week,
            start_time: start_time.into(),
            end_time: end_time.into(),
            room: None,
            instructor: None,
            created_at: None,
        };

        entry.validate()?;
        Ok(entry)
    }

    /// Create a builder for constructing entries with optional fields.
    pub fn builder() -> ScheduleEntryBuilder {
        ScheduleEntryBuilder::new()
    }

    /// Validate the entry.
    pub fn validate(&self) -> Result<(), String> {
        if self.day_of_week > 6 {
            return Err("Day of week must be between 0 (Sunday) and 6 (Saturday)".to_string());
        }

        let start = parse_clock_time(&self.start_time)
            .ok_or_else(|| format!("Invalid start time: {}", self.start_time))?;
        let end = parse_clock_time(&self.end_time)
            .ok_or_else(|| format!("Invalid end time: {}", self.end_time))?;

        if end <= start {
            return Err("End time must be after start time".to_string());
        }

        Ok(())
    }
}

/// Builder for creating schedule entries with optional fields.
pub struct ScheduleEntryBuilder {
    user_id: Option<String>,
    subject_id: Option<i64>,
    day_of_week: Option<u8>,
    start_time: Option<String>,
    end_time: Option<String>,
    room: Option<String>,
    instructor: Option<String>,
}

impl ScheduleEntryBuilder {
    pub fn new() -> Self {
        Self {
            user_id: None,
            subject_id: None,
            day_of_week: None,
            start_time: None,
            end_time: None,
            room: None,
            instructor: None,
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn subject_id(mut self, subject_id: i64) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    pub fn day_of_week(mut self, day_of_week: u8) -> Self {
        self.day_of_week = Some(day_of_week);
        self
    }

    pub fn start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    pub fn end_time(mut self, end_time: impl Into<String>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    pub fn room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }

    /// Build the entry.
    pub fn build(self) -> Result<ScheduleEntry, String> {
        let user_id = self.user_id.ok_or("User id is required")?;
        let day_of_week = self.day_of_week.ok_or("Day of week is required")?;
        let start_time = self.start_time.ok_or("Start time is required")?;
        let end_time = self.end_time.ok_or("End time is required")?;

        let entry = ScheduleEntry {
            id: None,
            user_id,
            subject_id: self.subject_id,
            day_of_week,
            start_time,
            end_time,
            room: self.room,
            instructor: self.instructor,
            created_at: None,
        };

        entry.validate()?;
        Ok(entry)
    }
}

impl Default for ScheduleEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
