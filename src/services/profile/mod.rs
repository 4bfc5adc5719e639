//! Profile service: account details and notification preferences.
//!
//! One row per user, keyed by the external auth identifier. The push
//! subscription blob is stored opaquely; an external push service consumes
//! it.

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{params, Connection, Row};

use crate::models::profile::Profile;
use crate::services::shared::to_local_datetime;

pub struct ProfileService<'a> {
    conn: &'a Connection,
}

impl<'a> ProfileService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Fetch the user's profile, if one exists.
    pub fn get(&self, user_id: &str) -> Result<Option<Profile>> {
        let result = self.conn.query_row(
            "SELECT user_id, name, email, program, semester,
                    notifications_enabled, push_subscription, created_at, updated_at
             FROM profiles WHERE user_id = ?",
            [user_id],
            map_profile_row,
        );

        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch the user's profile, creating a default row on first access.
    pub fn get_or_create(&self, user_id: &str) -> Result<Profile> {
        if let Some(profile) = self.get(user_id)? {
            return Ok(profile);
        }

        let now = Local::now();
        self.conn
            .execute(
                "INSERT INTO profiles (user_id, notifications_enabled, created_at, updated_at)
                 VALUES (?, 1, ?, ?)",
                params![user_id, now.to_rfc3339(), now.to_rfc3339()],
            )
            .context("Failed to insert profile")?;

        self.get(user_id)?
            .ok_or_else(|| anyhow!("Profile for {} missing after insert", user_id))
    }

    /// Update the editable profile fields.
    pub fn update(&self, profile: &Profile) -> Result<()> {
        profile.validate().map_err(|e| anyhow!(e))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE profiles SET
                    name = ?, email = ?, program = ?, semester = ?,
                    notifications_enabled = ?, updated_at = ?
                 WHERE user_id = ?",
                params![
                    profile.name,
                    profile.email,
                    profile.program,
                    profile.semester,
                    profile.notifications_enabled as i32,
                    Local::now().to_rfc3339(),
                    profile.user_id,
                ],
            )
            .context("Failed to update profile")?;

        if rows_affected == 0 {
            return Err(anyhow!("Profile for {} not found", profile.user_id));
        }

        Ok(())
    }

    /// Store or clear the push subscription blob. Notifications are
    /// enabled exactly when a subscription is present.
    pub fn set_push_subscription(
        &self,
        user_id: &str,
        subscription: Option<serde_json::Value>,
    ) -> Result<()> {
        let serialized = subscription
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .context("Failed to serialize push subscription")?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE profiles SET
                    push_subscription = ?, notifications_enabled = ?, updated_at = ?
                 WHERE user_id = ?",
                params![
                    serialized,
                    subscription.is_some() as i32,
                    Local::now().to_rfc3339(),
                    user_id,
                ],
            )
            .context("Failed to update push subscription")?;

        if rows_affected == 0 {
            return Err(anyhow!("Profile for {} not found", user_id));
        }

        Ok(())
    }
}

fn map_profile_row(row: &Row<'_>) -> Result<Profile, rusqlite::Error> {
    let subscription: Option<String> = row.get(6)?;

    Ok(Profile {
        user_id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        program: row.get(3)?,
        semester: row.get(4)?,
        notifications_enabled: row.get::<_, i32>(5)? != 0,
        push_subscription: subscription.and_then(|s| serde_json::from_str(&s).ok()),
        created_at: Some(to_local_datetime(row.get::<_, String>(7)?)?),
        updated_at: Some(to_local_datetime(row.get::<_, String>(8)?)?),
    })
}
