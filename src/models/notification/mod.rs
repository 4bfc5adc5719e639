// Inbox notification model
// Persistent record shown in the in-app notification list

use chrono::{DateTime, Local};

/// One delivered notification, kept so the user can review it later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxNotification {
    pub id: Option<i64>,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: Option<DateTime<Local>>,
}

impl InboxNotification {
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            title: title.into(),
            message: message.into(),
            read: false,
            created_at: None,
        }
    }
}
