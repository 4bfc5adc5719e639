use anyhow::Result;
use notify_rust::{Notification, Timeout};

pub mod inbox;

/// Service for raising desktop notifications when reminders come due
pub struct NotificationService {
    enabled: bool,
}

impl NotificationService {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Check if notifications are enabled
    #[allow(dead_code)]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable notifications
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Show an alert for a reminder that has come due
    pub fn show_reminder_alert(
        &self,
        title: &str,
        message: &str,
        urgency: NotificationUrgency,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let timeout = match urgency {
            NotificationUrgency::Normal => Timeout::Milliseconds(5000),
            NotificationUrgency::Critical => Timeout::Milliseconds(10000),
        };

        Notification::new()
            .summary(title)
            .body(message)
            .timeout(timeout)
            .show()
            .map_err(|e| anyhow::anyhow!("Failed to show notification: {}", e))?;

        Ok(())
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Notification urgency level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationUrgency {
    Normal,
    Critical,
}
