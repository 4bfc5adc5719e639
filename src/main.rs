// Unitask notifier
// Headless loop that dispatches due reminders

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use unitask::config::NotifierConfig;
use unitask::services::database::Database;
use unitask::services::reminder::ReminderDispatcher;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Unitask notifier");

    let config = NotifierConfig::load();
    let db_path = config.database_path()?;
    let db_path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;

    let database = Database::new(db_path_str)?;
    database.initialize_schema()?;
    log::info!("Using database at {}", db_path_str);

    let mut dispatcher = ReminderDispatcher::with_startup_delay(chrono::Duration::seconds(
        config.startup_delay_secs as i64,
    ));
    let poll = Duration::from_secs(config.poll_interval_secs.max(1));

    loop {
        match dispatcher.tick(database.connection()) {
            Ok(result) => {
                if result.dispatched_count() > 0 {
                    log::info!("Dispatched {} reminder(s)", result.dispatched_count());
                }
                for (id, error) in &result.failed_alerts {
                    log::warn!("Alert for reminder {} failed: {}", id, error);
                }

                // Wake up early when a reminder comes due before the next poll
                let sleep_for = result
                    .next_due_in
                    .map_or(poll, |due| due.min(poll))
                    .max(Duration::from_secs(1));
                thread::sleep(sleep_for);
            }
            Err(err) => {
                log::error!("Dispatch pass failed: {:#}", err);
                thread::sleep(poll);
            }
        }
    }
}
