//! Dev harness for the reminder module.
//!
//! Drives the settings flow against the durable sqlite store with an
//! in-memory notification backend, since no desktop notification
//! daemon is wired up. Store path comes from `REMINDERS_DB`.

use anyhow::{bail, Result};
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use sprout_reminders::{
    ApplyOutcome, MemoryNotifications, ReminderManager, ReminderScheduler, SqliteStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let db_path =
        std::env::var("REMINDERS_DB").unwrap_or_else(|_| "reminders.db".to_string());
    let store = Arc::new(SqliteStore::open(&db_path)?);
    let notifications = Arc::new(MemoryNotifications::granted());
    let manager = ReminderManager::new(ReminderScheduler::new(notifications.clone(), store));

    // Re-assert the platform schedule from whatever was persisted
    manager.reconcile().await?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = match args.first().map(String::as_str) {
        None | Some("status") => None,
        Some("enable") => Some(manager.set_enabled(true).await?),
        Some("disable") => Some(manager.set_enabled(false).await?),
        Some("set-time") => {
            let Some(time) = args.get(1) else {
                bail!("usage: reminders set-time HH:MM");
            };
            Some(manager.set_reminder_time(time).await?)
        }
        Some(other) => bail!(
            "unknown command {:?}; expected status|enable|disable|set-time",
            other
        ),
    };

    match outcome {
        Some(ApplyOutcome::Applied) => info!("Settings change applied"),
        Some(ApplyOutcome::PermissionDenied) => {
            println!("Notification permission denied; enable it in system settings")
        }
        Some(ApplyOutcome::InvalidTime) => println!("Invalid time; expected HH:MM"),
        Some(ApplyOutcome::ScheduleFailed) => {
            println!("Could not register the reminder; it has been disabled")
        }
        None => {}
    }

    let settings = manager.settings().await;
    println!(
        "Daily reminder: {}",
        if settings.enabled { "enabled" } else { "disabled" }
    );
    println!("Reminder time:  {}", settings.daily_reminder_time);
    if settings.enabled {
        let next = settings
            .daily_reminder_time
            .next_occurrence(chrono::Local::now().naive_local());
        println!("Next fire:      {}", next.format("%Y-%m-%d %H:%M"));
        for reminder in notifications.scheduled() {
            info!(
                "Registered trigger {} at {:02}:{:02}",
                reminder.id, reminder.hour, reminder.minute
            );
        }
    }

    Ok(())
}
