// Core layer - settings types and time handling
pub mod core;

// Platform layer - capability interfaces and backends
pub mod platform;

// Features layer - reminder scheduling and the settings flow
pub mod features;

// Re-export the public surface the settings screen works against
pub use crate::core::{NotificationSettings, ReminderTime, SETTINGS_KEY};
pub use crate::features::reminders::{ApplyOutcome, ReminderManager, ReminderScheduler};
pub use crate::platform::{
    MemoryNotifications, MemoryStore, NotificationService, PermissionStatus, ReminderContent,
    ScheduledReminder, SettingsStore, SqliteStore,
};
