//! # Core Module
//!
//! Domain types for the daily-reminder feature: the validated
//! time-of-day and the persisted settings record.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0

pub mod settings;

// Re-export commonly used items
pub use settings::{NotificationSettings, ReminderTime, SETTINGS_KEY};
