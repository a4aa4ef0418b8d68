//! # Reminders Feature
//!
//! Daily inspection reminder: scheduling, settings persistence, and
//! the settings-screen flow.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: true

pub mod manager;
pub mod scheduler;

pub use manager::{ApplyOutcome, ReminderManager};
pub use scheduler::ReminderScheduler;
