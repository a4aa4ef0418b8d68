//! # Features Module
//!
//! Feature modules of the client. Currently only the daily reminder;
//! the rest of the app is a thin REST presentation layer with no
//! client-side logic worth a module.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0

pub mod reminders;

pub use reminders::{ApplyOutcome, ReminderManager, ReminderScheduler};
