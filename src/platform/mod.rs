//! # Platform Module
//!
//! Capability interfaces over the two ambient device services the
//! reminder feature needs: the local notification service and a small
//! key-value settings store. Both are injected as trait objects so
//! tests can substitute fakes; concrete backends live in the
//! submodules.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

pub mod memory;
pub mod store;

use anyhow::Result;
use async_trait::async_trait;

pub use memory::{MemoryNotifications, MemoryStore, ScheduledReminder};
pub use store::SqliteStore;

/// Notification permission state as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// Title and body of the scheduled reminder notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderContent {
    pub title: String,
    pub body: String,
}

impl Default for ReminderContent {
    fn default() -> Self {
        Self {
            title: "Daily Inspection Reminder".to_string(),
            body: "It's time to check your plants!".to_string(),
        }
    }
}

/// Capability interface over the platform's local notification service.
///
/// Implementations own whatever handle the underlying OS API needs and
/// must be safe to call repeatedly: requesting permission when already
/// granted and cancelling with nothing scheduled are both no-ops.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Whether this device can receive local notifications at all
    /// (simulators and headless environments cannot).
    fn is_supported(&self) -> bool;

    /// Current permission state without prompting the user
    async fn permission_status(&self) -> PermissionStatus;

    /// Prompts the user for permission and reports the resulting state
    async fn request_permission(&self) -> PermissionStatus;

    /// Registers a repeating trigger firing daily at (hour, minute)
    /// local time. The platform handles day rollover; this is not a
    /// one-shot computed timestamp. Returns the platform identifier of
    /// the registration.
    async fn schedule_repeating_daily(
        &self,
        hour: u32,
        minute: u32,
        content: &ReminderContent,
    ) -> Result<String>;

    /// Cancels every notification registered through this service
    async fn cancel_all(&self) -> Result<()>;
}

/// Capability interface over a durable string key-value store
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Fully overwrites the value under `key` (last write wins)
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
