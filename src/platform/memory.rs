//! # In-Memory Platform Backends
//!
//! Process-local implementations of the platform capability traits.
//! `MemoryNotifications` records every registered trigger so tests and
//! the dev harness can inspect exactly what would fire; `MemoryStore`
//! is a plain concurrent map.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use crate::platform::{
    NotificationService, PermissionStatus, ReminderContent, SettingsStore,
};
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// A trigger registered with [`MemoryNotifications`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReminder {
    pub id: String,
    pub hour: u32,
    pub minute: u32,
    pub content: ReminderContent,
}

/// In-memory notification service.
///
/// Grants permission on the first request by default; `denying()` and
/// `unsupported()` build the failure-mode variants.
pub struct MemoryNotifications {
    supported: bool,
    grant_on_request: bool,
    permission: Mutex<PermissionStatus>,
    scheduled: DashMap<String, ScheduledReminder>,
    permission_requests: AtomicUsize,
}

impl MemoryNotifications {
    pub fn new() -> Self {
        Self {
            supported: true,
            grant_on_request: true,
            permission: Mutex::new(PermissionStatus::Undetermined),
            scheduled: DashMap::new(),
            permission_requests: AtomicUsize::new(0),
        }
    }

    /// A device whose user denies the permission prompt
    pub fn denying() -> Self {
        Self {
            grant_on_request: false,
            ..Self::new()
        }
    }

    /// A device that cannot receive local notifications at all
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    /// A device where permission was granted in an earlier session
    pub fn granted() -> Self {
        Self {
            permission: Mutex::new(PermissionStatus::Granted),
            ..Self::new()
        }
    }

    /// Snapshot of every currently registered trigger
    pub fn scheduled(&self) -> Vec<ScheduledReminder> {
        self.scheduled.iter().map(|e| e.value().clone()).collect()
    }

    /// How many times the permission prompt was shown
    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }

    fn current_permission(&self) -> PermissionStatus {
        match self.permission.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn set_permission(&self, status: PermissionStatus) {
        match self.permission.lock() {
            Ok(mut guard) => *guard = status,
            Err(poisoned) => *poisoned.into_inner() = status,
        }
    }
}

impl Default for MemoryNotifications {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationService for MemoryNotifications {
    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn permission_status(&self) -> PermissionStatus {
        self.current_permission()
    }

    async fn request_permission(&self) -> PermissionStatus {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        let status = if self.grant_on_request {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        self.set_permission(status);
        status
    }

    async fn schedule_repeating_daily(
        &self,
        hour: u32,
        minute: u32,
        content: &ReminderContent,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.scheduled.insert(
            id.clone(),
            ScheduledReminder {
                id: id.clone(),
                hour,
                minute,
                content: content.clone(),
            },
        );
        Ok(id)
    }

    async fn cancel_all(&self) -> Result<()> {
        self.scheduled.clear();
        Ok(())
    }
}

/// In-memory key-value store
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
