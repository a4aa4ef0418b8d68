//! # Daily Reminder Scheduler
//!
//! Translates the user's reminder settings into at most one repeating
//! platform notification and keeps the persisted settings blob in sync
//! across restarts.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: Validate the time string before cancelling, so malformed
//!   input can no longer tear down an existing schedule
//! - 1.1.0: Defaults on corrupt stored settings instead of erroring
//! - 1.0.0: Initial release

use crate::core::{NotificationSettings, ReminderTime, SETTINGS_KEY};
use crate::platform::{
    NotificationService, PermissionStatus, ReminderContent, SettingsStore,
};
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::sync::Arc;

/// Owns the daily-reminder lifecycle against the injected platform
/// services. All expected failure modes (denied permission, rejected
/// registration) come back as `false` rather than errors; only storage
/// writes propagate failure, since silently dropping a settings change
/// would mislead the user.
pub struct ReminderScheduler {
    notifications: Arc<dyn NotificationService>,
    store: Arc<dyn SettingsStore>,
    content: ReminderContent,
}

impl ReminderScheduler {
    pub fn new(notifications: Arc<dyn NotificationService>, store: Arc<dyn SettingsStore>) -> Self {
        Self {
            notifications,
            store,
            content: ReminderContent::default(),
        }
    }

    /// Overrides the fixed notification payload
    pub fn with_content(mut self, content: ReminderContent) -> Self {
        self.content = content;
        self
    }

    /// Requests notification permission if not already granted.
    ///
    /// Returns `false` when the device cannot receive notifications or
    /// the user denies the prompt. Safe to call repeatedly: an
    /// already-granted state is returned without prompting again.
    pub async fn request_permission(&self) -> bool {
        if !self.notifications.is_supported() {
            info!("Device does not support local notifications");
            return false;
        }

        let existing = self.notifications.permission_status().await;
        let status = if existing == PermissionStatus::Granted {
            existing
        } else {
            self.notifications.request_permission().await
        };

        if status != PermissionStatus::Granted {
            info!("Notification permission not granted");
            return false;
        }
        true
    }

    /// Establishes exactly one repeating daily notification at `time`
    /// (`"HH:MM"`, device-local).
    ///
    /// Any previously registered reminder is cancelled first, so
    /// calling this repeatedly never accumulates duplicates. Returns
    /// `false` without touching an existing registration when `time`
    /// does not parse, and `false` with nothing registered when the
    /// platform rejects the trigger.
    pub async fn schedule_daily_reminder(&self, time: &str) -> bool {
        let parsed = match ReminderTime::parse(time) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Rejected reminder time {:?}: {}", time, e);
                return false;
            }
        };

        // Cancel before registering: the at-most-one invariant depends
        // on this ordering.
        self.cancel_all_notifications().await;

        match self
            .notifications
            .schedule_repeating_daily(parsed.hour(), parsed.minute(), &self.content)
            .await
        {
            Ok(id) => {
                info!("Daily reminder {} scheduled for {}", id, parsed);
                true
            }
            Err(e) => {
                error!("Failed to schedule daily reminder: {}", e);
                false
            }
        }
    }

    /// Cancels every notification this module registered. A no-op when
    /// nothing is scheduled.
    pub async fn cancel_all_notifications(&self) {
        match self.notifications.cancel_all().await {
            Ok(()) => debug!("All scheduled notifications cancelled"),
            Err(e) => error!("Failed to cancel scheduled notifications: {}", e),
        }
    }

    /// Reads the persisted settings, falling back to defaults when the
    /// record is missing, unreadable, or corrupt. Never errors: a bad
    /// local blob is not actionable by the user and defaults are safe.
    pub async fn get_notification_settings(&self) -> NotificationSettings {
        match self.store.get(SETTINGS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!("Corrupt notification settings, using defaults: {}", e);
                    NotificationSettings::default()
                }
            },
            Ok(None) => NotificationSettings::default(),
            Err(e) => {
                error!("Failed to read notification settings: {}", e);
                NotificationSettings::default()
            }
        }
    }

    /// Serializes and writes `settings`, fully overwriting the prior
    /// record. Callers pass the complete desired state; there is no
    /// partial merge at this layer.
    pub async fn save_notification_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<()> {
        let raw = serde_json::to_string(settings)
            .context("failed to serialize notification settings")?;
        self.store
            .set(SETTINGS_KEY, &raw)
            .await
            .context("failed to write notification settings")?;
        debug!("Notification settings saved: {:?}", settings);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryNotifications, MemoryStore};
    use anyhow::anyhow;
    use async_trait::async_trait;

    /// Notification service whose registrations always fail
    struct RejectingNotifications {
        inner: MemoryNotifications,
    }

    #[async_trait]
    impl NotificationService for RejectingNotifications {
        fn is_supported(&self) -> bool {
            true
        }

        async fn permission_status(&self) -> PermissionStatus {
            self.inner.permission_status().await
        }

        async fn request_permission(&self) -> PermissionStatus {
            self.inner.request_permission().await
        }

        async fn schedule_repeating_daily(
            &self,
            _hour: u32,
            _minute: u32,
            _content: &ReminderContent,
        ) -> Result<String> {
            Err(anyhow!("trigger registration rejected"))
        }

        async fn cancel_all(&self) -> Result<()> {
            self.inner.cancel_all().await
        }
    }

    fn scheduler_with(
        notifications: Arc<MemoryNotifications>,
    ) -> (ReminderScheduler, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (
            ReminderScheduler::new(notifications, store.clone()),
            store,
        )
    }

    #[tokio::test]
    async fn test_schedule_registers_exactly_one() {
        let notifications = Arc::new(MemoryNotifications::new());
        let (scheduler, _store) = scheduler_with(notifications.clone());

        assert!(scheduler.schedule_daily_reminder("10:00").await);
        assert!(scheduler.schedule_daily_reminder("18:30").await);
        assert!(scheduler.schedule_daily_reminder("07:15").await);

        let scheduled = notifications.scheduled();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].hour, 7);
        assert_eq!(scheduled[0].minute, 15);
    }

    #[tokio::test]
    async fn test_schedule_uses_default_payload() {
        let notifications = Arc::new(MemoryNotifications::new());
        let (scheduler, _store) = scheduler_with(notifications.clone());

        assert!(scheduler.schedule_daily_reminder("10:00").await);
        let scheduled = notifications.scheduled();
        assert_eq!(scheduled[0].content.title, "Daily Inspection Reminder");
        assert_eq!(scheduled[0].content.body, "It's time to check your plants!");
    }

    #[tokio::test]
    async fn test_schedule_with_custom_payload() {
        let notifications = Arc::new(MemoryNotifications::new());
        let store = Arc::new(MemoryStore::new());
        let scheduler = ReminderScheduler::new(notifications.clone(), store).with_content(
            ReminderContent {
                title: "Water check".to_string(),
                body: "Misting time".to_string(),
            },
        );

        assert!(scheduler.schedule_daily_reminder("12:00").await);
        assert_eq!(notifications.scheduled()[0].content.title, "Water check");
    }

    #[tokio::test]
    async fn test_malformed_time_registers_nothing() {
        let notifications = Arc::new(MemoryNotifications::new());
        let (scheduler, _store) = scheduler_with(notifications.clone());

        for bad in ["25:61", "1030", "aa:bb", ""] {
            assert!(!scheduler.schedule_daily_reminder(bad).await);
        }
        assert!(notifications.scheduled().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_time_keeps_existing_schedule() {
        let notifications = Arc::new(MemoryNotifications::new());
        let (scheduler, _store) = scheduler_with(notifications.clone());

        assert!(scheduler.schedule_daily_reminder("10:00").await);
        assert!(!scheduler.schedule_daily_reminder("25:61").await);

        let scheduled = notifications.scheduled();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].hour, 10);
    }

    #[tokio::test]
    async fn test_rejected_registration_leaves_nothing_scheduled() {
        let notifications = Arc::new(RejectingNotifications {
            inner: MemoryNotifications::new(),
        });
        let store = Arc::new(MemoryStore::new());
        let scheduler = ReminderScheduler::new(notifications.clone(), store);

        assert!(!scheduler.schedule_daily_reminder("10:00").await);
        assert!(notifications.inner.scheduled().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_all_is_idempotent() {
        let notifications = Arc::new(MemoryNotifications::new());
        let (scheduler, _store) = scheduler_with(notifications.clone());

        assert!(scheduler.schedule_daily_reminder("10:00").await);
        scheduler.cancel_all_notifications().await;
        assert!(notifications.scheduled().is_empty());

        scheduler.cancel_all_notifications().await;
        assert!(notifications.scheduled().is_empty());
    }

    #[tokio::test]
    async fn test_request_permission_grants() {
        let notifications = Arc::new(MemoryNotifications::new());
        let (scheduler, _store) = scheduler_with(notifications);
        assert!(scheduler.request_permission().await);
    }

    #[tokio::test]
    async fn test_request_permission_denied() {
        let notifications = Arc::new(MemoryNotifications::denying());
        let (scheduler, _store) = scheduler_with(notifications);
        assert!(!scheduler.request_permission().await);
    }

    #[tokio::test]
    async fn test_request_permission_unsupported_device() {
        let notifications = Arc::new(MemoryNotifications::unsupported());
        let (scheduler, _store) = scheduler_with(notifications.clone());
        assert!(!scheduler.request_permission().await);
        assert_eq!(notifications.permission_requests(), 0);
    }

    #[tokio::test]
    async fn test_request_permission_skips_prompt_when_granted() {
        let notifications = Arc::new(MemoryNotifications::granted());
        let (scheduler, _store) = scheduler_with(notifications.clone());

        assert!(scheduler.request_permission().await);
        assert!(scheduler.request_permission().await);
        assert_eq!(notifications.permission_requests(), 0);
    }

    #[tokio::test]
    async fn test_settings_roundtrip() {
        let notifications = Arc::new(MemoryNotifications::new());
        let (scheduler, _store) = scheduler_with(notifications);

        let settings = NotificationSettings {
            daily_reminder_time: ReminderTime::new(6, 45).unwrap(),
            enabled: true,
        };
        scheduler.save_notification_settings(&settings).await.unwrap();
        assert_eq!(scheduler.get_notification_settings().await, settings);
    }

    #[tokio::test]
    async fn test_missing_settings_fall_back_to_defaults() {
        let notifications = Arc::new(MemoryNotifications::new());
        let (scheduler, _store) = scheduler_with(notifications);

        let settings = scheduler.get_notification_settings().await;
        assert_eq!(settings, NotificationSettings::default());
        assert_eq!(settings.daily_reminder_time.to_string(), "10:00");
        assert!(!settings.enabled);
    }

    #[tokio::test]
    async fn test_corrupt_settings_fall_back_to_defaults() {
        let notifications = Arc::new(MemoryNotifications::new());
        let store = Arc::new(MemoryStore::new());
        let scheduler = ReminderScheduler::new(notifications, store.clone());

        store.set(SETTINGS_KEY, "not json at all").await.unwrap();
        assert_eq!(
            scheduler.get_notification_settings().await,
            NotificationSettings::default()
        );

        store
            .set(SETTINGS_KEY, r#"{"dailyReminderTime":"99:99","enabled":true}"#)
            .await
            .unwrap();
        assert_eq!(
            scheduler.get_notification_settings().await,
            NotificationSettings::default()
        );
    }
}
