//! # Reminder Settings Flow
//!
//! The screen-level state machine behind the notification settings
//! page: toggling the daily reminder on/off, changing its time, and
//! re-asserting the platform schedule on app launch.
//!
//! Persisted state is only ever written after the platform confirmed
//! the matching registration, so the stored record never claims a
//! reminder the platform does not hold.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0

use crate::core::{NotificationSettings, ReminderTime};
use crate::features::reminders::ReminderScheduler;
use anyhow::Result;
use log::{info, warn};

/// Result of applying a settings change. Expected, user-actionable
/// failure modes come back as variants rather than errors; only
/// storage failures propagate as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The change took effect and was persisted
    Applied,
    /// The user (or device) refused notification permission
    PermissionDenied,
    /// The requested time did not parse as HH:MM
    InvalidTime,
    /// The platform rejected the trigger registration
    ScheduleFailed,
}

/// Drives [`ReminderScheduler`] through the enable/disable/retime
/// transitions the settings screen exposes.
pub struct ReminderManager {
    scheduler: ReminderScheduler,
}

impl ReminderManager {
    pub fn new(scheduler: ReminderScheduler) -> Self {
        Self { scheduler }
    }

    /// Current persisted settings (defaults when none exist)
    pub async fn settings(&self) -> NotificationSettings {
        self.scheduler.get_notification_settings().await
    }

    /// Toggles the daily reminder on or off.
    ///
    /// Enabling requires permission and a successful registration
    /// before anything is persisted; a denied prompt or rejected
    /// trigger leaves the stored record untouched (still disabled).
    /// Disabling cancels unconditionally and then persists.
    pub async fn set_enabled(&self, enabled: bool) -> Result<ApplyOutcome> {
        let mut settings = self.scheduler.get_notification_settings().await;

        if !enabled {
            self.scheduler.cancel_all_notifications().await;
            settings.enabled = false;
            self.scheduler.save_notification_settings(&settings).await?;
            info!("Daily reminder disabled");
            return Ok(ApplyOutcome::Applied);
        }

        if !self.scheduler.request_permission().await {
            return Ok(ApplyOutcome::PermissionDenied);
        }

        let time = settings.daily_reminder_time.to_string();
        if !self.scheduler.schedule_daily_reminder(&time).await {
            return Ok(ApplyOutcome::ScheduleFailed);
        }

        settings.enabled = true;
        if let Err(e) = self.scheduler.save_notification_settings(&settings).await {
            // The registration succeeded but the record did not stick;
            // roll the registration back so platform and storage agree.
            self.scheduler.cancel_all_notifications().await;
            return Err(e);
        }
        info!("Daily reminder enabled at {}", time);
        Ok(ApplyOutcome::Applied)
    }

    /// Changes the reminder time, rescheduling if currently enabled.
    ///
    /// When the platform rejects the new trigger the previous one is
    /// already gone (cancel-then-register), so the record is degraded
    /// to disabled with the old time kept - persisted state stays
    /// truthful about what the platform holds.
    pub async fn set_reminder_time(&self, time: &str) -> Result<ApplyOutcome> {
        let Ok(parsed) = ReminderTime::parse(time) else {
            return Ok(ApplyOutcome::InvalidTime);
        };

        let mut settings = self.scheduler.get_notification_settings().await;
        let previous_time = settings.daily_reminder_time;

        if settings.enabled {
            if !self
                .scheduler
                .schedule_daily_reminder(&parsed.to_string())
                .await
            {
                warn!("Reschedule failed; marking reminder disabled");
                settings.enabled = false;
                self.scheduler.save_notification_settings(&settings).await?;
                return Ok(ApplyOutcome::ScheduleFailed);
            }
        }

        settings.daily_reminder_time = parsed;
        if let Err(e) = self.scheduler.save_notification_settings(&settings).await {
            // The new trigger is live but the record did not stick;
            // restore the previous registration so platform and
            // storage agree before surfacing the write failure.
            if settings.enabled
                && !self
                    .scheduler
                    .schedule_daily_reminder(&previous_time.to_string())
                    .await
            {
                warn!("Could not restore previous reminder after failed settings write");
            }
            return Err(e);
        }
        info!("Reminder time set to {}", parsed);
        Ok(ApplyOutcome::Applied)
    }

    /// Re-asserts the platform schedule from persisted settings.
    ///
    /// Called on app launch: the OS can drop registrations behind our
    /// back (reinstall, notification reset), so an enabled record is
    /// re-registered here. If re-registration fails the record is
    /// degraded to disabled.
    pub async fn reconcile(&self) -> Result<()> {
        let mut settings = self.scheduler.get_notification_settings().await;
        if !settings.enabled {
            return Ok(());
        }

        let time = settings.daily_reminder_time.to_string();
        if self.scheduler.schedule_daily_reminder(&time).await {
            info!("Re-asserted daily reminder at {}", time);
        } else {
            warn!("Could not re-assert daily reminder; marking disabled");
            settings.enabled = false;
            self.scheduler.save_notification_settings(&settings).await?;
        }
        Ok(())
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }
}
