//! # Reminder Settings Types
//!
//! Validated reminder time-of-day plus the persisted settings record.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Added next_occurrence for displaying the upcoming fire time
//! - 1.0.0: Initial release with HH:MM parsing and the settings blob

use anyhow::{bail, Result};
use chrono::{Duration, NaiveDateTime};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Fixed key under which the settings blob is stored
pub const SETTINGS_KEY: &str = "notification_settings";

/// A wall-clock time of day for the daily reminder.
///
/// Carries no date or timezone; the platform interprets it in the
/// device's local timezone at fire time. Hours are in [0,23], minutes
/// in [0,59] - construction enforces both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTime {
    hour: u32,
    minute: u32,
}

impl ReminderTime {
    /// Creates a reminder time, rejecting out-of-range components
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 {
            bail!("hour out of range: {}", hour);
        }
        if minute > 59 {
            bail!("minute out of range: {}", minute);
        }
        Ok(Self { hour, minute })
    }

    /// Parses an `"HH:MM"` string (a single-digit hour is accepted)
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let Some((hour_part, minute_part)) = trimmed.split_once(':') else {
            bail!("expected HH:MM, got {:?}", raw);
        };
        // u32::from_str tolerates a leading '+'; only plain digits are
        // a valid time component.
        let Some(hour) = parse_component(hour_part) else {
            bail!("invalid hour in {:?}", raw);
        };
        let Some(minute) = parse_component(minute_part) else {
            bail!("invalid minute in {:?}", raw);
        };
        Self::new(hour, minute)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Next local date-time at which a reminder at this time would fire.
    ///
    /// Today if the time is still ahead of `now`, otherwise tomorrow.
    pub fn next_occurrence(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now
            .date()
            .and_hms_opt(self.hour, self.minute, 0)
            .unwrap_or(now);
        if today <= now {
            today + Duration::days(1)
        } else {
            today
        }
    }
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl Default for ReminderTime {
    fn default() -> Self {
        Self {
            hour: 10,
            minute: 0,
        }
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for ReminderTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReminderTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ReminderTime::parse(&raw).map_err(D::Error::custom)
    }
}

/// The persisted daily-reminder settings record.
///
/// Serialized with the field names the client has always written, so
/// existing stored blobs keep deserializing:
/// `{"dailyReminderTime":"10:00","enabled":false}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub daily_reminder_time: ReminderTime,
    pub enabled: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            daily_reminder_time: ReminderTime::default(),
            enabled: false,
        }
    }
}
