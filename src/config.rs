use crate::calendar::DEFAULT_CALENDAR_NAME;
use crate::recurrence::RecurrenceEngine;
use anyhow::{anyhow, bail, Result};
use chrono_tz::Tz;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const MIN_WINDOW_DAYS: i64 = 7;
pub const MAX_WINDOW_DAYS: i64 = 365;

/// Réglages du tableau de bord. Le fuseau est un identifiant IANA.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoardConfig {
    pub timezone: String,
    pub calendar_name: String,
    pub window_days: i64,
    pub only_upcoming: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            calendar_name: DEFAULT_CALENDAR_NAME.to_string(),
            window_days: 60,
            only_upcoming: true,
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<()> {
        self.tz()?;
        if self.calendar_name.trim().is_empty() {
            bail!("calendar_name cannot be empty");
        }
        if !(MIN_WINDOW_DAYS..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            bail!(
                "window_days must be between {MIN_WINDOW_DAYS} and {MAX_WINDOW_DAYS}, got {}",
                self.window_days
            );
        }
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    pub fn engine(&self) -> Result<RecurrenceEngine> {
        Ok(RecurrenceEngine::new(self.tz()?))
    }

    /// Borne `max_days_until` effectivement appliquée au filtre.
    pub fn max_days_until(&self) -> Option<i64> {
        self.only_upcoming.then_some(self.window_days)
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| anyhow!("unknown timezone {name:?}: {e}"))
}
