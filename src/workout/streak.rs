//! Consecutive-day workout streak, persisted as a tiny JSON document.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Stored under the same two keys the web build used in local storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakRecord {
    #[serde(rename = "fitquest_streak", default)]
    pub streak: u32,
    #[serde(rename = "fitquest_lastWorkoutDate", default)]
    pub last_workout_date: Option<NaiveDate>,
}

impl StreakRecord {
    /// True when the last workout was neither `today` nor the day before.
    pub fn is_broken(&self, today: NaiveDate) -> bool {
        match self.last_workout_date {
            Some(last) => last != today && Some(last) != today.pred_opt(),
            None => false,
        }
    }

    /// Drops a lapsed streak to zero. Returns whether anything changed.
    pub fn refresh(&mut self, today: NaiveDate) -> bool {
        if self.is_broken(today) && self.streak != 0 {
            self.streak = 0;
            return true;
        }
        false
    }

    /// Counts a completed workout on `today`. Returns whether the streak grew.
    pub fn record_workout(&mut self, today: NaiveDate) -> bool {
        if self.last_workout_date == Some(today) {
            return false;
        }
        self.streak = if self.is_broken(today) || self.last_workout_date.is_none() {
            1
        } else {
            self.streak.saturating_add(1)
        };
        self.last_workout_date = Some(today);
        true
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreakUpdate {
    pub streak: u32,
    pub last_workout_date: Option<NaiveDate>,
    /// Set when this workout extended the streak.
    pub celebrate: bool,
}

impl StreakUpdate {
    /// Text for the celebration popup.
    pub fn celebration_text(&self) -> Option<String> {
        self.celebrate
            .then(|| format!("You are on a {} day streak!", self.streak))
    }
}

pub struct StreakStore {
    path: Option<PathBuf>,
    data: RwLock<StreakRecord>,
}

impl StreakStore {
    /// Loads the record from `path` (if any) and applies the lapse check once.
    pub fn open(path: Option<PathBuf>, today: NaiveDate) -> Result<Self> {
        let mut data = match &path {
            Some(path) if path.exists() => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read streak from {}", path.display()))?;
                serde_json::from_str(&contents).unwrap_or_else(|err| {
                    log_warn!("resetting unreadable streak file {}: {err}", path.display());
                    StreakRecord::default()
                })
            }
            _ => StreakRecord::default(),
        };

        let lapsed = data.refresh(today);
        let store = Self {
            path,
            data: RwLock::new(data),
        };
        if lapsed {
            log_info!("streak lapsed, reset to zero");
            store.persist(&store.current())?;
        }
        Ok(store)
    }

    pub fn in_memory(today: NaiveDate) -> Self {
        let mut data = StreakRecord::default();
        data.refresh(today);
        Self {
            path: None,
            data: RwLock::new(data),
        }
    }

    pub fn current(&self) -> StreakRecord {
        self.data.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn record_workout(&self, today: NaiveDate) -> Result<StreakUpdate> {
        let mut guard = self.data.write().unwrap_or_else(|e| e.into_inner());
        let grew = guard.record_workout(today);
        if grew {
            self.persist(&guard)?;
            log_info!("streak now {} day(s)", guard.streak);
        }
        Ok(StreakUpdate {
            streak: guard.streak,
            last_workout_date: guard.last_workout_date,
            celebrate: grew,
        })
    }

    fn persist(&self, data: &StreakRecord) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write streak to {}", path.display()))
    }
}
