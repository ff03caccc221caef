use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{analysis::Strictness, capture::CaptureConstraints, locale::Locale};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

pub const ANALYSIS_INTERVAL_ENV: &str = "FITQUEST_ANALYSIS_INTERVAL_MS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Delay between the end of one analysis and the start of the next.
    pub analysis_interval_ms: u64,
    pub strictness: Strictness,
    pub locale: Locale,
    pub capture: CaptureConstraints,
    pub jpeg_quality: u8,
    /// Countdown per exercise before rotating to the next one.
    pub exercise_secs: u32,
    pub streak_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis_interval_ms: 4000,
            strictness: Strictness::Medium,
            locale: Locale::Thai,
            capture: CaptureConstraints::default(),
            jpeg_quality: 92,
            exercise_secs: 30,
            streak_path: None,
        }
    }
}

impl AppConfig {
    /// Reads `path` when it exists. A file that fails to parse falls back to
    /// defaults with a warning rather than blocking startup.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        match serde_json::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(err) => {
                log_warn!("ignoring unreadable config {}: {err}", path.display());
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Applies `FITQUEST_ANALYSIS_INTERVAL_MS` when set to a positive integer.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(value) = std::env::var(ANALYSIS_INTERVAL_ENV) {
            match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => self.analysis_interval_ms = ms,
                _ => log_warn!("ignoring {ANALYSIS_INTERVAL_ENV}={value:?}"),
            }
        }
        self
    }

    pub fn analysis_interval(&self) -> Duration {
        Duration::from_millis(self.analysis_interval_ms)
    }
}
