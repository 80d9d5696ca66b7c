//! TOML-based operator configuration.
//!
//! Stores the per-account publishing defaults an operator falls back to
//! when a request leaves them out:
//! - Daily dispatch cap (`jobs_per_day`)
//! - Slot rotation (`daily_slots`)
//! - Start delay and output mode
//!
//! Configuration is stored at `~/.config/postqueue/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::schedule::ScheduleRequest;
use crate::slot::{SlotSpec, DEFAULT_DAILY_SLOTS};

/// Returns `~/.config/postqueue[-dev]/` based on POSTQUEUE_ENV.
///
/// Set POSTQUEUE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POSTQUEUE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("postqueue-dev")
    } else {
        base_dir.join("postqueue")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirUnavailable(e.to_string()))?;
    Ok(dir)
}

fn default_jobs_per_day() -> usize {
    1
}

fn default_daily_slots() -> Vec<SlotSpec> {
    DEFAULT_DAILY_SLOTS.to_vec()
}

/// Scheduler defaults applied to requests that omit a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerDefaults {
    #[serde(default = "default_jobs_per_day")]
    pub jobs_per_day: usize,
    #[serde(default = "default_daily_slots")]
    pub daily_slots: Vec<SlotSpec>,
    #[serde(default)]
    pub start_day_offset: u32,
    #[serde(default)]
    pub timestamp_output: bool,
}

impl Default for SchedulerDefaults {
    fn default() -> Self {
        Self {
            jobs_per_day: default_jobs_per_day(),
            daily_slots: default_daily_slots(),
            start_day_offset: 0,
            timestamp_output: false,
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/postqueue/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerDefaults,
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be parsed or the
    /// default config cannot be written.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, falling back to defaults on any failure.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written
    /// to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Build a [`ScheduleRequest`] for `total_jobs` from these defaults.
    pub fn request(&self, total_jobs: usize) -> ScheduleRequest {
        ScheduleRequest {
            total_jobs,
            jobs_per_day: self.scheduler.jobs_per_day,
            slots: self.scheduler.daily_slots.clone(),
            timestamp_output: self.scheduler.timestamp_output,
            start_day_offset: self.scheduler.start_day_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.scheduler.jobs_per_day, 1);
        assert_eq!(parsed.scheduler.daily_slots, DEFAULT_DAILY_SLOTS.to_vec());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.scheduler.jobs_per_day, 1);
        assert_eq!(parsed.scheduler.start_day_offset, 0);
        assert!(!parsed.scheduler.timestamp_output);
    }

    #[test]
    fn test_request_carries_defaults() {
        let mut cfg = Config::default();
        cfg.scheduler.jobs_per_day = 2;
        cfg.scheduler.start_day_offset = 3;
        let request = cfg.request(10);
        assert_eq!(request.total_jobs, 10);
        assert_eq!(request.jobs_per_day, 2);
        assert_eq!(request.start_day_offset, 3);
        assert_eq!(request.slots, cfg.scheduler.daily_slots);
    }

    #[test]
    fn test_save_and_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.scheduler.jobs_per_day = 3;
        cfg.scheduler.daily_slots = vec![SlotSpec::from("08:15"), SlotSpec::from(20u32)];
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.scheduler.jobs_per_day, 3);
        assert_eq!(loaded.scheduler.daily_slots, cfg.scheduler.daily_slots);
    }

    #[test]
    fn test_load_from_missing_path_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.scheduler.jobs_per_day, 1);
        assert!(path.exists());
    }

    #[test]
    fn test_slot_rotation_survives_toml() {
        let toml_str = r#"
            [scheduler]
            jobs_per_day = 2
            daily_slots = [22, "06:15"]
        "#;
        let parsed: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.scheduler.daily_slots[0], SlotSpec::Number(22.0));
        assert_eq!(parsed.scheduler.daily_slots[1], SlotSpec::Text("06:15".into()));
    }
}
