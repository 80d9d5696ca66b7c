//! Core error types for postqueue-core.
//!
//! This module defines the error hierarchy using thiserror. Scheduling
//! validation is eager and all-or-nothing: the first violation aborts
//! the whole request and no partial schedule is ever returned.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for postqueue-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Scheduling-related errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which component of a slot spec violated its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotField {
    Hour,
    Minute,
}

impl fmt::Display for SlotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotField::Hour => write!(f, "hour"),
            SlotField::Minute => write!(f, "minute"),
        }
    }
}

/// Scheduling validation errors.
///
/// Every variant carries the offending input so the caller can surface
/// a rejected request directly to the operator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// Slot spec is not an hour number or an 'HH:MM' string
    #[error("invalid slot format '{raw}': expected an hour (0-23) or an 'HH:MM' string")]
    InvalidSlotFormat { raw: String },

    /// Slot spec parsed but a component is out of bounds
    #[error("invalid slot '{raw}': {field} {value} is out of range ({min}-{max})")]
    InvalidSlotRange {
        raw: String,
        field: SlotField,
        value: i64,
        min: u32,
        max: u32,
    },

    /// Daily quota is not a positive integer
    #[error("jobs_per_day must be a positive integer, got {0}")]
    InvalidQuota(usize),

    /// Daily quota exceeds the number of configured slots
    #[error("jobs_per_day ({jobs_per_day}) exceeds the {slot_count} configured daily slot(s)")]
    QuotaExceedsSlots {
        jobs_per_day: usize,
        slot_count: usize,
    },

    /// Calendar arithmetic produced no valid instant (chrono checked path)
    #[error("cannot place {hour:02}:{minute:02} at day offset {day_offset}")]
    UnrepresentableInstant {
        hour: u32,
        minute: u32,
        day_offset: i64,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Config directory could not be resolved or created
    #[error("Failed to prepare config directory: {0}")]
    DirUnavailable(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_error_carries_offending_value() {
        let err = ScheduleError::InvalidSlotRange {
            raw: "24:00".into(),
            field: SlotField::Hour,
            value: 24,
            min: 0,
            max: 23,
        };
        let msg = err.to_string();
        assert!(msg.contains("24:00"));
        assert!(msg.contains("hour"));
        assert!(msg.contains("0-23"));
    }

    #[test]
    fn test_quota_errors_name_both_sides() {
        let err = ScheduleError::QuotaExceedsSlots {
            jobs_per_day: 4,
            slot_count: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('4'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_core_error_wraps_schedule_and_config() {
        let core: CoreError = ScheduleError::InvalidQuota(0).into();
        assert!(core.to_string().starts_with("Schedule error:"));

        let core: CoreError = ConfigError::ParseFailed("bad toml".into()).into();
        assert!(core.to_string().starts_with("Configuration error:"));
    }
}
