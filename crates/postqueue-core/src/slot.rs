//! Time-of-day slot parsing.
//!
//! Operators configure daily publish times in whatever shape the request
//! body carried them: bare hour numbers (`14`), hour strings (`"9"`), or
//! `"HH:MM"` strings (`"09:30"`). This module normalizes those into
//! canonical [`TimeSlot`] values.
//!
//! Slot order is significant: it defines the daily rotation sequence and
//! is never sorted. An operator may intentionally list times out of
//! chronological order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ScheduleError, SlotField};

/// The default daily rotation used when a request carries no slots.
pub const DEFAULT_DAILY_SLOTS: [SlotSpec; 5] = [
    SlotSpec::Number(6.0),
    SlotSpec::Number(11.0),
    SlotSpec::Number(14.0),
    SlotSpec::Number(16.0),
    SlotSpec::Number(22.0),
];

/// Canonical instant-of-day descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Hour of day, 0-23
    pub hour: u32,
    /// Minute of hour, 0-59
    pub minute: u32,
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A raw slot spec as supplied by the operator.
///
/// Deserializes untagged so a JSON request can mix numbers and strings
/// in one list, e.g. `[6, "11", "14:30"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotSpec {
    /// Bare hour; fractional values are floored
    Number(f64),
    /// `"9"` or `"HH:MM"`
    Text(String),
}

impl fmt::Display for SlotSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotSpec::Number(n) => write!(f, "{n}"),
            SlotSpec::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u32> for SlotSpec {
    fn from(hour: u32) -> Self {
        SlotSpec::Number(hour as f64)
    }
}

impl From<&str> for SlotSpec {
    fn from(s: &str) -> Self {
        SlotSpec::Text(s.to_string())
    }
}

impl SlotSpec {
    /// Parse this spec into a canonical [`TimeSlot`].
    ///
    /// - a number is an hour (floored), minute defaults to 0
    /// - a string without `:` is an hour, minute defaults to 0
    /// - `"HH:MM"` carries both components
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InvalidSlotFormat`] for non-numeric input,
    /// [`ScheduleError::InvalidSlotRange`] when a component is out of
    /// bounds (hour 0-23, minute 0-59).
    pub fn parse(&self) -> Result<TimeSlot, ScheduleError> {
        match self {
            SlotSpec::Number(n) => {
                if !n.is_finite() {
                    return Err(ScheduleError::InvalidSlotFormat {
                        raw: self.to_string(),
                    });
                }
                let hour = n.floor();
                if !(0.0..=23.0).contains(&hour) {
                    return Err(self.range_error(SlotField::Hour, hour as i64, 0, 23));
                }
                Ok(TimeSlot {
                    hour: hour as u32,
                    minute: 0,
                })
            }
            SlotSpec::Text(s) if s.contains(':') => {
                let mut parts = s.split(':');
                let (hour_str, minute_str) = match (parts.next(), parts.next(), parts.next()) {
                    (Some(h), Some(m), None) => (h, m),
                    _ => {
                        return Err(ScheduleError::InvalidSlotFormat {
                            raw: s.clone(),
                        })
                    }
                };
                let hour = parse_component(hour_str, s)?;
                let minute = parse_component(minute_str, s)?;
                if !(0..=23).contains(&hour) {
                    return Err(self.range_error(SlotField::Hour, hour, 0, 23));
                }
                if !(0..=59).contains(&minute) {
                    return Err(self.range_error(SlotField::Minute, minute, 0, 59));
                }
                Ok(TimeSlot {
                    hour: hour as u32,
                    minute: minute as u32,
                })
            }
            SlotSpec::Text(s) => {
                let hour = parse_component(s, s)?;
                if !(0..=23).contains(&hour) {
                    return Err(self.range_error(SlotField::Hour, hour, 0, 23));
                }
                Ok(TimeSlot {
                    hour: hour as u32,
                    minute: 0,
                })
            }
        }
    }

    fn range_error(&self, field: SlotField, value: i64, min: u32, max: u32) -> ScheduleError {
        ScheduleError::InvalidSlotRange {
            raw: self.to_string(),
            field,
            value,
            min,
            max,
        }
    }
}

fn parse_component(part: &str, raw: &str) -> Result<i64, ScheduleError> {
    part.parse::<i64>()
        .map_err(|_| ScheduleError::InvalidSlotFormat {
            raw: raw.to_string(),
        })
}

/// Parse a configured slot list in order.
///
/// Fail-fast: the first invalid spec aborts the whole request with no
/// partial result. The returned list preserves the configured rotation
/// order exactly.
pub fn parse_slots(specs: &[SlotSpec]) -> Result<Vec<TimeSlot>, ScheduleError> {
    specs.iter().map(SlotSpec::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_hour() {
        assert_eq!(
            SlotSpec::Number(14.0).parse().unwrap(),
            TimeSlot { hour: 14, minute: 0 }
        );
    }

    #[test]
    fn test_numeric_hour_is_floored() {
        assert_eq!(SlotSpec::Number(9.75).parse().unwrap().hour, 9);
    }

    #[test]
    fn test_string_hour() {
        assert_eq!(
            SlotSpec::from("9").parse().unwrap(),
            TimeSlot { hour: 9, minute: 0 }
        );
    }

    #[test]
    fn test_hh_mm_string() {
        assert_eq!(
            SlotSpec::from("09:30").parse().unwrap(),
            TimeSlot { hour: 9, minute: 30 }
        );
    }

    #[test]
    fn test_hour_out_of_range() {
        let err = SlotSpec::from("24:00").parse().unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidSlotRange {
                field: SlotField::Hour,
                value: 24,
                ..
            }
        ));
    }

    #[test]
    fn test_minute_out_of_range() {
        let err = SlotSpec::from("9:60").parse().unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidSlotRange {
                field: SlotField::Minute,
                value: 60,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_hour() {
        let err = SlotSpec::Number(-1.0).parse().unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidSlotRange { .. }));
    }

    #[test]
    fn test_non_numeric() {
        let err = SlotSpec::from("abc").parse().unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidSlotFormat { .. }));
    }

    #[test]
    fn test_non_numeric_minute() {
        let err = SlotSpec::from("9:xx").parse().unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidSlotFormat { .. }));
    }

    #[test]
    fn test_too_many_components() {
        let err = SlotSpec::from("9:30:15").parse().unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidSlotFormat { .. }));
    }

    #[test]
    fn test_parse_slots_preserves_order() {
        let specs = vec![
            SlotSpec::from(22u32),
            SlotSpec::from("06:15"),
            SlotSpec::from(11u32),
        ];
        let slots = parse_slots(&specs).unwrap();
        assert_eq!(slots[0], TimeSlot { hour: 22, minute: 0 });
        assert_eq!(slots[1], TimeSlot { hour: 6, minute: 15 });
        assert_eq!(slots[2], TimeSlot { hour: 11, minute: 0 });
    }

    #[test]
    fn test_parse_slots_fails_fast() {
        let specs = vec![
            SlotSpec::from(6u32),
            SlotSpec::from("abc"),
            SlotSpec::from(11u32),
        ];
        assert!(parse_slots(&specs).is_err());
    }

    #[test]
    fn test_default_slots_all_valid() {
        let slots = parse_slots(&DEFAULT_DAILY_SLOTS).unwrap();
        let hours: Vec<u32> = slots.iter().map(|s| s.hour).collect();
        assert_eq!(hours, vec![6, 11, 14, 16, 22]);
        assert!(slots.iter().all(|s| s.minute == 0));
    }

    #[test]
    fn test_untagged_deserialization() {
        let specs: Vec<SlotSpec> = serde_json::from_str(r#"[6, "11", "14:30"]"#).unwrap();
        assert_eq!(specs[0], SlotSpec::Number(6.0));
        assert_eq!(specs[1], SlotSpec::Text("11".into()));
        let slots = parse_slots(&specs).unwrap();
        assert_eq!(slots[2], TimeSlot { hour: 14, minute: 30 });
    }
}
