//! Schedule output encoding.
//!
//! The dispatcher downstream takes either calendar instants or whole
//! epoch seconds, selected per request. Encoding is pure, total and
//! order-preserving; since allocation already zeroes seconds, the epoch
//! conversion is always exact.

use chrono::{DateTime, TimeZone};

use super::ScheduleEntry;

/// One encoded dispatch time.
#[derive(Debug, Clone)]
pub enum ScheduleTime<Tz: TimeZone> {
    /// Calendar instant
    Instant(DateTime<Tz>),
    /// Whole epoch seconds
    Timestamp(i64),
}

impl<Tz: TimeZone> ScheduleTime<Tz> {
    /// The calendar instant, if this entry was encoded as one.
    pub fn instant(&self) -> Option<&DateTime<Tz>> {
        match self {
            ScheduleTime::Instant(instant) => Some(instant),
            ScheduleTime::Timestamp(_) => None,
        }
    }

    /// The epoch seconds, if this entry was encoded as a timestamp.
    pub fn timestamp(&self) -> Option<i64> {
        match self {
            ScheduleTime::Instant(_) => None,
            ScheduleTime::Timestamp(ts) => Some(*ts),
        }
    }
}

/// Encode allocated entries per the request's output mode.
pub fn encode_entries<Tz: TimeZone>(
    entries: Vec<ScheduleEntry<Tz>>,
    timestamp_output: bool,
) -> Vec<ScheduleTime<Tz>> {
    entries
        .into_iter()
        .map(|entry| {
            if timestamp_output {
                ScheduleTime::Timestamp(entry.instant.timestamp())
            } else {
                ScheduleTime::Instant(entry.instant)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(hour: u32) -> ScheduleEntry<Utc> {
        ScheduleEntry {
            day_offset: 1,
            slot_index: 0,
            instant: Utc.with_ymd_and_hms(2024, 1, 2, hour, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_instant_passthrough() {
        let times = encode_entries(vec![entry(6), entry(14)], false);
        assert_eq!(times.len(), 2);
        assert_eq!(times[0].instant().unwrap().timestamp() % 60, 0);
        assert!(times[0].timestamp().is_none());
    }

    #[test]
    fn test_timestamp_encoding_is_exact() {
        let entries = vec![entry(6)];
        let expected = entries[0].instant.timestamp();
        let times = encode_entries(entries, true);
        assert_eq!(times[0].timestamp(), Some(expected));
        assert!(times[0].instant().is_none());
    }

    #[test]
    fn test_order_preserved() {
        let entries = vec![entry(22), entry(6)];
        let first = entries[0].instant.timestamp();
        let second = entries[1].instant.timestamp();
        let times = encode_entries(entries, true);
        assert_eq!(times[0].timestamp(), Some(first));
        assert_eq!(times[1].timestamp(), Some(second));
    }
}
