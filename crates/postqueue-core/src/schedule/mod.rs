//! Publish schedule generation.
//!
//! Turns a [`ScheduleRequest`] into a deterministic, ordered sequence of
//! future dispatch instants:
//! - Parses the configured slot list into canonical times
//! - Maps each job index to a day offset and a slot rotation index
//! - Emits calendar instants or epoch seconds
//!
//! Every entry is derived from a single "now" snapshot taken once per
//! call, so a long job list cannot drift during computation. The
//! earliest possible dispatch is always the day *after* the call, which
//! avoids races with same-day jobs already in flight.

use chrono::{DateTime, Duration, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::slot::{parse_slots, SlotSpec, TimeSlot, DEFAULT_DAILY_SLOTS};

mod encode;

pub use encode::{encode_entries, ScheduleTime};

fn default_jobs_per_day() -> usize {
    1
}

fn default_daily_slots() -> Vec<SlotSpec> {
    DEFAULT_DAILY_SLOTS.to_vec()
}

/// One scheduling request.
///
/// Short-lived value constructed per call; the engine keeps no state
/// between calls. Deserializes with the same per-field defaults the
/// publish API applies (`jobs_per_day` 1, the default slot rotation,
/// instants rather than timestamps, no extra start delay).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Number of queued jobs to place
    pub total_jobs: usize,
    /// Daily dispatch cap; also the rotation length
    #[serde(default = "default_jobs_per_day")]
    pub jobs_per_day: usize,
    /// Rotation slots, in rotation order (never sorted)
    #[serde(default = "default_daily_slots")]
    pub slots: Vec<SlotSpec>,
    /// Emit epoch seconds instead of calendar instants
    #[serde(default)]
    pub timestamp_output: bool,
    /// Extra whole days to wait before the first dispatch day
    #[serde(default)]
    pub start_day_offset: u32,
}

impl ScheduleRequest {
    /// Create a request for `total_jobs` jobs with default settings.
    pub fn new(total_jobs: usize) -> Self {
        Self {
            total_jobs,
            jobs_per_day: default_jobs_per_day(),
            slots: default_daily_slots(),
            timestamp_output: false,
            start_day_offset: 0,
        }
    }

    /// Set the daily dispatch cap.
    pub fn with_jobs_per_day(mut self, jobs_per_day: usize) -> Self {
        self.jobs_per_day = jobs_per_day;
        self
    }

    /// Replace the slot rotation.
    pub fn with_slots(mut self, slots: Vec<SlotSpec>) -> Self {
        self.slots = slots;
        self
    }

    /// Emit epoch seconds instead of calendar instants.
    pub fn with_timestamps(mut self, timestamp_output: bool) -> Self {
        self.timestamp_output = timestamp_output;
        self
    }

    /// Delay the first dispatch day by `days` extra whole days.
    pub fn with_start_day_offset(mut self, days: u32) -> Self {
        self.start_day_offset = days;
        self
    }

    /// The instant the first queued job would dispatch at, if any.
    ///
    /// Used to stamp publish records with their scheduled time. Derived
    /// from entry 0 of the actual allocation, so the stamp always agrees
    /// with the generated schedule. `None` when the request is empty.
    ///
    /// # Errors
    ///
    /// Same validation as [`generate_schedule`].
    pub fn first_dispatch<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> Result<Option<DateTime<Tz>>, ScheduleError> {
        let allocator = ScheduleAllocator::for_request(self)?;
        if self.total_jobs == 0 {
            return Ok(None);
        }
        Ok(Some(allocator.entry(0, now)?.instant))
    }
}

/// One allocated dispatch, bound to queued job `i` by position.
#[derive(Debug, Clone)]
pub struct ScheduleEntry<Tz: TimeZone> {
    /// Calendar days after the request day this entry falls on (>= 1)
    pub day_offset: i64,
    /// Index into the rotation for this entry's time of day
    pub slot_index: usize,
    /// The dispatch instant, seconds and sub-seconds zeroed
    pub instant: DateTime<Tz>,
}

/// Maps zero-based job indices to dispatch instants.
///
/// Construction validates the quota against the slot list; after that,
/// every method is a total function over the job-index domain.
#[derive(Debug, Clone)]
pub struct ScheduleAllocator {
    slots: Vec<TimeSlot>,
    jobs_per_day: usize,
    start_day_offset: u32,
}

impl ScheduleAllocator {
    /// Create an allocator over an already-parsed slot list.
    ///
    /// Slots beyond index `jobs_per_day - 1` are accepted but unused by
    /// rotation. Operators pre-configure spare times for a future quota
    /// increase without reordering the active rotation.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InvalidQuota`] if `jobs_per_day` is zero,
    /// [`ScheduleError::QuotaExceedsSlots`] if it exceeds the slot count.
    pub fn new(
        slots: Vec<TimeSlot>,
        jobs_per_day: usize,
        start_day_offset: u32,
    ) -> Result<Self, ScheduleError> {
        if jobs_per_day == 0 {
            return Err(ScheduleError::InvalidQuota(jobs_per_day));
        }
        if jobs_per_day > slots.len() {
            return Err(ScheduleError::QuotaExceedsSlots {
                jobs_per_day,
                slot_count: slots.len(),
            });
        }
        Ok(Self {
            slots,
            jobs_per_day,
            start_day_offset,
        })
    }

    /// Parse and validate a request's slots, then build the allocator.
    pub fn for_request(request: &ScheduleRequest) -> Result<Self, ScheduleError> {
        let slots = parse_slots(&request.slots)?;
        Self::new(slots, request.jobs_per_day, request.start_day_offset)
    }

    /// Calendar days after the request day for job `index`.
    ///
    /// The `+ 1` guarantees the earliest dispatch is the day after the
    /// call; a schedule never places a job on the request day itself.
    pub fn day_offset(&self, index: usize) -> i64 {
        (index / self.jobs_per_day) as i64 + i64::from(self.start_day_offset) + 1
    }

    /// Rotation index for job `index`.
    pub fn slot_index(&self, index: usize) -> usize {
        index % self.jobs_per_day
    }

    /// Allocate the entry for job `index` against one "now" snapshot.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::UnrepresentableInstant`] when chrono's checked
    /// calendar arithmetic cannot place the slot on the target day.
    pub fn entry<Tz: TimeZone>(
        &self,
        index: usize,
        now: &DateTime<Tz>,
    ) -> Result<ScheduleEntry<Tz>, ScheduleError> {
        let day_offset = self.day_offset(index);
        let slot_index = self.slot_index(index);
        let slot = self.slots[slot_index];

        let instant = Duration::try_days(day_offset)
            .and_then(|days| now.clone().checked_add_signed(days))
            .and_then(|t| t.with_hour(slot.hour))
            .and_then(|t| t.with_minute(slot.minute))
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .ok_or(ScheduleError::UnrepresentableInstant {
                hour: slot.hour,
                minute: slot.minute,
                day_offset,
            })?;

        Ok(ScheduleEntry {
            day_offset,
            slot_index,
            instant,
        })
    }

    /// Allocate entries for jobs `0..total_jobs` in index order.
    ///
    /// `day_offset` is non-decreasing across the result; within one day
    /// the rotation follows the configured slot order exactly.
    pub fn allocate<Tz: TimeZone>(
        &self,
        total_jobs: usize,
        now: &DateTime<Tz>,
    ) -> Result<Vec<ScheduleEntry<Tz>>, ScheduleError> {
        (0..total_jobs).map(|i| self.entry(i, now)).collect()
    }
}

/// Generate the dispatch sequence for a request.
///
/// The single engine entry point: parse slots, allocate one entry per
/// job, encode per `timestamp_output`. All validation runs eagerly and
/// the first violation aborts the whole call; no partial schedule is
/// ever returned. A request with `total_jobs == 0` yields an empty
/// schedule rather than an error.
///
/// The caller binds `entry[i]` to pending job `i`; index order is the
/// authoritative binding key.
///
/// # Errors
///
/// See [`ScheduleError`].
pub fn generate_schedule<Tz: TimeZone>(
    request: &ScheduleRequest,
    now: &DateTime<Tz>,
) -> Result<Vec<ScheduleTime<Tz>>, ScheduleError> {
    let allocator = ScheduleAllocator::for_request(request)?;
    let entries = allocator.allocate(request.total_jobs, now)?;
    Ok(encode_entries(entries, request.timestamp_output))
}
