//! # Postqueue Core Library
//!
//! This library provides the scheduling core for Postqueue, a batch
//! publisher that queues content-publish jobs for multiple social
//! accounts and assigns each one a concrete future dispatch instant.
//! The HTTP layer, the browser automation that performs the actual
//! uploads, and the UI live elsewhere; this crate is the pure engine
//! underneath them.
//!
//! ## Architecture
//!
//! - **Slot parsing**: normalizes heterogeneous time-of-day specs
//!   (`14`, `"9"`, `"09:30"`) into canonical `{hour, minute}` values
//! - **Allocation**: maps each zero-based job index to a day offset and
//!   a slot rotation index from a single "now" snapshot
//! - **Encoding**: emits either calendar instants or epoch seconds
//! - **Config**: TOML-based operator defaults (daily slots, per-day cap)
//!
//! ## Key Components
//!
//! - [`ScheduleRequest`]: one scheduling request, with serde defaults
//! - [`generate_schedule`]: the single engine entry point
//! - [`Config`]: operator defaults persisted under `~/.config/postqueue/`

pub mod config;
pub mod error;
pub mod schedule;
pub mod slot;

pub use config::{Config, SchedulerDefaults};
pub use error::{ConfigError, CoreError, Result, ScheduleError};
pub use schedule::{
    generate_schedule, ScheduleAllocator, ScheduleEntry, ScheduleRequest, ScheduleTime,
};
pub use slot::{parse_slots, SlotSpec, TimeSlot, DEFAULT_DAILY_SLOTS};
