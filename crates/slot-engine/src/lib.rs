//! # slot-engine
//!
//! Slot preview and exclusion logic for appointment scheduling admin tools.
//!
//! Given a day, a pair of clock times and a slot length, the engine lists the
//! bookable slots; given a date range and a set of weekdays, it lists the matching
//! days. Exclusions (whole days or time ranges) are overlaid on slots to show what
//! remains available, and unsaved exclusions are collected into a batch for the
//! remote store. Everything here is pure and synchronous, with no reliance on the
//! system clock.
//!
//! ## Modules
//!
//! - [`clock`] — `"HH:mm"` / `"yyyy-MM-dd"` parsing, formatting, minute arithmetic
//! - [`slots`] — fixed-length slot generation for one day
//! - [`weekdays`] — weekday flags and date-range expansion
//! - [`exclusion`] — day and time-range exclusions
//! - [`overlap`] — slot vs. exclusion intersection
//! - [`batch`] — pending batch, submission body, availability marking
//! - [`schedule`] — weekly templates and the active-schedule lookup
//! - [`error`] — Error types

pub mod batch;
pub mod clock;
pub mod error;
pub mod exclusion;
pub mod overlap;
pub mod schedule;
pub mod slots;
pub mod weekdays;

pub use batch::{build_batch, mark_slots, mark_slots_against, ExclusionBatch, PendingBatch};
pub use clock::{add_minutes, format_clock_time, parse_calendar_date, parse_clock_time, ClockTime};
pub use error::SlotError;
pub use exclusion::{Exclusion, ExclusionKind};
pub use overlap::overlaps;
pub use schedule::{active_schedule, WeekSchedule};
pub use slots::{generate_slots, Slot, SlotRange};
pub use weekdays::{expand_weekdays, WeekdayFlags};
