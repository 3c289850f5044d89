//! Weekly availability templates.
//!
//! A week schedule takes effect on its `start_date` and stays in force until a
//! later schedule starts. Per-day entries are kept as the API's opaque time-range
//! strings.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Per-weekday time ranges keyed by `mon`, `tue`, ... `sun`.
pub type WeekModel = BTreeMap<String, Vec<String>>;

/// Weekday keys used by [`WeekModel`], Monday first.
pub const DAY_KEYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSchedule {
    pub start_date: NaiveDate,
    /// Slot length in minutes.
    pub slot_length: u32,
    pub week_schedule: WeekModel,
}

impl WeekSchedule {
    /// Time ranges configured for `day`, empty if the day is not listed.
    pub fn ranges_for(&self, day: Weekday) -> &[String] {
        self.week_schedule
            .get(day_key(day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn ranges_on(&self, date: NaiveDate) -> &[String] {
        self.ranges_for(date.weekday())
    }
}

pub fn day_key(day: Weekday) -> &'static str {
    DAY_KEYS[day.num_days_from_monday() as usize]
}

/// The schedule in force on `today`: the one with the latest start date that is
/// not after `today`. `None` if every schedule starts in the future.
pub fn active_schedule(schedules: &[WeekSchedule], today: NaiveDate) -> Option<&WeekSchedule> {
    schedules
        .iter()
        .filter(|s| s.start_date <= today)
        .max_by_key(|s| s.start_date)
}

pub fn sort_by_start_date(schedules: &mut [WeekSchedule]) {
    schedules.sort_by_key(|s| s.start_date);
}
