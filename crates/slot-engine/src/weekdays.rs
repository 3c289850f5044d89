//! Weekday selection and expansion of a date range into matching days.
//!
//! Weekday keys follow the admin panel's convention: `0` is Sunday through `6`
//! Saturday.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SlotError};

/// Weekday key (`0` = Sunday .. `6` = Saturday).
pub fn weekday_key(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

/// Which weekdays take part in a range expansion.
///
/// The default selects Monday through Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdayFlags([bool; 7]);

impl Default for WeekdayFlags {
    fn default() -> Self {
        WeekdayFlags([false, true, true, true, true, true, false])
    }
}

impl WeekdayFlags {
    pub const fn none() -> Self {
        WeekdayFlags([false; 7])
    }

    pub const fn all() -> Self {
        WeekdayFlags([true; 7])
    }

    pub fn set(&mut self, day: Weekday, included: bool) {
        self.0[weekday_key(day) as usize] = included;
    }

    pub fn with(mut self, day: Weekday, included: bool) -> Self {
        self.set(day, included);
        self
    }

    pub fn includes(&self, day: Weekday) -> bool {
        self.0[weekday_key(day) as usize]
    }

    /// Look up a flag by numeric key. Keys outside `0..=6` are never included.
    pub fn includes_key(&self, key: u8) -> bool {
        self.0.get(key as usize).copied().unwrap_or(false)
    }

    /// Included weekdays, Sunday first.
    pub fn included(&self) -> Vec<Weekday> {
        let mut day = Weekday::Sun;
        let mut out = Vec::new();
        for included in self.0 {
            if included {
                out.push(day);
            }
            day = day.succ();
        }
        out
    }
}

/// Parses a comma-separated list of weekday names, e.g. `"mon,wed,fri"`.
///
/// Only the listed days are included. Names are case-insensitive and may be
/// abbreviated to three letters.
impl FromStr for WeekdayFlags {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        let mut flags = WeekdayFlags::none();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let day: Weekday = part
                .parse()
                .map_err(|_| SlotError::Format(format!("unknown weekday '{}'", part)))?;
            flags.set(day, true);
        }
        Ok(flags)
    }
}

impl Serialize for WeekdayFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().enumerate().map(|(k, v)| (k.to_string(), *v)))
    }
}

impl<'de> Deserialize<'de> for WeekdayFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
        let mut flags = WeekdayFlags::none();
        for (key, included) in raw {
            let idx: usize = key
                .parse()
                .ok()
                .filter(|k| *k < 7)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid weekday key '{}'", key)))?;
            flags.0[idx] = included;
        }
        Ok(flags)
    }
}

/// Every date in `[from, to]` whose weekday is selected in `flags`, ascending.
///
/// # Errors
/// Returns `SlotError::Range` if `from` is after `to`.
pub fn expand_weekdays(
    from: NaiveDate,
    to: NaiveDate,
    flags: &WeekdayFlags,
) -> Result<Vec<NaiveDate>> {
    if from > to {
        return Err(SlotError::Range(format!(
            "range start {} is after range end {}",
            from, to
        )));
    }

    Ok(from
        .iter_days()
        .take_while(|d| *d <= to)
        .filter(|d| flags.includes(d.weekday()))
        .collect())
}
