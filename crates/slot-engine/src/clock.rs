//! Clock-time and calendar-date arithmetic.
//!
//! Clock times are `"HH:mm"` strings held as minutes since midnight. Calendar dates
//! are `"yyyy-MM-dd"` strings held as [`NaiveDate`], with no timezone attached.
//! Nothing in this module reads the system clock: helpers that need "today" take it
//! as an argument.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SlotError};

/// Number of minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Last representable minute of a day (23:59).
pub const LAST_MINUTE: u32 = MINUTES_PER_DAY - 1;

/// Days covered by the default exclusion list filter (today .. today + 14).
pub const EXCLUSION_WINDOW_DAYS: i64 = 14;

/// Days covered by the default appointment list filter (today .. today + 7).
pub const APPOINTMENT_WINDOW_DAYS: i64 = 7;

/// A wall-clock time within a single day, stored as minutes since midnight.
///
/// Serializes to and from the zero-padded `"HH:mm"` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build a clock time from minutes since midnight.
    ///
    /// # Errors
    /// Returns `SlotError::Range` if `minutes` is not in `[0, 1439]`.
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if minutes > LAST_MINUTE {
            return Err(SlotError::Range(format!(
                "{} minutes is outside a single day",
                minutes
            )));
        }
        Ok(ClockTime(minutes as u16))
    }

    /// Build a clock time from an hour and minute pair.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(SlotError::Range(format!(
                "{}:{} is not a valid clock time",
                hour, minute
            )));
        }
        Ok(ClockTime((hour * 60 + minute) as u16))
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        parse_clock_time(s).map(|m| ClockTime(m as u16))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a zero-padded `"HH:mm"` string into minutes since midnight.
///
/// # Errors
/// Returns `SlotError::Format` if the string is not exactly two digits, a colon and
/// two digits, or if the hour is above 23 or the minute above 59.
pub fn parse_clock_time(s: &str) -> Result<u32> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(SlotError::Format(format!("expected HH:mm, got '{}'", s)));
    }
    if ![bytes[0], bytes[1], bytes[3], bytes[4]]
        .iter()
        .all(u8::is_ascii_digit)
    {
        return Err(SlotError::Format(format!("expected HH:mm, got '{}'", s)));
    }

    let digit = |b: u8| u32::from(b - b'0');
    let hour = digit(bytes[0]) * 10 + digit(bytes[1]);
    let minute = digit(bytes[3]) * 10 + digit(bytes[4]);

    if hour > 23 || minute > 59 {
        return Err(SlotError::Format(format!("clock time out of range: '{}'", s)));
    }

    Ok(hour * 60 + minute)
}

/// Format minutes since midnight as a zero-padded `"HH:mm"` string.
///
/// # Errors
/// Returns `SlotError::Range` if `minutes` is not in `[0, 1439]`.
pub fn format_clock_time(minutes: u32) -> Result<String> {
    ClockTime::from_minutes(minutes).map(|t| t.to_string())
}

/// Shift a clock time by `delta` minutes without leaving the day.
///
/// Overnight results are not modelled.
///
/// # Errors
/// Returns `SlotError::Range` if the result falls before 00:00 or after 23:59.
pub fn add_minutes(time: ClockTime, delta: i32) -> Result<ClockTime> {
    let total = i64::from(time.minutes()) + i64::from(delta);
    if !(0..=i64::from(LAST_MINUTE)).contains(&total) {
        return Err(SlotError::Range(format!(
            "{} {:+} minutes leaves the day",
            time, delta
        )));
    }
    Ok(ClockTime(total as u16))
}

/// Parse a zero-padded `"yyyy-MM-dd"` string into a calendar date.
///
/// # Errors
/// Returns `SlotError::Format` for any other shape (including unpadded months or
/// days) and for dates that do not exist in the Gregorian calendar.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate> {
    let bytes = s.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shape_ok {
        return Err(SlotError::Format(format!("expected yyyy-MM-dd, got '{}'", s)));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| SlotError::Format(format!("invalid calendar date '{}': {}", s, e)))
}

pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Render a date as `dd<sep>MM<sep>yyyy` for display.
pub fn to_dmy(date: NaiveDate, sep: &str) -> String {
    format!(
        "{:02}{sep}{:02}{sep}{:04}",
        date.day(),
        date.month(),
        date.year(),
        sep = sep
    )
}

/// The date `days` calendar days after `today` (negative values go back).
///
/// # Errors
/// Returns `SlotError::Range` if the result is outside chrono's supported range.
pub fn days_after(today: NaiveDate, days: i64) -> Result<NaiveDate> {
    today
        .checked_add_signed(Duration::days(days))
        .ok_or_else(|| SlotError::Range(format!("{} {:+} days is not representable", today, days)))
}

/// Default `(from, to)` filter for the exclusion list: two weeks from today.
pub fn default_exclusion_window(today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    Ok((today, days_after(today, EXCLUSION_WINDOW_DAYS)?))
}

/// Default `(from, to)` filter for the appointment list: one week from today.
pub fn default_appointment_window(today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    Ok((today, days_after(today, APPOINTMENT_WINDOW_DAYS)?))
}
