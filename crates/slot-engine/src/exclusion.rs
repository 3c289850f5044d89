//! Day and time-range exclusions, in the admin API's JSON shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{Result, SlotError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExclusionKind {
    /// The whole date is closed for booking.
    #[serde(rename = "day")]
    Day,
    /// Only `[start, end)` on the date is closed.
    #[serde(rename = "timeRange")]
    TimeRange,
}

/// A block of time removed from booking.
///
/// `start` and `end` are only meaningful for [`ExclusionKind::TimeRange`]; a day
/// exclusion ignores them. `id` is assigned by the remote store and is absent on
/// entries that have not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exclusion {
    pub exclusion_type: ExclusionKind,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Exclusion {
    /// Exclude the whole of `date`.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            exclusion_type: ExclusionKind::Day,
            date,
            start: None,
            end: None,
            reason: None,
            id: None,
        }
    }

    /// Exclude `[start, end)` on `date`.
    ///
    /// # Errors
    /// Returns `SlotError::Range` unless `start < end`.
    pub fn time_range(date: NaiveDate, start: ClockTime, end: ClockTime) -> Result<Self> {
        if start >= end {
            return Err(SlotError::Range(format!(
                "time range {}-{} on {} is empty or inverted",
                start, end, date
            )));
        }
        Ok(Self {
            exclusion_type: ExclusionKind::TimeRange,
            date,
            start: Some(start),
            end: Some(end),
            reason: None,
            id: None,
        })
    }

    /// Attach a reason. Surrounding whitespace is trimmed and a blank reason is
    /// dropped.
    pub fn with_reason(mut self, reason: Option<&str>) -> Self {
        self.reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn is_day(&self) -> bool {
        self.exclusion_type == ExclusionKind::Day
    }

    /// The `(start, end)` bounds of a well-formed time-range exclusion.
    ///
    /// `None` for day exclusions and for time ranges with a missing bound.
    pub fn span(&self) -> Option<(ClockTime, ClockTime)> {
        match self.exclusion_type {
            ExclusionKind::Day => None,
            ExclusionKind::TimeRange => self.start.zip(self.end),
        }
    }

    /// Check the time-range invariant (both bounds present, `start < end`).
    /// Day exclusions are always valid.
    pub fn validate(&self) -> Result<()> {
        if self.is_day() {
            return Ok(());
        }
        match self.span() {
            Some((start, end)) if start < end => Ok(()),
            Some((start, end)) => Err(SlotError::Range(format!(
                "time range {}-{} on {} is empty or inverted",
                start, end, self.date
            ))),
            None => Err(SlotError::Range(format!(
                "time range exclusion on {} needs both start and end",
                self.date
            ))),
        }
    }
}
