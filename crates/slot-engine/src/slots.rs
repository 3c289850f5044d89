//! Fixed-length slot generation for a single day.
//!
//! Slots are half-open `[start, start + length)` intervals. Generation never emits
//! a partial trailing slot: the last slot is the one that ends at or before the
//! range end.

use std::iter::FusedIterator;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::{ClockTime, MINUTES_PER_DAY};

/// One bookable slot on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub start: ClockTime,
    pub length_minutes: u32,
    pub available: bool,
}

impl Slot {
    /// A new slot, initially available.
    pub fn new(date: NaiveDate, start: ClockTime, length_minutes: u32) -> Self {
        Self {
            date,
            start,
            length_minutes,
            available: true,
        }
    }

    pub fn start_minutes(&self) -> u32 {
        self.start.minutes()
    }

    /// Exclusive end in minutes since midnight. May equal 1440 for a slot that
    /// runs up to midnight, or go past it for an over-long slot; saturates at
    /// `u32::MAX`.
    pub fn end_minutes(&self) -> u32 {
        self.start.minutes().saturating_add(self.length_minutes)
    }

    /// `"HH:mm - HH:mm"`, the form shown in slot previews. An end past midnight
    /// is shown as `24:00`.
    pub fn label(&self) -> String {
        let end = self.end_minutes().min(MINUTES_PER_DAY);
        format!("{} - {:02}:{:02}", self.start, end / 60, end % 60)
    }
}

/// A restartable description of the slots between two clock times on one date.
///
/// Every call to [`SlotRange::iter`] (or `into_iter`) starts again from the range
/// start; the range itself holds no iteration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRange {
    date: NaiveDate,
    range_start: ClockTime,
    range_end: ClockTime,
    slot_length: u32,
}

impl SlotRange {
    pub fn iter(&self) -> SlotIter {
        SlotIter {
            date: self.date,
            next_start: self.range_start.minutes(),
            range_end: self.range_end.minutes(),
            slot_length: self.slot_length,
        }
    }

    /// Number of slots the range yields: `floor((end - start) / length)`.
    pub fn len(&self) -> usize {
        if self.slot_length == 0 || self.range_start >= self.range_end {
            return 0;
        }
        ((self.range_end.minutes() - self.range_start.minutes()) / self.slot_length) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl IntoIterator for SlotRange {
    type Item = Slot;
    type IntoIter = SlotIter;

    fn into_iter(self) -> SlotIter {
        self.iter()
    }
}

impl IntoIterator for &SlotRange {
    type Item = Slot;
    type IntoIter = SlotIter;

    fn into_iter(self) -> SlotIter {
        self.iter()
    }
}

/// Iterator over the slots of a [`SlotRange`].
#[derive(Debug, Clone)]
pub struct SlotIter {
    date: NaiveDate,
    next_start: u32,
    range_end: u32,
    slot_length: u32,
}

impl SlotIter {
    fn remaining(&self) -> usize {
        if self.slot_length == 0 || self.next_start >= self.range_end {
            return 0;
        }
        ((self.range_end - self.next_start) / self.slot_length) as usize
    }
}

impl Iterator for SlotIter {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        if self.slot_length == 0 {
            return None;
        }
        let end = self
            .next_start
            .checked_add(self.slot_length)
            .filter(|end| *end <= self.range_end)?;
        let start = ClockTime::from_minutes(self.next_start).ok()?;
        self.next_start = end;
        Some(Slot::new(self.date, start, self.slot_length))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for SlotIter {}

impl FusedIterator for SlotIter {}

/// Describe the slots of `slot_length` minutes between `range_start` and
/// `range_end` on `date`.
///
/// An inverted or empty range, or a zero slot length, yields no slots rather than
/// an error.
pub fn generate_slots(
    date: NaiveDate,
    range_start: ClockTime,
    range_end: ClockTime,
    slot_length: u32,
) -> SlotRange {
    SlotRange {
        date,
        range_start,
        range_end,
        slot_length,
    }
}
