//! Pending exclusions, batch submission bodies, and availability marking.
//!
//! The pending batch collects exclusions the admin has accepted but not yet saved.
//! [`build_batch`] wraps them into the `{exclusions: [...]}` body the remote store
//! accepts in a single request. [`mark_slots`] overlays exclusions on a list of
//! slots to produce the available/excluded preview.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::ClockTime;
use crate::error::{Result, SlotError};
use crate::exclusion::Exclusion;
use crate::overlap::overlaps;
use crate::slots::Slot;

/// Exclusions accepted in the editor but not yet confirmed by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingBatch {
    entries: Vec<Exclusion>,
}

impl PendingBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Exclusion] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, entry: Exclusion) {
        self.entries.push(entry);
    }

    pub fn extend<I: IntoIterator<Item = Exclusion>>(&mut self, entries: I) {
        self.entries.extend(entries);
    }

    /// Queue a time-range exclusion for `[start, end)` on `date`.
    ///
    /// # Errors
    /// Returns `SlotError::Range` unless `start < end`; the batch is unchanged.
    pub fn add_time_range(
        &mut self,
        date: NaiveDate,
        start: ClockTime,
        end: ClockTime,
        reason: Option<&str>,
    ) -> Result<()> {
        let entry = Exclusion::time_range(date, start, end)?.with_reason(reason);
        self.add(entry);
        Ok(())
    }

    /// Queue one whole-day exclusion per date, in the given order.
    pub fn add_days<I: IntoIterator<Item = NaiveDate>>(&mut self, dates: I, reason: Option<&str>) {
        let before = self.entries.len();
        self.entries
            .extend(dates.into_iter().map(|d| Exclusion::day(d).with_reason(reason)));
        debug!(added = self.entries.len() - before, "queued day exclusions");
    }

    /// Remove and return the entry at `index`.
    ///
    /// # Errors
    /// Returns `SlotError::Range` if `index` is out of bounds; the batch is
    /// unchanged.
    pub fn remove(&mut self, index: usize) -> Result<Exclusion> {
        if index >= self.entries.len() {
            return Err(SlotError::Range(format!(
                "pending index {} out of bounds (len {})",
                index,
                self.entries.len()
            )));
        }
        Ok(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Request body for a bulk exclusion submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionBatch {
    pub exclusions: Vec<Exclusion>,
}

impl ExclusionBatch {
    pub fn len(&self) -> usize {
        self.exclusions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exclusions.is_empty()
    }

    /// Drop exact duplicates, keeping the first occurrence of each entry in order.
    pub fn collapse_duplicates(self) -> Self {
        let before = self.exclusions.len();
        let mut seen = HashSet::new();
        let exclusions: Vec<Exclusion> = self
            .exclusions
            .into_iter()
            .filter(|e| seen.insert(e.clone()))
            .collect();
        if exclusions.len() != before {
            debug!(
                dropped = before - exclusions.len(),
                "collapsed duplicate exclusions"
            );
        }
        Self { exclusions }
    }
}

/// Wrap pending entries into a submission body.
///
/// Entries are taken as-is: duplicates are kept and submitted. Use
/// [`ExclusionBatch::collapse_duplicates`] to drop them.
pub fn build_batch(pending: &[Exclusion]) -> ExclusionBatch {
    ExclusionBatch {
        exclusions: pending.to_vec(),
    }
}

/// Copy `slots`, setting each slot's `available` to whether no exclusion covers it.
///
/// Order is preserved and the input is not modified.
pub fn mark_slots(slots: &[Slot], exclusions: &[Exclusion]) -> Vec<Slot> {
    mark_with(slots, |slot| exclusions.iter().any(|e| overlaps(slot, e)))
}

/// Like [`mark_slots`], against both unsaved and persisted exclusions.
pub fn mark_slots_against(
    slots: &[Slot],
    pending: &[Exclusion],
    persisted: &[Exclusion],
) -> Vec<Slot> {
    mark_with(slots, |slot| {
        pending
            .iter()
            .chain(persisted.iter())
            .any(|e| overlaps(slot, e))
    })
}

fn mark_with<F: Fn(&Slot) -> bool>(slots: &[Slot], excluded: F) -> Vec<Slot> {
    slots
        .iter()
        .map(|slot| Slot {
            available: !excluded(slot),
            ..slot.clone()
        })
        .collect()
}
