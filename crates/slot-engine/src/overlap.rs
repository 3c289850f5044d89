//! Decide whether a single slot is covered by a single exclusion.
//!
//! Intervals are half-open, so a slot that ends exactly when an excluded range
//! begins (or begins exactly when it ends) is NOT excluded.

use crate::exclusion::{Exclusion, ExclusionKind};
use crate::slots::Slot;

/// Half-open interval intersection: `[a_start, a_end)` and `[b_start, b_end)`
/// overlap iff `a_start < b_end && b_start < a_end`.
pub fn intervals_overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && b_start < a_end
}

/// Whether `exclusion` removes `slot` from booking.
///
/// - Different dates never overlap, whatever the exclusion kind.
/// - A day exclusion covers every slot on its date.
/// - A time-range exclusion covers slots whose interval intersects it. A time
///   range missing either bound covers nothing.
pub fn overlaps(slot: &Slot, exclusion: &Exclusion) -> bool {
    if exclusion.date != slot.date {
        return false;
    }

    match exclusion.exclusion_type {
        ExclusionKind::Day => true,
        ExclusionKind::TimeRange => match exclusion.span() {
            Some((start, end)) => intervals_overlap(
                slot.start_minutes(),
                slot.end_minutes(),
                start.minutes(),
                end.minutes(),
            ),
            None => false,
        },
    }
}
