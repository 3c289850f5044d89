//! Tests for the pending batch, submission bodies, and slot marking.

use chrono::NaiveDate;
use slot_engine::batch::{build_batch, mark_slots, mark_slots_against, PendingBatch};
use slot_engine::clock::ClockTime;
use slot_engine::exclusion::{Exclusion, ExclusionKind};
use slot_engine::slots::{generate_slots, Slot};
use slot_engine::weekdays::{expand_weekdays, WeekdayFlags};
use slot_engine::SlotError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn t(s: &str) -> ClockTime {
    s.parse().unwrap()
}

fn morning_slots() -> Vec<Slot> {
    generate_slots(date(2024, 6, 10), t("09:00"), t("10:00"), 20)
        .iter()
        .collect()
}

fn availability(slots: &[Slot]) -> Vec<bool> {
    slots.iter().map(|s| s.available).collect()
}

// ── mark_slots ──────────────────────────────────────────────────────────────

#[test]
fn time_range_marks_only_overlapping_slots() {
    let slots = morning_slots();
    let ex = Exclusion::time_range(date(2024, 6, 10), t("09:10"), t("09:30")).unwrap();

    let marked = mark_slots(&slots, &[ex]);

    assert_eq!(availability(&marked), vec![false, false, true]);
    // input untouched
    assert!(slots.iter().all(|s| s.available));
}

#[test]
fn over_long_slot_is_marked_by_later_range() {
    let slots = vec![Slot::new(date(2024, 6, 10), t("09:00"), u32::MAX)];
    let ex = Exclusion::time_range(date(2024, 6, 10), t("10:00"), t("11:00")).unwrap();

    assert_eq!(availability(&mark_slots(&slots, &[ex])), vec![false]);
}

#[test]
fn day_exclusion_marks_everything() {
    let marked = mark_slots(&morning_slots(), &[Exclusion::day(date(2024, 6, 10))]);
    assert_eq!(availability(&marked), vec![false, false, false]);
}

#[test]
fn no_exclusions_marks_everything_available() {
    let mut slots = morning_slots();
    slots[1].available = false;

    let marked = mark_slots(&slots, &[]);
    assert_eq!(availability(&marked), vec![true, true, true]);
}

#[test]
fn marking_preserves_order_and_times() {
    let slots = morning_slots();
    let marked = mark_slots(&slots, &[Exclusion::day(date(2024, 6, 11))]);

    assert_eq!(marked.len(), slots.len());
    for (a, b) in slots.iter().zip(&marked) {
        assert_eq!(a.start, b.start);
        assert_eq!(a.length_minutes, b.length_minutes);
        assert!(b.available);
    }
}

#[test]
fn marks_against_pending_and_persisted() {
    let day = date(2024, 6, 10);
    let pending = vec![Exclusion::time_range(day, t("09:00"), t("09:20")).unwrap()];
    let persisted = vec![Exclusion::time_range(day, t("09:40"), t("10:00"))
        .unwrap()
        .with_id("ex-1")];

    let marked = mark_slots_against(&morning_slots(), &pending, &persisted);
    assert_eq!(availability(&marked), vec![false, true, false]);
}

// ── PendingBatch ────────────────────────────────────────────────────────────

#[test]
fn add_and_remove_keep_order() {
    let mut pending = PendingBatch::new();
    pending.add(Exclusion::day(date(2024, 6, 10)));
    pending.add(Exclusion::day(date(2024, 6, 11)));
    pending.add(Exclusion::day(date(2024, 6, 12)));

    let removed = pending.remove(1).unwrap();
    assert_eq!(removed.date, date(2024, 6, 11));

    let dates: Vec<NaiveDate> = pending.entries().iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![date(2024, 6, 10), date(2024, 6, 12)]);
}

#[test]
fn remove_out_of_bounds_is_range_error_and_leaves_batch() {
    let mut pending = PendingBatch::new();
    pending.add(Exclusion::day(date(2024, 6, 10)));

    assert!(matches!(pending.remove(1), Err(SlotError::Range(_))));
    assert!(matches!(pending.remove(usize::MAX), Err(SlotError::Range(_))));
    assert_eq!(pending.len(), 1);
}

#[test]
fn add_time_range_validates_and_trims_reason() {
    let mut pending = PendingBatch::new();
    pending
        .add_time_range(date(2024, 6, 10), t("12:00"), t("14:00"), Some("  lunch  "))
        .unwrap();

    let entry = &pending.entries()[0];
    assert_eq!(entry.exclusion_type, ExclusionKind::TimeRange);
    assert_eq!(entry.span(), Some((t("12:00"), t("14:00"))));
    assert_eq!(entry.reason.as_deref(), Some("lunch"));

    let err = pending.add_time_range(date(2024, 6, 10), t("14:00"), t("12:00"), None);
    assert!(matches!(err, Err(SlotError::Range(_))));
    assert_eq!(pending.len(), 1);
}

#[test]
fn add_days_from_expansion_with_blank_reason() {
    let days = expand_weekdays(date(2024, 6, 10), date(2024, 6, 16), &WeekdayFlags::default())
        .unwrap();

    let mut pending = PendingBatch::new();
    pending.add_days(days, Some("   "));

    assert_eq!(pending.len(), 5);
    assert!(pending.entries().iter().all(Exclusion::is_day));
    assert!(pending.entries().iter().all(|e| e.reason.is_none()));
}

#[test]
fn clear_empties_batch() {
    let mut pending = PendingBatch::new();
    pending.add_days([date(2024, 6, 10), date(2024, 6, 11)], None);
    pending.clear();
    assert!(pending.is_empty());
}

// ── build_batch ─────────────────────────────────────────────────────────────

#[test]
fn build_batch_keeps_duplicates() {
    let ex = Exclusion::day(date(2024, 6, 10));
    let batch = build_batch(&[ex.clone(), ex.clone()]);
    assert_eq!(batch.len(), 2);
}

#[test]
fn collapse_duplicates_keeps_first_occurrences_in_order() {
    let a = Exclusion::day(date(2024, 6, 10));
    let b = Exclusion::time_range(date(2024, 6, 10), t("09:00"), t("10:00")).unwrap();
    let a_with_reason = a.clone().with_reason(Some("holiday"));

    let batch = build_batch(&[a.clone(), b.clone(), a.clone(), a_with_reason.clone(), b.clone()])
        .collapse_duplicates();

    assert_eq!(batch.exclusions, vec![a, b, a_with_reason]);
}

#[test]
fn batch_body_matches_wire_shape() {
    let mut pending = PendingBatch::new();
    pending
        .add_time_range(date(2024, 6, 10), t("09:10"), t("09:30"), Some("meeting"))
        .unwrap();
    pending.add_days([date(2024, 6, 11)], None);

    let json = serde_json::to_value(build_batch(pending.entries())).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "exclusions": [
                {
                    "exclusionType": "timeRange",
                    "date": "2024-06-10",
                    "start": "09:10",
                    "end": "09:30",
                    "reason": "meeting"
                },
                { "exclusionType": "day", "date": "2024-06-11" }
            ]
        })
    );
}

#[test]
fn exclusion_validate() {
    assert!(Exclusion::day(date(2024, 6, 10)).validate().is_ok());

    let mut ex = Exclusion::time_range(date(2024, 6, 10), t("09:00"), t("10:00")).unwrap();
    assert!(ex.validate().is_ok());

    ex.start = Some(t("10:00"));
    assert!(matches!(ex.validate(), Err(SlotError::Range(_))));

    ex.start = None;
    assert!(matches!(ex.validate(), Err(SlotError::Range(_))));
}
