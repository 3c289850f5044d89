//! Property-based tests for slot generation, weekday expansion and overlap.
//!
//! These check invariants that should hold for *any* valid input, not just the
//! worked examples in the other test files.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;
use slot_engine::clock::{format_clock_time, parse_clock_time, ClockTime};
use slot_engine::exclusion::Exclusion;
use slot_engine::overlap::overlaps;
use slot_engine::slots::{generate_slots, Slot};
use slot_engine::weekdays::{expand_weekdays, WeekdayFlags};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_clock() -> impl Strategy<Value = ClockTime> {
    (0u32..1440).prop_map(|m| ClockTime::from_minutes(m).unwrap())
}

/// Mostly realistic lengths, with some longer than a day up to `u32::MAX`.
fn arb_length() -> impl Strategy<Value = u32> {
    prop_oneof![
        8 => 1u32..=180,
        1 => 181u32..=2880,
        1 => (u32::MAX - 1440)..=u32::MAX,
    ]
}

/// Dates in 2023-2026; day capped at 28 to avoid invalid month/day combos.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2023i32..=2026, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_flags() -> impl Strategy<Value = WeekdayFlags> {
    proptest::array::uniform7(any::<bool>()).prop_map(|bits| {
        let mut flags = WeekdayFlags::none();
        let mut day = Weekday::Sun;
        for b in bits {
            flags.set(day, b);
            day = day.succ();
        }
        flags
    })
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

// ---------------------------------------------------------------------------
// Property 1: slot count, size, contiguity and bounds
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slot_count_and_coverage(start in arb_clock(), end in arb_clock(), len in arb_length()) {
        prop_assume!(start < end);
        let range = generate_slots(day(), start, end, len);
        prop_assert_eq!(range.iter().len(), range.len());
        let slots: Vec<Slot> = range.iter().collect();

        let expected = ((end.minutes() - start.minutes()) / len) as usize;
        prop_assert_eq!(slots.len(), expected);

        for s in &slots {
            prop_assert_eq!(s.length_minutes, len);
            prop_assert!(s.end_minutes() <= end.minutes());
        }
        if let Some(first) = slots.first() {
            prop_assert_eq!(first.start, start);
        }
        for pair in slots.windows(2) {
            prop_assert_eq!(pair[0].end_minutes(), pair[1].start_minutes());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: generation is restartable
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn generation_is_idempotent(start in arb_clock(), end in arb_clock(), len in 0u32..=120) {
        let range = generate_slots(day(), start, end, len);
        let a: Vec<Slot> = range.iter().collect();
        let b: Vec<Slot> = range.iter().collect();
        prop_assert_eq!(a.len(), range.len());
        prop_assert_eq!(a, b);
    }
}

// ---------------------------------------------------------------------------
// Property 3: expansion length, ordering and weekday filter
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn expansion_matches_flags(from in arb_date(), span in 0i64..=90, flags in arb_flags()) {
        let to = from + Duration::days(span);
        let days = expand_weekdays(from, to, &flags).unwrap();

        let expected = (0..=span)
            .map(|i| from + Duration::days(i))
            .filter(|d| flags.includes(d.weekday()))
            .count();
        prop_assert_eq!(days.len(), expected);

        for pair in days.windows(2) {
            prop_assert!(pair[0] < pair[1], "not strictly ascending: {} >= {}", pair[0], pair[1]);
        }
        for d in &days {
            prop_assert!(*d >= from && *d <= to);
            prop_assert!(flags.includes(d.weekday()));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: day exclusions and date mismatches are unconditional
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn day_and_date_rules(start in arb_clock(), len in arb_length(), shift in 1i64..=400) {
        let slot = Slot::new(day(), start, len);
        prop_assert!(overlaps(&slot, &Exclusion::day(day())));
        prop_assert!(slot.end_minutes() > slot.start_minutes());

        let other = day() + Duration::days(shift);
        prop_assert!(!overlaps(&slot, &Exclusion::day(other)));

        let whole = Exclusion::time_range(other, ClockTime::MIDNIGHT, ClockTime::from_minutes(1439).unwrap()).unwrap();
        prop_assert!(!overlaps(&slot, &whole));
    }
}

// ---------------------------------------------------------------------------
// Property 5: clock-time text roundtrip
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn clock_text_roundtrip(m in 0u32..1440) {
        let text = format_clock_time(m).unwrap();
        prop_assert_eq!(text.len(), 5);
        prop_assert_eq!(parse_clock_time(&text).unwrap(), m);
    }
}
