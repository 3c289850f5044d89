//! Tests for week schedules and the active-schedule lookup.

use chrono::{NaiveDate, Weekday};
use slot_engine::schedule::{active_schedule, day_key, sort_by_start_date, WeekModel, WeekSchedule};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn schedule(start: NaiveDate) -> WeekSchedule {
    let mut week = WeekModel::new();
    week.insert("mon".to_string(), vec!["09:00-12:00".to_string(), "13:00-17:00".to_string()]);
    week.insert("sat".to_string(), vec![]);
    WeekSchedule {
        start_date: start,
        slot_length: 20,
        week_schedule: week,
    }
}

#[test]
fn day_keys_are_lowercase_abbreviations() {
    assert_eq!(day_key(Weekday::Mon), "mon");
    assert_eq!(day_key(Weekday::Thu), "thu");
    assert_eq!(day_key(Weekday::Sun), "sun");
}

#[test]
fn active_is_latest_start_not_after_today() {
    let schedules = vec![
        schedule(date(2024, 7, 1)),
        schedule(date(2024, 1, 1)),
        schedule(date(2024, 6, 3)),
    ];

    let active = active_schedule(&schedules, date(2024, 6, 10)).unwrap();
    assert_eq!(active.start_date, date(2024, 6, 3));

    let on_start = active_schedule(&schedules, date(2024, 7, 1)).unwrap();
    assert_eq!(on_start.start_date, date(2024, 7, 1));
}

#[test]
fn no_active_schedule_before_first_start() {
    let schedules = vec![schedule(date(2024, 7, 1))];
    assert!(active_schedule(&schedules, date(2024, 6, 30)).is_none());
    assert!(active_schedule(&[], date(2024, 6, 30)).is_none());
}

#[test]
fn ranges_lookup_by_weekday_and_date() {
    let s = schedule(date(2024, 6, 3));
    assert_eq!(s.ranges_for(Weekday::Mon).len(), 2);
    assert!(s.ranges_for(Weekday::Sat).is_empty());
    assert!(s.ranges_for(Weekday::Tue).is_empty());
    // 2024-06-10 is a Monday
    assert_eq!(s.ranges_on(date(2024, 6, 10))[0], "09:00-12:00");
}

#[test]
fn sorts_by_start_date() {
    let mut schedules = vec![
        schedule(date(2024, 7, 1)),
        schedule(date(2024, 1, 1)),
        schedule(date(2024, 6, 3)),
    ];
    sort_by_start_date(&mut schedules);
    let starts: Vec<NaiveDate> = schedules.iter().map(|s| s.start_date).collect();
    assert_eq!(starts, vec![date(2024, 1, 1), date(2024, 6, 3), date(2024, 7, 1)]);
}

#[test]
fn wire_shape_is_camel_case() {
    let json = serde_json::to_value(schedule(date(2024, 6, 3))).unwrap();
    assert_eq!(json["startDate"], "2024-06-03");
    assert_eq!(json["slotLength"], 20);
    assert_eq!(json["weekSchedule"]["mon"][1], "13:00-17:00");

    let back: WeekSchedule = serde_json::from_value(json).unwrap();
    assert_eq!(back, schedule(date(2024, 6, 3)));
}
