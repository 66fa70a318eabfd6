#![forbid(unsafe_code)]
use anniv::{
    filter_records, next_occurrence, parse_date_spec, BirthdayRecord, RecurrenceEngine,
    RecurrenceError,
};
use chrono::{NaiveDate, TimeZone, Utc};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn year_omitted_never_gets_an_age() {
    let spec = parse_date_spec("05-27").unwrap();
    assert_eq!((spec.month, spec.day, spec.origin_year), (5, 27, None));
    for today in [d(2020, 1, 1), d(2025, 5, 27), d(2030, 12, 31)] {
        let occ = next_occurrence(spec.month, spec.day, spec.origin_year, today).unwrap();
        assert_eq!(occ.turning_age, None);
    }
}

#[test]
fn year_present_gives_turning_age() {
    let spec = parse_date_spec("1990-05-27").unwrap();
    assert_eq!((spec.month, spec.day, spec.origin_year), (5, 27, Some(1990)));
    let occ = next_occurrence(spec.month, spec.day, spec.origin_year, d(2025, 5, 1)).unwrap();
    assert_eq!(occ.next_date, d(2025, 5, 27));
    assert_eq!(occ.turning_age, Some(35));
}

#[test]
fn single_slash_does_not_invent_a_year() {
    let spec = parse_date_spec("5/27").unwrap();
    assert_eq!(spec.origin_year, None);
}

#[test]
fn leap_day_scheduling() {
    let occ = next_occurrence(2, 29, None, d(2023, 3, 1)).unwrap();
    assert_eq!(occ.next_date, d(2024, 2, 29));
    let occ = next_occurrence(2, 29, None, d(2025, 1, 1)).unwrap();
    assert_eq!(occ.next_date, d(2025, 2, 28));
}

#[test]
fn invalid_date_spec_is_reported() {
    let err = parse_date_spec("31/31").unwrap_err();
    let RecurrenceError::InvalidDateSpec { input, .. } = err;
    assert_eq!(input, "31/31");
}

#[test]
fn ranked_board_keeps_urgency_order_through_filters() {
    let engine = RecurrenceEngine::default();
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 18, 45, 0).unwrap();
    let records = vec![
        BirthdayRecord::from_row("Ten", "05-11", "").unwrap(),
        BirthdayRecord::from_row("Zero", "2000-05-01", "").unwrap(),
        BirthdayRecord::from_row("Five", "5/6", "").unwrap(),
    ];
    let ranked = engine.rank(&records, now);
    let days: Vec<_> = filter_records(&ranked, "", None)
        .iter()
        .map(|e| e.occurrence.days_until)
        .collect();
    assert_eq!(days, [0, 5, 10]);

    let today = &ranked[0];
    assert!(today.occurrence.is_today);
    assert_eq!(today.occurrence.turning_age, Some(25));
    assert!(ranked.iter().all(|e| e.occurrence.days_until < 365));
}
