use super::{util, RecurrenceError};
use crate::model::{BirthdayRecord, Occurrence, Upcoming};
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// Prochaine occurrence de `(month, day)` à partir de `today` (inclus).
///
/// La comparaison se fait au jour près : une date égale à `today` donne
/// `days_until == 0`, jamais 365/366.
pub fn next_occurrence(
    month: u32,
    day: u32,
    origin_year: Option<i32>,
    today: NaiveDate,
) -> Result<Occurrence, RecurrenceError> {
    let mut candidate = util::anchor_in_year(today.year(), month, day)?;
    if candidate < today {
        candidate = util::anchor_in_year(today.year() + 1, month, day)?;
    }
    let days_until = candidate.signed_duration_since(today).num_days();
    let turning_age = match origin_year {
        Some(y) => Some(candidate.year().checked_sub(y).ok_or_else(|| {
            RecurrenceError::invalid(format!("{y}-{month:02}-{day:02}"), "origin year out of range")
        })?),
        None => None,
    };
    Ok(Occurrence {
        next_date: candidate,
        days_until,
        turning_age,
        is_today: days_until == 0,
    })
}

/// Ordre d'urgence : `days_until` croissant, puis nom.
pub fn by_urgency(a: &Upcoming, b: &Upcoming) -> Ordering {
    a.occurrence
        .days_until
        .cmp(&b.occurrence.days_until)
        .then_with(|| a.record.name.cmp(&b.record.name))
}

/// Calcule et classe les occurrences. Un enregistrement invalide est écarté
/// (et journalisé) sans interrompre le lot.
pub fn rank_upcoming(records: &[BirthdayRecord], today: NaiveDate) -> Vec<Upcoming> {
    let mut out: Vec<Upcoming> = records
        .iter()
        .filter_map(|record| {
            match next_occurrence(record.month, record.day, record.origin_year, today) {
                Ok(occurrence) => Some(Upcoming {
                    record: record.clone(),
                    occurrence,
                }),
                Err(err) => {
                    tracing::warn!(name = %record.name, error = %err, "skipping record");
                    None
                }
            }
        })
        .collect();
    out.sort_by(by_urgency);
    tracing::debug!(count = out.len(), %today, "ranked upcoming birthdays");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DateSpec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn same_day_is_today_not_next_year() {
        let occ = next_occurrence(10, 19, None, d(2026, 10, 19)).unwrap();
        assert_eq!(occ.next_date, d(2026, 10, 19));
        assert_eq!(occ.days_until, 0);
        assert!(occ.is_today);
    }

    #[test]
    fn yesterday_rolls_to_next_year() {
        let occ = next_occurrence(10, 18, None, d(2026, 10, 19)).unwrap();
        assert_eq!(occ.next_date, d(2027, 10, 18));
        assert_eq!(occ.days_until, 364);
        assert!(!occ.is_today);
    }

    #[test]
    fn leap_day_targets_next_leap_year_or_feb_28() {
        let occ = next_occurrence(2, 29, None, d(2023, 3, 1)).unwrap();
        assert_eq!(occ.next_date, d(2024, 2, 29));

        let occ = next_occurrence(2, 29, None, d(2025, 1, 1)).unwrap();
        assert_eq!(occ.next_date, d(2025, 2, 28));
    }

    #[test]
    fn leap_day_after_feb_28_of_non_leap_year_goes_to_next_year() {
        let occ = next_occurrence(2, 29, Some(2000), d(2025, 3, 1)).unwrap();
        assert_eq!(occ.next_date, d(2026, 2, 28));
        assert_eq!(occ.turning_age, Some(26));
    }

    #[test]
    fn turning_age_follows_the_target_year() {
        let occ = next_occurrence(5, 27, Some(1990), d(2025, 5, 1)).unwrap();
        assert_eq!(occ.next_date, d(2025, 5, 27));
        assert_eq!(occ.turning_age, Some(35));

        let occ = next_occurrence(5, 27, Some(1990), d(2025, 6, 1)).unwrap();
        assert_eq!(occ.turning_age, Some(36));
    }

    #[test]
    fn days_until_stays_within_a_year_for_every_day() {
        let references = [
            d(2023, 3, 1),
            d(2023, 12, 31),
            d(2024, 1, 1),
            d(2024, 2, 28),
            d(2024, 2, 29),
            d(2024, 3, 1),
            d(2024, 12, 31),
            d(2100, 2, 28),
        ];
        for today in references {
            for month in 1..=12u32 {
                for day in 1..=31u32 {
                    if DateSpec::new(month, day, None).is_err() {
                        continue;
                    }
                    let occ = next_occurrence(month, day, None, today).unwrap();
                    assert!(
                        occ.days_until >= 0 && occ.days_until < 366,
                        "{month}-{day} from {today}"
                    );
                    assert_eq!(occ.is_today, occ.next_date == today);
                    assert_eq!(occ, next_occurrence(month, day, None, today).unwrap());
                }
            }
        }
    }

    #[test]
    fn leap_reference_day_matches_itself_once() {
        let occ = next_occurrence(2, 29, None, d(2024, 2, 29)).unwrap();
        assert!(occ.is_today);
        let occ = next_occurrence(2, 28, None, d(2024, 2, 29)).unwrap();
        assert_eq!(occ.next_date, d(2025, 2, 28));
        assert_eq!(occ.days_until, 365);
    }

    #[test]
    fn ranking_breaks_ties_by_name() {
        let spec = DateSpec::new(10, 20, None).unwrap();
        let records = vec![
            BirthdayRecord::new("Zoe", spec, "").unwrap(),
            BirthdayRecord::new("Adam", spec, "").unwrap(),
            BirthdayRecord::new("Mia", DateSpec::new(10, 19, None).unwrap(), "").unwrap(),
        ];
        let ranked = rank_upcoming(&records, d(2026, 10, 19));
        let names: Vec<_> = ranked.iter().map(|u| u.record.name.as_str()).collect();
        assert_eq!(names, ["Mia", "Adam", "Zoe"]);
    }

    #[test]
    fn invalid_records_are_skipped_not_fatal() {
        let mut broken = BirthdayRecord::new("Broken", DateSpec::new(1, 1, None).unwrap(), "").unwrap();
        broken.day = 40;
        let ok = BirthdayRecord::new("Ok", DateSpec::new(1, 1, None).unwrap(), "").unwrap();
        let ranked = rank_upcoming(&[broken, ok], d(2026, 10, 19));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].record.name, "Ok");
    }

    #[test]
    fn extreme_origin_year_is_an_error_not_a_panic() {
        let err = next_occurrence(5, 27, Some(i32::MIN), d(2025, 5, 1)).unwrap_err();
        assert!(matches!(err, RecurrenceError::InvalidDateSpec { .. }));

        let mut ancient = BirthdayRecord::new("Ancient", DateSpec::new(5, 27, None).unwrap(), "").unwrap();
        ancient.origin_year = Some(i32::MIN);
        let ok = BirthdayRecord::new("Ok", DateSpec::new(5, 27, Some(1990)).unwrap(), "").unwrap();
        let ranked = rank_upcoming(&[ancient, ok], d(2025, 5, 1));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].occurrence.turning_age, Some(35));
    }
}
