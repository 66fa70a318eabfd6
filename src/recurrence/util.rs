use super::RecurrenceError;
use chrono::NaiveDate;

/// Date de `(month, day)` dans `year`. Le 29/02 d'une année non bissextile
/// tombe le 28/02 ; toute autre date impossible est une erreur.
pub(super) fn anchor_in_year(year: i32, month: u32, day: u32) -> Result<NaiveDate, RecurrenceError> {
    if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
        return Ok(date);
    }
    if month == 2 && day == 29 {
        if let Some(date) = NaiveDate::from_ymd_opt(year, 2, 28) {
            return Ok(date);
        }
    }
    Err(RecurrenceError::invalid(
        format!("{month:02}-{day:02}"),
        format!("cannot be scheduled in {year}"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_day_falls_back_only_in_non_leap_years() {
        assert_eq!(anchor_in_year(2024, 2, 29).unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(anchor_in_year(2025, 2, 29).unwrap(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert_eq!(anchor_in_year(2100, 2, 29).unwrap(), NaiveDate::from_ymd_opt(2100, 2, 28).unwrap());
    }

    #[test]
    fn other_impossible_dates_are_not_recovered() {
        assert!(anchor_in_year(2025, 4, 31).is_err());
        assert!(anchor_in_year(2025, 2, 30).is_err());
    }
}
