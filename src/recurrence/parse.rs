use super::RecurrenceError;
use crate::model::DateSpec;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const SEPARATORS: [char; 3] = ['-', '/', '.'];

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

const WEEKDAYS: [&str; 7] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

const ORDINAL_SUFFIXES: [&str; 4] = ["st", "nd", "rd", "th"];

/// Années à deux chiffres : `69..=99` → 19xx, `00..=68` → 20xx.
const TWO_DIGIT_PIVOT: u32 = 69;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Interprète un texte de date libre en `(month, day, origin_year?)`.
///
/// - `MM-DD` : lu strictement mois puis jour, pas d'année.
/// - `M/D`, `MM.DD`, `5 27` : deux parties numériques, pas d'année ; jour et mois
///   sont inversés si le premier dépasse 12 (`27/05`).
/// - `YYYY-MM-DD`, `M/D/YYYY`, `D/M/YYYY`, `M/D/YY`, `YYYYMMDD`, RFC 3339 : année présente.
/// - `May 27th`, `Sept 5`, `27 May 1990`, `Tuesday, May 27, 1990` : l'année n'est
///   présente que si elle est écrite.
///
/// L'année n'est jamais inventée : une date sans année donne `origin_year = None`.
pub fn parse_date_spec(text: &str) -> Result<DateSpec, RecurrenceError> {
    let s = text.trim();
    if s.is_empty() {
        return Err(RecurrenceError::invalid(text, "empty date"));
    }

    if let Some(sep) = s.chars().find(|c| SEPARATORS.contains(c)) {
        if s.chars().all(|c| c == sep || c.is_ascii_digit()) {
            let parts: Vec<&str> = s.split(sep).collect();
            return parse_numeric(s, &parts, sep == '-');
        }
    }
    if s.chars().all(|c| c.is_ascii_digit() || c.is_whitespace()) {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() == 1 && s.len() == 8 {
            return parse_compact(s);
        }
        if parts.len() > 1 {
            return parse_numeric(s, &parts, false);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return spec_from_date(s, dt.date_naive(), true);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return spec_from_date(s, dt.date(), true);
        }
    }
    parse_named(s)
}

fn parse_numeric(s: &str, parts: &[&str], strict_month_day: bool) -> Result<DateSpec, RecurrenceError> {
    match parts {
        [a, b] => {
            let (a, b) = (number(s, a)?, number(s, b)?);
            let (month, day) = if strict_month_day {
                (a, b)
            } else {
                month_first(a, b)
            };
            DateSpec::new(month, day, None).map_err(|_| invalid_day(s))
        }
        [y, m, d] if y.len() == 4 => build(s, number(s, y)?, number(s, m)?, number(s, d)?),
        [a, b, y] if y.len() == 4 => {
            let (month, day) = month_first(number(s, a)?, number(s, b)?);
            build(s, number(s, y)?, month, day)
        }
        [a, b, c] if a.len() <= 2 && b.len() <= 2 && c.len() <= 2 => {
            resolve_short(s, number(s, a)?, number(s, b)?, number(s, c)?)
        }
        [_, _, _] => Err(RecurrenceError::invalid(s, "unrecognised numeric date")),
        _ => Err(RecurrenceError::invalid(s, "expected 2 or 3 numeric parts")),
    }
}

/// Trois champs courts : année en tête si elle ne peut être qu'une année
/// ou si tout est ambigu, sinon mois/jour/année.
fn resolve_short(s: &str, a: u32, b: u32, c: u32) -> Result<DateSpec, RecurrenceError> {
    if a > 31 {
        return build(s, expand_year(a), b, c);
    }
    let mdy = || {
        let (month, day) = month_first(a, b);
        build(s, expand_year(c), month, day)
    };
    if c > 31 {
        return mdy();
    }
    build(s, expand_year(a), b, c).or_else(|_| mdy())
}

fn month_first(a: u32, b: u32) -> (u32, u32) {
    if a > 12 && b <= 12 {
        (b, a)
    } else {
        (a, b)
    }
}

fn expand_year(yy: u32) -> i32 {
    let century = if yy >= TWO_DIGIT_PIVOT { 1900 } else { 2000 };
    century + yy as i32
}

fn parse_compact(s: &str) -> Result<DateSpec, RecurrenceError> {
    build(s, number(s, &s[..4])?, number(s, &s[4..6])?, number(s, &s[6..])?)
}

fn parse_named(s: &str) -> Result<DateSpec, RecurrenceError> {
    let cleaned = s.replace([',', '.'], " ");
    let mut month = None;
    let mut numbers: Vec<String> = Vec::new();
    for token in cleaned.split_whitespace() {
        let lower = token.to_ascii_lowercase();
        if lower.starts_with(|c: char| c.is_ascii_digit()) {
            let digits = strip_ordinal(&lower);
            if !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(unrecognised(s));
            }
            numbers.push(digits.to_string());
        } else if let Some(m) = lookup(&MONTHS, &lower) {
            if month.replace(m as u32 + 1).is_some() {
                return Err(RecurrenceError::invalid(s, "more than one month name"));
            }
        } else if lookup(&WEEKDAYS, &lower).is_none() && lower != "of" {
            return Err(unrecognised(s));
        }
    }
    let month = month.ok_or_else(|| unrecognised(s))?;

    match numbers.as_slice() {
        [day] => DateSpec::new(month, number(s, day)?, None).map_err(|_| invalid_day(s)),
        [x, y] => {
            let (day, year) = if y.len() <= 2 && (x.len() > 2 || number::<u32>(s, x)? > 31) {
                (y, x)
            } else {
                (x, y)
            };
            let year = if year.len() <= 2 {
                expand_year(number(s, year)?)
            } else {
                number(s, year)?
            };
            build(s, year, month, number(s, day)?)
        }
        _ => Err(unrecognised(s)),
    }
}

/// Nom complet ou abrégé (au moins trois lettres) : `sep`, `sept`, `september`.
fn lookup(names: &[&str], token: &str) -> Option<usize> {
    if token.len() < 3 {
        return None;
    }
    names.iter().position(|name| name.starts_with(token))
}

fn strip_ordinal(token: &str) -> &str {
    ORDINAL_SUFFIXES
        .iter()
        .find_map(|suffix| token.strip_suffix(suffix))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(token)
}

fn build(s: &str, year: i32, month: u32, day: u32) -> Result<DateSpec, RecurrenceError> {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => spec_from_date(s, date, true),
        None => Err(invalid_day(s)),
    }
}

fn spec_from_date(s: &str, date: NaiveDate, with_year: bool) -> Result<DateSpec, RecurrenceError> {
    let year = with_year.then(|| date.year());
    DateSpec::new(date.month(), date.day(), year).map_err(|_| invalid_day(s))
}

fn number<T: std::str::FromStr>(s: &str, part: &str) -> Result<T, RecurrenceError> {
    if part.is_empty() {
        return Err(RecurrenceError::invalid(s, "missing number"));
    }
    part.parse()
        .map_err(|_| RecurrenceError::invalid(s, format!("not a number: {part:?}")))
}

fn invalid_day(s: &str) -> RecurrenceError {
    RecurrenceError::invalid(s, "not a calendar day")
}

fn unrecognised(s: &str) -> RecurrenceError {
    RecurrenceError::invalid(s, "unrecognised date format")
}
