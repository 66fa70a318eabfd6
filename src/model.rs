use crate::recurrence::{parse_date_spec, RecurrenceError};
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date canonique d'un anniversaire : mois/jour, année d'origine optionnelle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateSpec {
    pub month: u32,
    pub day: u32,
    pub origin_year: Option<i32>,
}

impl DateSpec {
    /// Valide `(month, day)` contre une année bissextile : le 29/02 est accepté.
    pub fn new(month: u32, day: u32, origin_year: Option<i32>) -> Result<Self, RecurrenceError> {
        let probe_year = origin_year.unwrap_or(2000);
        if NaiveDate::from_ymd_opt(probe_year, month, day).is_none() {
            return Err(RecurrenceError::invalid(
                format!("{month:02}-{day:02}"),
                match origin_year {
                    Some(y) => format!("no such day in {y}"),
                    None => "no such day of year".to_string(),
                },
            ));
        }
        Ok(Self { month, day, origin_year })
    }

    /// Texte canonique `MM-DD` (sans l'année).
    pub fn month_day(&self) -> String {
        format!("{:02}-{:02}", self.month, self.day)
    }

    /// Texte réinjectable dans un CSV : `YYYY-MM-DD` si l'année est connue, `MM-DD` sinon.
    pub fn to_row_text(&self) -> String {
        match self.origin_year {
            Some(y) => format!("{y:04}-{:02}-{:02}", self.month, self.day),
            None => self.month_day(),
        }
    }
}

/// Anniversaire suivi (immutable une fois parsé).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BirthdayRecord {
    pub name: String,
    pub month: u32,
    pub day: u32,
    pub origin_year: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: String,
}

impl BirthdayRecord {
    pub fn new<N: Into<String>, T: Into<String>>(
        name: N,
        spec: DateSpec,
        notes: T,
    ) -> Result<Self, RowError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(RowError::EmptyName);
        }
        Ok(Self {
            name,
            month: spec.month,
            day: spec.day,
            origin_year: spec.origin_year,
            notes: notes.into().trim().to_string(),
        })
    }

    /// Construit un enregistrement à partir des trois champs texte d'une ligne.
    pub fn from_row(name: &str, date: &str, notes: &str) -> Result<Self, RowError> {
        if name.trim().is_empty() {
            return Err(RowError::EmptyName);
        }
        let spec = parse_date_spec(date)?;
        Self::new(name, spec, notes)
    }

    pub fn spec(&self) -> DateSpec {
        DateSpec {
            month: self.month,
            day: self.day,
            origin_year: self.origin_year,
        }
    }
}

/// Prochaine occurrence calculée contre un « aujourd'hui » donné. Jamais persistée.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Occurrence {
    pub next_date: NaiveDate,
    pub days_until: i64,
    pub turning_age: Option<i32>,
    pub is_today: bool,
}

/// Couple enregistrement + occurrence, tel que classé par le moteur.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Upcoming {
    pub record: BirthdayRecord,
    pub occurrence: Occurrence,
}

/// Raison du rejet d'une ligne d'entrée.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("empty name")]
    EmptyName,
    #[error(transparent)]
    Date(#[from] RecurrenceError),
}
