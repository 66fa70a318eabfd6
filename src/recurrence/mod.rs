//! Moteur de récurrence annuelle : parsing des dates, prochaine occurrence,
//! classement par urgence. Aucune lecture d'horloge : « maintenant » est
//! toujours fourni par l'appelant.

mod next;
mod parse;
mod types;
mod util;

pub use next::{by_urgency, next_occurrence, rank_upcoming};
pub use parse::parse_date_spec;
pub use types::RecurrenceError;

use crate::model::{BirthdayRecord, Occurrence, Upcoming};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Moteur paramétré par un fuseau horaire : c'est lui qui décide quel jour
/// calendaire correspond à un instant UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceEngine {
    tz: Tz,
}

impl Default for RecurrenceEngine {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl RecurrenceEngine {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Jour calendaire de `now` dans le fuseau du moteur.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.tz).date_naive()
    }

    pub fn occurrence(
        &self,
        record: &BirthdayRecord,
        now: DateTime<Utc>,
    ) -> Result<Occurrence, RecurrenceError> {
        next_occurrence(record.month, record.day, record.origin_year, self.today(now))
    }

    /// Évalue tous les enregistrements contre `now` et les classe par urgence.
    pub fn rank(&self, records: &[BirthdayRecord], now: DateTime<Utc>) -> Vec<Upcoming> {
        rank_upcoming(records, self.today(now))
    }
}
