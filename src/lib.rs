#![forbid(unsafe_code)]
//! Anniv — bibliothèque de suivi d'anniversaires récurrents (sans BD).
//!
//! - Parsing de dates libres (`MM-DD`, `YYYY-MM-DD`, `M/D/YYYY`, ...), sans inventer d'année.
//! - Prochaine occurrence, jours restants, âge atteint ; 29/02 ramené au 28/02 hors années bissextiles.
//! - Filtrage, regroupement par mois, export iCalendar (.ics) et CSV.
//! - Aucune lecture d'horloge : « maintenant » et le fuseau sont toujours passés par l'appelant.

pub mod board;
pub mod calendar;
pub mod config;
pub mod countdown;
#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod recurrence;
pub mod shoutout;
#[cfg(feature = "serde")]
pub mod storage;

pub use board::{filter_records, group_by_month, BoardSummary, MonthGroup, NextUp};
pub use calendar::{build_recurring_calendar, event_uid};
pub use config::BoardConfig;
pub use countdown::Countdown;
pub use model::{BirthdayRecord, DateSpec, Occurrence, RowError, Upcoming};
pub use recurrence::{
    next_occurrence, parse_date_spec, rank_upcoming, RecurrenceEngine, RecurrenceError,
};
pub use shoutout::{todays_shoutouts, Shoutout, ShoutoutRenderer, TextShoutout};
#[cfg(feature = "serde")]
pub use storage::{ConfigStorage, JsonConfigStorage};
