use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Temps restant avant un instant cible, découpé en jours/heures/minutes/secondes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    /// Cible atteinte ou dépassée ; les compteurs restent alors à zéro.
    pub elapsed: bool,
}

impl Countdown {
    pub fn between(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total = (target - now).num_seconds();
        if total <= 0 {
            return Self {
                elapsed: true,
                ..Self::default()
            };
        }
        Self {
            days: total / 86_400,
            hours: total % 86_400 / 3_600,
            minutes: total % 3_600 / 60,
            seconds: total % 60,
            elapsed: false,
        }
    }

    /// Cible exprimée en heure locale du fuseau `tz`. Une heure locale qui
    /// tombe dans un saut d'heure (DST) est remplacée par le premier instant
    /// qui suit le saut.
    pub fn until_local(target: NaiveDateTime, tz: Tz, now: DateTime<Utc>) -> Result<Self> {
        let target = resolve_local(target, tz)
            .with_context(|| format!("{target} cannot be resolved in {tz}"))?;
        Ok(Self::between(target.with_timezone(&Utc), now))
    }

    /// Jusqu'à minuit (heure locale) du jour `date`.
    pub fn until_date(date: NaiveDate, tz: Tz, now: DateTime<Utc>) -> Result<Self> {
        let midnight = date.and_hms_opt(0, 0, 0).context("invalid midnight conversion")?;
        Self::until_local(midnight, tz, now)
    }
}

const GAP_STEP_MINUTES: i64 = 15;
const MAX_GAP_HOURS: i64 = 48;

fn resolve_local(local: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    let steps = MAX_GAP_HOURS * 60 / GAP_STEP_MINUTES;
    (0..=steps).find_map(|i| {
        let probe = local + Duration::minutes(i * GAP_STEP_MINUTES);
        tz.from_local_datetime(&probe).earliest()
    })
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} days, {} hours, {} minutes, {} seconds",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
