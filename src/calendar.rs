//! Export iCalendar minimal : un évènement annuel « journée entière » par anniversaire.
//!
//! Dialecte volontairement réduit : lignes CRLF, pas de pliage, pas
//! d'échappement de `,`/`;` dans les textes.

use crate::model::{BirthdayRecord, Upcoming};

pub const DEFAULT_CALENDAR_NAME: &str = "Birthday Board";
const PRODID: &str = "-//Anniv//Birthday Board//EN";
const UID_DOMAIN: &str = "anniv";
const CRLF: &str = "\r\n";

/// Identifiant stable d'un évènement, dérivé de `(name, month, day)` uniquement.
pub fn event_uid(record: &BirthdayRecord) -> String {
    format!(
        "{}--{:02}{:02}@{UID_DOMAIN}",
        record.name.replace(' ', "_"),
        record.month,
        record.day
    )
}

/// Construit le document `.ics`. Une entrée vide donne une enveloppe vide mais valide.
///
/// La règle de récurrence utilise le mois/jour canonique ; seul `DTSTART` dépend
/// de la prochaine occurrence.
pub fn build_recurring_calendar(entries: &[Upcoming], calendar_name: &str) -> Vec<u8> {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_string(),
        format!("X-WR-CALNAME:{calendar_name}"),
    ];
    for entry in entries {
        let record = &entry.record;
        let mut summary = format!("🎂 {}", record.name);
        if let Some(age) = entry.occurrence.turning_age {
            summary.push_str(&format!(" turns {age}"));
        }
        lines.extend([
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}", event_uid(record)),
            format!(
                "DTSTART;VALUE=DATE:{}",
                entry.occurrence.next_date.format("%Y%m%d")
            ),
            format!(
                "RRULE:FREQ=YEARLY;BYMONTH={};BYMONTHDAY={}",
                record.month, record.day
            ),
            format!("SUMMARY:{summary}"),
            format!("DESCRIPTION:{}", record.notes),
            "END:VEVENT".to_string(),
        ]);
    }
    lines.push("END:VCALENDAR".to_string());

    tracing::debug!(events = entries.len(), "built recurring calendar");
    let mut doc = lines.join(CRLF);
    doc.push_str(CRLF);
    doc.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DateSpec;

    #[test]
    fn uid_ignores_year_and_notes() {
        let a = BirthdayRecord::new("Ada Lovelace", DateSpec::new(12, 10, Some(1815)).unwrap(), "x").unwrap();
        let b = BirthdayRecord::new("Ada Lovelace", DateSpec::new(12, 10, None).unwrap(), "y").unwrap();
        assert_eq!(event_uid(&a), "Ada_Lovelace--1210@anniv");
        assert_eq!(event_uid(&a), event_uid(&b));
    }

    #[test]
    fn empty_calendar_keeps_envelope() {
        let doc = String::from_utf8(build_recurring_calendar(&[], "Empty")).unwrap();
        assert!(doc.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(doc.ends_with("END:VCALENDAR\r\n"));
        assert!(doc.contains("X-WR-CALNAME:Empty\r\n"));
        assert!(!doc.contains("BEGIN:VEVENT"));
    }
}
