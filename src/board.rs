use crate::model::Upcoming;
use chrono::NaiveDate;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Filtre une liste déjà classée. L'ordre d'entrée est conservé.
///
/// `query` est cherché tel quel, sans tenir compte de la casse, dans le nom ou
/// les notes ; seule une requête vide laisse tout passer.
pub fn filter_records<'a>(
    entries: &'a [Upcoming],
    query: &str,
    max_days_until: Option<i64>,
) -> Vec<&'a Upcoming> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|e| {
            needle.is_empty()
                || e.record.name.to_lowercase().contains(&needle)
                || e.record.notes.to_lowercase().contains(&needle)
        })
        .filter(|e| max_days_until.map_or(true, |max| e.occurrence.days_until <= max))
        .collect()
}

/// Regroupement par mois canonique (vue « By Month »).
#[derive(Debug, Clone)]
pub struct MonthGroup<'a> {
    pub month: u32,
    pub label: &'static str,
    pub entries: Vec<&'a Upcoming>,
}

pub fn month_label(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_LABELS.get(i as usize))
        .copied()
        .unwrap_or("?")
}

/// Groupes dans l'ordre des mois, triés par `(day, name)`. Les mois vides sont omis.
pub fn group_by_month(entries: &[Upcoming]) -> Vec<MonthGroup<'_>> {
    let mut sorted: Vec<&Upcoming> = entries.iter().collect();
    sorted.sort_by(|a, b| {
        (a.record.month, a.record.day, &a.record.name).cmp(&(
            b.record.month,
            b.record.day,
            &b.record.name,
        ))
    });

    let mut groups: Vec<MonthGroup<'_>> = Vec::new();
    for entry in sorted {
        match groups.last_mut() {
            Some(group) if group.month == entry.record.month => group.entries.push(entry),
            _ => groups.push(MonthGroup {
                month: entry.record.month,
                label: month_label(entry.record.month),
                entries: vec![entry],
            }),
        }
    }
    groups
}

/// Indicateurs d'en-tête du tableau de bord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSummary {
    pub total: usize,
    pub today: usize,
    pub next: Option<NextUp>,
    pub window_days: i64,
    pub within_window: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextUp {
    pub name: String,
    pub date: NaiveDate,
    pub days_until: i64,
}

impl BoardSummary {
    /// `entries` doit être classé par urgence (voir `rank_upcoming`).
    pub fn compute(entries: &[Upcoming], window_days: i64) -> Self {
        Self {
            total: entries.len(),
            today: entries.iter().filter(|e| e.occurrence.is_today).count(),
            next: entries.first().map(|e| NextUp {
                name: e.record.name.clone(),
                date: e.occurrence.next_date,
                days_until: e.occurrence.days_until,
            }),
            window_days,
            within_window: entries
                .iter()
                .filter(|e| e.occurrence.days_until <= window_days)
                .count(),
        }
    }
}
