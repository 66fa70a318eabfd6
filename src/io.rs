use crate::model::{BirthdayRecord, DateSpec, RowError, Upcoming};
use anyhow::{anyhow, Context};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use std::fs::File;
use std::path::Path;

/// Ligne rejetée à l'import, conservée pour affichage ou journalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// Numéro de ligne dans le fichier (1 = en-tête).
    pub line: u64,
    pub name: String,
    pub date: String,
    pub error: RowError,
}

/// Résultat d'un import : chaque ligne est soit un enregistrement, soit un rejet.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub records: Vec<BirthdayRecord>,
    pub rejected: Vec<RejectedRow>,
}

/// Import CSV: header `name,date[,notes]` (ordre libre, colonnes manquantes = vides)
pub fn import_birthdays_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<ImportReport> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_birthdays_csv(file).with_context(|| format!("reading {}", path.display()))
}

pub fn read_birthdays_csv<R: std::io::Read>(reader: R) -> anyhow::Result<ImportReport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let name_col = column(&headers, "name");
    let date_col = column(&headers, "date");
    let notes_col = column(&headers, "notes");

    let mut report = ImportReport::default();
    for rec in rdr.records() {
        let rec = rec?;
        let line = rec.position().map(|p| p.line()).unwrap_or_default();
        let name = cell(&rec, name_col);
        let date = cell(&rec, date_col);
        let notes = cell(&rec, notes_col);
        match BirthdayRecord::from_row(name, date, notes) {
            Ok(record) => report.records.push(record),
            Err(error) => {
                tracing::warn!(line, name, date, %error, "skipping birthday row");
                report.rejected.push(RejectedRow {
                    line,
                    name: name.to_string(),
                    date: date.to_string(),
                    error,
                });
            }
        }
    }
    Ok(report)
}

fn column(headers: &StringRecord, wanted: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(wanted))
}

fn cell(rec: &StringRecord, col: Option<usize>) -> &str {
    col.and_then(|i| rec.get(i)).unwrap_or("")
}

pub const DISPLAY_HEADER: [&str; 6] = ["name", "Next", "Days", "Turning", "MM-DD", "Notes"];

/// Export CSV du tableau affiché: header `name,Next,Days,Turning,MM-DD,Notes`
pub fn display_csv(entries: &[&Upcoming]) -> anyhow::Result<Vec<u8>> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    w.write_record(DISPLAY_HEADER)?;
    for e in entries {
        let next = e.occurrence.next_date.format("%Y-%m-%d").to_string();
        let days = e.occurrence.days_until.to_string();
        let turning = e
            .occurrence
            .turning_age
            .map(|a| a.to_string())
            .unwrap_or_else(|| "—".to_string());
        let month_day = e.record.spec().month_day();
        w.write_record([
            e.record.name.as_str(),
            next.as_str(),
            days.as_str(),
            turning.as_str(),
            month_day.as_str(),
            e.record.notes.as_str(),
        ])?;
    }
    w.into_inner()
        .map_err(|e| anyhow!("flushing csv buffer: {}", e.error()))
}

/// Prépare une ligne `name,date,notes` (avec en-tête) à ajouter au CSV source.
pub fn quick_add_row(
    name: &str,
    month: u32,
    day: u32,
    year: Option<i32>,
    notes: &str,
) -> anyhow::Result<Vec<u8>> {
    let spec = DateSpec::new(month, day, year)?;
    let record = BirthdayRecord::new(name, spec, notes)?;
    let mut w = WriterBuilder::new().from_writer(Vec::new());
    w.write_record(["name", "date", "notes"])?;
    w.write_record([
        record.name.as_str(),
        spec.to_row_text().as_str(),
        record.notes.as_str(),
    ])?;
    w.into_inner()
        .map_err(|e| anyhow!("flushing csv buffer: {}", e.error()))
}
