#![forbid(unsafe_code)]
use anniv::{
    board::{filter_records, group_by_month, BoardSummary},
    calendar::build_recurring_calendar,
    config::{parse_timezone, BoardConfig},
    countdown::Countdown,
    io,
    model::Upcoming,
    shoutout::{todays_shoutouts, TextShoutout},
    storage::{write_atomic, ConfigStorage, JsonConfigStorage},
    RecurrenceEngine,
};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::Path;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de suivi d'anniversaires (CSV `name,date,notes`)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de configuration (valeurs par défaut s'il n'existe pas)
    #[arg(long, global = true, default_value = "anniv.json")]
    config: String,

    /// Fuseau IANA, prioritaire sur la configuration
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Instant de référence RFC3339 (défaut : maintenant)
    #[arg(long, global = true)]
    now: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lister les anniversaires classés par urgence
    List {
        #[arg(long, default_value = "data/birthdays.csv")]
        csv: String,
        /// Recherche dans le nom et les notes
        #[arg(long, default_value = "")]
        query: String,
        /// Fenêtre en jours (défaut : configuration)
        #[arg(long)]
        within: Option<i64>,
        /// Ignore la fenêtre
        #[arg(long)]
        all: bool,
        /// Export CSV du tableau filtré
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Afficher les anniversaires du jour
    Today {
        #[arg(long, default_value = "data/birthdays.csv")]
        csv: String,
    },

    /// Regrouper par mois
    ByMonth {
        #[arg(long, default_value = "data/birthdays.csv")]
        csv: String,
    },

    /// Exporter un calendrier .ics (tous les anniversaires)
    ExportIcs {
        #[arg(long, default_value = "data/birthdays.csv")]
        csv: String,
        #[arg(long, default_value = "birthdays.ics")]
        out: String,
        /// Nom du calendrier (défaut : configuration)
        #[arg(long)]
        name: Option<String>,
    },

    /// Préparer une ligne CSV à ajouter au fichier source
    AddRow {
        #[arg(long)]
        name: String,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        day: u32,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, default_value = "")]
        notes: String,
        /// Fichier de sortie (défaut : stdout)
        #[arg(long)]
        out: Option<String>,
    },

    /// Compte à rebours vers une date locale ou vers le prochain anniversaire d'une personne
    Countdown {
        /// `YYYY-MM-DDTHH:MM:SS` en heure locale du fuseau
        #[arg(long, conflicts_with = "person")]
        target: Option<String>,
        #[arg(long)]
        person: Option<String>,
        #[arg(long, default_value = "data/birthdays.csv")]
        csv: String,
    },

    /// Vérifier le CSV et signaler les lignes rejetées
    Check {
        #[arg(long, default_value = "data/birthdays.csv")]
        csv: String,
    },

    /// Écrire la configuration par défaut
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonConfigStorage::open(&cli.config);
    let mut config = if storage.path().exists() {
        storage.load()?
    } else {
        BoardConfig::default()
    };
    if let Some(tz) = &cli.tz {
        parse_timezone(tz)?;
        config.timezone = tz.clone();
    }
    let engine = config.engine()?;
    let now: DateTime<Utc> = match &cli.now {
        Some(raw) => raw.parse().context("--now must be RFC3339")?,
        None => Utc::now(),
    };

    let code = match cli.cmd {
        Commands::List {
            csv,
            query,
            within,
            all,
            out_csv,
        } => {
            if let Some(days) = within {
                config.window_days = days;
                config.validate()?;
            }
            if all {
                config.only_upcoming = false;
            }
            let entries = load_ranked(&engine, &csv, now)?;
            let summary = BoardSummary::compute(&entries, config.window_days);
            print_summary(&summary);

            let shown = filter_records(&entries, &query, config.max_days_until());
            if shown.is_empty() {
                println!("No matches yet. Try clearing filters.");
            }
            for e in &shown {
                let turning = e
                    .occurrence
                    .turning_age
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "—".to_string());
                println!(
                    "{} | {} | {}d | {} | {} | {}",
                    e.record.name,
                    e.occurrence.next_date,
                    e.occurrence.days_until,
                    turning,
                    e.record.spec().month_day(),
                    e.record.notes
                );
            }
            if let Some(path) = out_csv {
                write_atomic(&path, &io::display_csv(&shown)?)?;
            }
            0
        }
        Commands::Today { csv } => {
            let entries = load_ranked(&engine, &csv, now)?;
            let shoutouts = todays_shoutouts(&entries, &TextShoutout);
            if shoutouts.is_empty() {
                println!("No birthdays today.");
            }
            for s in shoutouts {
                println!("{}", s.content);
            }
            0
        }
        Commands::ByMonth { csv } => {
            let entries = load_ranked(&engine, &csv, now)?;
            for group in group_by_month(&entries) {
                println!("### {}", group.label);
                for e in group.entries {
                    if e.record.notes.is_empty() {
                        println!("- {:02}  {}", e.record.day, e.record.name);
                    } else {
                        println!("- {:02}  {}  ({})", e.record.day, e.record.name, e.record.notes);
                    }
                }
            }
            0
        }
        Commands::ExportIcs { csv, out, name } => {
            let entries = load_ranked(&engine, &csv, now)?;
            let name = name.unwrap_or_else(|| config.calendar_name.clone());
            let doc = build_recurring_calendar(&entries, &name);
            write_atomic(&out, &doc)?;
            println!("Exported {} event(s) to {}", entries.len(), out);
            0
        }
        Commands::AddRow {
            name,
            month,
            day,
            year,
            notes,
            out,
        } => {
            let row = io::quick_add_row(&name, month, day, year, &notes)?;
            match out {
                Some(path) => write_atomic(&path, &row)?,
                None => print!("{}", String::from_utf8_lossy(&row)),
            }
            0
        }
        Commands::Countdown {
            target,
            person,
            csv,
        } => {
            let countdown = match (target, person) {
                (Some(raw), _) => {
                    let target = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S")
                        .with_context(|| format!("invalid --target {raw}"))?;
                    Countdown::until_local(target, engine.timezone(), now)?
                }
                (None, Some(person)) => {
                    let entries = load_ranked(&engine, &csv, now)?;
                    let entry = entries
                        .iter()
                        .find(|e| e.record.name.eq_ignore_ascii_case(&person))
                        .ok_or_else(|| anyhow::anyhow!("unknown person: {}", person))?;
                    Countdown::until_date(entry.occurrence.next_date, engine.timezone(), now)?
                }
                (None, None) => bail!("either --target or --person is required"),
            };
            if countdown.elapsed {
                println!("The big day is here! 🎉");
            } else {
                println!("{countdown} until the big day!");
            }
            0
        }
        Commands::Check { csv } => {
            let report = io::import_birthdays_csv(&csv)?;
            if report.rejected.is_empty() {
                println!("OK: {} row(s)", report.records.len());
                0
            } else {
                eprintln!("Found {} rejected row(s)", report.rejected.len());
                for r in &report.rejected {
                    eprintln!("line {}: {:?} {:?}: {}", r.line, r.name, r.date, r.error);
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::InitConfig => {
            storage.save(&config)?;
            println!("Wrote {}", storage.path().display());
            0
        }
    };

    std::process::exit(code);
}

/// Charge le CSV (fichier absent = tableau vide) et classe les entrées.
fn load_ranked(engine: &RecurrenceEngine, csv: &str, now: DateTime<Utc>) -> Result<Vec<Upcoming>> {
    if !Path::new(csv).exists() {
        eprintln!("Warning: {csv} not found, starting with an empty board");
        return Ok(Vec::new());
    }
    let report = io::import_birthdays_csv(csv)?;
    if !report.rejected.is_empty() {
        eprintln!("Warning: skipped {} row(s) (see `check`)", report.rejected.len());
    }
    Ok(engine.rank(&report.records, now))
}

fn print_summary(summary: &BoardSummary) {
    let next = match &summary.next {
        Some(n) => format!("{} ({}, in {}d)", n.date.format("%b %d"), n.name, n.days_until),
        None => "—".to_string(),
    };
    println!(
        "Total: {} | Today: {} | Next: {} | ≤ {} days: {}",
        summary.total, summary.today, next, summary.window_days, summary.within_window
    );
}
