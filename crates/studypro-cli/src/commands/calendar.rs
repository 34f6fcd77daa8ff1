//! Study calendar commands.

use chrono::{NaiveDate, NaiveTime};
use clap::Subcommand;
use studypro_core::calendar::{self, SessionDraft, SessionKind};
use studypro_core::StudySessionStore;

use crate::common::{
    load_collection, open_kv, parse_id, print_json, save_collection, CliResult, SESSIONS_KEY,
};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Add a study session
    Add {
        /// Session date (YYYY-MM-DD)
        date: NaiveDate,
        /// Start time (HH:MM)
        #[arg(long)]
        time: NaiveTime,
        /// Subject name (free text)
        #[arg(long)]
        subject: String,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        /// Kind: study, review, lab or practice (default: study)
        #[arg(long, default_value = "study")]
        kind: String,
    },
    /// List sessions, grouped by date
    List {
        /// Only show one day
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Print the 6-week month grid with per-day session counts
    Month {
        /// Year (e.g. 2024)
        year: i32,
        /// Month (1-12)
        month: u32,
    },
    /// Delete a session
    Delete {
        /// Session ID
        id: String,
    },
}

fn parse_kind(raw: &str) -> SessionKind {
    match raw {
        "review" => SessionKind::Review,
        "lab" => SessionKind::Lab,
        "practice" => SessionKind::Practice,
        _ => SessionKind::Study,
    }
}

pub fn run(action: CalendarAction) -> CliResult {
    let kv = open_kv()?;
    let mut sessions: StudySessionStore = load_collection(&kv, SESSIONS_KEY)?;

    match action {
        CalendarAction::Add {
            date,
            time,
            subject,
            duration,
            kind,
        } => {
            let session = sessions.add(SessionDraft {
                date,
                time,
                subject,
                duration_min: duration,
                kind: parse_kind(&kind),
            });
            println!("Session added: {}", session.id);
            print_json(session)?;
            save_collection(&kv, SESSIONS_KEY, &sessions)?;
        }
        CalendarAction::List { date } => match date {
            Some(date) => {
                let day: Vec<_> = calendar::sessions_on(&sessions, date).collect();
                print_json(&day)?;
            }
            None => {
                let grouped = calendar::sessions_by_date(&sessions);
                print_json(&grouped)?;
            }
        },
        CalendarAction::Month { year, month } => {
            let grid = calendar::month_grid(year, month)
                .ok_or_else(|| format!("invalid month: {year}-{month}"))?;
            let cells: Vec<_> = grid
                .into_iter()
                .map(|day| {
                    serde_json::json!({
                        "date": day,
                        "sessions": calendar::sessions_on(&sessions, day).count(),
                        "minutes": calendar::minutes_on(&sessions, day),
                    })
                })
                .collect();
            print_json(&cells)?;
        }
        CalendarAction::Delete { id } => {
            if sessions.remove(parse_id(&id)?) {
                println!("Session deleted: {id}");
                save_collection(&kv, SESSIONS_KEY, &sessions)?;
            } else {
                println!("Session not found: {id}");
            }
        }
    }
    Ok(())
}
