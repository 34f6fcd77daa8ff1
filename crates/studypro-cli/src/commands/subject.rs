//! Subject management commands.

use clap::Subcommand;
use studypro_core::subject::SubjectDraft;
use studypro_core::{Difficulty, Priority, SubjectStats, SubjectStore};

use crate::common::{
    load_collection, open_kv, parse_id, print_json, save_collection, CliResult, SUBJECTS_KEY,
};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Create a new subject
    Create {
        /// Subject name
        name: String,
        /// Card accent color (default: purple)
        #[arg(long, default_value = "purple")]
        color: String,
        /// Target study hours
        #[arg(long, default_value = "0")]
        target_hours: u32,
        /// Comma-separated topic list
        #[arg(long)]
        topics: Option<String>,
        /// Difficulty: beginner, intermediate, advanced or expert
        #[arg(long, default_value = "beginner")]
        difficulty: String,
        /// Priority: low, medium or high
        #[arg(long, default_value = "medium")]
        priority: String,
    },
    /// List subjects
    List,
    /// Update a subject
    Update {
        /// Subject ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New progress (0-100, clamped)
        #[arg(long)]
        progress: Option<u8>,
        /// New target hours
        #[arg(long)]
        target_hours: Option<u32>,
        /// Add studied hours
        #[arg(long)]
        add_hours: Option<u32>,
        /// Increment completed session count
        #[arg(long)]
        inc_sessions: Option<u32>,
        /// Comma-separated topic list (replaces existing)
        #[arg(long)]
        topics: Option<String>,
        /// New difficulty
        #[arg(long)]
        difficulty: Option<String>,
        /// New priority
        #[arg(long)]
        priority: Option<String>,
    },
    /// Delete a subject
    Delete {
        /// Subject ID
        id: String,
    },
    /// Board-wide statistics (count, average progress, hour totals)
    Stats,
}

fn parse_difficulty(raw: &str) -> Difficulty {
    match raw {
        "intermediate" => Difficulty::Intermediate,
        "advanced" => Difficulty::Advanced,
        "expert" => Difficulty::Expert,
        _ => Difficulty::Beginner,
    }
}

fn parse_priority(raw: &str) -> Priority {
    match raw {
        "low" => Priority::Low,
        "high" => Priority::High,
        _ => Priority::Medium,
    }
}

fn parse_topics(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn run(action: SubjectAction) -> CliResult {
    let kv = open_kv()?;
    let mut subjects: SubjectStore = load_collection(&kv, SUBJECTS_KEY)?;

    match action {
        SubjectAction::Create {
            name,
            color,
            target_hours,
            topics,
            difficulty,
            priority,
        } => {
            let subject = subjects.add(SubjectDraft {
                name,
                color,
                target_hours,
                topics: topics.as_deref().map(parse_topics).unwrap_or_default(),
                difficulty: parse_difficulty(&difficulty),
                priority: parse_priority(&priority),
            });
            println!("Subject created: {}", subject.id);
            print_json(subject)?;
            save_collection(&kv, SUBJECTS_KEY, &subjects)?;
        }
        SubjectAction::List => {
            let listed: Vec<_> = subjects.iter().collect();
            print_json(&listed)?;
        }
        SubjectAction::Update {
            id,
            name,
            progress,
            target_hours,
            add_hours,
            inc_sessions,
            topics,
            difficulty,
            priority,
        } => {
            let subject = subjects.update(parse_id(&id)?, |subject| {
                if let Some(n) = name {
                    subject.name = n;
                }
                if let Some(p) = progress {
                    subject.set_progress(p);
                }
                if let Some(t) = target_hours {
                    subject.target_hours = t;
                }
                if let Some(h) = add_hours {
                    subject.total_hours += h;
                }
                if let Some(s) = inc_sessions {
                    subject.sessions_completed += s;
                }
                if let Some(t) = topics {
                    subject.topics = parse_topics(&t);
                }
                if let Some(d) = difficulty {
                    subject.difficulty = parse_difficulty(&d);
                }
                if let Some(p) = priority {
                    subject.priority = parse_priority(&p);
                }
            })?;
            println!("Subject updated:");
            print_json(subject)?;
            save_collection(&kv, SUBJECTS_KEY, &subjects)?;
        }
        SubjectAction::Delete { id } => {
            if subjects.remove(parse_id(&id)?) {
                println!("Subject deleted: {id}");
                save_collection(&kv, SUBJECTS_KEY, &subjects)?;
            } else {
                println!("Subject not found: {id}");
            }
        }
        SubjectAction::Stats => {
            print_json(&SubjectStats::compute(&subjects))?;
        }
    }
    Ok(())
}
