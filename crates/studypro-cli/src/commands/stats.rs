//! Dashboard statistics commands.

use clap::Subcommand;
use studypro_core::{
    DashboardSummary, StudySessionStore, SubjectStats, SubjectStore, TaskStats, TaskStore,
};

use crate::common::{
    load_collection, open_kv, print_json, today, CliResult, SESSIONS_KEY, SUBJECTS_KEY, TASKS_KEY,
};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Full dashboard summary across tasks, subjects and sessions
    Dashboard,
    /// Task counts only
    Tasks,
    /// Subject statistics only
    Subjects,
}

pub fn run(action: StatsAction) -> CliResult {
    let kv = open_kv()?;
    let tasks: TaskStore = load_collection(&kv, TASKS_KEY)?;
    let subjects: SubjectStore = load_collection(&kv, SUBJECTS_KEY)?;
    let sessions: StudySessionStore = load_collection(&kv, SESSIONS_KEY)?;

    match action {
        StatsAction::Dashboard => {
            let summary = DashboardSummary::compute(&tasks, &subjects, &sessions, today());
            print_json(&summary)?;
        }
        StatsAction::Tasks => print_json(&TaskStats::compute(&tasks, today()))?,
        StatsAction::Subjects => print_json(&SubjectStats::compute(&subjects))?,
    }
    Ok(())
}
