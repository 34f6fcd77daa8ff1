//! Dashboard summary: one fold over each collection, computed on read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{self, StudySession};
use crate::store::RecordStore;
use crate::subject::{Subject, SubjectStats};
use crate::task::{Task, TaskStats};

/// Everything the dashboard stats cards show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Minutes of study scheduled for today.
    pub today_study_minutes: u32,
    pub sessions_today: usize,
    pub total_sessions: usize,
    pub pending_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    /// Mean subject progress, rounded.
    pub average_subject_progress: u32,
}

impl DashboardSummary {
    pub fn compute(
        tasks: &RecordStore<Task>,
        subjects: &RecordStore<Subject>,
        sessions: &RecordStore<StudySession>,
        today: NaiveDate,
    ) -> Self {
        let task_stats = TaskStats::compute(tasks, today);
        let subject_stats = SubjectStats::compute(subjects);
        Self {
            today_study_minutes: calendar::minutes_on(sessions, today),
            sessions_today: calendar::sessions_on(sessions, today).count(),
            total_sessions: sessions.len(),
            pending_tasks: task_stats.pending,
            completed_tasks: task_stats.completed,
            overdue_tasks: task_stats.overdue,
            average_subject_progress: subject_stats.average_progress,
        }
    }
}
