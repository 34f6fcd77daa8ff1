//! Subject records and progress tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Record, RecordId, RecordStore};
use crate::task::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Beginner
    }
}

/// One subject on the progress board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: RecordId,
    pub name: String,
    /// Accent color token for the card (e.g. "purple").
    pub color: String,
    /// 0..=100.
    pub progress: u8,
    pub total_hours: u32,
    pub target_hours: u32,
    pub sessions_completed: u32,
    pub next_session: Option<DateTime<Utc>>,
    /// Ordered list of topic names.
    pub topics: Vec<String>,
    pub difficulty: Difficulty,
    pub priority: Priority,
}

impl Subject {
    /// Clamp and set progress.
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
    }

    /// 0..=100 of target hours already studied.
    pub fn hours_progress_pct(&self) -> u32 {
        if self.target_hours == 0 {
            return 0;
        }
        (self.total_hours * 100 / self.target_hours).min(100)
    }
}

/// Caller-supplied fields for a new subject.
///
/// New subjects start at zero progress, zero hours, and zero sessions.
#[derive(Debug, Clone, Default)]
pub struct SubjectDraft {
    pub name: String,
    pub color: String,
    pub target_hours: u32,
    pub topics: Vec<String>,
    pub difficulty: Difficulty,
    pub priority: Priority,
}

impl Record for Subject {
    type Draft = SubjectDraft;
    const COLLECTION: &'static str = "subjects";

    fn create(id: RecordId, draft: SubjectDraft) -> Self {
        Self {
            id,
            name: draft.name,
            color: draft.color,
            progress: 0,
            total_hours: 0,
            target_hours: draft.target_hours,
            sessions_completed: 0,
            next_session: None,
            topics: draft.topics,
            difficulty: draft.difficulty,
            priority: draft.priority,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Derived subject statistics. Recomputed on read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectStats {
    pub count: usize,
    /// Mean progress rounded to the nearest integer; 0 for an empty board.
    pub average_progress: u32,
    pub total_hours: u32,
    pub total_target_hours: u32,
    pub total_sessions: u32,
}

impl SubjectStats {
    pub fn compute(store: &RecordStore<Subject>) -> Self {
        let (count, progress_sum, hours, target, sessions) = store.aggregate(
            (0usize, 0u32, 0u32, 0u32, 0u32),
            |(count, progress, hours, target, sessions), s| {
                (
                    count + 1,
                    progress + u32::from(s.progress),
                    hours + s.total_hours,
                    target + s.target_hours,
                    sessions + s.sessions_completed,
                )
            },
        );
        let average_progress = if count == 0 {
            0
        } else {
            // Round to nearest, matching the dashboard display.
            (progress_sum as f64 / count as f64).round() as u32
        };
        Self {
            count,
            average_progress,
            total_hours: hours,
            total_target_hours: target,
            total_sessions: sessions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, target_hours: u32) -> SubjectDraft {
        SubjectDraft {
            name: name.to_string(),
            color: "purple".to_string(),
            target_hours,
            ..SubjectDraft::default()
        }
    }

    #[test]
    fn new_subjects_start_from_zero() {
        let mut store = RecordStore::<Subject>::new();
        let subject = store.add(draft("Advanced Mathematics", 60));
        assert_eq!(subject.progress, 0);
        assert_eq!(subject.total_hours, 0);
        assert_eq!(subject.sessions_completed, 0);
        assert!(subject.next_session.is_none());
    }

    #[test]
    fn progress_is_clamped() {
        let mut store = RecordStore::<Subject>::new();
        let id = store.add(draft("Physics", 50)).id;
        let subject = store.update(id, |s| s.set_progress(150)).unwrap();
        assert_eq!(subject.progress, 100);
    }

    #[test]
    fn hours_progress_handles_zero_target() {
        let mut store = RecordStore::<Subject>::new();
        let id = store.add(draft("Physics", 0)).id;
        assert_eq!(store.get(id).unwrap().hours_progress_pct(), 0);
    }

    #[test]
    fn average_progress_rounds_to_nearest() {
        let mut store = RecordStore::<Subject>::new();
        for (name, progress) in [
            ("Mathematics", 85u8),
            ("Physics", 72),
            ("Chemistry", 91),
            ("Biology", 67),
        ] {
            let id = store.add(draft(name, 40)).id;
            store.update(id, |s| s.set_progress(progress)).unwrap();
        }

        let stats = SubjectStats::compute(&store);
        assert_eq!(stats.count, 4);
        // round((85 + 72 + 91 + 67) / 4) = round(78.75) = 79
        assert_eq!(stats.average_progress, 79);
    }

    #[test]
    fn stats_on_empty_board() {
        let store = RecordStore::<Subject>::new();
        let stats = SubjectStats::compute(&store);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average_progress, 0);
        assert_eq!(stats.total_hours, 0);
    }

    #[test]
    fn stats_sum_hours_and_sessions() {
        let mut store = RecordStore::<Subject>::new();
        let a = store.add(draft("Math", 60)).id;
        let b = store.add(draft("Physics", 50)).id;
        store
            .update(a, |s| {
                s.total_hours = 45;
                s.sessions_completed = 18;
            })
            .unwrap();
        store
            .update(b, |s| {
                s.total_hours = 32;
                s.sessions_completed = 14;
            })
            .unwrap();

        let stats = SubjectStats::compute(&store);
        assert_eq!(stats.total_hours, 77);
        assert_eq!(stats.total_target_hours, 110);
        assert_eq!(stats.total_sessions, 32);
    }
}
