//! Study task records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::{Record, RecordId, RecordStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// One task in the task list.
///
/// `subject` is free text -- nothing checks it against the subject
/// collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
    pub subject: String,
    pub completed: bool,
    pub created_at: NaiveDate,
}

impl Task {
    /// Whether this task is past due and still open.
    ///
    /// Pure function of the record's own due date and completion flag.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today && !self.completed
    }
}

/// Caller-supplied fields for a new task. New tasks start uncompleted.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
    pub subject: String,
    pub created_at: NaiveDate,
}

impl Record for Task {
    type Draft = TaskDraft;
    const COLLECTION: &'static str = "tasks";

    fn create(id: RecordId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            due_date: draft.due_date,
            subject: draft.subject,
            completed: false,
            created_at: draft.created_at,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

/// View filter for the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.completed,
            TaskFilter::Completed => task.completed,
        }
    }
}

/// Derived task counts for the stats cards. Recomputed on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
}

impl TaskStats {
    pub fn compute(store: &RecordStore<Task>, today: NaiveDate) -> Self {
        store.aggregate(
            TaskStats {
                total: 0,
                completed: 0,
                pending: 0,
                overdue: 0,
            },
            |mut stats, task| {
                stats.total += 1;
                if task.completed {
                    stats.completed += 1;
                } else {
                    stats.pending += 1;
                }
                if task.is_overdue(today) {
                    stats.overdue += 1;
                }
                stats
            },
        )
    }
}
