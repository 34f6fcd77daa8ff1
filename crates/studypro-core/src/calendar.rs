//! Study calendar sessions and the month-grid view.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::store::{Record, RecordId, RecordStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Study,
    Review,
    Lab,
    Practice,
}

impl Default for SessionKind {
    fn default() -> Self {
        SessionKind::Study
    }
}

/// One scheduled study session.
///
/// `date` is the calendar date-key; grouping by date is a derived index,
/// not stored order. `subject` is free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySession {
    pub id: RecordId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub subject: String,
    pub duration_min: u32,
    pub kind: SessionKind,
}

/// Caller-supplied fields for a new session.
#[derive(Debug, Clone, Default)]
pub struct SessionDraft {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub subject: String,
    pub duration_min: u32,
    pub kind: SessionKind,
}

impl Record for StudySession {
    type Draft = SessionDraft;
    const COLLECTION: &'static str = "sessions";

    fn create(id: RecordId, draft: SessionDraft) -> Self {
        Self {
            id,
            date: draft.date,
            time: draft.time,
            subject: draft.subject,
            duration_min: draft.duration_min,
            kind: draft.kind,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Sessions grouped by date-key. Within a day, insertion order is kept.
pub fn sessions_by_date(
    store: &RecordStore<StudySession>,
) -> BTreeMap<NaiveDate, Vec<&StudySession>> {
    store.aggregate(BTreeMap::new(), |mut index, session| {
        index
            .entry(session.date)
            .or_insert_with(Vec::new)
            .push(session);
        index
    })
}

/// Sessions on one day, insertion order.
pub fn sessions_on<'a>(
    store: &'a RecordStore<StudySession>,
    date: NaiveDate,
) -> impl Iterator<Item = &'a StudySession> {
    store.filter(move |s| s.date == date)
}

/// Total scheduled minutes on one day.
pub fn minutes_on(store: &RecordStore<StudySession>, date: NaiveDate) -> u32 {
    sessions_on(store, date).map(|s| s.duration_min).sum()
}

/// The 42-cell (6-week) month grid, starting on the Sunday on or before the
/// first of the month. Leading and trailing cells belong to the adjacent
/// months.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let start = first - Days::new(u64::from(first.weekday().num_days_from_sunday()));
    Some((0..42).map(|i| start + Days::new(i)).collect())
}
