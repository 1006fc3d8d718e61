use crate::models::Entry;
use crate::utils::formatting::format_balance;
use crate::utils::time::format_minutes_hhmm;
use serde::Serialize;

/// Flat export row: the stored entry plus its human-readable durations.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EntryExport {
    pub id: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub break_minutes: i64,
    pub worked_minutes: i64,
    pub diff_minutes: i64,
    pub worked: String,
    pub diff: String,
}

impl From<&Entry> for EntryExport {
    fn from(e: &Entry) -> Self {
        Self {
            id: e.id,
            date: e.date.clone(),
            start_time: e.start_time.clone(),
            end_time: e.end_time.clone(),
            break_minutes: e.break_minutes,
            worked_minutes: e.worked_minutes,
            diff_minutes: e.diff_minutes,
            worked: format_minutes_hhmm(e.worked_minutes),
            diff: format_balance(e.diff_minutes),
        }
    }
}
