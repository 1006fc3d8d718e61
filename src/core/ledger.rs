//! Finished shifts, one per date, most recent first.

use crate::models::Entry;
use chrono::NaiveDate;

/// What `add_or_replace` did with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOutcome {
    Inserted,
    Replaced,
    /// An entry already existed for the date and the overwrite was not confirmed.
    Declined,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryLedger {
    entries: Vec<Entry>,
}

impl EntryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps loaded entries, restoring the date order.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut ledger = Self { entries };
        ledger.sort();
        ledger
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_by_date(&self, date: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.date == date)
    }

    /// Inserts `entry`, or replaces the entry already recorded for its date
    /// when `confirm_overwrite` agrees. Entries are never merged.
    pub fn add_or_replace<F>(&mut self, entry: Entry, confirm_overwrite: F) -> LedgerOutcome
    where
        F: FnOnce(&Entry) -> bool,
    {
        let outcome = match self.entries.iter().position(|e| e.date == entry.date) {
            Some(idx) => {
                if !confirm_overwrite(&self.entries[idx]) {
                    return LedgerOutcome::Declined;
                }
                self.entries[idx] = entry;
                LedgerOutcome::Replaced
            }
            None => {
                self.entries.insert(0, entry);
                LedgerOutcome::Inserted
            }
        };

        self.sort();
        outcome
    }

    /// Removes the entry with `id`; returns it if there was one.
    pub fn delete(&mut self, id: i64) -> Option<Entry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }

    /// Drops every entry, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    /// All-time overtime (+) or deficit (−) in minutes.
    pub fn total_balance(&self) -> i64 {
        self.entries.iter().map(|e| e.diff_minutes).sum()
    }

    /// Entries whose date falls inside `[from, to]`; unparseable dates are skipped.
    pub fn in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| {
                e.date_key()
                    .map(|d| d.date() >= from && d.date() <= to)
                    .unwrap_or(false)
            })
            .collect()
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| b.date.cmp(&a.date));
    }
}
