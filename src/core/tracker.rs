//! The controller: owns the application state and the injected capabilities.
//!
//! Every mutating operation follows the same shape: read the clock, delegate
//! to the timer or the ledger, save a full snapshot, write an audit line.
//! Persistence problems are logged and swallowed, the in-memory state stays
//! authoritative.

use crate::core::calculator::{calculate_live_work_balance, calculate_shift_balance};
use crate::core::capabilities::{Clock, Confirm};
use crate::core::ledger::{EntryLedger, LedgerOutcome};
use crate::core::timer::{LiveSnapshot, TimerStateMachine};
use crate::errors::{AppError, AppResult};
use crate::models::{Entry, Settings, ShiftBalance, TimerPhase, TimerState, WorkBalanceResult};
use crate::storage::{KEY_ENTRIES, KEY_SETTINGS, KEY_TIMER_STATE, KeyValueStore};
use crate::utils::date::{DateKey, parse_date_key};
use crate::utils::time::{
    MAX_DURATION_MINUTES, MS_PER_MINUTE, format_clock, format_minutes_hhmm, parse_time,
    parse_time_to_minutes, timestamp_today_at,
};
use serde_json::Value;

pub const OVERWRITE_TITLE: &str = "Overwrite entry";
pub const OVERWRITE_MESSAGE: &str = "An entry already exists for this date. Overwrite?";
pub const CLEAR_TITLE: &str = "Clear history";
pub const CLEAR_MESSAGE: &str = "Delete all entries?";

/// Everything the application remembers between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub settings: Settings,
    pub ledger: EntryLedger,
    pub timer: TimerStateMachine,
}

/// A stopped timer that has not been turned into an entry yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingShift {
    pub date: DateKey,
    pub start_time: String,
    pub end_time: String,
    pub pause_minutes: i64,
    pub balance: ShiftBalance,
}

/// Result of `commit` / `add_entry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    pub outcome: LedgerOutcome,
    pub entry: Entry,
    /// Suggested date for the next manual entry (entry date + 1 day).
    pub next_date: String,
}

pub struct Tracker<S, C, K> {
    state: AppState,
    store: S,
    confirm: C,
    clock: K,
}

impl<S, C, K> Tracker<S, C, K>
where
    S: KeyValueStore,
    C: Confirm,
    K: Clock,
{
    /// Builds a tracker and loads whatever the store holds.
    pub fn open(store: S, confirm: C, clock: K) -> Self {
        let mut tracker = Self {
            state: AppState::default(),
            store,
            confirm,
            clock,
        };
        tracker.load();
        tracker
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn ledger(&self) -> &EntryLedger {
        &self.state.ledger
    }

    pub fn timer(&self) -> &TimerStateMachine {
        &self.state.timer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Reads the three records. Anything missing or unreadable falls back to
    /// its default; this never fails.
    pub fn load(&mut self) {
        let mut values = match self.store.get(&[KEY_SETTINGS, KEY_ENTRIES, KEY_TIMER_STATE]) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, backend = self.store.backend_name(), "load failed, using defaults");
                self.state = AppState::default();
                return;
            }
        };

        let settings = values
            .remove(KEY_SETTINGS)
            .flatten()
            .map(decode_settings)
            .unwrap_or_default();
        let entries = values
            .remove(KEY_ENTRIES)
            .flatten()
            .map(decode_entries)
            .unwrap_or_default();
        let timer = values
            .remove(KEY_TIMER_STATE)
            .flatten()
            .map(decode_timer)
            .unwrap_or_default();

        tracing::debug!(
            entries = entries.len(),
            phase = timer.phase().as_str(),
            "state loaded"
        );

        self.state = AppState {
            settings,
            ledger: EntryLedger::from_entries(entries),
            timer: TimerStateMachine::restore(timer),
        };
    }

    /// Re-reads only the timer record (another process may have changed it).
    pub fn reload_timer(&mut self) {
        match self.store.get(&[KEY_TIMER_STATE]) {
            Ok(mut values) => {
                let timer = values
                    .remove(KEY_TIMER_STATE)
                    .flatten()
                    .map(decode_timer)
                    .unwrap_or_default();
                self.state.timer = TimerStateMachine::restore(timer);
            }
            Err(e) => tracing::warn!(error = %e, "timer reload failed, keeping in-memory state"),
        }
    }

    /// Writes a full snapshot of all three records.
    pub fn save(&mut self) {
        let items = match self.snapshot_values() {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "state could not be serialized");
                return;
            }
        };

        if let Err(e) = self.store.set(items) {
            tracing::warn!(error = %e, backend = self.store.backend_name(), "save failed");
        }
    }

    fn snapshot_values(&self) -> AppResult<Vec<(String, Value)>> {
        Ok(vec![
            (KEY_SETTINGS.to_string(), serde_json::to_value(self.state.settings)?),
            (KEY_ENTRIES.to_string(), serde_json::to_value(self.state.ledger.entries())?),
            (KEY_TIMER_STATE.to_string(), serde_json::to_value(self.state.timer.state())?),
        ])
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.store.audit(operation, target, message) {
            tracing::warn!(operation, error = %e, "audit write failed");
        }
    }

    // ---------------------------------------------------------------------
    // Timer
    // ---------------------------------------------------------------------

    /// Starts the timer, now or at a manual "HH:MM" today.
    pub fn start(&mut self, manual_start: Option<&str>) -> AppResult<i64> {
        if let Some(t) = manual_start
            && parse_time(t).is_none()
        {
            return Err(AppError::InvalidTime(t.to_string()));
        }

        let now = self.clock.now_ms();
        let start = self.state.timer.start(now, manual_start)?;
        self.save();
        self.audit("start", "timer", &format!("Started at {}", format_clock(start)));
        Ok(start)
    }

    pub fn pause(&mut self) -> AppResult<()> {
        let now = self.clock.now_ms();
        self.state.timer.pause(now)?;
        self.save();
        self.audit("pause", "timer", &format!("Paused at {}", format_clock(now)));
        Ok(())
    }

    /// Returns the length of the pause just ended, in ms.
    pub fn resume(&mut self) -> AppResult<i64> {
        let now = self.clock.now_ms();
        let paused = self.state.timer.resume(now)?;
        self.save();
        self.audit(
            "resume",
            "timer",
            &format!("Resumed after {} min", paused / MS_PER_MINUTE),
        );
        Ok(paused)
    }

    pub fn toggle_pause(&mut self) -> AppResult<TimerPhase> {
        match self.state.timer.phase() {
            TimerPhase::Paused => self.resume().map(|_| TimerPhase::Running),
            _ => self.pause().map(|_| TimerPhase::Paused),
        }
    }

    pub fn stop(&mut self) -> AppResult<()> {
        let now = self.clock.now_ms();
        self.state.timer.stop(now)?;
        self.save();
        let pause = self.state.timer.pause_minutes(now, false);
        self.audit(
            "stop",
            "timer",
            &format!("Stopped at {} ({} min pause)", format_clock(now), pause),
        );
        Ok(())
    }

    /// Live figures, or `None` when no shift has been started.
    pub fn snapshot(&self) -> Option<LiveSnapshot> {
        self.state
            .timer
            .snapshot(self.clock.now_ms(), &self.state.settings)
    }

    /// Figures of a stopped, not yet committed timer.
    pub fn stopped_summary(&self) -> Option<PendingShift> {
        let timer = &self.state.timer;
        if !timer.has_uncommitted_shift() {
            return None;
        }

        let state = timer.state();
        let start_ms = state.start_timestamp?;
        let stop_ms = state.stop_timestamp.unwrap_or_else(|| self.clock.now_ms());
        let start_time = format_clock(start_ms);
        let end_time = format_clock(stop_ms);
        let pause_minutes = state.total_paused_ms.max(0) / MS_PER_MINUTE;

        let balance = calculate_shift_balance(
            &start_time,
            &end_time,
            self.state.settings.daily_target_minutes,
            pause_minutes,
        );

        Some(PendingShift {
            date: DateKey::from_timestamp(start_ms),
            start_time,
            end_time,
            pause_minutes,
            balance,
        })
    }

    /// When the target will be reached, for a manual start time, the running
    /// shift, or a shift starting right now.
    pub fn expected_end(&self, manual_start: Option<&str>) -> WorkBalanceResult {
        let now = self.clock.now_ms();
        let timer = &self.state.timer;
        let has_start = timer.state().start_timestamp.is_some();

        let start = match manual_start {
            Some(t) if !t.trim().is_empty() => timestamp_today_at(now, parse_time_to_minutes(t)),
            _ => timer.state().start_timestamp.unwrap_or(now),
        };
        let manual_break = if has_start {
            timer.pause_minutes(now, true)
        } else {
            0
        };

        calculate_live_work_balance(
            start,
            now.max(start),
            self.state.settings.daily_target_minutes,
            manual_break,
        )
    }

    // ---------------------------------------------------------------------
    // Entries
    // ---------------------------------------------------------------------

    /// Turns the stopped timer into an entry for the start's local date.
    pub fn commit(&mut self) -> AppResult<EntryOutcome> {
        if self.state.timer.is_running() {
            return Err(AppError::Timer("stop the timer before committing".into()));
        }
        let pending = self
            .stopped_summary()
            .ok_or_else(|| AppError::Timer("no stopped shift to commit".into()))?;

        let entry = Entry::from_shift(
            self.clock.now_ms(),
            pending.date,
            &pending.start_time,
            &pending.end_time,
            &pending.balance,
        );
        self.record(entry, pending.date)
    }

    /// Records a manual entry. Without `extra_break`, the pause minutes of a
    /// stopped timer are used, otherwise none.
    pub fn add_entry(
        &mut self,
        date: &str,
        start_time: &str,
        end_time: &str,
        extra_break: Option<i64>,
    ) -> AppResult<EntryOutcome> {
        let key = parse_date_key(date).ok_or_else(|| AppError::InvalidDate(date.to_string()))?;
        for t in [start_time, end_time] {
            if parse_time(t).is_none() {
                return Err(AppError::InvalidTime(t.to_string()));
            }
        }

        let extra = extra_break.unwrap_or_else(|| {
            if self.state.timer.has_uncommitted_shift() {
                self.state.timer.state().total_paused_ms.max(0) / MS_PER_MINUTE
            } else {
                0
            }
        });

        let balance = calculate_shift_balance(
            start_time,
            end_time,
            self.state.settings.daily_target_minutes,
            extra,
        );
        let entry = Entry::from_shift(self.clock.now_ms(), key, start_time, end_time, &balance);
        self.record(entry, key)
    }

    fn record(&mut self, entry: Entry, date: DateKey) -> AppResult<EntryOutcome> {
        let confirm = &self.confirm;
        let outcome = self.state.ledger.add_or_replace(entry.clone(), |existing| {
            tracing::debug!(date = %existing.date, id = existing.id, "entry exists for date");
            confirm.confirm(OVERWRITE_MESSAGE, OVERWRITE_TITLE)
        });

        let next_date = date
            .add_days(1)
            .map(|d| d.to_string())
            .unwrap_or_else(|| date.to_string());

        if outcome == LedgerOutcome::Declined {
            tracing::info!(date = %entry.date, "overwrite declined");
            return Ok(EntryOutcome {
                outcome,
                entry,
                next_date,
            });
        }

        if self.state.timer.has_uncommitted_shift() {
            self.state.timer.reset();
        }
        self.save();

        let op = match outcome {
            LedgerOutcome::Replaced => "edit",
            _ => "add",
        };
        self.audit(
            op,
            &entry.date,
            &format!(
                "{}-{} worked {} diff {}",
                entry.start_time,
                entry.end_time,
                format_minutes_hhmm(entry.worked_minutes),
                entry.diff_minutes
            ),
        );

        Ok(EntryOutcome {
            outcome,
            entry,
            next_date,
        })
    }

    pub fn delete_entry(&mut self, id: i64) -> AppResult<Entry> {
        let removed = self
            .state
            .ledger
            .delete(id)
            .ok_or(AppError::EntryNotFound(id))?;
        self.save();
        self.audit("del", &removed.date, &format!("Deleted entry {id}"));
        Ok(removed)
    }

    /// Deletes every entry after confirmation. `None` when declined.
    pub fn clear_entries(&mut self) -> Option<usize> {
        if !self.confirm.confirm(CLEAR_MESSAGE, CLEAR_TITLE) {
            tracing::info!("clear declined");
            return None;
        }

        let removed = self.state.ledger.clear();
        self.save();
        self.audit("clear", "entries", &format!("Deleted {removed} entries"));
        Some(removed)
    }

    /// Changes the daily target and/or the default break. Each must lie
    /// within `0..=MAX_DURATION_MINUTES`.
    pub fn update_settings(
        &mut self,
        daily_target_minutes: Option<i64>,
        default_break_minutes: Option<i64>,
    ) -> AppResult<Settings> {
        for v in [daily_target_minutes, default_break_minutes].into_iter().flatten() {
            if !(0..=MAX_DURATION_MINUTES).contains(&v) {
                return Err(AppError::InvalidDuration(v.to_string()));
            }
        }

        let settings = &mut self.state.settings;
        if let Some(t) = daily_target_minutes {
            settings.daily_target_minutes = t;
        }
        if let Some(b) = default_break_minutes {
            settings.default_break_minutes = b;
        }
        let updated = *settings;

        self.save();
        self.audit(
            "settings",
            "settings",
            &format!(
                "target {} min, break {} min",
                updated.daily_target_minutes, updated.default_break_minutes
            ),
        );
        Ok(updated)
    }

    pub fn total_balance(&self) -> i64 {
        self.state.ledger.total_balance()
    }
}

fn decode_settings(v: Value) -> Settings {
    match serde_json::from_value::<Settings>(v) {
        Ok(s) => s.normalized(),
        Err(e) => {
            tracing::warn!(error = %e, "stored settings unreadable, using defaults");
            Settings::default()
        }
    }
}

/// Non-array values give an empty list; non-object elements are skipped.
fn decode_entries(v: Value) -> Vec<Entry> {
    let Value::Array(items) = v else {
        tracing::warn!("stored entries are not a list, ignoring");
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Entry>(item) {
            Ok(e) => Some(e),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .collect()
}

fn decode_timer(v: Value) -> TimerState {
    serde_json::from_value::<TimerState>(v).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "stored timer state unreadable, resetting");
        TimerState::default()
    })
}
