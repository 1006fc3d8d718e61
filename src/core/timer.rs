//! Stopwatch lifecycle: Stopped → Running ⇄ Paused → Stopped.
//!
//! Transitions take the current time as a parameter; the machine never reads a
//! clock itself. `total_paused_ms` only changes on pause, resume and stop, so
//! sampling a snapshot any number of times never double-counts a pause.

use crate::core::calculator::live::calculate_live_work_balance;
use crate::errors::{AppError, AppResult};
use crate::models::{Settings, TimerPhase, TimerState, WorkBalanceResult};
use crate::utils::time::{MS_PER_MINUTE, parse_time_to_minutes, timestamp_today_at};
use serde::Serialize;

/// One sample of the running (or stopped, uncommitted) shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSnapshot {
    pub phase: TimerPhase,
    pub sampled_at: i64,
    pub start_timestamp: i64,
    pub total_pause_ms: i64,
    pub balance: WorkBalanceResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerStateMachine {
    state: TimerState,
}

impl TimerStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the machine from a persisted state, repairing broken invariants.
    pub fn restore(state: TimerState) -> Self {
        Self {
            state: state.normalized(),
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> TimerPhase {
        self.state.phase()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Stopped, but a start timestamp is still waiting to become an entry.
    pub fn has_uncommitted_shift(&self) -> bool {
        !self.state.is_running && self.state.start_timestamp.is_some()
    }

    /// Starts the stopwatch. A manual "HH:MM" back-dates the start to that
    /// time of day, today. Returns the start timestamp.
    pub fn start(&mut self, now_ms: i64, manual_start: Option<&str>) -> AppResult<i64> {
        if self.state.is_running {
            return Err(AppError::Timer("timer is already running".into()));
        }

        let start = match manual_start {
            Some(t) if !t.trim().is_empty() => timestamp_today_at(now_ms, parse_time_to_minutes(t)),
            _ => now_ms,
        };

        self.state = TimerState {
            is_running: true,
            is_paused: false,
            start_timestamp: Some(start),
            pause_start_timestamp: None,
            total_paused_ms: 0,
            stop_timestamp: None,
        };

        tracing::debug!(start, "timer started");
        Ok(start)
    }

    pub fn pause(&mut self, now_ms: i64) -> AppResult<()> {
        match self.phase() {
            TimerPhase::Running => {
                self.state.is_paused = true;
                self.state.pause_start_timestamp = Some(now_ms);
                tracing::debug!(at = now_ms, "timer paused");
                Ok(())
            }
            TimerPhase::Paused => Err(AppError::Timer("timer is already paused".into())),
            TimerPhase::Stopped => Err(AppError::Timer("timer is not running".into())),
        }
    }

    /// Ends the current pause. Returns the length of that pause in ms.
    pub fn resume(&mut self, now_ms: i64) -> AppResult<i64> {
        if self.phase() != TimerPhase::Paused {
            return Err(AppError::Timer("timer is not paused".into()));
        }

        let paused = self.fold_open_pause(now_ms);
        self.state.is_paused = false;
        tracing::debug!(paused_ms = paused, total = self.state.total_paused_ms, "timer resumed");
        Ok(paused)
    }

    /// Single-button behaviour: pause when running, resume when paused.
    pub fn toggle_pause(&mut self, now_ms: i64) -> AppResult<TimerPhase> {
        match self.phase() {
            TimerPhase::Running => self.pause(now_ms)?,
            TimerPhase::Paused => {
                self.resume(now_ms)?;
            }
            TimerPhase::Stopped => return Err(AppError::Timer("timer is not running".into())),
        }
        Ok(self.phase())
    }

    /// Stops the stopwatch. An open pause is folded in first, so no pause
    /// interval is lost. Start and stop timestamps stay until [`Self::reset`].
    pub fn stop(&mut self, now_ms: i64) -> AppResult<()> {
        if !self.state.is_running {
            return Err(AppError::Timer("timer is not running".into()));
        }

        if self.state.is_paused {
            self.fold_open_pause(now_ms);
        }

        self.state.is_running = false;
        self.state.is_paused = false;
        self.state.pause_start_timestamp = None;
        self.state.stop_timestamp = Some(now_ms);

        tracing::debug!(at = now_ms, total_paused_ms = self.state.total_paused_ms, "timer stopped");
        Ok(())
    }

    /// Back to Stopped with everything zeroed (after an entry is committed).
    pub fn reset(&mut self) {
        self.state = TimerState::default();
    }

    fn fold_open_pause(&mut self, now_ms: i64) -> i64 {
        let paused = self
            .state
            .pause_start_timestamp
            .take()
            .map(|since| (now_ms - since).max(0))
            .unwrap_or(0);
        self.state.total_paused_ms += paused;
        paused
    }

    /// Accumulated pause time. With `include_ongoing`, an open pause is added
    /// on the fly without touching the state.
    pub fn total_pause_ms(&self, now_ms: i64, include_ongoing: bool) -> i64 {
        let mut total = self.state.total_paused_ms.max(0);
        if include_ongoing
            && self.state.is_paused
            && let Some(since) = self.state.pause_start_timestamp
        {
            total = total.saturating_add(now_ms.saturating_sub(since).max(0));
        }
        total
    }

    /// Whole pause minutes, as fed to the calculator.
    pub fn pause_minutes(&self, now_ms: i64, include_ongoing: bool) -> i64 {
        self.total_pause_ms(now_ms, include_ongoing) / MS_PER_MINUTE
    }

    /// Live figures at `now_ms`. A stopped shift is frozen at its stop time.
    /// `None` when no shift has been started.
    pub fn snapshot(&self, now_ms: i64, settings: &Settings) -> Option<LiveSnapshot> {
        let start = self.state.start_timestamp?;
        let at = if self.state.is_running {
            now_ms
        } else {
            self.state.stop_timestamp.unwrap_or(now_ms)
        };

        let total_pause_ms = self.total_pause_ms(at, true);
        let balance = calculate_live_work_balance(
            start,
            at,
            settings.daily_target_minutes,
            total_pause_ms / MS_PER_MINUTE,
        );

        Some(LiveSnapshot {
            phase: self.phase(),
            sampled_at: at,
            start_timestamp: start,
            total_pause_ms,
            balance,
        })
    }
}
