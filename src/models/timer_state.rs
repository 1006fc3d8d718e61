use crate::models::lenient;
use serde::{Deserialize, Serialize};

/// Lifecycle phase derived from the two flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerPhase {
    Stopped,
    Running,
    Paused,
}

impl TimerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Stopped => "stopped",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
        }
    }
}

/// Persisted stopwatch state (`timerState` key).
///
/// Invariants after [`TimerState::normalized`]:
/// - `is_paused` implies `is_running`
/// - `pause_start_timestamp` is set iff paused
/// - `total_paused_ms` is never negative
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_running: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_paused: bool,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub start_timestamp: Option<i64>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub pause_start_timestamp: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub total_paused_ms: i64,
    /// Set by stop so the shift can be committed later, possibly by another process.
    #[serde(
        default,
        deserialize_with = "lenient::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub stop_timestamp: Option<i64>,
}

impl TimerState {
    pub fn phase(&self) -> TimerPhase {
        match (self.is_running, self.is_paused) {
            (true, true) => TimerPhase::Paused,
            (true, false) => TimerPhase::Running,
            _ => TimerPhase::Stopped,
        }
    }

    /// Repairs a restored state so the invariants hold again.
    pub fn normalized(mut self) -> Self {
        if self.start_timestamp.is_none() {
            self.is_running = false;
        }
        self.is_paused = self.is_paused && self.is_running && self.pause_start_timestamp.is_some();
        if !self.is_paused {
            self.pause_start_timestamp = None;
        }
        if self.is_running {
            self.stop_timestamp = None;
        }
        self.total_paused_ms = self.total_paused_ms.max(0);
        self
    }
}
