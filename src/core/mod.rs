pub mod calculator;
pub mod capabilities;
pub mod config;
pub mod ledger;
pub mod log;
pub mod sampler;
pub mod timer;
pub mod tracker;

pub use capabilities::{AutoConfirm, Clock, Confirm, ManualClock, SystemClock};
pub use ledger::{EntryLedger, LedgerOutcome};
pub use sampler::{SampleRun, Sampler, SleepTicker, StopReason, Ticker};
pub use timer::{LiveSnapshot, TimerStateMachine};
pub use tracker::{AppState, EntryOutcome, PendingShift, Tracker};
