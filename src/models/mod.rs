pub mod balance;
pub mod entry;
pub mod lenient;
pub mod settings;
pub mod timer_state;

pub use balance::{ShiftBalance, WorkBalanceResult};
pub use entry::Entry;
pub use settings::Settings;
pub use timer_state::{TimerPhase, TimerState};
