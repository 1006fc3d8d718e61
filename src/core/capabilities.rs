//! Host capabilities injected into the tracker: a clock and a yes/no prompt.
//! Persistence lives in [`crate::storage`].

use std::cell::Cell;

pub trait Clock {
    /// Current time in epoch milliseconds.
    fn now_ms(&self) -> i64;
}

pub trait Confirm {
    /// Asks the user a yes/no question. `false` abandons the pending mutation.
    fn confirm(&self, message: &str, title: &str) -> bool;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

impl<T: Confirm + ?Sized> Confirm for &T {
    fn confirm(&self, message: &str, title: &str) -> bool {
        (**self).confirm(message, title)
    }
}

impl<T: Confirm + ?Sized> Confirm for Box<T> {
    fn confirm(&self, message: &str, title: &str) -> bool {
        (**self).confirm(message, title)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now: Cell::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now.set(now_ms);
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.advance_ms(minutes * 60_000);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

/// Answers every question the same way (`--yes`, or non-interactive runs).
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, message: &str, title: &str) -> bool {
        tracing::debug!(title, message, answer = self.0, "auto-confirmed");
        self.0
    }
}
