//! Periodic re-sampling of the live snapshot.
//!
//! Every interval the sampler asks for a fresh snapshot and hands it to a
//! sink. It never caches figures between ticks: each sample comes from the
//! current state and clock. A `None` sample means the timer stopped, which
//! ends the run before any further tick.

use crate::core::timer::LiveSnapshot;
use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

/// How the sampler waits between ticks.
pub trait Ticker {
    fn wait(&mut self, interval: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SleepTicker;

impl Ticker for SleepTicker {
    fn wait(&mut self, interval: Duration) {
        thread::sleep(interval);
    }
}

impl<F: FnMut(Duration)> Ticker for F {
    fn wait(&mut self, interval: Duration) {
        self(interval)
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The sample source reported no running shift.
    TimerStopped,
    /// The sink asked to stop.
    Interrupted,
    TickLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRun {
    pub ticks: u64,
    pub reason: StopReason,
}

#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    interval: Duration,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Sampler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Samples once right away, then once per interval, until the source
    /// stops, the sink breaks, or `max_ticks` samples were delivered.
    pub fn run<T, F, G>(
        &self,
        ticker: &mut T,
        max_ticks: Option<u64>,
        mut sample: F,
        mut sink: G,
    ) -> SampleRun
    where
        T: Ticker + ?Sized,
        F: FnMut() -> Option<LiveSnapshot>,
        G: FnMut(&LiveSnapshot) -> ControlFlow<()>,
    {
        let mut ticks = 0u64;

        loop {
            if max_ticks.is_some_and(|max| ticks >= max) {
                return SampleRun {
                    ticks,
                    reason: StopReason::TickLimit,
                };
            }

            if ticks > 0 {
                ticker.wait(self.interval);
            }

            let Some(snapshot) = sample() else {
                tracing::debug!(ticks, "sampler stopped: no running shift");
                return SampleRun {
                    ticks,
                    reason: StopReason::TimerStopped,
                };
            };
            ticks += 1;

            if sink(&snapshot).is_break() {
                return SampleRun {
                    ticks,
                    reason: StopReason::Interrupted,
                };
            }
        }
    }
}
