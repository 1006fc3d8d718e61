use crate::cli::CliTracker;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sampler::{Sampler, SleepTicker, StopReason};
use crate::core::timer::LiveSnapshot;
use crate::errors::{AppError, AppResult};
use crate::models::{TimerPhase, WorkBalanceResult};
use crate::ui::messages::{info, warning};
use crate::utils::colors::{RESET, color_for_phase, colorize_balance};
use crate::utils::date::DateKey;
use crate::utils::formatting::{
    bold, format_balance, format_pause, format_seconds, progress_percent, remaining_text,
    shift_span,
};
use crate::utils::time::{format_clock, format_minutes_hhmm, parse_time};
use std::io::{self, Write};
use std::ops::ControlFlow;
use std::time::Duration;

/// "HH:MM", plus "(+1 day)" when the timestamp falls after `reference`'s date.
fn clock_with_day(ts_ms: i64, reference_ms: i64) -> String {
    if DateKey::from_timestamp(ts_ms) > DateKey::from_timestamp(reference_ms) {
        format!("{} (+1 day)", format_clock(ts_ms))
    } else {
        format_clock(ts_ms)
    }
}

fn phase_label(phase: TimerPhase) -> String {
    let color = color_for_phase(phase != TimerPhase::Stopped, phase == TimerPhase::Paused);
    format!("{color}{}{RESET}", phase.as_str())
}

/// Multi-line report of a live snapshot.
pub(crate) fn snapshot_lines(s: &LiveSnapshot) -> Vec<String> {
    let b = &s.balance;
    let elapsed_secs = (s.sampled_at - s.start_timestamp).max(0) / 1000;

    vec![
        format!("Status       : {}", phase_label(s.phase)),
        format!("Started      : {}", format_clock(s.start_timestamp)),
        format!("Elapsed      : {}", format_seconds(elapsed_secs)),
        format!(
            "Worked       : {} (gross {})",
            bold(&format_minutes_hhmm(b.effective_worked_minutes)),
            format_minutes_hhmm(b.gross_worked_minutes)
        ),
        format!(
            "Breaks       : {} min mandatory, pause {}",
            b.mandatory_break_minutes,
            format_pause(s.total_pause_ms)
        ),
        format!(
            "Progress     : {:.1} %",
            progress_percent(b.effective_worked_minutes, b.daily_target_minutes)
        ),
        format!(
            "Balance      : {}",
            colorize_balance(b.balance_minutes, &format_balance(b.balance_minutes))
        ),
        format!("Remaining    : {}", remaining_text(b.balance_minutes)),
        format!(
            "Expected end : {}",
            clock_with_day(b.expected_end_timestamp, s.start_timestamp)
        ),
    ]
}

/// Single refreshing line for `watch`.
pub(crate) fn live_line(s: &LiveSnapshot) -> String {
    let b = &s.balance;
    format!(
        "{} {} worked | {} | pause {} | end {}",
        phase_label(s.phase),
        format_minutes_hhmm(b.effective_worked_minutes),
        colorize_balance(b.balance_minutes, &format_balance(b.balance_minutes)),
        format_pause(s.total_pause_ms),
        clock_with_day(b.expected_end_timestamp, s.start_timestamp)
    )
}

fn print_preview(start_label: &str, r: &WorkBalanceResult, now_ms: i64) {
    println!(
        "Starting at {start_label}, the target of {} is reached at {}",
        format_minutes_hhmm(r.daily_target_minutes),
        bold(&clock_with_day(r.expected_end_timestamp, now_ms))
    );
    if r.mandatory_break_minutes > 0 || r.manual_break_minutes > 0 {
        println!(
            "   (breaks counted: {} min mandatory, {} min pause)",
            r.mandatory_break_minutes, r.manual_break_minutes
        );
    }
}

fn status(tracker: &CliTracker, at: &Option<String>) -> AppResult<()> {
    if let Some(t) = at
        && parse_time(t).is_none()
    {
        return Err(AppError::InvalidTime(t.clone()));
    }

    if tracker.timer().is_running() {
        if let Some(s) = tracker.snapshot() {
            for line in snapshot_lines(&s) {
                println!("{line}");
            }
        }
        return Ok(());
    }

    if let Some(p) = tracker.stopped_summary() {
        println!("Status       : {}", phase_label(TimerPhase::Stopped));
        println!(
            "Uncommitted  : {} {}",
            p.date,
            shift_span(&p.start_time, &p.end_time, p.balance.overnight)
        );
        println!(
            "Worked       : {} (breaks {} min)",
            format_minutes_hhmm(p.balance.effective_worked_minutes),
            p.balance.break_minutes
        );
        println!(
            "Balance      : {}",
            colorize_balance(
                p.balance.balance_minutes,
                &format_balance(p.balance.balance_minutes)
            )
        );
        info("Run `rovertime commit` to save this shift.");
        return Ok(());
    }

    println!("Status       : {}", phase_label(TimerPhase::Stopped));
    let now = tracker.now_ms();
    let preview = tracker.expected_end(at.as_deref());
    let label = at.clone().unwrap_or_else(|| format_clock(now));
    print_preview(&label, &preview, now);
    Ok(())
}

fn watch(tracker: &mut CliTracker, cfg: &Config, ticks: Option<u64>) -> AppResult<()> {
    if !tracker.timer().is_running() {
        warning("Timer is not running.");
        return Ok(());
    }

    let sampler = Sampler::new(Duration::from_secs(cfg.tick_interval_secs.max(1)));
    let mut stdout = io::stdout();

    let run = sampler.run(
        &mut SleepTicker,
        ticks,
        || {
            // another process may pause or stop the timer meanwhile
            tracker.reload_timer();
            if tracker.timer().is_running() {
                tracker.snapshot()
            } else {
                None
            }
        },
        |s| {
            let _ = write!(stdout, "\r\x1b[2K{}", live_line(s));
            let _ = stdout.flush();
            ControlFlow::Continue(())
        },
    );

    println!();
    if run.reason == StopReason::TimerStopped {
        info("Timer stopped.");
    }
    Ok(())
}

pub fn handle(cmd: &Commands, tracker: &mut CliTracker, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Status { at } => status(tracker, at),
        Commands::Watch { ticks } => watch(tracker, cfg, *ticks),
        _ => Ok(()),
    }
}
