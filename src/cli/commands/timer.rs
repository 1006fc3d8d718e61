use crate::cli::CliTracker;
use crate::cli::parser::Commands;
use crate::core::ledger::LedgerOutcome;
use crate::core::tracker::EntryOutcome;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_balance;
use crate::utils::formatting::{format_balance, format_pause};
use crate::utils::time::{format_clock, format_minutes_hhmm};

/// Shared report for `commit` and `add`.
pub(crate) fn report_entry(result: &EntryOutcome) {
    let e = &result.entry;
    match result.outcome {
        LedgerOutcome::Declined => {
            info("Operation cancelled.");
            return;
        }
        LedgerOutcome::Inserted => success(format!("Entry saved for {}", e.date)),
        LedgerOutcome::Replaced => success(format!("Entry for {} replaced", e.date)),
    }

    println!(
        "   {} - {}  break {} min  worked {}  balance {}",
        e.start_time,
        e.end_time,
        e.break_minutes,
        format_minutes_hhmm(e.worked_minutes),
        colorize_balance(e.diff_minutes, &format_balance(e.diff_minutes))
    );
    println!("   Next date: {}", result.next_date);
}

pub fn handle(cmd: &Commands, tracker: &mut CliTracker) -> AppResult<()> {
    match cmd {
        Commands::Start { at } => {
            let start = tracker.start(at.as_deref())?;
            success(format!("Timer started at {}", format_clock(start)));
        }
        Commands::Pause => {
            tracker.pause()?;
            success(format!("Timer paused at {}", format_clock(tracker.now_ms())));
        }
        Commands::Resume => {
            let paused = tracker.resume()?;
            success(format!("Timer resumed after {}", format_pause(paused)));
        }
        Commands::Stop => {
            tracker.stop()?;
            success("Timer stopped.");
            if let Some(p) = tracker.stopped_summary() {
                println!(
                    "   {} {} - {}  pause {} min  worked {}  balance {}",
                    p.date,
                    p.start_time,
                    p.end_time,
                    p.pause_minutes,
                    format_minutes_hhmm(p.balance.effective_worked_minutes),
                    colorize_balance(
                        p.balance.balance_minutes,
                        &format_balance(p.balance.balance_minutes)
                    )
                );
            }
            info("Run `rovertime commit` to save this shift.");
        }
        Commands::Commit => {
            let result = tracker.commit()?;
            report_entry(&result);
        }
        _ => {}
    }

    Ok(())
}
