use crate::cli::CliTracker;
use crate::cli::commands::timer::report_entry;
use crate::cli::parser::Commands;
use crate::core::calculator::calculate_shift_balance;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::colorize_balance;
use crate::utils::formatting::{format_balance, remaining_text, shift_span};
use crate::utils::time::{MINUTES_PER_DAY, format_minutes_hhmm, parse_duration_minutes, parse_time};

fn check_time(t: &str) -> AppResult<()> {
    parse_time(t)
        .map(|_| ())
        .ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

fn calc(
    tracker: &CliTracker,
    start: &str,
    end: &str,
    break_minutes: Option<i64>,
    target: &Option<String>,
) -> AppResult<()> {
    check_time(start)?;
    check_time(end)?;

    let target = match target {
        Some(raw) => {
            parse_duration_minutes(raw).ok_or_else(|| AppError::InvalidDuration(raw.clone()))?
        }
        None => tracker.settings().daily_target_minutes,
    };

    let s = calculate_shift_balance(start, end, target, break_minutes.unwrap_or(0));

    let expected = s.expected_end_minutes;
    let expected_label = if expected >= MINUTES_PER_DAY {
        format!("{} (+1 day)", format_minutes_hhmm(expected % MINUTES_PER_DAY))
    } else {
        format_minutes_hhmm(expected)
    };

    println!("Shift        : {}", shift_span(start, end, s.overnight));
    println!("Gross        : {}", format_minutes_hhmm(s.gross_worked_minutes));
    println!(
        "Breaks       : {} min ({} mandatory + {} extra)",
        s.break_minutes, s.mandatory_break_minutes, s.manual_break_minutes
    );
    println!("Worked       : {}", format_minutes_hhmm(s.effective_worked_minutes));
    println!("Target       : {}", format_minutes_hhmm(s.daily_target_minutes));
    println!(
        "Balance      : {}",
        colorize_balance(s.balance_minutes, &format_balance(s.balance_minutes))
    );
    println!("Remaining    : {}", remaining_text(s.balance_minutes));
    println!("Expected end : {expected_label}");
    Ok(())
}

pub fn handle(cmd: &Commands, tracker: &mut CliTracker) -> AppResult<()> {
    match cmd {
        Commands::Add {
            date,
            start,
            end,
            break_minutes,
        } => {
            let result = tracker.add_entry(date, start, end, *break_minutes)?;
            report_entry(&result);
        }
        Commands::Calc {
            start,
            end,
            break_minutes,
            target,
        } => calc(tracker, start, end, *break_minutes, target)?,
        _ => {}
    }

    Ok(())
}
