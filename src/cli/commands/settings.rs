use crate::cli::CliTracker;
use crate::cli::parser::Commands;
use crate::errors::{AppError, AppResult};
use crate::models::Settings;
use crate::ui::messages::success;
use crate::utils::time::{format_minutes_hhmm, parse_duration_minutes};

fn parse_duration(raw: &Option<String>) -> AppResult<Option<i64>> {
    raw.as_deref()
        .map(|s| parse_duration_minutes(s).ok_or_else(|| AppError::InvalidDuration(s.to_string())))
        .transpose()
}

fn print_settings(s: &Settings) {
    println!(
        "🎯 Daily target : {} ({} min)",
        format_minutes_hhmm(s.daily_target_minutes),
        s.daily_target_minutes
    );
    println!(
        "☕ Default break: {} ({} min)",
        format_minutes_hhmm(s.default_break_minutes),
        s.default_break_minutes
    );
}

pub fn handle(cmd: &Commands, tracker: &mut CliTracker) -> AppResult<()> {
    if let Commands::Settings {
        target,
        break_duration,
    } = cmd
    {
        let target = parse_duration(target)?;
        let default_break = parse_duration(break_duration)?;

        if target.is_none() && default_break.is_none() {
            print_settings(tracker.settings());
            return Ok(());
        }

        let updated = tracker.update_settings(target, default_break)?;
        success("Settings updated.");
        print_settings(&updated);
    }

    Ok(())
}
