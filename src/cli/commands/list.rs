use crate::cli::CliTracker;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::Entry;
use crate::ui::messages::info;
use crate::utils::colors::colorize_balance;
use crate::utils::date::{format_date_for_display, period_bounds};
use crate::utils::formatting::{bold, format_balance, shift_span};
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_minutes_hhmm, parse_time_to_minutes};

fn balance_cell(diff: i64) -> String {
    colorize_balance(diff, &format_balance(diff))
}

fn entries_table(entries: &[&Entry], locale: &str) -> Table {
    let mut table = Table::new(vec![
        Column::new("ID"),
        Column::new("Date"),
        Column::new("Day"),
        Column::new("Shift"),
        Column::new("Break"),
        Column::new("Worked"),
        Column::new("Balance"),
    ]);

    for e in entries {
        let overnight = parse_time_to_minutes(&e.end_time) < parse_time_to_minutes(&e.start_time);
        table.add_row(vec![
            e.id.to_string(),
            e.date.clone(),
            format_date_for_display(&e.date, locale),
            shift_span(&e.start_time, &e.end_time, overnight),
            e.break_minutes.to_string(),
            format_minutes_hhmm(e.worked_minutes),
            balance_cell(e.diff_minutes),
        ]);
    }

    table
}

fn list(tracker: &CliTracker, cfg: &Config, period: &Option<String>) -> AppResult<()> {
    let ledger = tracker.ledger();

    let selected: Vec<&Entry> = match period {
        Some(p) => {
            let (from, to) = period_bounds(p).map_err(AppError::InvalidDate)?;
            ledger.in_range(from, to)
        }
        None => ledger.entries().iter().collect(),
    };

    if selected.is_empty() {
        info("No entries found.");
        return Ok(());
    }

    print!("{}", entries_table(&selected, &cfg.locale).render());

    let subtotal: i64 = selected.iter().map(|e| e.diff_minutes).sum();
    println!();
    if period.is_some() {
        println!("Period balance: {}", balance_cell(subtotal));
    }
    println!(
        "{} {}",
        bold("Total balance:"),
        balance_cell(tracker.total_balance())
    );
    Ok(())
}

pub fn handle(cmd: &Commands, tracker: &mut CliTracker, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::List { period } => list(tracker, cfg, period)?,
        Commands::Balance => {
            println!(
                "Total balance: {} ({} entries)",
                balance_cell(tracker.total_balance()),
                tracker.ledger().len()
            );
        }
        _ => {}
    }
    Ok(())
}
