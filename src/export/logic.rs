use crate::core::capabilities::Confirm;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::EntryExport;
use crate::models::Entry;
use crate::ui::messages::warning;
use crate::utils::date::period_bounds;
use chrono::NaiveDate;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Writes `entries` to `file`, oldest first. Returns how many rows were written.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or a period expression:
    ///   - `YYYY`
    ///   - `YYYY-MM`
    ///   - `YYYY-MM-DD`
    ///   - `YYYY-MM-DD:YYYY-MM-DD` (and the same for years and months)
    pub fn export(
        entries: &[Entry],
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
        confirm: &dyn Confirm,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(period_bounds(r).map_err(AppError::InvalidDate)?),
        };

        let rows = select_rows(entries, bounds);
        if rows.is_empty() {
            warning("No entries found for the selected range. Nothing to export.");
            return Ok(0);
        }

        ensure_writable(path, force, confirm)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        tracing::debug!(format = format.as_str(), rows = rows.len(), "export written");
        Ok(rows.len())
    }
}

/// Entries inside `bounds` (every entry when `None`), in ascending date order.
fn select_rows(entries: &[Entry], bounds: Option<(NaiveDate, NaiveDate)>) -> Vec<EntryExport> {
    let mut rows: Vec<EntryExport> = entries
        .iter()
        .filter(|e| match bounds {
            None => true,
            Some((from, to)) => e
                .date_key()
                .is_some_and(|d| d.date() >= from && d.date() <= to),
        })
        .map(EntryExport::from)
        .collect();

    rows.sort_by(|a, b| a.date.cmp(&b.date));
    rows
}
