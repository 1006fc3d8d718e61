use crate::core::capabilities::Confirm;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use std::path::Path;

/// Checks that `path` may be created or overwritten.
///
/// A missing file, or `force`, is fine. Otherwise the user is asked.
pub(crate) fn ensure_writable(path: &Path, force: bool, confirm: &dyn Confirm) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    let message = format!("The file '{}' already exists. Overwrite?", path.display());
    if confirm.confirm(&message, "Overwrite file") {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".into(),
        ))
    }
}
