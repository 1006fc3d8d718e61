use crate::cli::parser::{Cli, Commands};
use crate::cli::{CliTracker, confirmer};
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cli: &Cli, tracker: &mut CliTracker) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = &cli.command
    {
        let confirm = confirmer(cli);
        ExportLogic::export(
            tracker.ledger().entries(),
            *format,
            file,
            range.as_deref(),
            *force,
            confirm.as_ref(),
        )?;
    }
    Ok(())
}
