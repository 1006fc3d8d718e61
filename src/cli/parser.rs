use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rOvertime
/// Work-time stopwatch with break rules and an overtime ledger
#[derive(Parser)]
#[command(
    name = "rovertime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track working time, statutory breaks and the running overtime balance",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Answer "yes" to every confirmation prompt
    #[arg(global = true, short = 'y', long = "yes")]
    pub yes: bool,

    /// Enable debug diagnostics on stderr
    #[arg(global = true, short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },

    /// Show or change the daily target and default break
    Settings {
        /// Daily target (e.g. 8h, 7h48m, 7:48, 480)
        #[arg(long = "target")]
        target: Option<String>,

        /// Default break (e.g. 60, 45m, 1h)
        #[arg(long = "break")]
        break_duration: Option<String>,
    },

    /// Start the timer (now, or at HH:MM today)
    Start {
        #[arg(long = "at")]
        at: Option<String>,
    },

    /// Pause the running timer
    Pause,

    /// Resume a paused timer
    Resume,

    /// Stop the timer (commit it afterwards with `commit`)
    Stop,

    /// Show the current shift: worked time, breaks, balance, expected end
    Status {
        /// Preview the expected end for a start at HH:MM
        #[arg(long = "at")]
        at: Option<String>,
    },

    /// Live display, refreshed every tick until the timer stops
    Watch {
        /// Stop after N refreshes
        #[arg(long = "ticks")]
        ticks: Option<u64>,
    },

    /// Turn the stopped timer into an entry
    Commit,

    /// Add or replace the entry of a day
    Add {
        /// Date of the shift (YYYY-MM-DD)
        date: String,

        /// Start time (HH:MM)
        #[arg(long = "in")]
        start: String,

        /// End time (HH:MM); earlier than the start means the next day
        #[arg(long = "out")]
        end: String,

        /// Extra break in minutes, on top of the mandatory one
        #[arg(long = "break")]
        break_minutes: Option<i64>,
    },

    /// Compute a shift without storing it
    Calc {
        /// Start time (HH:MM)
        start: String,

        /// End time (HH:MM)
        end: String,

        /// Extra break in minutes
        #[arg(long = "break")]
        break_minutes: Option<i64>,

        /// Daily target for this calculation (default: settings)
        #[arg(long = "target")]
        target: Option<String>,
    },

    /// List saved entries
    List {
        /// Filter by period (YYYY, YYYY-MM, YYYY-MM-DD or start:end)
        #[arg(long = "period")]
        period: Option<String>,
    },

    /// Delete an entry by id
    Del {
        /// Entry id (see `list`)
        id: i64,
    },

    /// Delete every entry
    Clear,

    /// Print the total overtime balance
    Balance,

    /// Export entries
    Export {
        /// Output format
        #[arg(long = "format", value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Absolute path of the output file
        #[arg(long = "file")]
        file: String,

        /// Limit to a period (YYYY, YYYY-MM, YYYY-MM-DD, start:end or "all")
        #[arg(long = "range")]
        range: Option<String>,

        /// Overwrite an existing file without asking
        #[arg(long = "force")]
        force: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
