// railnota - NMBS ticket confirmations into the monthly expense ledger

mod config;
mod exit_codes;
mod inbox;
mod process;
mod rollback;
mod status;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_ERROR, EXIT_IO, EXIT_LOCKED, EXIT_SUCCESS, EXIT_USAGE};
use railnota_io::error::XlsxError;

#[derive(Parser)]
#[command(name = "railnota")]
#[command(about = "NMBS ticket confirmations into the monthly expense ledger")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = "railnota.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process saved confirmation emails from the inbox directory
    #[command(after_help = "\
Reads every .html file in the inbox directory, skips orders already
processed or skipped, and books the rest into the per-month ledger
units. Orders are marked processed only after their unit saved.")]
    Process {
        /// Do not prompt; book work-day tickets, leave weekend tickets alone
        #[arg(long, short = 'y')]
        yes: bool,

        /// Inbox directory (overrides the config)
        #[arg(long)]
        inbox: Option<PathBuf>,

        /// Only book tickets from this month, e.g. "februari" or "februari 2025"
        #[arg(long, value_name = "MAAND")]
        month: Option<String>,
    },

    /// Remove previously booked orders from the ledger
    #[command(after_help = "\
Examples:
  railnota rollback ABC123XYZ
  railnota rollback ABC123XYZ DEF456UVW")]
    Rollback {
        /// Order numbers to reverse
        #[arg(required = true)]
        orders: Vec<String>,
    },

    /// Show processed and skipped orders
    Status,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = config::Config::load(&cli.config).and_then(|cfg| match cli.command {
        Commands::Process { yes, inbox, month } => {
            let month = month.as_deref().map(process::parse_month_arg).transpose()?;
            process::cmd_process(&cfg, yes, inbox.as_deref(), month)
        }
        Commands::Rollback { orders } => rollback::cmd_rollback(&cfg, &orders),
        Commands::Status => status::cmd_status(&cfg),
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            eprintln!("error: {}", message);
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Create an error from a unit file failure with the right exit code.
    pub fn unit(err: XlsxError) -> Self {
        let (code, hint) = if err.is_locked() {
            (EXIT_LOCKED, Some("close the workbook in Excel and run the command again".to_string()))
        } else {
            (EXIT_ERROR, None)
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
