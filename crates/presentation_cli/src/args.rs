//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Climate warning assistant
#[derive(Debug, Parser)]
#[command(name = "climate-advisory")]
#[command(author, version, about = "Weather summaries and safety advisories", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./config.* plus environment)
    #[arg(short, long, global = true, env = "CLIMATE_ADVISORY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub advise: AdviseArgs,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch the weather and print a safety advisory (default)
    Advise(AdviseArgs),

    /// Load and validate configuration, then print it with secrets redacted
    CheckConfig,
}

/// Arguments of an advisory run
#[derive(Debug, Clone, Default, Args)]
pub struct AdviseArgs {
    /// Location to advise on; prompted for when omitted
    pub location: Option<String>,

    /// Print the full outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print the weather summary below the advisory
    #[arg(long)]
    pub show_summary: bool,
}

impl Cli {
    /// Subcommand to run, falling back to `advise`
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Advise(self.advise))
    }
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
