//! Climate advisory CLI
//!
//! Prompts for a location, runs the advisory pipeline once and prints the
//! warning. Logs go to stderr so stdout carries only the result.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::{io, process::ExitCode};

use clap::Parser;
use infrastructure::{
    AppConfig, LogFormat, LogOutput, TemplateEngine, build_advisory_pipeline, init_logging,
};
use presentation_cli::{AdviseArgs, Cli, Commands, render_outcome, resolve_location};
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    if let Err(e) = init_logging(
        presentation_cli::log_filter_from_verbosity(cli.verbose),
        LogFormat::Text,
        LogOutput::Stderr,
    ) {
        eprintln!("⚠️  {e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load_layered(cli.config.as_deref())?;
    debug!(model = %config.inference.default_model, "Configuration loaded");

    match cli.into_command() {
        Commands::Advise(args) => advise(&config, args).await,
        Commands::CheckConfig => check_config(&config),
    }
}

async fn advise(config: &AppConfig, args: AdviseArgs) -> anyhow::Result<()> {
    config.validate()?;
    let pipeline = build_advisory_pipeline(config)?;
    let templates = TemplateEngine::new()?;

    let location = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        resolve_location(args.location, &mut input, &mut output)?
    };

    let outcome = pipeline.run(&location).await?;
    println!(
        "{}",
        render_outcome(&outcome, args.json, args.show_summary, &templates)?
    );
    Ok(())
}

fn check_config(config: &AppConfig) -> anyhow::Result<()> {
    println!("🔧 Configuration:");
    println!("{}", serde_json::to_string_pretty(&config.redacted_json())?);

    config.validate()?;
    println!("✅ Configuration is valid");
    Ok(())
}
