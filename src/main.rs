//! Allele filter worker main executable

pub mod cli;
pub mod common;
pub mod filter;
pub mod model;

use clap::{Args, Parser, Subcommand};
use console::{Emoji, Term};

/// CLI parser based on clap.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Clinical allele filtering",
    long_about = "This tool runs configurable filter pipelines over variant alleles"
)]
struct Cli {
    /// Commonly used arguments
    #[command(flatten)]
    common: common::Args,

    /// The sub command to run
    #[command(subcommand)]
    command: Commands,
}

/// Enum supporting the parsing of top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Filter pipeline related commands.
    Filter(Filter),
}

/// Parsing of "filter *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Filter {
    /// The sub command to run
    #[command(subcommand)]
    command: FilterCommands,
}

/// Enum supporting the parsing of "filter *" sub commands.
#[derive(Debug, Subcommand)]
enum FilterCommands {
    Analysis(cli::analysis::Args),
    Alleles(cli::alleles::Args),
    CheckConfig(cli::check_config::Args),
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Build a tracing subscriber according to the configuration in `cli.common`.
    let collector = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(match cli.common.verbose.log_level() {
            Some(level) => match level {
                log::Level::Error => tracing::Level::ERROR,
                log::Level::Warn => tracing::Level::WARN,
                log::Level::Info => tracing::Level::INFO,
                log::Level::Debug => tracing::Level::DEBUG,
                log::Level::Trace => tracing::Level::TRACE,
            },
            None => tracing::Level::INFO,
        })
        .compact()
        .finish();

    // Install collector and go into sub commands.
    let term = Term::stderr();
    tracing::subscriber::with_default(collector, || {
        match &cli.command {
            Commands::Filter(filter) => match &filter.command {
                FilterCommands::Analysis(args) => {
                    cli::analysis::run(&cli.common, args)?;
                }
                FilterCommands::Alleles(args) => {
                    cli::alleles::run(&cli.common, args)?;
                }
                FilterCommands::CheckConfig(args) => {
                    cli::check_config::run(&cli.common, args)?;
                }
            },
        }

        Ok::<(), anyhow::Error>(())
    })?;
    term.write_line(&format!("All done. Have a nice day!{}", Emoji(" 😃", "")))?;

    Ok(())
}
