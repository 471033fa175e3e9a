//! Code implementing the "filter check-config" sub command.

use clap::Parser;

/// Command line arguments for `filter check-config` sub command.
#[derive(Parser, Debug)]
#[command(author, version, about = "Validate a filter configuration", long_about = None)]
pub struct Args {
    /// Path to the filter configuration JSON file.
    #[arg(long, required = true)]
    pub path_config: String,
}

/// Main entry point for the `filter check-config` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    tracing::info!("args_common = {:?}", &args_common);
    tracing::info!("args = {:?}", &args);

    let config = super::load_config(&args.path_config)?;
    for entry in &config.filters {
        tracing::info!(
            "filter {:?} with {} exception(s)",
            entry.kind.name(),
            entry.exceptions.len()
        );
    }
    tracing::info!("Configuration with {} filter(s) is valid.", config.filters.len());

    Ok(())
}
