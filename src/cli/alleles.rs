//! Code implementing the "filter alleles" sub command.

use std::fs::File;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use crate::filter::{self, PanelQuery};

/// Command line arguments for `filter alleles` sub command.
#[derive(Parser, Debug)]
#[command(author, version, about = "Filter allele sets per gene panel", long_about = None)]
pub struct Args {
    /// Path to the database snapshot JSON file.
    #[arg(long, required = true)]
    pub path_db: String,
    /// Path to the filter configuration JSON file.
    #[arg(long, required = true)]
    pub path_config: String,
    /// Path to the query JSON file (list of gene panel queries).
    #[arg(long, required = true)]
    pub path_query: String,
    /// Path to the output JSON file; stdout if missing.
    #[arg(long)]
    pub path_output: Option<String>,
}

/// Main entry point for the `filter alleles` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    let before_anything = Instant::now();
    tracing::info!("args_common = {:?}", &args_common);
    tracing::info!("args = {:?}", &args);

    tracing::info!("Loading database snapshot...");
    let snapshot = super::load_snapshot(&args.path_db)?;
    tracing::info!("Loading filter configuration...");
    let config = super::load_config(&args.path_config)?;
    tracing::info!("Loading queries...");
    let file = File::open(&args.path_query)
        .with_context(|| format!("opening query file {}", &args.path_query))?;
    let queries: Vec<PanelQuery> = serde_json::from_reader(file)
        .with_context(|| format!("parsing query file {}", &args.path_query))?;

    tracing::info!("Filtering {} panel queries...", queries.len());
    let results = filter::filter_alleles(&snapshot, &config, &queries)?;
    tracing::info!("...done filtering, took {:?}", before_anything.elapsed());

    super::write_output(args.path_output.as_deref(), &results)
}
