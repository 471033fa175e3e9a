//! Code implementing the "filter *" sub commands.

pub mod alleles;
pub mod analysis;
pub mod check_config;

use std::fs::File;

use anyhow::Context;

use crate::filter::FilterConfig;
use crate::model::Snapshot;

/// Load a database snapshot from a JSON file.
fn load_snapshot(path: &str) -> Result<Snapshot, anyhow::Error> {
    let file = File::open(path).with_context(|| format!("opening snapshot file {}", path))?;
    serde_json::from_reader(file).with_context(|| format!("parsing snapshot file {}", path))
}

/// Load and validate a filter configuration from a JSON file.
fn load_config(path: &str) -> Result<FilterConfig, anyhow::Error> {
    let file = File::open(path).with_context(|| format!("opening config file {}", path))?;
    serde_json::from_reader(file).with_context(|| format!("parsing config file {}", path))
}

/// Write the result as pretty JSON to the given path, or to stdout.
fn write_output(path: Option<&str>, value: &impl serde::Serialize) -> Result<(), anyhow::Error> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating output file {}", path))?;
            serde_json::to_writer_pretty(file, value)?;
        }
        None => {
            let stdout = std::io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), value)?;
            println!();
        }
    }
    Ok(())
}
