//! Code implementing the "filter analysis" sub command.

use std::time::Instant;

use clap::Parser;

use crate::filter;
use crate::model::{AlleleId, AnalysisId, Snapshot};

/// Command line arguments for `filter analysis` sub command.
#[derive(Parser, Debug)]
#[command(author, version, about = "Filter the alleles of one analysis", long_about = None)]
pub struct Args {
    /// Path to the database snapshot JSON file.
    #[arg(long, required = true)]
    pub path_db: String,
    /// Path to the filter configuration JSON file.
    #[arg(long, required = true)]
    pub path_config: String,
    /// The analysis whose alleles to filter.
    #[arg(long, required = true)]
    pub analysis_id: AnalysisId,
    /// Allele ids to filter; defaults to every allele with a genotype in
    /// the analysis.
    #[arg(long, value_delimiter = ',')]
    pub allele_ids: Vec<AlleleId>,
    /// Path to the output JSON file; stdout if missing.
    #[arg(long)]
    pub path_output: Option<String>,
}

/// All alleles carried by the analysis' genotypes, secondary alleles
/// included.
fn genotype_alleles(snapshot: &Snapshot, analysis_id: AnalysisId) -> Vec<AlleleId> {
    let mut allele_ids = Vec::new();
    for genotype in snapshot.analysis_genotypes(analysis_id) {
        allele_ids.push(genotype.allele_id);
        if let Some(secondallele_id) = genotype.secondallele_id {
            allele_ids.push(secondallele_id);
        }
    }
    allele_ids
}

/// Main entry point for the `filter analysis` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    let before_anything = Instant::now();
    tracing::info!("args_common = {:?}", &args_common);
    tracing::info!("args = {:?}", &args);

    tracing::info!("Loading database snapshot...");
    let snapshot = super::load_snapshot(&args.path_db)?;
    tracing::info!("Loading filter configuration...");
    let config = super::load_config(&args.path_config)?;

    let allele_ids = if args.allele_ids.is_empty() {
        genotype_alleles(&snapshot, args.analysis_id)
    } else {
        args.allele_ids.clone()
    };

    tracing::info!(
        "Filtering {} alleles of analysis {}...",
        allele_ids.len(),
        args.analysis_id
    );
    let result = filter::filter_analysis(&snapshot, &config, args.analysis_id, &allele_ids)?;
    let excluded: usize = result.excluded_by.values().map(|bucket| bucket.len()).sum();
    tracing::info!(
        "...done filtering; {} included, {} excluded, took {:?}",
        result.included.len(),
        excluded,
        before_anything.elapsed()
    );

    super::write_output(args.path_output.as_deref(), &result)
}
