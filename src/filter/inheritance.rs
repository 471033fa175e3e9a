//! Inheritance-model filter.
//!
//! Analysis-typed, proband-only.  Judges alleles against the recessive
//! inheritance modes of the overlapping gene panel genes, aggregating over
//! all proband samples of the analysis.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::model::{AlleleId, AnalysisId, GenePanel, GenotypeType, HgncId, Snapshot};

use super::gt_table::GenotypeTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Match alleles that cannot plausibly contribute to a recessive
    /// condition: single heterozygous calls in genes that are AR only.
    RecessiveNonCandidates,
    /// Match alleles compatible with a recessive condition: homozygous
    /// calls or several alleles in the same gene, in a gene that is not
    /// AD only.
    RecessiveCandidates,
}

/// Configuration of the inheritance-model filter.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub mode: Mode,
}

/// Apply the inheritance-model filter; returns the matched allele ids.
pub fn filter(
    snapshot: &Snapshot,
    panel: &GenePanel,
    table: &GenotypeTable,
    analysis_id: AnalysisId,
    candidates: &BTreeSet<AlleleId>,
    config: &Config,
) -> BTreeSet<AlleleId> {
    let proband_ids = snapshot
        .analysis_samples(analysis_id)
        .iter()
        .filter(|sample| sample.proband)
        .map(|sample| sample.id)
        .collect::<Vec<_>>();

    // candidate alleles per gene, over the full input set
    let mut gene_counts: IndexMap<HgncId, usize> = IndexMap::new();
    for &allele_id in candidates {
        for gene in snapshot.panel_gene_ids(allele_id, panel) {
            *gene_counts.entry(gene).or_default() += 1;
        }
    }

    let mut result = BTreeSet::new();
    for &allele_id in candidates {
        let genes = snapshot.panel_gene_ids(allele_id, panel);
        if genes.is_empty() {
            continue;
        }
        let genotypes = proband_ids
            .iter()
            .map(|&sample_id| table.genotype_type(allele_id, sample_id))
            .collect::<Vec<_>>();
        let homozygous = genotypes.contains(&GenotypeType::Homozygous);
        let heterozygous = !homozygous && genotypes.contains(&GenotypeType::Heterozygous);
        let count = |gene: &HgncId| gene_counts.get(gene).copied().unwrap_or(0);

        let matched = match config.mode {
            Mode::RecessiveNonCandidates => {
                heterozygous
                    && genes
                        .iter()
                        .all(|gene| panel.is_ar_only(*gene) && count(gene) == 1)
            }
            Mode::RecessiveCandidates => genes
                .iter()
                .any(|gene| !panel.is_ad_only(*gene) && (homozygous || count(gene) >= 2)),
        };
        if matched {
            result.insert(allele_id);
        }
    }
    result
}
