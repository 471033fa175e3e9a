//! Transient genotype aggregation table.
//!
//! Materializes, for a requested set of alleles and samples, a wide table
//! mapping allele id to per-sample call data.  Multiallelic secondary
//! alleles are flattened so that each allele becomes its own row.  The table
//! is consumed by the quality, segregation, and inheritance filters and is
//! never persisted.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::model::{AlleleId, AnalysisId, GenotypeType, SampleId, Snapshot};

/// Per-sample call data of one allele.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenotypeCell {
    /// Observed genotype.
    pub genotype_type: GenotypeType,
    /// Phred-scaled VCF QUAL.
    pub quality: Option<f64>,
    /// VCF FILTER column value.
    pub filter_status: Option<String>,
    /// Sequencing depth.
    pub sequencing_depth: Option<i64>,
    /// Alternate allele ratio.
    pub allele_ratio: Option<f64>,
    /// Phred-scaled genotype likelihoods `[PL_ref, PL_het, PL_hom]`.
    pub genotype_likelihood: Option<[i32; 3]>,
}

/// Wide table allele id → sample id → call data.
#[derive(Debug, Clone, Default)]
pub struct GenotypeTable {
    rows: IndexMap<AlleleId, IndexMap<SampleId, GenotypeCell>>,
}

impl GenotypeTable {
    /// Build the table for the given alleles and samples of one analysis.
    pub fn build(
        snapshot: &Snapshot,
        analysis_id: AnalysisId,
        allele_ids: &BTreeSet<AlleleId>,
        sample_ids: &[SampleId],
    ) -> Self {
        let mut rows: IndexMap<AlleleId, IndexMap<SampleId, GenotypeCell>> = IndexMap::new();
        for genotype in snapshot.analysis_genotypes(analysis_id) {
            for data in snapshot.genotype_sample_data(genotype.id) {
                if !sample_ids.contains(&data.sample_id) {
                    continue;
                }
                // Flatten the secondary allele of a multiallelic genotype
                // into its own row.
                let allele_id = if data.secondallele {
                    match genotype.secondallele_id {
                        Some(id) => id,
                        None => continue,
                    }
                } else {
                    genotype.allele_id
                };
                if !allele_ids.contains(&allele_id) {
                    continue;
                }
                let cell = GenotypeCell {
                    genotype_type: data.genotype_type,
                    quality: data.quality,
                    filter_status: data.filter_status.clone(),
                    sequencing_depth: data.sequencing_depth,
                    allele_ratio: data.allele_ratio,
                    genotype_likelihood: data.genotype_likelihood,
                };
                rows.entry(allele_id).or_default().insert(data.sample_id, cell);
            }
        }
        for samples in rows.values_mut() {
            samples.sort_unstable_keys();
        }
        rows.sort_unstable_keys();
        Self { rows }
    }

    /// The call data of one (allele, sample) pair.
    pub fn cell(&self, allele_id: AlleleId, sample_id: SampleId) -> Option<&GenotypeCell> {
        self.rows.get(&allele_id).and_then(|row| row.get(&sample_id))
    }

    /// The per-sample call data of one allele, in sample id order.
    pub fn row(&self, allele_id: AlleleId) -> Option<&IndexMap<SampleId, GenotypeCell>> {
        self.rows.get(&allele_id)
    }

    /// Allele ids with at least one sample cell, ascending.
    pub fn allele_ids(&self) -> impl Iterator<Item = AlleleId> + '_ {
        self.rows.keys().copied()
    }

    /// The observed genotype of one (allele, sample) pair; `NoCoverage` when
    /// there is no row at all.
    pub fn genotype_type(&self, allele_id: AlleleId, sample_id: SampleId) -> GenotypeType {
        self.cell(allele_id, sample_id)
            .map(|cell| cell.genotype_type)
            .unwrap_or(GenotypeType::NoCoverage)
    }
}
