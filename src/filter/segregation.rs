//! Segregation filter.
//!
//! Analysis-typed, family-aware.  Labels each allele with the segregation
//! patterns it is compatible with and matches the alleles carrying one of
//! the configured labels.  Typically "non_segregating" is used for
//! exclusion while "denovo", "recessive_homozygous", "xlinked_recessive",
//! and "compound_heterozygous" serve as exceptions of other filters.

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::common::is_x_minus_par;
use crate::model::{AlleleId, AnalysisId, GenePanel, GenotypeType, Sample, Sex, Snapshot};

use super::denovo::denovo_probability;
use super::gt_table::GenotypeTable;
use super::Error;

/// Segregation pattern labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Denovo,
    RecessiveHomozygous,
    XlinkedRecessive,
    CompoundHeterozygous,
    NonSegregating,
}

fn default_min_denovo_probability() -> f64 {
    0.05
}

/// Configuration of the segregation filter.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Labels that cause a match.
    pub labels: Vec<Label>,
    /// Posterior threshold of the denovo label.
    #[serde(default = "default_min_denovo_probability")]
    pub min_denovo_probability: f64,
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.labels.is_empty() {
            return Err("at least one label must be given".to_string());
        }
        Ok(())
    }
}

/// The proband and its relatives within one analysis.
struct Pedigree<'a> {
    proband: &'a Sample,
    father: Option<&'a Sample>,
    mother: Option<&'a Sample>,
    siblings: Vec<&'a Sample>,
}

impl<'a> Pedigree<'a> {
    fn resolve(snapshot: &'a Snapshot, analysis_id: AnalysisId) -> Result<Self, Error> {
        let samples = snapshot.analysis_samples(analysis_id);
        let mut probands = samples.iter().filter(|sample| sample.proband).copied();
        let proband = probands.next().ok_or(Error::NoProband { analysis_id })?;
        if probands.next().is_some() {
            return Err(Error::MultipleProbands { analysis_id });
        }
        let by_id = |id: Option<i64>| {
            id.and_then(|id| samples.iter().find(|sample| sample.id == id).copied())
        };
        let siblings = samples
            .iter()
            .filter(|sample| sample.sibling_id == Some(proband.id))
            .copied()
            .collect();
        Ok(Self {
            proband,
            father: by_id(proband.father_id),
            mother: by_id(proband.mother_id),
            siblings,
        })
    }

    fn has_relatives(&self) -> bool {
        self.father.is_some() || self.mother.is_some() || !self.siblings.is_empty()
    }

    fn relatives(&self) -> impl Iterator<Item = &&'a Sample> {
        self.father
            .iter()
            .chain(self.mother.iter())
            .chain(self.siblings.iter())
    }
}

/// Apply the segregation filter; returns the matched allele ids.
pub fn filter(
    snapshot: &Snapshot,
    panel: &GenePanel,
    table: &GenotypeTable,
    analysis_id: AnalysisId,
    candidates: &BTreeSet<AlleleId>,
    config: &Config,
) -> Result<BTreeSet<AlleleId>, Error> {
    let pedigree = Pedigree::resolve(snapshot, analysis_id)?;
    // a single-sample analysis carries no segregation information
    if !pedigree.has_relatives() {
        return Ok(BTreeSet::new());
    }
    let mut matched = BTreeSet::new();
    for label in &config.labels {
        let hits = match label {
            Label::Denovo => denovo(snapshot, table, &pedigree, candidates, config)?,
            Label::RecessiveHomozygous => {
                recessive_homozygous(snapshot, table, &pedigree, candidates)
            }
            Label::XlinkedRecessive => xlinked_recessive(snapshot, table, &pedigree, candidates),
            Label::CompoundHeterozygous => {
                compound_heterozygous(snapshot, panel, table, &pedigree, candidates)
            }
            Label::NonSegregating => non_segregating(table, &pedigree, candidates),
        };
        matched.extend(hits);
    }
    Ok(matched)
}

fn x_minus_par_allele(snapshot: &Snapshot, allele_id: AlleleId) -> bool {
    snapshot
        .allele(allele_id)
        .map(|allele| {
            is_x_minus_par(
                &allele.chromosome,
                allele.start_position,
                allele.open_end_position,
            )
        })
        .unwrap_or(false)
}

/// Alleles where both parents are confidently reference and the proband
/// carries the variant, confirmed by the posterior denovo probability.
fn denovo(
    snapshot: &Snapshot,
    table: &GenotypeTable,
    pedigree: &Pedigree,
    candidates: &BTreeSet<AlleleId>,
    config: &Config,
) -> Result<BTreeSet<AlleleId>, Error> {
    let (Some(father), Some(mother)) = (pedigree.father, pedigree.mother) else {
        return Ok(BTreeSet::new());
    };
    let mut result = BTreeSet::new();
    for &allele_id in candidates {
        if table.genotype_type(allele_id, father.id) != GenotypeType::Reference
            || table.genotype_type(allele_id, mother.id) != GenotypeType::Reference
        {
            continue;
        }
        let proband_gt = table.genotype_type(allele_id, pedigree.proband.id);
        let child_code = match proband_gt {
            GenotypeType::Heterozygous => 1,
            GenotypeType::Homozygous => 2,
            _ => continue,
        };
        let on_x = x_minus_par_allele(snapshot, allele_id);
        let proband_male = pedigree.proband.sex == Sex::Male;
        if on_x {
            // a genotype inconsistent with the proband's sex is a calling
            // artifact, not a denovo candidate
            match pedigree.proband.sex {
                Sex::Male if proband_gt != GenotypeType::Homozygous => continue,
                Sex::Unknown => continue,
                _ => {}
            }
        }
        let pls = [
            table.cell(allele_id, father.id),
            table.cell(allele_id, mother.id),
            table.cell(allele_id, pedigree.proband.id),
        ]
        .map(|cell| cell.and_then(|cell| cell.genotype_likelihood));
        let [Some(pl_father), Some(pl_mother), Some(pl_child)] = pls else {
            continue;
        };
        let p = denovo_probability(
            pl_father,
            pl_mother,
            pl_child,
            on_x,
            proband_male,
            [0, 0, child_code],
        )?;
        if p >= config.min_denovo_probability {
            tracing::debug!("allele {} is a denovo candidate, p = {}", allele_id, p);
            result.insert(allele_id);
        }
    }
    Ok(result)
}

/// Autosomal recessive homozygous alleles: proband homozygous, both parents
/// carriers, siblings consistent with their affection status.
fn recessive_homozygous(
    snapshot: &Snapshot,
    table: &GenotypeTable,
    pedigree: &Pedigree,
    candidates: &BTreeSet<AlleleId>,
) -> BTreeSet<AlleleId> {
    let (Some(father), Some(mother)) = (pedigree.father, pedigree.mother) else {
        return BTreeSet::new();
    };
    candidates
        .iter()
        .copied()
        .filter(|&allele_id| {
            !x_minus_par_allele(snapshot, allele_id)
                && table.genotype_type(allele_id, pedigree.proband.id) == GenotypeType::Homozygous
                && table.genotype_type(allele_id, father.id) == GenotypeType::Heterozygous
                && table.genotype_type(allele_id, mother.id) == GenotypeType::Heterozygous
                && siblings_consistent(table, pedigree, allele_id, |_| true)
        })
        .collect()
}

/// Whether every sibling selected by `relevant` has a genotype consistent
/// with a recessive pattern: affected siblings homozygous, unaffected
/// siblings not homozygous.
fn siblings_consistent(
    table: &GenotypeTable,
    pedigree: &Pedigree,
    allele_id: AlleleId,
    relevant: impl Fn(&Sample) -> bool,
) -> bool {
    pedigree.siblings.iter().copied().filter(|s| relevant(s)).all(|sibling: &Sample| {
        let gt = table.genotype_type(allele_id, sibling.id);
        if sibling.affected {
            gt == GenotypeType::Homozygous
        } else {
            gt != GenotypeType::Homozygous
        }
    })
}

/// X-linked recessive alleles: hemizygous male proband, carrier mother.
fn xlinked_recessive(
    snapshot: &Snapshot,
    table: &GenotypeTable,
    pedigree: &Pedigree,
    candidates: &BTreeSet<AlleleId>,
) -> BTreeSet<AlleleId> {
    let (Some(father), Some(mother)) = (pedigree.father, pedigree.mother) else {
        return BTreeSet::new();
    };
    if pedigree.proband.sex != Sex::Male {
        return BTreeSet::new();
    }
    candidates
        .iter()
        .copied()
        .filter(|&allele_id| {
            let father_gt = table.genotype_type(allele_id, father.id);
            x_minus_par_allele(snapshot, allele_id)
                && table.genotype_type(allele_id, pedigree.proband.id) == GenotypeType::Homozygous
                && table.genotype_type(allele_id, mother.id) == GenotypeType::Heterozygous
                && !(father.affected && father_gt == GenotypeType::Homozygous)
                && siblings_consistent(table, pedigree, allele_id, |sibling| {
                    sibling.sex == Sex::Male
                })
        })
        .collect()
}

/// Compound heterozygous candidates: two heterozygous proband alleles in
/// the same gene inherited from different parents.
fn compound_heterozygous(
    snapshot: &Snapshot,
    panel: &GenePanel,
    table: &GenotypeTable,
    pedigree: &Pedigree,
    candidates: &BTreeSet<AlleleId>,
) -> BTreeSet<AlleleId> {
    let proband_id = pedigree.proband.id;
    let het_in = |sample: &Sample, allele_id: AlleleId| {
        table.genotype_type(allele_id, sample.id) == GenotypeType::Heterozygous
    };
    let carries = |sample: &Sample, allele_id: AlleleId| {
        matches!(
            table.genotype_type(allele_id, sample.id),
            GenotypeType::Heterozygous | GenotypeType::Homozygous
        )
    };

    // group the proband's heterozygous candidates by gene
    let mut by_gene: std::collections::BTreeMap<i64, Vec<AlleleId>> = Default::default();
    for &allele_id in candidates {
        if table.genotype_type(allele_id, proband_id) != GenotypeType::Heterozygous {
            continue;
        }
        for gene in snapshot.panel_gene_ids(allele_id, panel) {
            by_gene.entry(gene).or_default().push(allele_id);
        }
    }

    let mut result = BTreeSet::new();
    for alleles in by_gene.values() {
        for (&a, &b) in alleles.iter().tuple_combinations() {
            let parental_split = match (pedigree.father, pedigree.mother) {
                (Some(father), Some(mother)) => {
                    let (fa, fb) = (het_in(father, a), het_in(father, b));
                    let (ma, mb) = (het_in(mother, a), het_in(mother, b));
                    (fa && !fb && mb && !ma) || (fb && !fa && ma && !mb)
                }
                // without both parents any heterozygous pair qualifies
                _ => true,
            };
            let siblings_ok = pedigree
                .siblings
                .iter()
                .filter(|sibling| !sibling.affected)
                .all(|sibling| !(carries(sibling, a) && carries(sibling, b)));
            if parental_split && siblings_ok {
                result.insert(a);
                result.insert(b);
            }
        }
    }
    result
}

/// Alleles incompatible with any segregation pattern: homozygous in an
/// unaffected relative or absent in an affected relative.
fn non_segregating(
    table: &GenotypeTable,
    pedigree: &Pedigree,
    candidates: &BTreeSet<AlleleId>,
) -> BTreeSet<AlleleId> {
    candidates
        .iter()
        .copied()
        .filter(|&allele_id| {
            pedigree.relatives().any(|relative| {
                let gt = table.genotype_type(allele_id, relative.id);
                if relative.affected {
                    matches!(gt, GenotypeType::Reference | GenotypeType::NoCoverage)
                } else {
                    gt == GenotypeType::Homozygous
                }
            })
        })
        .collect()
}
