//! Polypyrimidine tract filter.
//!
//! C/T-run variants just upstream of a splice acceptor are usually benign.
//! An allele is filtered when it lies wholly inside a tract region of a gene
//! panel transcript and is a pyrimidine substitution or a short pyrimidine
//! deletion that cannot create a new AG acceptor dinucleotide.

use std::collections::BTreeSet;

use crate::common::canonical_chrom;
use crate::model::{Allele, AlleleId, ChangeType, GenePanel, PanelTranscript, Snapshot};

/// Configuration of the polypyrimidine tract filter.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Inclusive tract window relative to the acceptor-side exon boundary;
    /// both values negative, e.g. `[-20, -3]`.
    pub ppy_tract_region: [i64; 2],
}

/// Apply the polypyrimidine tract filter; returns the matched allele ids.
pub fn filter(
    snapshot: &Snapshot,
    panel: &GenePanel,
    candidates: &BTreeSet<AlleleId>,
    config: &Config,
) -> BTreeSet<AlleleId> {
    let mut result = BTreeSet::new();
    for &allele_id in candidates {
        let Some(allele) = snapshot.allele(allele_id) else {
            continue;
        };
        let matched = panel.transcripts.iter().any(|tx| {
            canonical_chrom(&tx.chromosome) == canonical_chrom(&allele.chromosome)
                && inside_tract(allele, tx, config.ppy_tract_region)
                && is_pyrimidine_change(allele, tx.strand)
        });
        if matched {
            tracing::trace!("allele {} lies in a polypyrimidine tract", allele_id);
            result.insert(allele_id);
        }
    }
    result
}

/// Whether the allele lies wholly inside one of the transcript's tract
/// regions.  Only acceptor-side boundaries are considered: exon starts
/// except the first on the + strand, exon ends except the last on the −
/// strand.
fn inside_tract(allele: &Allele, tx: &PanelTranscript, ppy: [i64; 2]) -> bool {
    let contains = |lo: i64, hi: i64| allele.start_position >= lo && allele.open_end_position <= hi + 1;
    if tx.strand >= 0 {
        tx.exon_starts
            .iter()
            .skip(1)
            .any(|&exon_start| contains(exon_start + ppy[0], exon_start + ppy[1]))
    } else {
        let n = tx.exon_ends.len();
        tx.exon_ends
            .iter()
            .take(n.saturating_sub(1))
            .any(|&exon_end| contains(exon_end - ppy[1], exon_end - ppy[0]))
    }
}

/// Whether the allele is a benign-looking pyrimidine change for the given
/// strand: a C↔T SNP (A↔G on the − strand) or a deletion of up to two
/// pyrimidines whose anchor base does not complete an AG acceptor.
fn is_pyrimidine_change(allele: &Allele, strand: i8) -> bool {
    let (snp_bases, del_bases, forbidden_anchor) = if strand >= 0 {
        (['C', 'T'], ['C', 'T'], 'A')
    } else {
        (['A', 'G'], ['A', 'G'], 'G')
    };
    match allele.change_type {
        ChangeType::Snp => {
            let mut chars = allele.vcf_ref.chars().chain(allele.vcf_alt.chars());
            let (Some(reference), Some(alternative)) = (chars.next(), chars.next()) else {
                return false;
            };
            reference != alternative
                && snp_bases.contains(&reference)
                && snp_bases.contains(&alternative)
        }
        ChangeType::Del => {
            let Some(deleted) = allele.deleted_bases() else {
                return false;
            };
            let Some(anchor) = allele.vcf_alt.chars().next() else {
                return false;
            };
            deleted.len() <= 2
                && deleted.chars().all(|base| del_bases.contains(&base))
                && anchor != forbidden_anchor
        }
        ChangeType::Ins | ChangeType::Indel => false,
    }
}
