//! Population frequency filter.
//!
//! Classifies each allele as common / less-common / low / null against
//! per-provider cutoffs and excludes according to the configured mode.  The
//! cutoff group (`default` vs `AD`) is chosen by asking the gene panel which
//! inheritance mode the annotated genes have; per-gene overrides can replace
//! a group for a specific HGNC id.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_with::serde_as;

use crate::model::{AlleleId, FrequencyRow, GenePanel, HgncId, Snapshot};

/// Filtering mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Mode {
    /// Match alleles classified as common.
    #[default]
    Common,
    /// Match alleles classified as common or less-common.
    LessCommon,
    /// Match annotated, non-null alleles that are not common ("keep only
    /// the commons").
    InverseCommon,
}

/// Frequency cutoffs of one provider.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cutoffs {
    /// At or above this frequency the allele is common.
    pub hi_freq_cutoff: f64,
    /// At or above this frequency (and below `hi_freq_cutoff`) the allele is
    /// less-common.
    pub lo_freq_cutoff: f64,
}

/// The two cutoff groups: `default` and `AD` (applied to alleles whose
/// annotated genes are all dominant-only on the panel).
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdGroups {
    /// Cutoffs per provider for the general case.
    pub default: IndexMap<String, Cutoffs>,
    /// Cutoffs per provider for AD-only genes.
    #[serde(rename = "AD", default)]
    pub ad: IndexMap<String, Cutoffs>,
}

/// Per-gene override of either cutoff group.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneOverride {
    /// Replacement for the `default` group.
    #[serde(default)]
    pub default: Option<IndexMap<String, Cutoffs>>,
    /// Replacement for the `AD` group.
    #[serde(rename = "AD", default)]
    pub ad: Option<IndexMap<String, Cutoffs>>,
}

/// Configuration of the frequency filter.
#[serde_as]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Filtering mode.
    #[serde(default)]
    pub mode: Mode,
    /// Cutoff groups.
    pub thresholds: ThresholdGroups,
    /// Minimum allele number per provider and population; frequencies whose
    /// allele number is below the configured minimum are ignored.
    #[serde(default)]
    pub num_thresholds: IndexMap<String, IndexMap<String, i64>>,
    /// Per-gene cutoff overrides, keyed by HGNC id.
    #[serde(default)]
    #[serde_as(as = "IndexMap<serde_with::DisplayFromStr, _>")]
    pub genes: IndexMap<HgncId, GeneOverride>,
}

/// Commonness classification of one allele, least severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Commonness {
    /// No frequency and no allele number observed.
    Null,
    /// Observed but below every `lo_freq_cutoff`.
    Low,
    /// At or above a `lo_freq_cutoff`.
    LessCommon,
    /// At or above a `hi_freq_cutoff`.
    Common,
}

/// Apply the frequency filter; returns the matched allele ids.
pub fn filter(
    snapshot: &Snapshot,
    panel: &GenePanel,
    candidates: &BTreeSet<AlleleId>,
    config: &Config,
) -> BTreeSet<AlleleId> {
    let mut result = BTreeSet::new();
    for &allele_id in candidates {
        let Some(row) = snapshot.current_frequency(allele_id) else {
            continue;
        };
        let commonness = classify(snapshot, panel, allele_id, row, config);
        let matched = match config.mode {
            Mode::Common => commonness == Commonness::Common,
            Mode::LessCommon => commonness >= Commonness::LessCommon,
            Mode::InverseCommon => {
                commonness != Commonness::Common && commonness != Commonness::Null
            }
        };
        if matched {
            tracing::trace!(
                "allele {} matches frequency filter as {:?} (mode {})",
                allele_id,
                commonness,
                config.mode
            );
            result.insert(allele_id);
        }
    }
    result
}

/// Classify one allele against the applicable cutoff maps.
///
/// With multiple annotated genes the most permissive outcome wins, so the
/// final class is the minimum over the per-gene contexts.
fn classify(
    snapshot: &Snapshot,
    panel: &GenePanel,
    allele_id: AlleleId,
    row: &FrequencyRow,
    config: &Config,
) -> Commonness {
    let gene_ids: BTreeSet<HgncId> = snapshot
        .current_transcripts(allele_id)
        .iter()
        .filter_map(|tx| tx.hgnc_id)
        .collect();

    // AD cutoffs apply only when every annotated gene is dominant-only on
    // the panel; any conflict falls back to the more permissive default.
    let use_ad = !gene_ids.is_empty() && gene_ids.iter().all(|&g| panel.is_ad_only(g));

    let group_cutoffs = |ad: bool| -> &IndexMap<String, Cutoffs> {
        if ad {
            &config.thresholds.ad
        } else {
            &config.thresholds.default
        }
    };

    let cutoff_maps: Vec<&IndexMap<String, Cutoffs>> = if gene_ids.is_empty() {
        vec![group_cutoffs(false)]
    } else {
        gene_ids
            .iter()
            .map(|g| {
                let override_map = config.genes.get(g).and_then(|o| {
                    if use_ad {
                        o.ad.as_ref()
                    } else {
                        o.default.as_ref()
                    }
                });
                override_map.unwrap_or_else(|| group_cutoffs(use_ad))
            })
            .collect()
    };

    cutoff_maps
        .into_iter()
        .map(|cutoffs| classify_against(row, cutoffs, &config.num_thresholds))
        .min()
        .unwrap_or(Commonness::Null)
}

/// Classify one frequency row against one cutoff map.
fn classify_against(
    row: &FrequencyRow,
    cutoffs: &IndexMap<String, Cutoffs>,
    num_thresholds: &IndexMap<String, IndexMap<String, i64>>,
) -> Commonness {
    if row.frequencies.is_empty() && row.counts.is_empty() {
        return Commonness::Null;
    }

    let mut result = Commonness::Low;
    for (key, &freq) in &row.frequencies {
        let Some((provider, population)) = key.split_once('.') else {
            continue;
        };
        let Some(cutoff) = cutoffs.get(provider) else {
            continue;
        };
        if let Some(min_num) = num_thresholds
            .get(provider)
            .and_then(|pops| pops.get(population))
        {
            let num = row.counts.get(key).copied().unwrap_or(0);
            if num < *min_num {
                continue;
            }
        }
        if freq >= cutoff.hi_freq_cutoff {
            return Commonness::Common;
        } else if freq >= cutoff.lo_freq_cutoff {
            result = Commonness::LessCommon;
        }
    }
    result
}
