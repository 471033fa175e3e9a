//! Consequence filter.
//!
//! Excludes alleles whose most severe annotated consequence is in the
//! configured set, optionally only considering gene panel transcripts.

use std::collections::BTreeSet;

use crate::model::{AlleleId, Consequence, GenePanel, Snapshot};

/// Configuration of the consequence filter.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Consequence terms that cause exclusion when they are the allele's
    /// most severe one.
    pub consequences: Vec<Consequence>,
    /// Only consider transcripts belonging to the analysis gene panel.
    #[serde(default)]
    pub genepanel_only: bool,
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.consequences.is_empty() {
            return Err("at least one consequence must be given".to_string());
        }
        Ok(())
    }
}

/// Apply the consequence filter; returns the matched allele ids.
pub fn filter(
    snapshot: &Snapshot,
    panel: &GenePanel,
    candidates: &BTreeSet<AlleleId>,
    config: &Config,
) -> BTreeSet<AlleleId> {
    let mut result = BTreeSet::new();
    for &allele_id in candidates {
        let worst = if config.genepanel_only {
            worst_consequence(snapshot.panel_transcripts(allele_id, panel).into_iter())
        } else {
            worst_consequence(snapshot.current_transcripts(allele_id).into_iter())
        };
        if let Some(worst) = worst {
            if config.consequences.contains(&worst) {
                tracing::trace!(
                    "allele {} has excluded worst consequence {:?}",
                    allele_id,
                    worst
                );
                result.insert(allele_id);
            }
        }
    }
    result
}

/// The most severe consequence over all given transcript rows, if any.
///
/// `Consequence` orders most severe first, so the most severe one is the
/// minimum.
fn worst_consequence<'a>(
    rows: impl Iterator<Item = &'a crate::model::TranscriptRow>,
) -> Option<Consequence> {
    rows.flat_map(|row| row.consequences.iter().copied()).min()
}
