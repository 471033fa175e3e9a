//! Classification filter.
//!
//! Excludes alleles whose current assessment carries one of the configured
//! classification values, optionally ignoring assessments past an age
//! threshold.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};

use crate::model::{AlleleId, Classification, Snapshot};

/// Configuration of the classification filter.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Classification values that cause a match.
    pub classifications: Vec<Classification>,
    /// Flip the decision; unassessed alleles then match as well.
    #[serde(default)]
    pub inverse: bool,
    /// Treat assessments older than `outdated_after_days` as absent.
    #[serde(default)]
    pub exclude_outdated: bool,
    #[serde(default)]
    pub outdated_after_days: Option<i64>,
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.classifications.is_empty() {
            return Err("at least one classification must be given".to_string());
        }
        if self.exclude_outdated && self.outdated_after_days.is_none() {
            return Err(
                "exclude_outdated requires outdated_after_days to be set".to_string(),
            );
        }
        Ok(())
    }
}

/// Apply the classification filter; returns the matched allele ids.
pub fn filter(
    snapshot: &Snapshot,
    candidates: &BTreeSet<AlleleId>,
    config: &Config,
) -> BTreeSet<AlleleId> {
    filter_at(snapshot, candidates, config, Utc::now())
}

fn filter_at(
    snapshot: &Snapshot,
    candidates: &BTreeSet<AlleleId>,
    config: &Config,
    now: DateTime<Utc>,
) -> BTreeSet<AlleleId> {
    let mut result = BTreeSet::new();
    for &allele_id in candidates {
        let assessment = snapshot.current_assessment(allele_id).filter(|assessment| {
            match (config.exclude_outdated, config.outdated_after_days) {
                (true, Some(days)) => now - assessment.date_created <= Duration::days(days),
                _ => true,
            }
        });
        let matched = assessment
            .map(|assessment| config.classifications.contains(&assessment.classification))
            .unwrap_or(false);
        if matched != config.inverse {
            result.insert(allele_id);
        }
    }
    result
}
