//! Quality filter.
//!
//! Analysis-typed.  Excludes alleles whose call quality is poor in every
//! sample that has a genotype row: low QUAL, skewed allele ratio, or a
//! failing FILTER status.  Missing values never cause a match.

use std::collections::BTreeSet;

use regex::Regex;

use crate::model::AlleleId;

use super::gt_table::{GenotypeCell, GenotypeTable};

/// FILTER status sub-condition.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterStatusConfig {
    /// Regex matched against the VCF FILTER string.
    pub pattern: String,
    #[serde(default)]
    pub inverse: bool,
    /// Also treat `PASS` and `.` as matching.
    #[serde(default)]
    pub filter_empty: bool,
}

/// Configuration of the quality filter.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Match when QUAL is below this threshold.
    #[serde(default)]
    pub qual: Option<f64>,
    /// Match when the allele ratio lies in `(0, threshold)`.
    #[serde(default)]
    pub allele_ratio: Option<f64>,
    #[serde(default)]
    pub filter_status: Option<FilterStatusConfig>,
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.qual.is_none() && self.allele_ratio.is_none() && self.filter_status.is_none() {
            return Err("at least one quality condition must be given".to_string());
        }
        if let Some(filter_status) = &self.filter_status {
            Regex::new(&filter_status.pattern)
                .map_err(|e| format!("invalid filter_status pattern: {}", e))?;
        }
        Ok(())
    }
}

/// Apply the quality filter; returns the matched allele ids.
pub fn filter(
    table: &GenotypeTable,
    candidates: &BTreeSet<AlleleId>,
    config: &Config,
) -> Result<BTreeSet<AlleleId>, regex::Error> {
    let status = config
        .filter_status
        .as_ref()
        .map(|fs| Regex::new(&fs.pattern).map(|pattern| (fs, pattern)))
        .transpose()?;
    let mut result = BTreeSet::new();
    for &allele_id in candidates {
        let Some(row) = table.row(allele_id) else {
            continue;
        };
        if row.is_empty() {
            continue;
        }
        let matched = row
            .values()
            .all(|cell| cell_matches(cell, config, status.as_ref()));
        if matched {
            tracing::trace!("allele {} fails the quality conditions", allele_id);
            result.insert(allele_id);
        }
    }
    Ok(result)
}

/// Whether every configured condition holds for one sample cell.
fn cell_matches(
    cell: &GenotypeCell,
    config: &Config,
    status: Option<&(&FilterStatusConfig, Regex)>,
) -> bool {
    if let Some(threshold) = config.qual {
        if !cell.quality.is_some_and(|qual| qual < threshold) {
            return false;
        }
    }
    if let Some(threshold) = config.allele_ratio {
        if !cell
            .allele_ratio
            .is_some_and(|ratio| ratio > 0.0 && ratio < threshold)
        {
            return false;
        }
    }
    if let Some((filter_status, pattern)) = status {
        let matched = match cell.filter_status.as_deref() {
            Some(status) => {
                let is_empty = status == "PASS" || status == ".";
                (pattern.is_match(status) != filter_status.inverse)
                    || (filter_status.filter_empty && is_empty)
            }
            None => false,
        };
        if !matched {
            return false;
        }
    }
    true
}
