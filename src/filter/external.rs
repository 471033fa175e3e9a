//! External-evidence filter.
//!
//! Excludes alleles based on their ClinVar record (star rating and
//! submission counts) and their HGMD tag.  When both sub-filters are
//! configured an allele must match both.

use std::collections::BTreeSet;

use crate::model::{AlleleId, ClinvarRecord, ExternalAnnotation, Snapshot};

/// Submission count bucket, matched case-insensitively as a substring of
/// the submission's clinical significance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Benign,
    Uncertain,
    Pathogenic,
}

impl Bucket {
    fn term(&self) -> &'static str {
        match self {
            Bucket::Benign => "benign",
            Bucket::Uncertain => "uncertain",
            Bucket::Pathogenic => "pathogenic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Operator {
    fn holds(&self, lhs: i64, rhs: i64) -> bool {
        match self {
            Operator::Eq => lhs == rhs,
            Operator::Gt => lhs > rhs,
            Operator::Ge => lhs >= rhs,
            Operator::Lt => lhs < rhs,
            Operator::Le => lhs <= rhs,
        }
    }
}

/// Right-hand side of a combination: a literal count or another bucket.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Threshold {
    Count(i64),
    Bucket(Bucket),
}

/// One submission count condition, e.g. `["pathogenic", "gt", "benign"]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Combination(pub Bucket, pub Operator, pub Threshold);

/// ClinVar sub-configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClinvarConfig {
    /// Minimum star rating of the record's review status.
    pub num_stars: u32,
    /// Submission count conditions; all must hold.
    #[serde(default)]
    pub combinations: Vec<Combination>,
    #[serde(default)]
    pub inverse: bool,
}

/// HGMD sub-configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HgmdConfig {
    /// Accepted tags; `null` means "no HGMD record".
    pub tags: Vec<Option<String>>,
    #[serde(default)]
    pub inverse: bool,
}

/// Configuration of the external-evidence filter.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub clinvar: Option<ClinvarConfig>,
    #[serde(default)]
    pub hgmd: Option<HgmdConfig>,
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.clinvar.is_none() && self.hgmd.is_none() {
            return Err("at least one of clinvar and hgmd must be configured".to_string());
        }
        Ok(())
    }
}

/// Star count of a ClinVar review status string.
fn review_status_stars(review_status: &str) -> u32 {
    match review_status {
        "criteria provided, single submitter" => 1,
        "criteria provided, conflicting interpretations" => 1,
        "criteria provided, multiple submitters, no conflicts" => 2,
        "reviewed by expert panel" => 3,
        "practice guideline" => 4,
        // including "no assertion criteria provided"
        _ => 0,
    }
}

/// Number of submissions whose clinical significance contains the bucket
/// term, case-insensitively.
fn bucket_count(record: &ClinvarRecord, bucket: Bucket) -> i64 {
    record
        .submissions
        .iter()
        .filter(|submission| {
            submission
                .clinical_significance
                .to_lowercase()
                .contains(bucket.term())
        })
        .count() as i64
}

fn clinvar_matches(record: Option<&ClinvarRecord>, config: &ClinvarConfig) -> bool {
    let matched = record.is_some_and(|record| {
        review_status_stars(&record.review_status) >= config.num_stars
            && config.combinations.iter().all(|combination| {
                let lhs = bucket_count(record, combination.0);
                let rhs = match &combination.2 {
                    Threshold::Count(count) => *count,
                    Threshold::Bucket(bucket) => bucket_count(record, *bucket),
                };
                combination.1.holds(lhs, rhs)
            })
    });
    matched != config.inverse
}

fn hgmd_matches(annotation: Option<&ExternalAnnotation>, config: &HgmdConfig) -> bool {
    let tag = annotation.and_then(|annotation| annotation.hgmd_tag.clone());
    let matched = config.tags.contains(&tag);
    matched != config.inverse
}

/// Apply the external-evidence filter; returns the matched allele ids.
pub fn filter(
    snapshot: &Snapshot,
    candidates: &BTreeSet<AlleleId>,
    config: &Config,
) -> BTreeSet<AlleleId> {
    let mut result = BTreeSet::new();
    for &allele_id in candidates {
        let annotation = snapshot.current_external(allele_id);
        let clinvar_ok = config
            .clinvar
            .as_ref()
            .map(|clinvar| {
                clinvar_matches(annotation.and_then(|a| a.clinvar.as_ref()), clinvar)
            })
            .unwrap_or(true);
        let hgmd_ok = config
            .hgmd
            .as_ref()
            .map(|hgmd| hgmd_matches(annotation, hgmd))
            .unwrap_or(true);
        if clinvar_ok && hgmd_ok {
            result.insert(allele_id);
        }
    }
    result
}
