//! Gene filter.
//!
//! Excludes alleles by the HGNC gene ids of their gene panel transcript
//! annotations.

use std::collections::BTreeSet;

use serde_with::{serde_as, DisplayFromStr};

use crate::model::{AlleleId, GenePanel, HgncId, Snapshot};

/// How the configured gene list is matched against an allele's gene set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// At least one of the allele's genes is in the list.
    One,
    /// All of the allele's genes are in the list.
    All,
}

/// Configuration of the gene filter.
#[serde_as]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HGNC ids, given as strings.
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub genes: Vec<HgncId>,
    pub mode: Mode,
    #[serde(default)]
    pub inverse: bool,
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.genes.is_empty() {
            return Err("at least one gene must be given".to_string());
        }
        Ok(())
    }
}

/// Apply the gene filter; returns the matched allele ids.
pub fn filter(
    snapshot: &Snapshot,
    panel: &GenePanel,
    candidates: &BTreeSet<AlleleId>,
    config: &Config,
) -> BTreeSet<AlleleId> {
    let genes = config.genes.iter().copied().collect::<BTreeSet<_>>();
    let mut result = BTreeSet::new();
    for &allele_id in candidates {
        let allele_genes = snapshot.panel_gene_ids(allele_id, panel);
        // Alleles without gene panel annotation are never filtered, not
        // even by the inverse form.
        if allele_genes.is_empty() {
            continue;
        }
        let matched = match config.mode {
            Mode::One => !allele_genes.is_disjoint(&genes),
            Mode::All => allele_genes.is_subset(&genes),
        };
        if matched != config.inverse {
            result.insert(allele_id);
        }
    }
    result
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::model::testutils::{snp, transcript_row};
    use crate::model::{Consequence, GenePanel, PanelTranscript, Snapshot, SnapshotData};

    use super::{Config, Mode};

    fn panel_transcript(name: &str, hgnc_id: i64) -> PanelTranscript {
        PanelTranscript {
            transcript_name: name.to_string(),
            hgnc_id,
            chromosome: "1".to_string(),
            strand: 1,
            exon_starts: vec![100],
            exon_ends: vec![200],
            cds_start: 100,
            cds_end: 200,
        }
    }

    fn panel() -> GenePanel {
        GenePanel {
            name: "Panel".to_string(),
            version: "v1".to_string(),
            transcripts: vec![
                panel_transcript("NM_1.1", 1101),
                panel_transcript("NM_2.1", 1102),
            ],
            phenotypes: vec![],
        }
    }

    /// One allele annotated on genes 1101 and 1102, one off-panel allele.
    fn snapshot() -> Snapshot {
        SnapshotData {
            alleles: vec![snp(1, "1", 150, "C", "T"), snp(2, "1", 160, "C", "T")],
            transcripts: vec![
                transcript_row(1, "NM_1.1", 1101, &[Consequence::MissenseVariant], Some(0), None),
                transcript_row(1, "NM_2.1", 1102, &[Consequence::MissenseVariant], Some(0), None),
                transcript_row(2, "NM_9.1", 1109, &[Consequence::MissenseVariant], Some(0), None),
            ],
            genepanels: vec![panel()],
            ..Default::default()
        }
        .into()
    }

    #[rstest]
    // one: any intersection matches
    #[case(vec![1101], Mode::One, false, true)]
    #[case(vec![1103], Mode::One, false, false)]
    // all: the allele's gene set must be a subset
    #[case(vec![1101], Mode::All, false, false)]
    #[case(vec![1101, 1102], Mode::All, false, true)]
    #[case(vec![1101, 1102, 1103], Mode::All, false, true)]
    // inverse flips the decision
    #[case(vec![1101], Mode::One, true, false)]
    #[case(vec![1103], Mode::One, true, true)]
    fn gene_set_matching(
        #[case] genes: Vec<i64>,
        #[case] mode: Mode,
        #[case] inverse: bool,
        #[case] expected_match: bool,
    ) {
        let config = Config {
            genes,
            mode,
            inverse,
        };

        let matched = super::filter(&snapshot(), &panel(), &[1].into_iter().collect(), &config);

        assert_eq!(matched.contains(&1), expected_match);
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn off_panel_allele_is_never_filtered(#[case] inverse: bool) {
        let config = Config {
            genes: vec![1101],
            mode: Mode::One,
            inverse,
        };

        let matched = super::filter(&snapshot(), &panel(), &[2].into_iter().collect(), &config);

        assert!(matched.is_empty());
    }

    #[test]
    fn genes_parse_from_strings() {
        let config: Config = serde_json::from_str(
            r#"{"genes": ["1101", "1102"], "mode": "one", "inverse": false}"#,
        )
        .expect("valid config");
        assert_eq!(config.genes, vec![1101, 1102]);
    }
}
