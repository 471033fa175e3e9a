//! Coding-region filter.
//!
//! Excludes alleles lying outside a coding "core" defined by a splice-region
//! window around exon boundaries and a UTR window around the CDS bounds,
//! evaluated on the signed distances projected onto the gene panel's
//! transcripts.

use std::collections::BTreeSet;

use crate::model::{AlleleId, GenePanel, Snapshot};

/// Configuration of the region filter.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Inclusive window of accepted exon distances, e.g. `[-12, 6]`.
    pub splice_region: [i64; 2],
    /// Inclusive window of accepted coding-region distances, e.g.
    /// `[-20, 20]`.
    pub utr_region: [i64; 2],
}

/// Apply the region filter; returns the allele ids outside the core.
pub fn filter(
    snapshot: &Snapshot,
    panel: &GenePanel,
    candidates: &BTreeSet<AlleleId>,
    config: &Config,
) -> BTreeSet<AlleleId> {
    let mut result = BTreeSet::new();
    for &allele_id in candidates {
        let rows = snapshot.panel_transcripts(allele_id, panel);
        // Only rows with an exon distance carry region information; alleles
        // without any informative gene panel annotation are never filtered.
        let informative = rows
            .iter()
            .filter_map(|row| {
                // a missing coding-region distance means inside the CDS
                row.exon_distance
                    .map(|exon| (exon, row.coding_region_distance.unwrap_or(0)))
            })
            .collect::<Vec<_>>();
        if informative.is_empty() {
            continue;
        }
        let inside = informative.iter().any(|&(exon_distance, coding_distance)| {
            within(exon_distance, config.splice_region) && within(coding_distance, config.utr_region)
        });
        if !inside {
            tracing::trace!("allele {} is outside the coding core", allele_id);
            result.insert(allele_id);
        }
    }
    result
}

/// Whether `value` lies in the inclusive window `[lo, hi]`.
fn within(value: i64, window: [i64; 2]) -> bool {
    value >= window[0] && value <= window[1]
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::model::testutils::{snp, transcript_row};
    use crate::model::{Consequence, GenePanel, PanelTranscript, Snapshot, SnapshotData};

    use super::Config;

    fn panel() -> GenePanel {
        GenePanel {
            name: "HBOC".to_string(),
            version: "v01".to_string(),
            transcripts: vec![PanelTranscript {
                transcript_name: "NM_000059.3".to_string(),
                hgnc_id: 1101,
                chromosome: "13".to_string(),
                strand: 1,
                exon_starts: vec![1000],
                exon_ends: vec![2000],
                cds_start: 1000,
                cds_end: 2000,
            }],
            phenotypes: vec![],
        }
    }

    fn snapshot(
        exon_distance: Option<i64>,
        coding_region_distance: Option<i64>,
        on_panel: bool,
    ) -> Snapshot {
        let transcript = if on_panel { "NM_000059.3" } else { "NM_999999.1" };
        SnapshotData {
            alleles: vec![snp(1, "13", 1500, "C", "T")],
            transcripts: vec![transcript_row(
                1,
                transcript,
                1101,
                &[Consequence::IntronVariant],
                exon_distance,
                coding_region_distance,
            )],
            genepanels: vec![panel()],
            ..Default::default()
        }
        .into()
    }

    #[rstest]
    // inside a CDS exon: never filtered
    #[case(Some(0), None, true, false)]
    // splice region boundary values
    #[case(Some(-12), None, true, false)]
    #[case(Some(6), None, true, false)]
    // deep intronic: filtered
    #[case(Some(-40), None, true, true)]
    #[case(Some(7), None, true, true)]
    // UTR window
    #[case(Some(0), Some(-20), true, false)]
    #[case(Some(0), Some(-21), true, true)]
    #[case(Some(0), Some(20), true, false)]
    #[case(Some(0), Some(21), true, true)]
    // no gene panel annotation: never filtered
    #[case(Some(-40), None, false, false)]
    // no informative annotation: never filtered
    #[case(None, None, true, false)]
    fn filter_core_windows(
        #[case] exon_distance: Option<i64>,
        #[case] coding_region_distance: Option<i64>,
        #[case] on_panel: bool,
        #[case] expected_match: bool,
    ) {
        let snapshot = snapshot(exon_distance, coding_region_distance, on_panel);
        let config = Config {
            splice_region: [-12, 6],
            utr_region: [-20, 20],
        };

        let matched = super::filter(&snapshot, &panel(), &[1].into_iter().collect(), &config);

        assert_eq!(matched.contains(&1), expected_match);
    }

    #[test]
    fn one_inside_transcript_keeps_the_allele() {
        let mut data = SnapshotData {
            alleles: vec![snp(1, "13", 1500, "C", "T")],
            genepanels: vec![panel()],
            ..Default::default()
        };
        data.transcripts = vec![
            transcript_row(
                1,
                "NM_000059.3",
                1101,
                &[Consequence::IntronVariant],
                Some(-40),
                None,
            ),
            transcript_row(
                1,
                "NM_000059.3",
                1101,
                &[Consequence::MissenseVariant],
                Some(0),
                None,
            ),
        ];
        let snapshot: Snapshot = data.into();
        let config = Config {
            splice_region: [-12, 6],
            utr_region: [-20, 20],
        };

        let matched = super::filter(&snapshot, &panel(), &[1].into_iter().collect(), &config);

        assert!(matched.is_empty());
    }
}
