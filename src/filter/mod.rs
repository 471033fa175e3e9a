//! Allele filter pipeline.
//!
//! An ordered list of configured filters partitions an input set of allele
//! ids into an `included` set and one exclusion bucket per filter.  Each
//! filter entry may carry exception filters whose matches are subtracted
//! from the entry's exclusion set.

pub mod classification;
pub mod consequence;
pub mod denovo;
pub mod external;
pub mod frequency;
pub mod gene;
pub mod gt_table;
pub mod inheritance;
pub mod ppy;
pub mod quality;
pub mod region;
pub mod segregation;

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::model::{AlleleId, AnalysisId, GenePanel, Snapshot};

use gt_table::GenotypeTable;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown filter name {name:?}")]
    UnknownFilter { name: String },
    #[error("invalid configuration of filter {name:?}: {message}")]
    Config { name: String, message: String },
    #[error("analysis-typed filter {name:?} cannot run without an analysis")]
    AnalysisFilterInBatchMode { name: String },
    #[error("analysis {analysis_id} not found")]
    UnknownAnalysis { analysis_id: AnalysisId },
    #[error("gene panel {name} {version} not found")]
    UnknownGenePanel { name: String, version: String },
    #[error("allele {allele_id} not found")]
    UnknownAllele { allele_id: AlleleId },
    #[error("filter {name:?} returned alleles outside its input")]
    FilterOutsideInput { name: String },
    #[error("analysis {analysis_id} has no proband sample")]
    NoProband { analysis_id: AnalysisId },
    #[error("analysis {analysis_id} has more than one proband sample")]
    MultipleProbands { analysis_id: AnalysisId },
    #[error("denovo probability: {0}")]
    Denovo(#[from] denovo::Error),
}

/// Whether a filter works on allele data alone or needs an analysis with
/// genotype data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDataType {
    Allele,
    Analysis,
}

/// A filter name together with its validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterKind {
    Frequency(frequency::Config),
    Region(region::Config),
    Ppy(ppy::Config),
    Consequence(consequence::Config),
    Gene(gene::Config),
    Classification(classification::Config),
    External(external::Config),
    Quality(quality::Config),
    Segregation(segregation::Config),
    Inheritance(inheritance::Config),
}

impl FilterKind {
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Frequency(_) => "frequency",
            FilterKind::Region(_) => "region",
            FilterKind::Ppy(_) => "ppy",
            FilterKind::Consequence(_) => "consequence",
            FilterKind::Gene(_) => "gene",
            FilterKind::Classification(_) => "classification",
            FilterKind::External(_) => "external",
            FilterKind::Quality(_) => "quality",
            FilterKind::Segregation(_) => "segregation",
            FilterKind::Inheritance(_) => "inheritance_model",
        }
    }

    pub fn data_type(&self) -> FilterDataType {
        match self {
            FilterKind::Quality(_) | FilterKind::Segregation(_) | FilterKind::Inheritance(_) => {
                FilterDataType::Analysis
            }
            _ => FilterDataType::Allele,
        }
    }

    /// Parse and validate one named config block from the registry.
    fn from_raw(name: &str, config: serde_json::Value) -> Result<Self, Error> {
        fn parse<T: serde::de::DeserializeOwned>(
            name: &str,
            config: serde_json::Value,
        ) -> Result<T, Error> {
            serde_json::from_value(config).map_err(|e| Error::Config {
                name: name.to_string(),
                message: e.to_string(),
            })
        }
        let kind = match name {
            "frequency" => FilterKind::Frequency(parse(name, config)?),
            "region" => FilterKind::Region(parse(name, config)?),
            "ppy" => FilterKind::Ppy(parse(name, config)?),
            "consequence" => FilterKind::Consequence(parse(name, config)?),
            "gene" => FilterKind::Gene(parse(name, config)?),
            "classification" => FilterKind::Classification(parse(name, config)?),
            "external" => FilterKind::External(parse(name, config)?),
            "quality" => FilterKind::Quality(parse(name, config)?),
            "segregation" => FilterKind::Segregation(parse(name, config)?),
            "inheritance_model" => FilterKind::Inheritance(parse(name, config)?),
            other => {
                return Err(Error::UnknownFilter {
                    name: other.to_string(),
                })
            }
        };
        kind.validate()?;
        Ok(kind)
    }

    fn validate(&self) -> Result<(), Error> {
        let result = match self {
            FilterKind::Consequence(config) => config.validate(),
            FilterKind::Gene(config) => config.validate(),
            FilterKind::Classification(config) => config.validate(),
            FilterKind::External(config) => config.validate(),
            FilterKind::Quality(config) => config.validate(),
            FilterKind::Segregation(config) => config.validate(),
            _ => Ok(()),
        };
        result.map_err(|message| Error::Config {
            name: self.name().to_string(),
            message,
        })
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RawExceptionEntry {
    name: String,
    config: serde_json::Value,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFilterEntry {
    name: String,
    config: serde_json::Value,
    #[serde(default)]
    exceptions: Vec<RawExceptionEntry>,
}

/// One pipeline entry: a filter and its exception filters.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(try_from = "RawFilterEntry")]
pub struct FilterEntry {
    pub kind: FilterKind,
    pub exceptions: Vec<FilterKind>,
}

impl TryFrom<RawFilterEntry> for FilterEntry {
    type Error = Error;

    fn try_from(raw: RawFilterEntry) -> Result<Self, Error> {
        let kind = FilterKind::from_raw(&raw.name, raw.config)?;
        let exceptions = raw
            .exceptions
            .into_iter()
            .map(|exception| FilterKind::from_raw(&exception.name, exception.config))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { kind, exceptions })
    }
}

/// The full, validated filter configuration document.
#[derive(Debug, Clone, PartialEq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    #[serde(default)]
    pub filters: Vec<FilterEntry>,
}

/// Partition of the input allele ids; buckets are sorted ascending.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct FilterResult {
    pub included: Vec<AlleleId>,
    pub excluded_by: IndexMap<String, Vec<AlleleId>>,
}

/// One batch-mode query: a gene panel and the allele ids to filter.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelQuery {
    pub genepanel_name: String,
    pub genepanel_version: String,
    pub allele_ids: Vec<AlleleId>,
}

/// Shared state of one pipeline invocation.
struct Context<'a> {
    snapshot: &'a Snapshot,
    panel: &'a GenePanel,
    /// Present in analysis mode only.
    analysis: Option<(AnalysisId, &'a GenotypeTable)>,
}

fn run_kind(
    kind: &FilterKind,
    ctx: &Context,
    candidates: &BTreeSet<AlleleId>,
) -> Result<BTreeSet<AlleleId>, Error> {
    let analysis = || {
        ctx.analysis.ok_or_else(|| Error::AnalysisFilterInBatchMode {
            name: kind.name().to_string(),
        })
    };
    Ok(match kind {
        FilterKind::Frequency(config) => {
            frequency::filter(ctx.snapshot, ctx.panel, candidates, config)
        }
        FilterKind::Region(config) => region::filter(ctx.snapshot, ctx.panel, candidates, config),
        FilterKind::Ppy(config) => ppy::filter(ctx.snapshot, ctx.panel, candidates, config),
        FilterKind::Consequence(config) => {
            consequence::filter(ctx.snapshot, ctx.panel, candidates, config)
        }
        FilterKind::Gene(config) => gene::filter(ctx.snapshot, ctx.panel, candidates, config),
        FilterKind::Classification(config) => {
            classification::filter(ctx.snapshot, candidates, config)
        }
        FilterKind::External(config) => external::filter(ctx.snapshot, candidates, config),
        FilterKind::Quality(config) => {
            let (_, table) = analysis()?;
            quality::filter(table, candidates, config).map_err(|e| Error::Config {
                name: kind.name().to_string(),
                message: e.to_string(),
            })?
        }
        FilterKind::Segregation(config) => {
            let (analysis_id, table) = analysis()?;
            segregation::filter(ctx.snapshot, ctx.panel, table, analysis_id, candidates, config)?
        }
        FilterKind::Inheritance(config) => {
            let (analysis_id, table) = analysis()?;
            inheritance::filter(ctx.snapshot, ctx.panel, table, analysis_id, candidates, config)
        }
    })
}

/// Run the configured filters over the input set and build the partition.
fn run_pipeline(
    ctx: &Context,
    config: &FilterConfig,
    input: &BTreeSet<AlleleId>,
) -> Result<FilterResult, Error> {
    if input.is_empty() {
        return Ok(FilterResult::default());
    }
    let mut remaining = input.clone();
    let mut buckets: IndexMap<String, BTreeSet<AlleleId>> = IndexMap::new();
    for entry in &config.filters {
        let name = entry.kind.name().to_string();
        let matched = run_kind(&entry.kind, ctx, &remaining)?;
        if !matched.is_subset(&remaining) {
            return Err(Error::FilterOutsideInput { name });
        }
        // exceptions see the full pre-exclusion candidate context so that
        // e.g. a compound-heterozygote exception sees sibling alleles
        let mut rescued = BTreeSet::new();
        for exception in &entry.exceptions {
            rescued.extend(run_kind(exception, ctx, &remaining)?);
        }
        let excluded = matched
            .difference(&rescued)
            .copied()
            .collect::<BTreeSet<_>>();
        tracing::debug!(
            "filter {} excludes {} of {} alleles ({} rescued)",
            name,
            excluded.len(),
            remaining.len(),
            matched.len() - excluded.len(),
        );
        for allele_id in &excluded {
            remaining.remove(allele_id);
        }
        buckets.entry(name).or_default().extend(excluded);
    }
    Ok(FilterResult {
        included: remaining.into_iter().collect(),
        excluded_by: buckets
            .into_iter()
            .map(|(name, ids)| (name, ids.into_iter().collect()))
            .collect(),
    })
}

/// Deduplicate the input ids and reject ids without an allele row.
fn check_alleles(snapshot: &Snapshot, allele_ids: &[AlleleId]) -> Result<BTreeSet<AlleleId>, Error> {
    let input = allele_ids.iter().copied().collect::<BTreeSet<_>>();
    for &allele_id in &input {
        if !snapshot.has_allele(allele_id) {
            return Err(Error::UnknownAllele { allele_id });
        }
    }
    Ok(input)
}

/// Filter the given alleles in the context of one analysis.
pub fn filter_analysis(
    snapshot: &Snapshot,
    config: &FilterConfig,
    analysis_id: AnalysisId,
    allele_ids: &[AlleleId],
) -> Result<FilterResult, Error> {
    let analysis = snapshot
        .analysis(analysis_id)
        .ok_or(Error::UnknownAnalysis { analysis_id })?;
    let panel = snapshot
        .genepanel(&analysis.genepanel_name, &analysis.genepanel_version)
        .ok_or_else(|| Error::UnknownGenePanel {
            name: analysis.genepanel_name.clone(),
            version: analysis.genepanel_version.clone(),
        })?;
    let input = check_alleles(snapshot, allele_ids)?;
    let sample_ids = snapshot
        .analysis_samples(analysis_id)
        .iter()
        .map(|sample| sample.id)
        .collect::<Vec<_>>();
    let table = GenotypeTable::build(snapshot, analysis_id, &input, &sample_ids);
    let ctx = Context {
        snapshot,
        panel,
        analysis: Some((analysis_id, &table)),
    };
    run_pipeline(&ctx, config, &input)
}

/// Filter allele sets per gene panel, without analysis context.
///
/// Analysis-typed filters (and exceptions) are rejected up front.  Results
/// are keyed by `"<panel name>_<panel version>"`.
pub fn filter_alleles(
    snapshot: &Snapshot,
    config: &FilterConfig,
    queries: &[PanelQuery],
) -> Result<IndexMap<String, FilterResult>, Error> {
    for entry in &config.filters {
        for kind in std::iter::once(&entry.kind).chain(entry.exceptions.iter()) {
            if kind.data_type() == FilterDataType::Analysis {
                return Err(Error::AnalysisFilterInBatchMode {
                    name: kind.name().to_string(),
                });
            }
        }
    }
    let mut results = IndexMap::new();
    for query in queries {
        let panel = snapshot
            .genepanel(&query.genepanel_name, &query.genepanel_version)
            .ok_or_else(|| Error::UnknownGenePanel {
                name: query.genepanel_name.clone(),
                version: query.genepanel_version.clone(),
            })?;
        let input = check_alleles(snapshot, &query.allele_ids)?;
        let ctx = Context {
            snapshot,
            panel,
            analysis: None,
        };
        let result = run_pipeline(&ctx, config, &input)?;
        results.insert(
            format!("{}_{}", query.genepanel_name, query.genepanel_version),
            result,
        );
    }
    Ok(results)
}

#[cfg(test)]
mod test {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::model::testutils::{deletion, gt_data, sample, snp, transcript_row};
    use crate::model::{
        Allele, AlleleAssessment, Analysis, Classification, Consequence, FrequencyRow, GenePanel,
        Genotype, GenotypeSampleData, GenotypeType, PanelTranscript, Sex, Snapshot, SnapshotData,
    };

    use super::{filter_alleles, filter_analysis, Error, FilterConfig, PanelQuery};

    const ANALYSIS: i64 = 1;
    const PROBAND: i64 = 100;
    const FATHER: i64 = 101;
    const MOTHER: i64 = 102;

    fn parse_config(json: &str) -> FilterConfig {
        serde_json::from_str(json).expect("valid filter config")
    }

    fn panel_transcript(name: &str, hgnc_id: i64, exon_starts: Vec<i64>) -> PanelTranscript {
        let exon_ends = exon_starts.iter().map(|start| start + 200).collect();
        PanelTranscript {
            transcript_name: name.to_string(),
            hgnc_id,
            chromosome: "13".to_string(),
            strand: 1,
            exon_starts,
            exon_ends,
            cds_start: 0,
            cds_end: 100_000,
        }
    }

    fn panel() -> GenePanel {
        GenePanel {
            name: "HBOC".to_string(),
            version: "v01".to_string(),
            transcripts: vec![panel_transcript("NM_000059.3", 1101, vec![1000, 5000])],
            phenotypes: vec![],
        }
    }

    fn frequency_row(allele_id: i64, exac_g: f64) -> FrequencyRow {
        FrequencyRow {
            allele_id,
            frequencies: [("ExAC.G".to_string(), exac_g)].into_iter().collect(),
            ..Default::default()
        }
    }

    fn base_data() -> SnapshotData {
        let mut proband = sample(PROBAND, ANALYSIS, "proband", true, true, Sex::Male);
        proband.father_id = Some(FATHER);
        proband.mother_id = Some(MOTHER);
        SnapshotData {
            genepanels: vec![panel()],
            analyses: vec![Analysis {
                id: ANALYSIS,
                name: "TrioA".to_string(),
                genepanel_name: "HBOC".to_string(),
                genepanel_version: "v01".to_string(),
            }],
            samples: vec![
                proband,
                sample(FATHER, ANALYSIS, "father", false, false, Sex::Male),
                sample(MOTHER, ANALYSIS, "mother", false, false, Sex::Female),
            ],
            ..Default::default()
        }
    }

    fn add_genotypes(
        data: &mut SnapshotData,
        allele_id: i64,
        calls: &[(i64, GenotypeType, Option<[i32; 3]>)],
    ) {
        let genotype_id = 1000 + allele_id;
        data.genotypes.push(Genotype {
            id: genotype_id,
            analysis_id: ANALYSIS,
            allele_id,
            secondallele_id: None,
        });
        for &(sample_id, genotype_type, pl) in calls {
            data.genotype_sample_data.push(GenotypeSampleData {
                genotype_likelihood: pl,
                ..gt_data(genotype_id, sample_id, genotype_type)
            });
        }
    }

    fn intron_allele(id: i64, exon_distance: i64) -> (Allele, crate::model::TranscriptRow) {
        (
            snp(id, "13", 980, "C", "T"),
            transcript_row(
                id,
                "NM_000059.3",
                1101,
                &[Consequence::IntronVariant],
                Some(exon_distance),
                None,
            ),
        )
    }

    const FREQUENCY: &str = r#"
        { "name": "frequency",
          "config": { "mode": "common",
                      "thresholds": { "default": { "ExAC": { "hi_freq_cutoff": 0.01,
                                                             "lo_freq_cutoff": 0.001 } } } } }"#;
    const REGION: &str = r#"
        { "name": "region",
          "config": { "splice_region": [-12, 6], "utr_region": [-20, 20] } }"#;

    // S1: an intronic, common allele is taken by whichever filter runs first

    #[rstest]
    #[case(&[REGION, FREQUENCY], "region")]
    #[case(&[FREQUENCY, REGION], "frequency")]
    fn first_matching_filter_takes_the_allele(
        #[case] entries: &[&str],
        #[case] expected_bucket: &str,
    ) {
        let mut data = base_data();
        let (allele, transcript) = intron_allele(1, -40);
        data.alleles.push(allele);
        data.transcripts.push(transcript);
        data.frequencies.push(frequency_row(1, 0.2));
        let snapshot: Snapshot = data.into();
        let config = parse_config(&format!("{{\"filters\": [{}]}}", entries.join(",")));

        let result = filter_analysis(&snapshot, &config, ANALYSIS, &[1]).unwrap();

        assert_eq!(result.included, Vec::<i64>::new());
        assert_eq!(result.excluded_by.get(expected_bucket), Some(&vec![1]));
        let other = if expected_bucket == "region" {
            "frequency"
        } else {
            "region"
        };
        assert_eq!(result.excluded_by.get(other), Some(&vec![]));
    }

    // S2: a class 5 assessment rescues a common allele from the frequency
    // filter

    #[test]
    fn classification_exception_rescues() {
        let mut data = base_data();
        data.alleles.push(snp(1, "17", 41243999, "C", "T"));
        data.frequencies.push(frequency_row(1, 0.05));
        data.assessments.push(AlleleAssessment {
            allele_id: 1,
            classification: Classification::Class5,
            date_created: Utc::now(),
            date_superseded: None,
        });
        let snapshot: Snapshot = data.into();
        let config = parse_config(
            r#"{ "filters": [
                  { "name": "frequency",
                    "config": { "mode": "common",
                                "thresholds": { "default": { "ExAC": { "hi_freq_cutoff": 0.001,
                                                                       "lo_freq_cutoff": 0.0001 } } } },
                    "exceptions": [
                      { "name": "classification", "config": { "classifications": ["5"] } }
                    ] } ] }"#,
        );

        let result = filter_analysis(&snapshot, &config, ANALYSIS, &[1]).unwrap();

        assert_eq!(result.included, vec![1]);
        assert_eq!(result.excluded_by.get("frequency"), Some(&vec![]));
    }

    // S3: a compound heterozygous pair is rescued as a pair, because the
    // exception sees the pre-exclusion context

    #[test]
    fn compound_heterozygous_exception_sees_sibling_alleles() {
        let mut data = base_data();
        for (id, position) in [(1i64, 1100i64), (2, 5100)] {
            data.alleles.push(snp(id, "13", position, "C", "T"));
            data.transcripts.push(transcript_row(
                id,
                "NM_000059.3",
                1101,
                &[Consequence::MissenseVariant],
                Some(0),
                None,
            ));
        }
        add_genotypes(
            &mut data,
            1,
            &[
                (PROBAND, GenotypeType::Heterozygous, None),
                (FATHER, GenotypeType::Heterozygous, None),
                (MOTHER, GenotypeType::Reference, None),
            ],
        );
        add_genotypes(
            &mut data,
            2,
            &[
                (PROBAND, GenotypeType::Heterozygous, None),
                (FATHER, GenotypeType::Reference, None),
                (MOTHER, GenotypeType::Heterozygous, None),
            ],
        );
        let snapshot: Snapshot = data.into();
        let config = parse_config(
            r#"{ "filters": [
                  { "name": "gene",
                    "config": { "genes": ["1101"], "mode": "one", "inverse": false },
                    "exceptions": [
                      { "name": "segregation",
                        "config": { "labels": ["compound_heterozygous"] } }
                    ] } ] }"#,
        );

        let result = filter_analysis(&snapshot, &config, ANALYSIS, &[1, 2]).unwrap();

        assert_eq!(result.included, vec![1, 2]);
        assert_eq!(result.excluded_by.get("gene"), Some(&vec![]));
    }

    // S4: confident X-linked denovo in a male proband

    #[test]
    fn denovo_on_x_is_labelled() {
        let mut data = base_data();
        data.alleles.push(snp(1, "X", 31_500_000, "C", "T"));
        add_genotypes(
            &mut data,
            1,
            &[
                (PROBAND, GenotypeType::Homozygous, Some([200, 200, 0])),
                (FATHER, GenotypeType::Reference, Some([0, 200, 200])),
                (MOTHER, GenotypeType::Reference, Some([0, 200, 200])),
            ],
        );
        let snapshot: Snapshot = data.into();
        let config = parse_config(
            r#"{ "filters": [
                  { "name": "segregation",
                    "config": { "labels": ["denovo"], "min_denovo_probability": 0.999 } } ] }"#,
        );

        let result = filter_analysis(&snapshot, &config, ANALYSIS, &[1]).unwrap();

        assert_eq!(result.excluded_by.get("segregation"), Some(&vec![1]));
    }

    // S5: ppy deletion edge

    #[rstest]
    #[case("CT", "C", false)]
    #[case("AT", "A", true)]
    fn ppy_deletion_anchor_decides(
        #[case] vcf_ref: &str,
        #[case] vcf_alt: &str,
        #[case] expected_included: bool,
    ) {
        let mut data = base_data();
        data.alleles.push(deletion(1, "13", 4983, vcf_ref, vcf_alt));
        let snapshot: Snapshot = data.into();
        // second exon starts at 5000; tract [-20, -3] maps to [4980, 4997]
        let config = parse_config(
            r#"{ "filters": [
                  { "name": "ppy", "config": { "ppy_tract_region": [-20, -3] } } ] }"#,
        );

        let result = filter_analysis(&snapshot, &config, ANALYSIS, &[1]).unwrap();

        assert_eq!(!result.included.is_empty(), expected_included);
    }

    // S6: the quality filter needs every sample to fail

    #[test]
    fn quality_needs_all_samples_to_fail() {
        let mut data = base_data();
        data.alleles.push(snp(1, "13", 1100, "C", "T"));
        add_genotypes(
            &mut data,
            1,
            &[
                (PROBAND, GenotypeType::Heterozygous, None),
                (FATHER, GenotypeType::Heterozygous, None),
            ],
        );
        data.genotype_sample_data[0].quality = Some(99.0);
        data.genotype_sample_data[1].quality = Some(150.0);
        let snapshot: Snapshot = data.into();
        let config = parse_config(
            r#"{ "filters": [ { "name": "quality", "config": { "qual": 100.0 } } ] }"#,
        );

        let result = filter_analysis(&snapshot, &config, ANALYSIS, &[1]).unwrap();

        assert_eq!(result.included, vec![1]);
    }

    // universal invariants

    #[test]
    fn output_partitions_the_input() {
        let mut data = base_data();
        let (allele, transcript) = intron_allele(1, -40);
        data.alleles.push(allele);
        data.transcripts.push(transcript);
        data.frequencies.push(frequency_row(1, 0.2));
        let (allele, transcript) = intron_allele(2, 0);
        data.alleles.push(allele);
        data.transcripts.push(transcript);
        data.frequencies.push(frequency_row(2, 0.000001));
        data.alleles.push(snp(3, "13", 1200, "G", "A"));
        data.frequencies.push(frequency_row(3, 0.5));
        let snapshot: Snapshot = data.into();
        let config = parse_config(&format!("{{\"filters\": [{}, {}]}}", REGION, FREQUENCY));

        let result = filter_analysis(&snapshot, &config, ANALYSIS, &[1, 2, 3]).unwrap();

        let mut seen = result.included.clone();
        for bucket in result.excluded_by.values() {
            seen.extend(bucket.iter().copied());
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(result.excluded_by.get("region"), Some(&vec![1]));
        assert_eq!(result.excluded_by.get("frequency"), Some(&vec![3]));
        assert_eq!(result.included, vec![2]);
    }

    #[test]
    fn removing_a_filter_never_shrinks_included() {
        let mut data = base_data();
        let (allele, transcript) = intron_allele(1, -40);
        data.alleles.push(allele);
        data.transcripts.push(transcript);
        data.frequencies.push(frequency_row(1, 0.2));
        data.alleles.push(snp(2, "13", 1200, "G", "A"));
        data.frequencies.push(frequency_row(2, 0.5));
        let snapshot: Snapshot = data.into();
        let full = parse_config(&format!("{{\"filters\": [{}, {}]}}", REGION, FREQUENCY));
        let reduced = parse_config(&format!("{{\"filters\": [{}]}}", REGION));

        let with_frequency = filter_analysis(&snapshot, &full, ANALYSIS, &[1, 2]).unwrap();
        let without_frequency = filter_analysis(&snapshot, &reduced, ANALYSIS, &[1, 2]).unwrap();

        assert!(with_frequency
            .included
            .iter()
            .all(|id| without_frequency.included.contains(id)));
        assert_eq!(with_frequency.included, Vec::<i64>::new());
        assert_eq!(without_frequency.included, vec![2]);
    }

    #[test]
    fn repeated_invocations_serialize_identically() {
        let mut data = base_data();
        let (allele, transcript) = intron_allele(1, -40);
        data.alleles.push(allele);
        data.transcripts.push(transcript);
        data.frequencies.push(frequency_row(1, 0.2));
        data.alleles.push(snp(2, "13", 1200, "G", "A"));
        data.frequencies.push(frequency_row(2, 0.5));
        let snapshot: Snapshot = data.into();
        let config = parse_config(&format!("{{\"filters\": [{}, {}]}}", REGION, FREQUENCY));

        let first = filter_analysis(&snapshot, &config, ANALYSIS, &[2, 1]).unwrap();
        let second = filter_analysis(&snapshot, &config, ANALYSIS, &[1, 2]).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn empty_input_yields_empty_partition() {
        let snapshot: Snapshot = base_data().into();
        let config = parse_config(&format!("{{\"filters\": [{}]}}", REGION));

        let result = filter_analysis(&snapshot, &config, ANALYSIS, &[]).unwrap();

        assert_eq!(result.included, Vec::<i64>::new());
        assert!(result.excluded_by.is_empty());
    }

    #[test]
    fn duplicate_input_ids_are_deduplicated() {
        let mut data = base_data();
        data.alleles.push(snp(1, "13", 1100, "C", "T"));
        let snapshot: Snapshot = data.into();
        let config = parse_config(&format!("{{\"filters\": [{}]}}", REGION));

        let result = filter_analysis(&snapshot, &config, ANALYSIS, &[1, 1, 1]).unwrap();

        assert_eq!(result.included, vec![1]);
    }

    // referential and configuration errors

    #[test]
    fn unknown_analysis_is_an_error() {
        let snapshot: Snapshot = base_data().into();
        let config = FilterConfig::default();

        let result = filter_analysis(&snapshot, &config, 99, &[]);

        assert!(matches!(result, Err(Error::UnknownAnalysis { analysis_id: 99 })));
    }

    #[test]
    fn unknown_allele_is_an_error() {
        let snapshot: Snapshot = base_data().into();
        let config = FilterConfig::default();

        let result = filter_analysis(&snapshot, &config, ANALYSIS, &[7]);

        assert!(matches!(result, Err(Error::UnknownAllele { allele_id: 7 })));
    }

    #[test]
    fn unknown_filter_name_fails_at_parse_time() {
        let result: Result<FilterConfig, _> = serde_json::from_str(
            r#"{ "filters": [ { "name": "bogus", "config": {} } ] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_config_key_fails_at_parse_time() {
        let result: Result<FilterConfig, _> = serde_json::from_str(
            r#"{ "filters": [
                  { "name": "region",
                    "config": { "splice_region": [-12, 6],
                                "utr_region": [-20, 20],
                                "typo": true } } ] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn invalid_filter_config_fails_at_parse_time() {
        // the gene filter requires a non-empty gene list
        let result: Result<FilterConfig, _> = serde_json::from_str(
            r#"{ "filters": [
                  { "name": "gene",
                    "config": { "genes": [], "mode": "one" } } ] }"#,
        );
        assert!(result.is_err());
    }

    // batch mode

    #[test]
    fn batch_mode_filters_per_panel() {
        let mut data = base_data();
        let (allele, transcript) = intron_allele(1, -40);
        data.alleles.push(allele);
        data.transcripts.push(transcript);
        data.alleles.push(snp(2, "13", 1100, "C", "T"));
        let snapshot: Snapshot = data.into();
        let config = parse_config(&format!("{{\"filters\": [{}]}}", REGION));
        let queries = vec![PanelQuery {
            genepanel_name: "HBOC".to_string(),
            genepanel_version: "v01".to_string(),
            allele_ids: vec![1, 2],
        }];

        let results = filter_alleles(&snapshot, &config, &queries).unwrap();

        let result = results.get("HBOC_v01").expect("result for the panel");
        assert_eq!(result.included, vec![2]);
        assert_eq!(result.excluded_by.get("region"), Some(&vec![1]));
    }

    #[test]
    fn analysis_filter_in_batch_mode_is_an_error() {
        let snapshot: Snapshot = base_data().into();
        let config = parse_config(
            r#"{ "filters": [ { "name": "quality", "config": { "qual": 100.0 } } ] }"#,
        );
        let queries = vec![PanelQuery {
            genepanel_name: "HBOC".to_string(),
            genepanel_version: "v01".to_string(),
            allele_ids: vec![],
        }];

        let result = filter_alleles(&snapshot, &config, &queries);

        assert!(matches!(
            result,
            Err(Error::AnalysisFilterInBatchMode { .. })
        ));
    }

    #[test]
    fn unknown_panel_in_batch_mode_is_an_error() {
        let snapshot: Snapshot = base_data().into();
        let config = FilterConfig::default();
        let queries = vec![PanelQuery {
            genepanel_name: "Mendel".to_string(),
            genepanel_version: "v02".to_string(),
            allele_ids: vec![],
        }];

        let result = filter_alleles(&snapshot, &config, &queries);

        assert!(matches!(result, Err(Error::UnknownGenePanel { .. })));
    }

    #[test]
    fn sample_ids_are_irrelevant_to_allele_filters() {
        // an allele filter pipeline must not depend on genotype data
        let mut data = base_data();
        data.samples.clear();
        data.alleles.push(snp(1, "13", 1100, "C", "T"));
        let snapshot: Snapshot = data.into();
        let config = parse_config(&format!("{{\"filters\": [{}]}}", REGION));
        let queries = vec![PanelQuery {
            genepanel_name: "HBOC".to_string(),
            genepanel_version: "v01".to_string(),
            allele_ids: vec![1],
        }];

        let results = filter_alleles(&snapshot, &config, &queries).unwrap();

        assert_eq!(results.get("HBOC_v01").unwrap().included, vec![1]);
    }
}
