//! Data model for the filter pipeline.
//!
//! These are the read-only entities of the interpretation database that the
//! filters consume (alleles, annotation shadow tables, gene panels, samples,
//! genotypes, assessments).  They are bundled into a [`Snapshot`] which plays
//! the role of the one-session-per-invocation database view: filters receive
//! `&Snapshot` and can therefore never mutate state.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

pub mod consequence;

pub use consequence::Consequence;

/// Stable integer identifier of an allele.
pub type AlleleId = i64;
/// Integer identifier of a sample.
pub type SampleId = i64;
/// Integer identifier of an analysis.
pub type AnalysisId = i64;
/// Numeric HGNC gene identifier.
pub type HgncId = i64;

/// The type of change of an allele as derived from the VCF record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, strum::Display,
)]
pub enum ChangeType {
    /// Single nucleotide substitution.
    #[serde(rename = "SNP")]
    #[strum(serialize = "SNP")]
    Snp,
    /// Deletion.
    #[serde(rename = "del")]
    #[strum(serialize = "del")]
    Del,
    /// Insertion.
    #[serde(rename = "ins")]
    #[strum(serialize = "ins")]
    Ins,
    /// Combined insertion/deletion.
    #[serde(rename = "indel")]
    #[strum(serialize = "indel")]
    Indel,
}

/// A distinct variant site.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Allele {
    /// Stable identifier, immutable once created.
    pub id: AlleleId,
    /// Chromosome name.
    pub chromosome: String,
    /// 0-based start of the changed bases.
    pub start_position: i64,
    /// 0-based exclusive end of the changed bases.
    pub open_end_position: i64,
    /// 1-based VCF position.
    pub vcf_pos: i64,
    /// Original VCF reference string.
    pub vcf_ref: String,
    /// Original VCF alternate string.
    pub vcf_alt: String,
    /// The type of change.
    pub change_type: ChangeType,
}

impl Allele {
    /// Length of the change: max(len(ref), len(alt)) for substitutions,
    /// number of deleted bases for deletions, number of inserted bases for
    /// insertions.
    pub fn length(&self) -> i64 {
        match self.change_type {
            ChangeType::Snp | ChangeType::Indel => {
                self.vcf_ref.len().max(self.vcf_alt.len()) as i64
            }
            ChangeType::Del => (self.vcf_ref.len() - self.vcf_alt.len()) as i64,
            ChangeType::Ins => (self.vcf_alt.len() - self.vcf_ref.len()) as i64,
        }
    }

    /// The deleted bases of a deletion with a single anchor base in ALT,
    /// e.g. `"T"` for `CT>C`.  `None` for any other shape.
    pub fn deleted_bases(&self) -> Option<&str> {
        if self.change_type == ChangeType::Del
            && self.vcf_alt.len() == 1
            && self.vcf_ref.len() > 1
            && self.vcf_ref.starts_with(&self.vcf_alt)
        {
            Some(&self.vcf_ref[1..])
        } else {
            None
        }
    }
}

/// Annotation shadow frequency row (one current row per allele).
///
/// Frequencies and allele numbers are keyed by `"Provider.POP"`, e.g.
/// `"GNOMAD_GENOMES.G"`.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct FrequencyRow {
    /// The allele this row belongs to.
    pub allele_id: AlleleId,
    /// Frequency per provider/population key, in `[0, 1]`.
    #[serde(default)]
    pub frequencies: IndexMap<String, f64>,
    /// Allele number per provider/population key.
    #[serde(default)]
    pub counts: IndexMap<String, i64>,
    /// Supersession timestamp; only rows with `None` are current.
    #[serde(default)]
    pub date_superseded: Option<DateTime<Utc>>,
}

/// Annotation shadow transcript row (many per allele).
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct TranscriptRow {
    /// The allele this row belongs to.
    pub allele_id: AlleleId,
    /// Transcript name, possibly versioned (e.g. `NM_000059.3`).
    pub transcript: String,
    /// Numeric HGNC gene id.
    #[serde(default)]
    pub hgnc_id: Option<HgncId>,
    /// Gene symbol.
    #[serde(default)]
    pub symbol: Option<String>,
    /// HGVS c. description.
    #[serde(default)]
    pub hgvs_c: Option<String>,
    /// HGVS p. description.
    #[serde(default)]
    pub hgvs_p: Option<String>,
    /// Ordered consequence terms.
    #[serde(default)]
    pub consequences: Vec<Consequence>,
    /// Signed distance to the nearest exon boundary; 0 if exonic, negative
    /// for upstream intronic, positive for downstream intronic.
    #[serde(default)]
    pub exon_distance: Option<i64>,
    /// Signed distance to the coding region for UTR variants; `None` when
    /// inside the CDS.
    #[serde(default)]
    pub coding_region_distance: Option<i64>,
    /// Supersession timestamp; only rows with `None` are current.
    #[serde(default)]
    pub date_superseded: Option<DateTime<Utc>>,
}

/// Strip the version suffix from a transcript name (`NM_000059.3` →
/// `NM_000059`).
pub fn transcript_base(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Inheritance mode of a gene panel phenotype.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, strum::Display,
)]
pub enum InheritanceMode {
    /// Autosomal dominant.
    #[serde(rename = "AD")]
    #[strum(serialize = "AD")]
    Ad,
    /// Autosomal recessive.
    #[serde(rename = "AR")]
    #[strum(serialize = "AR")]
    Ar,
    /// X-linked dominant.
    #[serde(rename = "XD")]
    #[strum(serialize = "XD")]
    Xd,
    /// X-linked recessive.
    #[serde(rename = "XR")]
    #[strum(serialize = "XR")]
    Xr,
}

/// A transcript of a gene panel, with genomic exon structure.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelTranscript {
    /// Transcript name, possibly versioned.
    pub transcript_name: String,
    /// Numeric HGNC gene id.
    pub hgnc_id: HgncId,
    /// Chromosome name.
    pub chromosome: String,
    /// Strand, `+1` or `-1`.
    pub strand: i8,
    /// 0-based exon start positions; same length as `exon_ends` and
    /// `exon_starts[i] < exon_ends[i]`.
    pub exon_starts: Vec<i64>,
    /// 0-based exclusive exon end positions.
    pub exon_ends: Vec<i64>,
    /// 0-based CDS start.
    pub cds_start: i64,
    /// 0-based exclusive CDS end.
    pub cds_end: i64,
}

/// A phenotype of a gene panel.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelPhenotype {
    /// Numeric HGNC gene id.
    pub hgnc_id: HgncId,
    /// Inheritance mode of the phenotype.
    pub inheritance: InheritanceMode,
}

/// A versioned gene panel: the clinical scope of an analysis.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct GenePanel {
    /// Panel name.
    pub name: String,
    /// Panel version.
    pub version: String,
    /// Panel transcripts.
    #[serde(default)]
    pub transcripts: Vec<PanelTranscript>,
    /// Panel phenotypes.
    #[serde(default)]
    pub phenotypes: Vec<PanelPhenotype>,
}

impl GenePanel {
    /// Versionless transcript names of the panel.
    pub fn transcript_bases(&self) -> BTreeSet<&str> {
        self.transcripts
            .iter()
            .map(|tx| transcript_base(&tx.transcript_name))
            .collect()
    }

    /// Phenotypes annotated for the given gene.
    pub fn phenotypes_for_gene(&self, hgnc_id: HgncId) -> Vec<&PanelPhenotype> {
        self.phenotypes
            .iter()
            .filter(|p| p.hgnc_id == hgnc_id)
            .collect()
    }

    /// Whether the gene has at least one phenotype on this panel and every
    /// one of them is autosomal dominant.
    pub fn is_ad_only(&self, hgnc_id: HgncId) -> bool {
        let phenotypes = self.phenotypes_for_gene(hgnc_id);
        !phenotypes.is_empty()
            && phenotypes
                .iter()
                .all(|p| p.inheritance == InheritanceMode::Ad)
    }

    /// Whether the gene has at least one phenotype on this panel and every
    /// one of them is autosomal recessive.
    pub fn is_ar_only(&self, hgnc_id: HgncId) -> bool {
        let phenotypes = self.phenotypes_for_gene(hgnc_id);
        !phenotypes.is_empty()
            && phenotypes
                .iter()
                .all(|p| p.inheritance == InheritanceMode::Ar)
    }
}

/// Sex of a sample.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Unknown.
    #[default]
    Unknown,
}

/// A sequenced individual of an analysis.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sample {
    /// Sample identifier.
    pub id: SampleId,
    /// The analysis this sample belongs to.
    pub analysis_id: AnalysisId,
    /// Display name.
    pub name: String,
    /// Whether this sample is the proband.
    pub proband: bool,
    /// Whether this sample is affected.
    pub affected: bool,
    /// Sex of the sample.
    #[serde(default)]
    pub sex: Sex,
    /// The proband's father, if part of the analysis.
    #[serde(default)]
    pub father_id: Option<SampleId>,
    /// The proband's mother, if part of the analysis.
    #[serde(default)]
    pub mother_id: Option<SampleId>,
    /// For siblings: the proband sample they are a sibling of.
    #[serde(default)]
    pub sibling_id: Option<SampleId>,
    /// Family identifier.
    #[serde(default)]
    pub family_id: Option<String>,
}

/// A set of samples bound to a gene panel.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Analysis {
    /// Analysis identifier.
    pub id: AnalysisId,
    /// Display name.
    pub name: String,
    /// Bound gene panel name.
    pub genepanel_name: String,
    /// Bound gene panel version.
    pub genepanel_version: String,
}

/// Observed genotype of a sample at a site.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
)]
pub enum GenotypeType {
    /// Homozygous (or hemizygous) for the alternate allele.
    Homozygous,
    /// Heterozygous.
    Heterozygous,
    /// Homozygous reference.
    Reference,
    /// No coverage at the site.
    #[default]
    #[serde(rename = "No coverage")]
    #[strum(serialize = "No coverage")]
    NoCoverage,
}

/// One row per (analysis, allele); may reference a second allele in the
/// multiallelic case.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Genotype {
    /// Genotype identifier.
    pub id: i64,
    /// The analysis this genotype belongs to.
    pub analysis_id: AnalysisId,
    /// The (first) allele.
    pub allele_id: AlleleId,
    /// The second allele in the multiallelic case.
    #[serde(default)]
    pub secondallele_id: Option<AlleleId>,
}

/// Per-sample call data for one genotype row.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct GenotypeSampleData {
    /// The genotype row this belongs to.
    pub genotype_id: i64,
    /// The sample this belongs to.
    pub sample_id: SampleId,
    /// Whether this row describes the second allele of the genotype.
    #[serde(default)]
    pub secondallele: bool,
    /// Observed genotype.
    #[serde(rename = "type")]
    pub genotype_type: GenotypeType,
    /// Phred-scaled VCF QUAL.
    #[serde(default)]
    pub quality: Option<f64>,
    /// VCF FILTER column value.
    #[serde(default)]
    pub filter_status: Option<String>,
    /// Sequencing depth at the site.
    #[serde(default)]
    pub sequencing_depth: Option<i64>,
    /// Ratio of reads supporting the alternate allele, in `[0, 1]`.
    #[serde(default)]
    pub allele_ratio: Option<f64>,
    /// Phred-scaled genotype likelihoods `[PL_ref, PL_het, PL_hom]`.
    #[serde(default)]
    pub genotype_likelihood: Option<[i32; 3]>,
}

/// Curated clinical classification values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, strum::Display,
)]
pub enum Classification {
    /// Class 1, benign.
    #[serde(rename = "1")]
    #[strum(serialize = "1")]
    Class1,
    /// Class 2, likely benign.
    #[serde(rename = "2")]
    #[strum(serialize = "2")]
    Class2,
    /// Class 3, uncertain significance.
    #[serde(rename = "3")]
    #[strum(serialize = "3")]
    Class3,
    /// Class 4, likely pathogenic.
    #[serde(rename = "4")]
    #[strum(serialize = "4")]
    Class4,
    /// Class 5, pathogenic.
    #[serde(rename = "5")]
    #[strum(serialize = "5")]
    Class5,
    /// Drug response.
    #[serde(rename = "DR")]
    #[strum(serialize = "DR")]
    DrugResponse,
    /// Risk factor.
    #[serde(rename = "RF")]
    #[strum(serialize = "RF")]
    RiskFactor,
    /// Not provided.
    #[serde(rename = "NP")]
    #[strum(serialize = "NP")]
    NotProvided,
}

/// A curated clinical classification for an allele.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AlleleAssessment {
    /// The assessed allele.
    pub allele_id: AlleleId,
    /// Classification value.
    pub classification: Classification,
    /// Creation timestamp.
    pub date_created: DateTime<Utc>,
    /// Supersession timestamp; only rows with `None` are current.
    #[serde(default)]
    pub date_superseded: Option<DateTime<Utc>>,
}

/// One ClinVar submission of an allele.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ClinvarSubmission {
    /// Free-text clinical significance, e.g. "Likely benign".
    pub clinical_significance: String,
}

/// The ClinVar record of an allele.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ClinvarRecord {
    /// Review status string, e.g. "criteria provided, multiple submitters,
    /// no conflicts".
    pub review_status: String,
    /// Individual submissions.
    #[serde(default)]
    pub submissions: Vec<ClinvarSubmission>,
}

/// External database evidence of an allele (ClinVar, HGMD).
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ExternalAnnotation {
    /// The annotated allele.
    pub allele_id: AlleleId,
    /// ClinVar record, if any.
    #[serde(default)]
    pub clinvar: Option<ClinvarRecord>,
    /// HGMD tag, if any (e.g. "DM").
    #[serde(default)]
    pub hgmd_tag: Option<String>,
    /// Supersession timestamp; only rows with `None` are current.
    #[serde(default)]
    pub date_superseded: Option<DateTime<Utc>>,
}

/// Raw, array-of-rows form of a [`Snapshot`], as serialized to JSON.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotData {
    /// Allele table.
    #[serde(default)]
    pub alleles: Vec<Allele>,
    /// Annotation shadow frequency table.
    #[serde(default)]
    pub frequencies: Vec<FrequencyRow>,
    /// Annotation shadow transcript table.
    #[serde(default)]
    pub transcripts: Vec<TranscriptRow>,
    /// Gene panel table.
    #[serde(default)]
    pub genepanels: Vec<GenePanel>,
    /// Analysis table.
    #[serde(default)]
    pub analyses: Vec<Analysis>,
    /// Sample table.
    #[serde(default)]
    pub samples: Vec<Sample>,
    /// Genotype table.
    #[serde(default)]
    pub genotypes: Vec<Genotype>,
    /// Genotype sample data table.
    #[serde(default)]
    pub genotype_sample_data: Vec<GenotypeSampleData>,
    /// Allele assessment table.
    #[serde(default)]
    pub assessments: Vec<AlleleAssessment>,
    /// External annotation table.
    #[serde(default)]
    pub externals: Vec<ExternalAnnotation>,
}

/// Read-only, indexed view over the tables consumed by the filters.
///
/// All accessors that return annotation or assessment rows constrain to
/// non-superseded rows.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(from = "SnapshotData")]
pub struct Snapshot {
    alleles: IndexMap<AlleleId, Allele>,
    frequencies: IndexMap<AlleleId, Vec<FrequencyRow>>,
    transcripts: IndexMap<AlleleId, Vec<TranscriptRow>>,
    genepanels: IndexMap<(String, String), GenePanel>,
    analyses: IndexMap<AnalysisId, Analysis>,
    samples: IndexMap<SampleId, Sample>,
    genotypes: IndexMap<AnalysisId, Vec<Genotype>>,
    genotype_sample_data: IndexMap<i64, Vec<GenotypeSampleData>>,
    assessments: IndexMap<AlleleId, Vec<AlleleAssessment>>,
    externals: IndexMap<AlleleId, Vec<ExternalAnnotation>>,
}

impl From<SnapshotData> for Snapshot {
    fn from(data: SnapshotData) -> Self {
        let mut result = Snapshot::default();
        for allele in data.alleles {
            result.alleles.insert(allele.id, allele);
        }
        for row in data.frequencies {
            result
                .frequencies
                .entry(row.allele_id)
                .or_default()
                .push(row);
        }
        for row in data.transcripts {
            result
                .transcripts
                .entry(row.allele_id)
                .or_default()
                .push(row);
        }
        for panel in data.genepanels {
            result
                .genepanels
                .insert((panel.name.clone(), panel.version.clone()), panel);
        }
        for analysis in data.analyses {
            result.analyses.insert(analysis.id, analysis);
        }
        for sample in data.samples {
            result.samples.insert(sample.id, sample);
        }
        for genotype in data.genotypes {
            result
                .genotypes
                .entry(genotype.analysis_id)
                .or_default()
                .push(genotype);
        }
        for row in data.genotype_sample_data {
            result
                .genotype_sample_data
                .entry(row.genotype_id)
                .or_default()
                .push(row);
        }
        for assessment in data.assessments {
            result
                .assessments
                .entry(assessment.allele_id)
                .or_default()
                .push(assessment);
        }
        for external in data.externals {
            result
                .externals
                .entry(external.allele_id)
                .or_default()
                .push(external);
        }
        result
    }
}

impl Snapshot {
    /// Look up an allele by id.
    pub fn allele(&self, id: AlleleId) -> Option<&Allele> {
        self.alleles.get(&id)
    }

    /// Whether the snapshot knows the given allele.
    pub fn has_allele(&self, id: AlleleId) -> bool {
        self.alleles.contains_key(&id)
    }

    /// The current (non-superseded) frequency row of an allele.
    pub fn current_frequency(&self, allele_id: AlleleId) -> Option<&FrequencyRow> {
        self.frequencies
            .get(&allele_id)
            .and_then(|rows| rows.iter().find(|row| row.date_superseded.is_none()))
    }

    /// The current (non-superseded) transcript rows of an allele.
    pub fn current_transcripts(&self, allele_id: AlleleId) -> Vec<&TranscriptRow> {
        self.transcripts
            .get(&allele_id)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row.date_superseded.is_none())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The current transcript rows of an allele restricted to the gene
    /// panel's transcripts (matched on the versionless name).
    pub fn panel_transcripts(&self, allele_id: AlleleId, panel: &GenePanel) -> Vec<&TranscriptRow> {
        let panel_names = panel.transcript_bases();
        self.current_transcripts(allele_id)
            .into_iter()
            .filter(|row| panel_names.contains(transcript_base(&row.transcript)))
            .collect()
    }

    /// The distinct HGNC ids of the allele's panel-scoped transcript rows,
    /// ascending.
    pub fn panel_gene_ids(&self, allele_id: AlleleId, panel: &GenePanel) -> BTreeSet<HgncId> {
        self.panel_transcripts(allele_id, panel)
            .into_iter()
            .filter_map(|row| row.hgnc_id)
            .collect()
    }

    /// Look up a gene panel by name and version.
    pub fn genepanel(&self, name: &str, version: &str) -> Option<&GenePanel> {
        self.genepanels
            .get(&(name.to_string(), version.to_string()))
    }

    /// Look up an analysis by id.
    pub fn analysis(&self, id: AnalysisId) -> Option<&Analysis> {
        self.analyses.get(&id)
    }

    /// Look up a sample by id.
    pub fn sample(&self, id: SampleId) -> Option<&Sample> {
        self.samples.get(&id)
    }

    /// All samples of an analysis, in id order.
    pub fn analysis_samples(&self, analysis_id: AnalysisId) -> Vec<&Sample> {
        let mut samples = self
            .samples
            .values()
            .filter(|sample| sample.analysis_id == analysis_id)
            .collect::<Vec<_>>();
        samples.sort_by_key(|sample| sample.id);
        samples
    }

    /// The genotype rows of an analysis.
    pub fn analysis_genotypes(&self, analysis_id: AnalysisId) -> &[Genotype] {
        self.genotypes
            .get(&analysis_id)
            .map(|gts| gts.as_slice())
            .unwrap_or_default()
    }

    /// The per-sample data rows of a genotype.
    pub fn genotype_sample_data(&self, genotype_id: i64) -> &[GenotypeSampleData] {
        self.genotype_sample_data
            .get(&genotype_id)
            .map(|rows| rows.as_slice())
            .unwrap_or_default()
    }

    /// The current (non-superseded) assessment of an allele.
    pub fn current_assessment(&self, allele_id: AlleleId) -> Option<&AlleleAssessment> {
        self.assessments
            .get(&allele_id)
            .and_then(|rows| rows.iter().find(|row| row.date_superseded.is_none()))
    }

    /// The current (non-superseded) external annotation of an allele.
    pub fn current_external(&self, allele_id: AlleleId) -> Option<&ExternalAnnotation> {
        self.externals
            .get(&allele_id)
            .and_then(|rows| rows.iter().find(|row| row.date_superseded.is_none()))
    }
}

#[cfg(test)]
pub(crate) mod testutils {
    //! Shared constructors for hand-built snapshots in tests.

    use super::*;

    /// Build a SNP allele at the given 0-based position.
    pub fn snp(id: AlleleId, chromosome: &str, start: i64, vcf_ref: &str, vcf_alt: &str) -> Allele {
        Allele {
            id,
            chromosome: chromosome.to_string(),
            start_position: start,
            open_end_position: start + 1,
            vcf_pos: start + 1,
            vcf_ref: vcf_ref.to_string(),
            vcf_alt: vcf_alt.to_string(),
            change_type: ChangeType::Snp,
        }
    }

    /// Build a deletion allele; `start` is the 0-based position of the first
    /// deleted base, `vcf_ref`/`vcf_alt` include the anchor base.
    pub fn deletion(
        id: AlleleId,
        chromosome: &str,
        start: i64,
        vcf_ref: &str,
        vcf_alt: &str,
    ) -> Allele {
        let deleted = (vcf_ref.len() - vcf_alt.len()) as i64;
        Allele {
            id,
            chromosome: chromosome.to_string(),
            start_position: start,
            open_end_position: start + deleted,
            vcf_pos: start,
            vcf_ref: vcf_ref.to_string(),
            vcf_alt: vcf_alt.to_string(),
            change_type: ChangeType::Del,
        }
    }

    /// Build a transcript annotation row.
    pub fn transcript_row(
        allele_id: AlleleId,
        transcript: &str,
        hgnc_id: HgncId,
        consequences: &[Consequence],
        exon_distance: Option<i64>,
        coding_region_distance: Option<i64>,
    ) -> TranscriptRow {
        TranscriptRow {
            allele_id,
            transcript: transcript.to_string(),
            hgnc_id: Some(hgnc_id),
            consequences: consequences.to_vec(),
            exon_distance,
            coding_region_distance,
            ..Default::default()
        }
    }

    /// Build a sample row.
    pub fn sample(
        id: SampleId,
        analysis_id: AnalysisId,
        name: &str,
        proband: bool,
        affected: bool,
        sex: Sex,
    ) -> Sample {
        Sample {
            id,
            analysis_id,
            name: name.to_string(),
            proband,
            affected,
            sex,
            father_id: None,
            mother_id: None,
            sibling_id: None,
            family_id: None,
        }
    }

    /// Build a per-sample genotype data row.
    pub fn gt_data(
        genotype_id: i64,
        sample_id: SampleId,
        genotype_type: GenotypeType,
    ) -> GenotypeSampleData {
        GenotypeSampleData {
            genotype_id,
            sample_id,
            genotype_type,
            ..Default::default()
        }
    }
}
