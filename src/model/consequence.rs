//! Canonical consequence term ordering.
//!
//! The variant order of `Consequence` is the canonical severity order with
//! the most severe term first, so the derived `Ord` can be used directly to
//! pick the worst consequence of an allele.

/// VEP consequence terms, most severe first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Consequence {
    #[serde(rename = "transcript_ablation")]
    #[strum(serialize = "transcript_ablation")]
    TranscriptAblation,
    #[serde(rename = "splice_donor_variant")]
    #[strum(serialize = "splice_donor_variant")]
    SpliceDonorVariant,
    #[serde(rename = "splice_acceptor_variant")]
    #[strum(serialize = "splice_acceptor_variant")]
    SpliceAcceptorVariant,
    #[serde(rename = "stop_gained")]
    #[strum(serialize = "stop_gained")]
    StopGained,
    #[serde(rename = "frameshift_variant")]
    #[strum(serialize = "frameshift_variant")]
    FrameshiftVariant,
    #[serde(rename = "start_lost")]
    #[strum(serialize = "start_lost")]
    StartLost,
    #[serde(rename = "initiator_codon_variant")]
    #[strum(serialize = "initiator_codon_variant")]
    InitiatorCodonVariant,
    #[serde(rename = "stop_lost")]
    #[strum(serialize = "stop_lost")]
    StopLost,
    #[serde(rename = "inframe_insertion")]
    #[strum(serialize = "inframe_insertion")]
    InframeInsertion,
    #[serde(rename = "inframe_deletion")]
    #[strum(serialize = "inframe_deletion")]
    InframeDeletion,
    #[serde(rename = "missense_variant")]
    #[strum(serialize = "missense_variant")]
    MissenseVariant,
    #[serde(rename = "protein_altering_variant")]
    #[strum(serialize = "protein_altering_variant")]
    ProteinAlteringVariant,
    #[serde(rename = "transcript_amplification")]
    #[strum(serialize = "transcript_amplification")]
    TranscriptAmplification,
    #[serde(rename = "splice_region_variant")]
    #[strum(serialize = "splice_region_variant")]
    SpliceRegionVariant,
    #[serde(rename = "incomplete_terminal_codon_variant")]
    #[strum(serialize = "incomplete_terminal_codon_variant")]
    IncompleteTerminalCodonVariant,
    #[serde(rename = "synonymous_variant")]
    #[strum(serialize = "synonymous_variant")]
    SynonymousVariant,
    #[serde(rename = "start_retained_variant")]
    #[strum(serialize = "start_retained_variant")]
    StartRetainedVariant,
    #[serde(rename = "stop_retained_variant")]
    #[strum(serialize = "stop_retained_variant")]
    StopRetainedVariant,
    #[serde(rename = "coding_sequence_variant")]
    #[strum(serialize = "coding_sequence_variant")]
    CodingSequenceVariant,
    #[serde(rename = "mature_miRNA_variant")]
    #[strum(serialize = "mature_miRNA_variant")]
    MatureMirnaVariant,
    #[serde(rename = "5_prime_UTR_variant")]
    #[strum(serialize = "5_prime_UTR_variant")]
    FivePrimeUtrVariant,
    #[serde(rename = "3_prime_UTR_variant")]
    #[strum(serialize = "3_prime_UTR_variant")]
    ThreePrimeUtrVariant,
    #[serde(rename = "non_coding_transcript_exon_variant")]
    #[strum(serialize = "non_coding_transcript_exon_variant")]
    NonCodingTranscriptExonVariant,
    #[serde(rename = "non_coding_transcript_variant")]
    #[strum(serialize = "non_coding_transcript_variant")]
    NonCodingTranscriptVariant,
    #[serde(rename = "intron_variant")]
    #[strum(serialize = "intron_variant")]
    IntronVariant,
    #[serde(rename = "NMD_transcript_variant")]
    #[strum(serialize = "NMD_transcript_variant")]
    NmdTranscriptVariant,
    #[serde(rename = "upstream_gene_variant")]
    #[strum(serialize = "upstream_gene_variant")]
    UpstreamGeneVariant,
    #[serde(rename = "downstream_gene_variant")]
    #[strum(serialize = "downstream_gene_variant")]
    DownstreamGeneVariant,
    #[serde(rename = "TFBS_ablation")]
    #[strum(serialize = "TFBS_ablation")]
    TfbsAblation,
    #[serde(rename = "TFBS_amplification")]
    #[strum(serialize = "TFBS_amplification")]
    TfbsAmplification,
    #[serde(rename = "TF_binding_site_variant")]
    #[strum(serialize = "TF_binding_site_variant")]
    TfBindingSiteVariant,
    #[serde(rename = "regulatory_region_variant")]
    #[strum(serialize = "regulatory_region_variant")]
    RegulatoryRegionVariant,
    #[serde(rename = "regulatory_region_ablation")]
    #[strum(serialize = "regulatory_region_ablation")]
    RegulatoryRegionAblation,
    #[serde(rename = "regulatory_region_amplification")]
    #[strum(serialize = "regulatory_region_amplification")]
    RegulatoryRegionAmplification,
    #[serde(rename = "feature_elongation")]
    #[strum(serialize = "feature_elongation")]
    FeatureElongation,
    #[serde(rename = "feature_truncation")]
    #[strum(serialize = "feature_truncation")]
    FeatureTruncation,
    #[serde(rename = "intergenic_variant")]
    #[strum(serialize = "intergenic_variant")]
    IntergenicVariant,
}

#[cfg(test)]
mod test {
    use super::Consequence;

    #[test]
    fn severity_order() {
        assert!(Consequence::SpliceDonorVariant < Consequence::StopGained);
        assert!(Consequence::StopGained < Consequence::FrameshiftVariant);
        assert!(Consequence::FrameshiftVariant < Consequence::SynonymousVariant);
        assert!(Consequence::SynonymousVariant < Consequence::UpstreamGeneVariant);
        assert!(Consequence::UpstreamGeneVariant < Consequence::IntergenicVariant);
    }

    #[test]
    fn serde_uses_vep_terms() {
        assert_eq!(
            serde_json::to_string(&Consequence::FivePrimeUtrVariant).unwrap(),
            "\"5_prime_UTR_variant\""
        );
        let parsed: Consequence = serde_json::from_str("\"missense_variant\"").unwrap();
        assert_eq!(parsed, Consequence::MissenseVariant);
    }
}
