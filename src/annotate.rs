//! Per-record MPA annotation
//!
//! This module provides the validation preconditions, the per-record
//! pipeline from raw INFO fields to the six `MPA_*` output keys, and the
//! header declarations for those keys.

use tracing::debug;

use crate::error::MpaError;
use crate::score::{
    classify_exonic, clinvar_pathogenicity, resolve, splice_impact, ConsensusScore, ImpactFlags,
    MpaScore, PredictorCall, SpliceScores, PREDICTOR_FIELDS,
};
use crate::vcf::{InfoDef, InfoValue, VcfHeader, VcfRecord};

/// INFO field for the normalized predictor consensus
pub const INFO_MPA_ADJUSTED: &str = "MPA_adjusted";
/// INFO field for the number of predictors with a call
pub const INFO_MPA_AVAILABLE: &str = "MPA_available";
/// INFO field for the number of deleterious calls
pub const INFO_MPA_DELETERIOUS: &str = "MPA_deleterious";
/// INFO field for the single aggregated score
pub const INFO_MPA_FINAL_SCORE: &str = "MPA_final_score";
/// INFO field for the fired impact categories
pub const INFO_MPA_IMPACT: &str = "MPA_impact";
/// INFO field for the priority rank
pub const INFO_MPA_RANKING: &str = "MPA_ranking";

/// Functional region annotation field
pub const FUNC_REGION_FIELD: &str = "Func.refGene";
/// Exonic consequence annotation field
pub const EXONIC_FUNC_FIELD: &str = "ExonicFunc.refGene";
/// Clinical significance annotation field
pub const CLNSIG_FIELD: &str = "CLNSIG";

/// Provenance tag written on the appended header declarations
const MPA_SOURCE: &str = "MPA";
const MPA_VERSION: &str = "0.3";

/// The INFO fields the input header must declare.
///
/// The classifiers read these positionally per record; a header without
/// them means the file was not annotated as required and the whole run is
/// aborted before any record is processed.
pub const REQUIRED_INFO_FIELDS: [&str; 16] = [
    "ExonicFunc.refGene",
    "Func.refGene",
    "CLNSIG",
    "SIFT_pred",
    "Polyphen2_HDIV_pred",
    "Polyphen2_HVAR_pred",
    "LRT_pred",
    "MutationTaster_pred",
    "FATHMM_pred",
    "PROVEAN_pred",
    "fathmm-MKL_coding_pred",
    "MetaSVM_pred",
    "MetaLR_pred",
    "dbscSNV_ADA_SCORE",
    "dbscSNV_RF_SCORE",
    "dpsi_zscore",
];

/// Check that every required annotation field is declared in the header.
///
/// Fatal on failure: the run must stop before any record is processed.
pub fn verify_required_annotations(header: &VcfHeader) -> Result<(), MpaError> {
    let missing: Vec<String> = REQUIRED_INFO_FIELDS
        .iter()
        .filter(|field| !header.has_info(field))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MpaError::MissingAnnotations { missing })
    }
}

/// Check that a record carries exactly one reference and one alternate
/// allele.
///
/// Recoverable on failure: the caller logs the record, skips it, and
/// continues with the next one.
pub fn ensure_split(record: &VcfRecord) -> Result<(), MpaError> {
    if record.reference.contains(',') {
        return Err(MpaError::MultiReference {
            site: record.site(),
        });
    }
    if record.alternate.len() > 1 {
        return Err(MpaError::MultiAllelic {
            site: record.site(),
        });
    }
    Ok(())
}

/// The six `MPA_*` header declarations, with descriptions and provenance
pub fn mpa_info_defs() -> Vec<InfoDef> {
    let defs = [
        (
            INFO_MPA_ADJUSTED,
            "MPA_adjusted : normalize MPA missense score from 0 to 10",
        ),
        (
            INFO_MPA_AVAILABLE,
            "MPA_available : number of missense tools annotation available for this variant",
        ),
        (
            INFO_MPA_DELETERIOUS,
            "MPA_deleterious : number of missense tools that annotate this variant pathogenic",
        ),
        (
            INFO_MPA_FINAL_SCORE,
            "MPA_final_score : unique score that take into account curated database, biological \
             assumptions, splicing predictions and the sum of various predictors for missense \
             alterations. Annotations are made for exonic and splicing variants up to +300nt.",
        ),
        (
            INFO_MPA_IMPACT,
            "MPA_impact : pathogenic predictions (clinvar_pathogenicity, splice_impact, stop and \
             frameshift_impact)",
        ),
        (
            INFO_MPA_RANKING,
            "MPA_ranking : prioritize variants with ranks from 1 to 8",
        ),
    ];

    defs.iter()
        .map(|(id, description)| {
            InfoDef::new(id, ".", "String", description).with_provenance(MPA_SOURCE, MPA_VERSION)
        })
        .collect()
}

/// Per-record MPA annotator.
///
/// Stateless: every call builds its predictor calls, splice scores, and
/// impact flags fresh and drops them with the returned score, so records
/// can be processed in any order or in parallel.
#[derive(Debug, Clone, Copy, Default)]
pub struct MpaAnnotator;

impl MpaAnnotator {
    /// Create an annotator
    pub fn new() -> Self {
        Self
    }

    /// Validate, classify, and score one record, writing the six `MPA_*`
    /// INFO keys onto it.
    pub fn annotate(&self, record: &mut VcfRecord) -> Result<MpaScore, MpaError> {
        ensure_split(record)?;

        let consensus = ConsensusScore::from_calls(
            PREDICTOR_FIELDS
                .iter()
                .map(|(_, field)| PredictorCall::from_value(record.info.first_str(field))),
        );

        let flags = {
            let func_region = record.info.first_str(FUNC_REGION_FIELD);
            let exonic = classify_exonic(func_region, record.info.first_str(EXONIC_FUNC_FIELD));
            ImpactFlags {
                clinvar_pathogenicity: clinvar_pathogenicity(record.info.first_str(CLNSIG_FIELD)),
                splice_impact: splice_impact(
                    &SpliceScores::from_info(&record.info),
                    record.is_indel(),
                    func_region,
                ),
                stop_impact: exonic.stop,
                frameshift_impact: exonic.frameshift,
                missense_impact: exonic.missense,
                unknown_impact: exonic.unknown,
            }
        };

        let score = resolve(&flags, &consensus);
        debug!(
            site = %record.site(),
            ranking = score.ranking,
            impact = %score.impact_field(),
            final_score = score.final_score,
            "classified variant"
        );

        write_score(record, &score);
        Ok(score)
    }
}

/// Attach the six computed fields to a record's INFO block
fn write_score(record: &mut VcfRecord, score: &MpaScore) {
    record
        .info
        .insert(INFO_MPA_ADJUSTED, InfoValue::Float(score.adjusted));
    record.info.insert(
        INFO_MPA_AVAILABLE,
        InfoValue::Integer(i64::from(score.available)),
    );
    record.info.insert(
        INFO_MPA_DELETERIOUS,
        InfoValue::Integer(i64::from(score.deleterious)),
    );
    record
        .info
        .insert(INFO_MPA_FINAL_SCORE, InfoValue::Float(score.final_score));
    record
        .info
        .insert(INFO_MPA_IMPACT, InfoValue::String(score.impact_field()));
    record.info.insert(
        INFO_MPA_RANKING,
        InfoValue::Integer(i64::from(score.ranking)),
    );
}

/// Counters for one annotation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotateStats {
    /// Records read
    pub total: usize,
    /// Records annotated and written
    pub annotated: usize,
    /// Records skipped by record-level validation
    pub skipped: usize,
}
