//! Variant classification and scoring engine
//!
//! One record at a time, classifier outputs are merged into a single
//! priority rank (1 = most severe) and a final 0-10 score.

mod clinvar;
mod exonic;
mod predictors;
mod ranking;
mod splice;

pub use clinvar::{clinvar_pathogenicity, CLINVAR_PATHOGENIC_RANK};
pub use exonic::{
    classify_exonic, ExonicImpacts, FRAMESHIFT_RANK, MISSENSE_RANK, STOP_RANK, UNKNOWN_RANK,
};
pub use predictors::{ConsensusScore, PredictorCall, DELETERIOUS_CALL, PREDICTOR_FIELDS};
pub use ranking::{
    resolve, ImpactCategory, ImpactFlag, ImpactFlags, MpaScore, NO_IMPACT_RANK,
};
pub use splice::{
    splice_impact, SpliceScores, ADA_SCORE_FIELD, ADA_SPLICE_RANK, REGION_INDEL_SPLICE_RANK,
    RF_SCORE_FIELD, RF_SPLICE_RANK, SPLICE_TOOL_THRESHOLD, ZSCORE_FIELD, ZSCORE_SPLICE_RANK,
    ZSCORE_SPLICE_THRESHOLD,
};
