//! Deleteriousness predictor consensus
//!
//! Ten missense predictors each contribute one ternary call; the consensus
//! is the fraction of available tools voting deleterious, rescaled to 0-10.
//! All tools are equal votes.

use serde::{Deserialize, Serialize};

/// The ten predictor tools and their INFO field names, in call order
pub const PREDICTOR_FIELDS: [(&str, &str); 10] = [
    ("SIFT", "SIFT_pred"),
    ("HDIV", "Polyphen2_HDIV_pred"),
    ("HVAR", "Polyphen2_HVAR_pred"),
    ("LRT", "LRT_pred"),
    ("MutationTaster", "MutationTaster_pred"),
    ("FATHMM", "FATHMM_pred"),
    ("PROVEAN", "PROVEAN_pred"),
    ("MKL", "fathmm-MKL_coding_pred"),
    ("SVM", "MetaSVM_pred"),
    ("LR", "MetaLR_pred"),
];

/// The call value meaning "deleterious"
pub const DELETERIOUS_CALL: &str = "D";

/// A single tool's categorical verdict for a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictorCall {
    /// The tool calls the variant deleterious ("D")
    Deleterious,
    /// The tool made a call other than deleterious
    Other,
    /// No call from this tool
    Missing,
}

impl PredictorCall {
    /// Build a call from the first value of the tool's annotation field
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            None => PredictorCall::Missing,
            Some(v) if v == DELETERIOUS_CALL => PredictorCall::Deleterious,
            Some(_) => PredictorCall::Other,
        }
    }

    /// True when the tool produced any call
    pub fn is_available(&self) -> bool {
        !matches!(self, PredictorCall::Missing)
    }
}

/// Predictor consensus for one record
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConsensusScore {
    /// deleterious / available * 10, or 0 when no tool called
    pub adjusted: f64,
    /// Number of tools with any call
    pub available: u32,
    /// Number of tools calling deleterious
    pub deleterious: u32,
}

impl ConsensusScore {
    /// Aggregate a set of predictor calls.
    ///
    /// Missing calls are excluded from both counts, so absent tools never
    /// dilute the consensus and `available == 0` yields an adjusted score
    /// of zero rather than a division by zero.
    pub fn from_calls(calls: impl IntoIterator<Item = PredictorCall>) -> Self {
        let mut available = 0u32;
        let mut deleterious = 0u32;

        for call in calls {
            match call {
                PredictorCall::Deleterious => {
                    deleterious += 1;
                    available += 1;
                }
                PredictorCall::Other => available += 1,
                PredictorCall::Missing => {}
            }
        }

        let adjusted = if available > 0 {
            f64::from(deleterious) / f64::from(available) * 10.0
        } else {
            0.0
        };

        Self {
            adjusted,
            available,
            deleterious,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_from_value() {
        assert_eq!(
            PredictorCall::from_value(Some("D")),
            PredictorCall::Deleterious
        );
        assert_eq!(PredictorCall::from_value(Some("T")), PredictorCall::Other);
        assert_eq!(PredictorCall::from_value(Some("B")), PredictorCall::Other);
        assert_eq!(PredictorCall::from_value(None), PredictorCall::Missing);
        // the deleterious call is exact, not case-folded
        assert_eq!(PredictorCall::from_value(Some("d")), PredictorCall::Other);
    }

    #[test]
    fn test_all_deleterious() {
        let score =
            ConsensusScore::from_calls(std::iter::repeat(PredictorCall::Deleterious).take(10));
        assert_eq!(score.deleterious, 10);
        assert_eq!(score.available, 10);
        assert_eq!(score.adjusted, 10.0);
    }

    #[test]
    fn test_half_deleterious() {
        let calls = std::iter::repeat(PredictorCall::Deleterious)
            .take(5)
            .chain(std::iter::repeat(PredictorCall::Other).take(5));
        let score = ConsensusScore::from_calls(calls);
        assert_eq!(score.deleterious, 5);
        assert_eq!(score.available, 10);
        assert_eq!(score.adjusted, 5.0);
    }

    #[test]
    fn test_missing_excluded_from_both_counts() {
        let calls = [
            PredictorCall::Deleterious,
            PredictorCall::Missing,
            PredictorCall::Other,
            PredictorCall::Missing,
        ];
        let score = ConsensusScore::from_calls(calls);
        assert_eq!(score.deleterious, 1);
        assert_eq!(score.available, 2);
        assert_eq!(score.adjusted, 5.0);
    }

    #[test]
    fn test_no_calls_no_division_by_zero() {
        let score = ConsensusScore::from_calls(std::iter::repeat(PredictorCall::Missing).take(10));
        assert_eq!(score.available, 0);
        assert_eq!(score.deleterious, 0);
        assert_eq!(score.adjusted, 0.0);
    }

    #[test]
    fn test_bounds_invariant() {
        // deleterious <= available <= tool count, adjusted within [0, 10]
        for deleterious in 0..=10u32 {
            for other in 0..=(10 - deleterious) {
                let calls = std::iter::repeat(PredictorCall::Deleterious)
                    .take(deleterious as usize)
                    .chain(std::iter::repeat(PredictorCall::Other).take(other as usize))
                    .chain(
                        std::iter::repeat(PredictorCall::Missing)
                            .take((10 - deleterious - other) as usize),
                    );
                let score = ConsensusScore::from_calls(calls);
                assert!(score.deleterious <= score.available);
                assert!(score.available <= 10);
                assert!((0.0..=10.0).contains(&score.adjusted));
                if score.available > 0 {
                    let expected =
                        f64::from(score.deleterious) / f64::from(score.available) * 10.0;
                    assert_eq!(score.adjusted, expected);
                }
            }
        }
    }

    #[test]
    fn test_field_list() {
        assert_eq!(PREDICTOR_FIELDS.len(), 10);
        assert!(PREDICTOR_FIELDS
            .iter()
            .any(|(_, field)| *field == "fathmm-MKL_coding_pred"));
    }
}
