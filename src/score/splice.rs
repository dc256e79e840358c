//! Splicing impact classification
//!
//! Two quantitative splice predictors (dbscSNV ADA and RF), a legacy
//! z-score fallback, and a text heuristic for indels in annotated splicing
//! regions. The rules are an ordered chain evaluated top to bottom; the
//! RF-before-ADA order decides which tool wins when both fire and must not
//! be reordered.

use crate::vcf::Info;

use super::ranking::ImpactFlag;

/// INFO field carrying the dbscSNV ADA score
pub const ADA_SCORE_FIELD: &str = "dbscSNV_ADA_SCORE";
/// INFO field carrying the dbscSNV RF score
pub const RF_SCORE_FIELD: &str = "dbscSNV_RF_SCORE";
/// INFO field carrying the dpsi z-score
pub const ZSCORE_FIELD: &str = "dpsi_zscore";

/// Call threshold shared by the ADA and RF tools
pub const SPLICE_TOOL_THRESHOLD: f64 = 0.6;
/// Legacy z-score call threshold, consulted only when ADA and RF gave no
/// call. Provisional: the fallback predictor is slated for replacement.
pub const ZSCORE_SPLICE_THRESHOLD: f64 = -2.0;

/// Rank when the RF tool calls an impact
pub const RF_SPLICE_RANK: u8 = 3;
/// Rank when only the ADA tool calls an impact
pub const ADA_SPLICE_RANK: u8 = 4;
/// Rank for the legacy z-score fallback
pub const ZSCORE_SPLICE_RANK: u8 = 5;
/// Rank for an indel inside an annotated splicing region
pub const REGION_INDEL_SPLICE_RANK: u8 = 6;

/// The three splice predictor scores for one record
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpliceScores {
    pub ada: Option<f64>,
    pub rf: Option<f64>,
    pub zscore: Option<f64>,
}

impl SpliceScores {
    /// Read the three scores from a record's INFO block
    pub fn from_info(info: &Info) -> Self {
        Self {
            ada: info.first_f64(ADA_SCORE_FIELD),
            rf: info.first_f64(RF_SCORE_FIELD),
            zscore: info.first_f64(ZSCORE_FIELD),
        }
    }
}

/// Classify the splicing impact of a variant.
///
/// First match wins:
/// 1. RF score at or above threshold
/// 2. ADA score at or above threshold
/// 3. z-score below threshold, with neither ADA nor RF annotated
/// 4. indel inside a region annotated as splicing
pub fn splice_impact(
    scores: &SpliceScores,
    is_indel: bool,
    func_region: Option<&str>,
) -> ImpactFlag {
    let rf_splice = scores.rf.is_some_and(|v| v >= SPLICE_TOOL_THRESHOLD);
    let ada_splice = scores.ada.is_some_and(|v| v >= SPLICE_TOOL_THRESHOLD);
    let zscore_splice = scores.zscore.is_some_and(|v| v < ZSCORE_SPLICE_THRESHOLD)
        && scores.ada.is_none()
        && scores.rf.is_none();
    let region_splice = is_indel
        && func_region.is_some_and(|region| region.to_ascii_lowercase().contains("splicing"));

    if rf_splice {
        ImpactFlag::Rank(RF_SPLICE_RANK)
    } else if ada_splice {
        ImpactFlag::Rank(ADA_SPLICE_RANK)
    } else if zscore_splice {
        ImpactFlag::Rank(ZSCORE_SPLICE_RANK)
    } else if region_splice {
        ImpactFlag::Rank(REGION_INDEL_SPLICE_RANK)
    } else {
        ImpactFlag::NotApplicable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(ada: Option<f64>, rf: Option<f64>, zscore: Option<f64>) -> SpliceScores {
        SpliceScores { ada, rf, zscore }
    }

    #[test]
    fn test_rf_wins_when_both_fire() {
        let flag = splice_impact(&scores(Some(0.9), Some(0.7), None), false, None);
        assert_eq!(flag, ImpactFlag::Rank(3));
    }

    #[test]
    fn test_ada_when_rf_below_threshold() {
        let flag = splice_impact(&scores(Some(0.8), Some(0.2), None), false, None);
        assert_eq!(flag, ImpactFlag::Rank(4));
    }

    #[test]
    fn test_ada_alone() {
        let flag = splice_impact(&scores(Some(0.6), None, None), false, None);
        assert_eq!(flag, ImpactFlag::Rank(4));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(
            splice_impact(&scores(None, Some(0.6), None), false, None),
            ImpactFlag::Rank(3)
        );
        assert_eq!(
            splice_impact(&scores(None, Some(0.59), None), false, None),
            ImpactFlag::NotApplicable
        );
    }

    #[test]
    fn test_zscore_fallback_only_without_primary_tools() {
        assert_eq!(
            splice_impact(&scores(None, None, Some(-3.0)), false, None),
            ImpactFlag::Rank(5)
        );
        // any ADA/RF annotation silences the fallback, even a no-call value
        assert_eq!(
            splice_impact(&scores(Some(0.1), None, Some(-3.0)), false, None),
            ImpactFlag::NotApplicable
        );
        assert_eq!(
            splice_impact(&scores(None, Some(0.1), Some(-3.0)), false, None),
            ImpactFlag::NotApplicable
        );
    }

    #[test]
    fn test_zscore_above_threshold() {
        assert_eq!(
            splice_impact(&scores(None, None, Some(-1.0)), false, None),
            ImpactFlag::NotApplicable
        );
        assert_eq!(
            splice_impact(&scores(None, None, Some(-2.0)), false, None),
            ImpactFlag::NotApplicable
        );
    }

    #[test]
    fn test_region_indel_heuristic() {
        assert_eq!(
            splice_impact(&scores(None, None, None), true, Some("splicing")),
            ImpactFlag::Rank(6)
        );
        assert_eq!(
            splice_impact(&scores(None, None, None), true, Some("exonic;SPLICING")),
            ImpactFlag::Rank(6)
        );
        // SNV in a splicing region is not enough
        assert_eq!(
            splice_impact(&scores(None, None, None), false, Some("splicing")),
            ImpactFlag::NotApplicable
        );
        // indel outside splicing regions is not enough
        assert_eq!(
            splice_impact(&scores(None, None, None), true, Some("intronic")),
            ImpactFlag::NotApplicable
        );
        assert_eq!(
            splice_impact(&scores(None, None, None), true, None),
            ImpactFlag::NotApplicable
        );
    }

    #[test]
    fn test_quantitative_tools_outrank_heuristic() {
        let flag = splice_impact(&scores(None, Some(0.9), None), true, Some("splicing"));
        assert_eq!(flag, ImpactFlag::Rank(3));
    }

    #[test]
    fn test_from_info() {
        let mut info = Info::new();
        info.insert(
            ADA_SCORE_FIELD,
            crate::vcf::InfoValue::String("0.99".to_string()),
        );
        info.insert(
            RF_SCORE_FIELD,
            crate::vcf::InfoValue::String(".".to_string()),
        );

        let scores = SpliceScores::from_info(&info);
        assert_eq!(scores.ada, Some(0.99));
        assert_eq!(scores.rf, None);
        assert_eq!(scores.zscore, None);
    }
}
