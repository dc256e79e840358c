//! Clinical significance classification
//!
//! Curated clinical evidence is the highest-priority impact category: a
//! confident pathogenic annotation overrides every predictive score.

use super::ranking::ImpactFlag;

/// Rank assigned to confidently pathogenic clinical annotations
pub const CLINVAR_PATHOGENIC_RANK: u8 = 1;

/// Classify a free-text clinical significance annotation.
///
/// Fires only when the text contains `pathogenic` without `benign` or
/// `conflicting` (all case-insensitive): entries such as
/// `Pathogenic/Benign` or `Conflicting_interpretations_of_pathogenicity`
/// carry doubt and must not outrank predictive evidence.
pub fn clinvar_pathogenicity(clinsig: Option<&str>) -> ImpactFlag {
    let Some(clinsig) = clinsig else {
        return ImpactFlag::NotApplicable;
    };
    let clinsig = clinsig.to_ascii_lowercase();

    let pathogenic = clinsig.contains("pathogenic");
    let benign = clinsig.contains("benign");
    let conflicting = clinsig.contains("conflicting");

    if pathogenic && !benign && !conflicting {
        ImpactFlag::Rank(CLINVAR_PATHOGENIC_RANK)
    } else {
        ImpactFlag::NotApplicable
    }
}
