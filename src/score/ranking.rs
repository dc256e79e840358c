//! Impact categories and final ranking
//!
//! Each classifier reports an [`ImpactFlag`]; the resolver merges one flag
//! per category into a single rank and final score. Lower rank = higher
//! severity: clinvar=1, stop/frameshift=2, splice=3-6, missense=7,
//! unknown=8.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::predictors::ConsensusScore;

/// Rank assigned when no category fires
pub const NO_IMPACT_RANK: u8 = 8;

/// Outcome of a single impact classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImpactFlag {
    /// The classifier did not fire
    #[default]
    NotApplicable,
    /// The classifier fired with this priority rank (lower = more severe)
    Rank(u8),
}

impl ImpactFlag {
    /// True when the classifier fired
    pub fn fired(&self) -> bool {
        matches!(self, ImpactFlag::Rank(_))
    }

    /// The rank, if the classifier fired
    pub fn rank(&self) -> Option<u8> {
        match self {
            ImpactFlag::Rank(rank) => Some(*rank),
            ImpactFlag::NotApplicable => None,
        }
    }
}

/// The impact categories a variant can be assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactCategory {
    /// Curated clinical evidence of pathogenicity
    ClinvarPathogenicity,
    /// Predicted splicing disruption
    SpliceImpact,
    /// Stop codon gain or loss
    StopImpact,
    /// Reading-frame shift
    FrameshiftImpact,
    /// Amino acid substitution
    MissenseImpact,
    /// Exonic consequence the annotation source could not resolve
    UnknownImpact,
}

impl ImpactCategory {
    /// All categories in resolution order.
    ///
    /// This order is the single iteration order used everywhere: flag
    /// evaluation, winner selection, and the joined impact field. It is
    /// load-bearing for tie-breaking and must stay fixed.
    pub const ALL: [ImpactCategory; 6] = [
        ImpactCategory::ClinvarPathogenicity,
        ImpactCategory::SpliceImpact,
        ImpactCategory::StopImpact,
        ImpactCategory::FrameshiftImpact,
        ImpactCategory::MissenseImpact,
        ImpactCategory::UnknownImpact,
    ];

    /// The category name as written to the output annotation
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactCategory::ClinvarPathogenicity => "clinvar_pathogenicity",
            ImpactCategory::SpliceImpact => "splice_impact",
            ImpactCategory::StopImpact => "stop_impact",
            ImpactCategory::FrameshiftImpact => "frameshift_impact",
            ImpactCategory::MissenseImpact => "missense_impact",
            ImpactCategory::UnknownImpact => "unknown_impact",
        }
    }

    /// True for the categories whose final score is the predictor consensus
    /// rather than the maximum
    pub fn uses_consensus_score(&self) -> bool {
        matches!(
            self,
            ImpactCategory::MissenseImpact | ImpactCategory::UnknownImpact
        )
    }
}

impl fmt::Display for ImpactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One flag per impact category for a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImpactFlags {
    pub clinvar_pathogenicity: ImpactFlag,
    pub splice_impact: ImpactFlag,
    pub stop_impact: ImpactFlag,
    pub frameshift_impact: ImpactFlag,
    pub missense_impact: ImpactFlag,
    pub unknown_impact: ImpactFlag,
}

impl ImpactFlags {
    /// The flag for a category
    pub fn get(&self, category: ImpactCategory) -> ImpactFlag {
        match category {
            ImpactCategory::ClinvarPathogenicity => self.clinvar_pathogenicity,
            ImpactCategory::SpliceImpact => self.splice_impact,
            ImpactCategory::StopImpact => self.stop_impact,
            ImpactCategory::FrameshiftImpact => self.frameshift_impact,
            ImpactCategory::MissenseImpact => self.missense_impact,
            ImpactCategory::UnknownImpact => self.unknown_impact,
        }
    }

    /// Iterate (category, flag) pairs in resolution order
    pub fn iter(&self) -> impl Iterator<Item = (ImpactCategory, ImpactFlag)> + '_ {
        ImpactCategory::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
    }
}

/// The computed MPA annotation for one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MpaScore {
    /// Normalized predictor consensus, 0-10
    pub adjusted: f64,
    /// Number of predictors with any call
    pub available: u32,
    /// Number of predictors calling deleterious
    pub deleterious: u32,
    /// The single aggregated score, 0-10
    pub final_score: f64,
    /// Winning priority rank, 1-8
    pub ranking: u8,
    /// Every category that fired, in resolution order
    pub impact: Vec<ImpactCategory>,
}

impl MpaScore {
    /// The comma-joined impact annotation, `NULL` when nothing fired
    pub fn impact_field(&self) -> String {
        if self.impact.is_empty() {
            "NULL".to_string()
        } else {
            self.impact
                .iter()
                .map(|category| category.as_str())
                .collect::<Vec<_>>()
                .join(",")
        }
    }
}

/// Merge all classifier flags and the predictor consensus into the final
/// per-record score.
///
/// The winner is the minimum rank among fired categories; on ties the
/// category earlier in resolution order wins (strictly-smaller updates
/// only). Ties can only occur between stop and frameshift impact, where the
/// winner does not change the score rule. A missense or unknown winner
/// scores the predictor consensus; every other winner scores the maximum.
pub fn resolve(flags: &ImpactFlags, consensus: &ConsensusScore) -> MpaScore {
    let mut fired = Vec::new();
    let mut winner: Option<(ImpactCategory, u8)> = None;

    for (category, flag) in flags.iter() {
        if let ImpactFlag::Rank(rank) = flag {
            fired.push(category);
            match winner {
                Some((_, best)) if best <= rank => {}
                _ => winner = Some((category, rank)),
            }
        }
    }

    let (ranking, final_score) = match winner {
        Some((category, rank)) => {
            let score = if category.uses_consensus_score() {
                consensus.adjusted
            } else {
                10.0
            };
            (rank, score)
        }
        None => (NO_IMPACT_RANK, consensus.adjusted),
    };

    MpaScore {
        adjusted: consensus.adjusted,
        available: consensus.available,
        deleterious: consensus.deleterious,
        final_score,
        ranking,
        impact: fired,
    }
}
