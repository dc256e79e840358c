// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! mpa-score: MPA variant prioritization
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Annotates VCF records with the MPA score: ten deleteriousness
//! predictors, splicing predictions, and curated clinical significance
//! combined into one priority rank (1 = most severe, 8 = least) and one
//! aggregated 0-10 score per variant.
//!
//! # Example
//!
//! ```
//! use mpa_score::{InfoValue, MpaAnnotator, VcfRecord};
//!
//! // A variant ClinVar calls pathogenic with no doubt
//! let mut record = VcfRecord::snv("chr1", 12345, 'A', 'G')
//!     .with_info("CLNSIG", InfoValue::String("Pathogenic".to_string()));
//!
//! let score = MpaAnnotator::new().annotate(&mut record).unwrap();
//! assert_eq!(score.ranking, 1);
//! assert_eq!(score.final_score, 10.0);
//! assert_eq!(score.impact_field(), "clinvar_pathogenicity");
//! ```

pub mod annotate;
pub mod error;
pub mod score;
pub mod vcf;

// Re-export commonly used types
pub use annotate::{
    ensure_split, mpa_info_defs, verify_required_annotations, AnnotateStats, MpaAnnotator,
    REQUIRED_INFO_FIELDS,
};
pub use error::MpaError;
pub use score::{ConsensusScore, ImpactCategory, ImpactFlag, ImpactFlags, MpaScore, SpliceScores};
pub use vcf::{open_vcf, parse_vcf_string, InfoDef, InfoValue, VcfHeader, VcfRecord, VcfWriter};

/// Result type alias for mpa-score operations
pub type Result<T> = std::result::Result<T, MpaError>;
