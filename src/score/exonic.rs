//! Exonic consequence classification
//!
//! Four independent checks on the exonic-function annotation text, gated on
//! the variant lying in an exonic region. The checks are not mutually
//! exclusive; the ranking resolver decides which one wins.

use super::ranking::ImpactFlag;

/// Rank for stop gain/loss consequences
pub const STOP_RANK: u8 = 2;
/// Rank for frameshift consequences, tied with stop impact: both are
/// truncating/disruptive
pub const FRAMESHIFT_RANK: u8 = 2;
/// Rank for missense consequences
pub const MISSENSE_RANK: u8 = 7;
/// Rank for consequences the annotation source could not resolve
pub const UNKNOWN_RANK: u8 = 8;

/// The four exonic sub-flags for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExonicImpacts {
    pub stop: ImpactFlag,
    pub frameshift: ImpactFlag,
    pub missense: ImpactFlag,
    pub unknown: ImpactFlag,
}

/// Classify the exonic consequence of a variant.
///
/// Only applies when the functional region contains `exonic` and the
/// exonic-function annotation is present; otherwise no sub-flag fires.
pub fn classify_exonic(func_region: Option<&str>, exonic_func: Option<&str>) -> ExonicImpacts {
    let in_exon = func_region.is_some_and(|region| region.to_ascii_lowercase().contains("exonic"));
    if !in_exon {
        return ExonicImpacts::default();
    }
    let Some(exonic_func) = exonic_func else {
        return ExonicImpacts::default();
    };

    let text = exonic_func.to_ascii_lowercase();
    ExonicImpacts {
        stop: stop_impact(&text),
        frameshift: frameshift_impact(&text),
        missense: missense_impact(&text),
        unknown: unknown_impact(&text),
    }
}

/// Stop codon gain or loss
fn stop_impact(text: &str) -> ImpactFlag {
    if text.contains("stopgain") || text.contains("stoploss") {
        ImpactFlag::Rank(STOP_RANK)
    } else {
        ImpactFlag::NotApplicable
    }
}

/// Frameshifting insertion/deletion; `nonframeshift` consequences contain
/// the substring and must not fire
fn frameshift_impact(text: &str) -> ImpactFlag {
    if text.contains("frameshift") && !text.contains("nonframeshift") {
        ImpactFlag::Rank(FRAMESHIFT_RANK)
    } else {
        ImpactFlag::NotApplicable
    }
}

/// Amino acid substitution
fn missense_impact(text: &str) -> ImpactFlag {
    if text.contains("nonsynonymous_snv") {
        ImpactFlag::Rank(MISSENSE_RANK)
    } else {
        ImpactFlag::NotApplicable
    }
}

/// Consequence the annotation source could not resolve
fn unknown_impact(text: &str) -> ImpactFlag {
    if text.contains("unknown") {
        ImpactFlag::Rank(UNKNOWN_RANK)
    } else {
        ImpactFlag::NotApplicable
    }
}
