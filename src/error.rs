//! Error types for mpa-score
//!
//! Two kinds of failure exist: run-level errors that abort the whole
//! annotation run (malformed input file, required annotations missing from
//! the header), and record-level errors that skip a single record while the
//! run continues (multi-allelic or multi-reference sites).

use thiserror::Error;

/// Main error type for mpa-score operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MpaError {
    /// A VCF line could not be parsed
    #[error("Parse error at line {line}: {msg}")]
    Parse { line: u64, msg: String },

    /// The input header lacks required annotation declarations
    #[error("VCF not correctly annotated, missing INFO field(s): {}", missing.join(", "))]
    MissingAnnotations { missing: Vec<String> },

    /// A record carries more than one alternate allele
    #[error("multi-allelic variant at {site}: split variants before annotation")]
    MultiAllelic { site: String },

    /// A record carries more than one reference allele
    #[error("multiple reference alleles at {site}: input does not follow the VCF specification")]
    MultiReference { site: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },
}

impl MpaError {
    /// Create a parse error for a given 1-based line number
    pub fn parse(line: u64, msg: impl Into<String>) -> Self {
        MpaError::Parse {
            line,
            msg: msg.into(),
        }
    }

    /// True for errors that invalidate a single record only.
    ///
    /// The caller skips the offending record and keeps processing; every
    /// other variant aborts the run.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            MpaError::MultiAllelic { .. } | MpaError::MultiReference { .. }
        )
    }
}

impl From<std::io::Error> for MpaError {
    fn from(err: std::io::Error) -> Self {
        MpaError::Io {
            msg: err.to_string(),
        }
    }
}
