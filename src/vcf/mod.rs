//! VCF (Variant Call Format) support
//!
//! This module provides types and utilities for working with VCF files:
//! header introspection, record parsing, and pass-through writing.

mod header;
mod reader;
mod record;
mod writer;

pub use header::{InfoDef, VcfHeader};
pub use reader::{open_vcf, parse_record_line, parse_vcf_string, VcfReader};
pub use record::{Info, InfoValue, VcfRecord};
pub use writer::VcfWriter;
