//! VCF record representation
//!
//! This module provides a VCF record type for representing variants from
//! VCF (Variant Call Format) files. INFO entries keep their input order so
//! annotated records round-trip byte-for-byte apart from appended keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single VCF record representing one variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VcfRecord {
    /// Chromosome name (e.g., "chr1", "1", "X", "chrM")
    pub chrom: String,

    /// 1-based position of the first base in the reference allele
    pub pos: u64,

    /// Variant identifier (e.g., rsID), None if "."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Reference allele as written in the file
    pub reference: String,

    /// Alternate allele(s) - at least one for variant records
    pub alternate: Vec<String>,

    /// Phred-scaled quality score, None if "."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<f32>,

    /// Filter status as written in the file, None if "."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// INFO field key-value pairs, in file order
    #[serde(default)]
    pub info: Info,

    /// FORMAT and per-sample columns, passed through verbatim
    #[serde(default)]
    pub trailing: Vec<String>,
}

/// INFO field value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InfoValue {
    /// Flag (presence indicates true)
    Flag,
    /// Integer value
    Integer(i64),
    /// Float value
    Float(f64),
    /// String value
    String(String),
    /// Multiple integer values
    IntegerArray(Vec<i64>),
    /// Multiple float values
    FloatArray(Vec<f64>),
    /// Multiple string values
    StringArray(Vec<String>),
}

impl fmt::Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoValue::Flag => Ok(()),
            InfoValue::Integer(v) => write!(f, "{}", v),
            InfoValue::Float(v) => write!(f, "{}", v),
            InfoValue::String(v) => write!(f, "{}", v),
            InfoValue::IntegerArray(v) => {
                let s: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "{}", s.join(","))
            }
            InfoValue::FloatArray(v) => {
                let s: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "{}", s.join(","))
            }
            InfoValue::StringArray(v) => write!(f, "{}", v.join(",")),
        }
    }
}

/// Ordered INFO map.
///
/// VCF INFO keys are semicolon-separated and ordered; a `HashMap` would
/// shuffle them on output. Entries are kept in insertion order, with
/// updates replacing the value in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Info {
    entries: Vec<(String, InfoValue)>,
}

impl Info {
    /// Create an empty INFO map
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of INFO entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no INFO entries are present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the value for a key
    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// True if the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace a value, preserving the position of existing keys
    pub fn insert(&mut self, key: impl Into<String>, value: InfoValue) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Iterate entries in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// First value of a (possibly multi-valued) field, as text.
    ///
    /// This is the extraction contract every classifier input goes through:
    /// the first value of the named field, with `.` and empty values mapped
    /// to `None`. Numeric and flag values have no first text value.
    pub fn first_str(&self, key: &str) -> Option<&str> {
        let first = match self.get(key)? {
            InfoValue::String(s) => s.as_str(),
            InfoValue::StringArray(values) => values.first().map(|s| s.as_str())?,
            _ => return None,
        };
        if first.is_empty() || first == "." {
            None
        } else {
            Some(first)
        }
    }

    /// First value of a (possibly multi-valued) field, parsed as a float.
    ///
    /// Absent, `.`, and non-numeric values are all `None`; missing optional
    /// data is never an error.
    pub fn first_f64(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            InfoValue::Float(v) => Some(*v),
            InfoValue::Integer(v) => Some(*v as f64),
            InfoValue::FloatArray(values) => values.first().copied(),
            InfoValue::IntegerArray(values) => values.first().map(|v| *v as f64),
            _ => self.first_str(key)?.parse().ok(),
        }
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, ".");
        }
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(k, v)| {
                if matches!(v, InfoValue::Flag) {
                    k.clone()
                } else {
                    format!("{}={}", k, v)
                }
            })
            .collect();
        write!(f, "{}", parts.join(";"))
    }
}

impl VcfRecord {
    /// Create a new VCF record with minimal required fields
    pub fn new(chrom: String, pos: u64, reference: String, alternate: Vec<String>) -> Self {
        Self {
            chrom,
            pos,
            id: None,
            reference,
            alternate,
            quality: None,
            filter: None,
            info: Info::new(),
            trailing: Vec::new(),
        }
    }

    /// Create a VCF record for a SNV (single nucleotide variant)
    pub fn snv(chrom: &str, pos: u64, reference: char, alternate: char) -> Self {
        Self::new(
            chrom.to_string(),
            pos,
            reference.to_string(),
            vec![alternate.to_string()],
        )
    }

    /// Site label for log and error messages (chrom:pos)
    pub fn site(&self) -> String {
        format!("{}:{}", self.chrom, self.pos)
    }

    /// Check if this is a multi-allelic variant
    pub fn is_multiallelic(&self) -> bool {
        self.alternate.len() > 1
    }

    /// Structural indel flag.
    ///
    /// A bi-allelic record is an indel when reference and alternate allele
    /// lengths differ. Symbolic (`<DEL>`-style) and spanning (`*`) alleles
    /// are not sequence indels; multi-allelic records are rejected upstream
    /// and report false here.
    pub fn is_indel(&self) -> bool {
        match self.alternate.as_slice() {
            [alt] => !alt.starts_with('<') && alt != "*" && alt.len() != self.reference.len(),
            _ => false,
        }
    }

    /// Set the variant ID (e.g., rsID)
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Set the quality score
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Set the filter field
    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_string());
        self
    }

    /// Add an INFO field
    pub fn with_info(mut self, key: &str, value: InfoValue) -> Self {
        self.info.insert(key, value);
        self
    }
}

impl fmt::Display for VcfRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.pos,
            self.id.as_deref().unwrap_or("."),
            self.reference,
            self.alternate.join(","),
            self.quality.map_or(".".to_string(), |q| q.to_string()),
            self.filter.as_deref().unwrap_or("."),
            self.info,
        )?;

        for column in &self.trailing {
            write!(f, "\t{}", column)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record() {
        let record = VcfRecord::new(
            "chr1".to_string(),
            12345,
            "A".to_string(),
            vec!["G".to_string()],
        );

        assert_eq!(record.chrom, "chr1");
        assert_eq!(record.pos, 12345);
        assert_eq!(record.reference, "A");
        assert_eq!(record.alternate, vec!["G"]);
        assert!(record.id.is_none());
        assert!(record.quality.is_none());
        assert!(record.info.is_empty());
    }

    #[test]
    fn test_multiallelic() {
        let record = VcfRecord::new(
            "chr1".to_string(),
            100,
            "A".to_string(),
            vec!["G".to_string(), "T".to_string()],
        );
        assert!(record.is_multiallelic());
        assert!(!record.is_indel());
    }

    #[test]
    fn test_is_indel() {
        assert!(!VcfRecord::snv("chr1", 100, 'A', 'G').is_indel());

        let del = VcfRecord::new(
            "chr1".to_string(),
            100,
            "ATG".to_string(),
            vec!["A".to_string()],
        );
        assert!(del.is_indel());

        let ins = VcfRecord::new(
            "chr1".to_string(),
            100,
            "A".to_string(),
            vec!["ATG".to_string()],
        );
        assert!(ins.is_indel());

        // Same-length substitution (MNV) is not an indel
        let mnv = VcfRecord::new(
            "chr1".to_string(),
            100,
            "AT".to_string(),
            vec!["GC".to_string()],
        );
        assert!(!mnv.is_indel());

        // Symbolic and spanning alleles are not sequence indels
        let symbolic = VcfRecord::new(
            "chr1".to_string(),
            100,
            "A".to_string(),
            vec!["<DEL>".to_string()],
        );
        assert!(!symbolic.is_indel());
        let star = VcfRecord::new(
            "chr1".to_string(),
            100,
            "AT".to_string(),
            vec!["*".to_string()],
        );
        assert!(!star.is_indel());
    }

    #[test]
    fn test_info_order_preserved() {
        let mut info = Info::new();
        info.insert("DP", InfoValue::Integer(100));
        info.insert("AF", InfoValue::Float(0.5));
        info.insert("ANN", InfoValue::String("x".to_string()));
        info.insert("DP", InfoValue::Integer(200));

        let keys: Vec<&str> = info.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["DP", "AF", "ANN"]);
        assert_eq!(info.get("DP"), Some(&InfoValue::Integer(200)));
        assert_eq!(format!("{}", info), "DP=200;AF=0.5;ANN=x");
    }

    #[test]
    fn test_first_str() {
        let mut info = Info::new();
        info.insert("A", InfoValue::String("D".to_string()));
        info.insert(
            "B",
            InfoValue::StringArray(vec!["T".to_string(), "D".to_string()]),
        );
        info.insert("C", InfoValue::String(".".to_string()));
        info.insert("D", InfoValue::StringArray(vec![]));
        info.insert("E", InfoValue::Flag);

        assert_eq!(info.first_str("A"), Some("D"));
        assert_eq!(info.first_str("B"), Some("T"));
        assert_eq!(info.first_str("C"), None);
        assert_eq!(info.first_str("D"), None);
        assert_eq!(info.first_str("E"), None);
        assert_eq!(info.first_str("missing"), None);
    }

    #[test]
    fn test_first_f64() {
        let mut info = Info::new();
        info.insert("S", InfoValue::String("0.997".to_string()));
        info.insert(
            "M",
            InfoValue::StringArray(vec!["0.6".to_string(), "0.1".to_string()]),
        );
        info.insert("DOT", InfoValue::String(".".to_string()));
        info.insert("TXT", InfoValue::String("notanumber".to_string()));
        info.insert("F", InfoValue::Float(-2.5));
        info.insert("I", InfoValue::Integer(3));

        assert_eq!(info.first_f64("S"), Some(0.997));
        assert_eq!(info.first_f64("M"), Some(0.6));
        assert_eq!(info.first_f64("DOT"), None);
        assert_eq!(info.first_f64("TXT"), None);
        assert_eq!(info.first_f64("F"), Some(-2.5));
        assert_eq!(info.first_f64("I"), Some(3.0));
        assert_eq!(info.first_f64("missing"), None);
    }

    #[test]
    fn test_info_value_display() {
        assert_eq!(format!("{}", InfoValue::Integer(42)), "42");
        assert_eq!(format!("{}", InfoValue::Float(1.23)), "1.23");
        assert_eq!(format!("{}", InfoValue::String("test".to_string())), "test");
        assert_eq!(
            format!("{}", InfoValue::IntegerArray(vec![1, 2, 3])),
            "1,2,3"
        );
        assert_eq!(
            format!(
                "{}",
                InfoValue::StringArray(vec!["a".to_string(), "b".to_string()])
            ),
            "a,b"
        );
    }

    #[test]
    fn test_display_round_trip_shape() {
        let record = VcfRecord::snv("chr1", 12345, 'A', 'G')
            .with_id("rs123")
            .with_quality(30.0)
            .with_filter("PASS")
            .with_info("DP", InfoValue::Integer(100));

        let s = format!("{}", record);
        assert_eq!(s, "chr1\t12345\trs123\tA\tG\t30\tPASS\tDP=100");
    }

    #[test]
    fn test_display_missing_fields() {
        let record = VcfRecord::snv("chr1", 5, 'A', 'T');
        assert_eq!(format!("{}", record), "chr1\t5\t.\tA\tT\t.\t.\t.");
    }

    #[test]
    fn test_display_trailing_columns() {
        let mut record = VcfRecord::snv("chr1", 5, 'A', 'T');
        record.trailing = vec!["GT:DP".to_string(), "0/1:42".to_string()];
        assert!(format!("{}", record).ends_with("\tGT:DP\t0/1:42"));
    }

    #[test]
    fn test_flag_display() {
        let record = VcfRecord::snv("chr1", 5, 'A', 'T').with_info("DB", InfoValue::Flag);
        assert!(format!("{}", record).ends_with("\tDB"));
    }
}
