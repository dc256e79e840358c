//! VCF header parsing and introspection
//!
//! The header is parsed before record iteration begins so that required
//! INFO declarations can be checked up front. Raw meta lines are kept
//! verbatim: output preserves the original header and appends any new
//! declarations after it.

use std::fmt;

use crate::error::MpaError;

/// One `##INFO` declaration from the header
#[derive(Debug, Clone, PartialEq)]
pub struct InfoDef {
    /// Field ID (the INFO key)
    pub id: String,
    /// Number entry: "1", ".", "A", ...
    pub number: String,
    /// Type entry: "String", "Integer", "Float", "Flag", ...
    pub ty: String,
    /// Free-text description
    pub description: String,
    /// Optional Source entry
    pub source: Option<String>,
    /// Optional Version entry
    pub version: Option<String>,
}

impl InfoDef {
    /// Create a declaration without provenance entries
    pub fn new(id: &str, number: &str, ty: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            number: number.to_string(),
            ty: ty.to_string(),
            description: description.to_string(),
            source: None,
            version: None,
        }
    }

    /// Attach Source/Version provenance entries
    pub fn with_provenance(mut self, source: &str, version: &str) -> Self {
        self.source = Some(source.to_string());
        self.version = Some(version.to_string());
        self
    }

    /// Parse the inside of a `##INFO=<...>` line
    fn from_meta(inner: &str) -> Option<Self> {
        let mut id = None;
        let mut number = None;
        let mut ty = None;
        let mut description = None;
        let mut source = None;
        let mut version = None;

        for (key, value) in split_meta_fields(inner) {
            match key.as_str() {
                "ID" => id = Some(value),
                "Number" => number = Some(value),
                "Type" => ty = Some(value),
                "Description" => description = Some(value),
                "Source" => source = Some(value),
                "Version" => version = Some(value),
                _ => {}
            }
        }

        Some(Self {
            id: id?,
            number: number.unwrap_or_else(|| ".".to_string()),
            ty: ty.unwrap_or_else(|| "String".to_string()),
            description: description.unwrap_or_default(),
            source,
            version,
        })
    }

    /// Serialize back to a `##INFO=<...>` header line
    pub fn header_line(&self) -> String {
        let mut line = format!(
            "##INFO=<ID={},Number={},Type={},Description=\"{}\"",
            self.id, self.number, self.ty, self.description
        );
        if let Some(source) = &self.source {
            line.push_str(&format!(",Source=\"{}\"", source));
        }
        if let Some(version) = &self.version {
            line.push_str(&format!(",Version=\"{}\"", version));
        }
        line.push('>');
        line
    }
}

/// Split `key=value` pairs on commas, honoring double-quoted values
fn split_meta_fields(s: &str) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    let mut key = String::new();
    let mut value = String::new();
    let mut in_key = true;
    let mut in_quotes = false;

    for c in s.chars() {
        match c {
            '=' if in_key && !in_quotes => in_key = false,
            ',' if !in_quotes => {
                fields.push((std::mem::take(&mut key), std::mem::take(&mut value)));
                in_key = true;
            }
            '"' => in_quotes = !in_quotes,
            _ => {
                if in_key {
                    key.push(c);
                } else {
                    value.push(c);
                }
            }
        }
    }
    if !key.is_empty() {
        fields.push((key, value));
    }
    fields
}

/// A parsed VCF file header
#[derive(Debug, Clone, PartialEq)]
pub struct VcfHeader {
    /// Raw `##` meta lines, in file order
    lines: Vec<String>,
    /// INFO declarations parsed from the meta lines
    infos: Vec<InfoDef>,
    /// INFO declarations appended after parsing (written after the
    /// original meta lines)
    appended: Vec<InfoDef>,
    /// The `#CHROM ...` column header line
    columns: String,
}

impl VcfHeader {
    /// Build a header from its meta lines and the `#CHROM` column line
    pub fn parse(lines: Vec<String>, columns: String) -> Result<Self, MpaError> {
        if !columns.starts_with("#CHROM") {
            return Err(MpaError::parse(
                (lines.len() + 1) as u64,
                "missing #CHROM column header line",
            ));
        }

        let infos = lines
            .iter()
            .filter_map(|line| {
                let inner = line
                    .strip_prefix("##INFO=<")
                    .and_then(|rest| rest.strip_suffix('>'))?;
                InfoDef::from_meta(inner)
            })
            .collect();

        Ok(Self {
            lines,
            infos,
            appended: Vec::new(),
            columns,
        })
    }

    /// Check if an INFO field is declared in the header
    pub fn has_info(&self, id: &str) -> bool {
        self.info(id).is_some()
    }

    /// Look up an INFO declaration by ID
    pub fn info(&self, id: &str) -> Option<&InfoDef> {
        self.infos
            .iter()
            .chain(self.appended.iter())
            .find(|def| def.id == id)
    }

    /// All declared INFO IDs, original then appended
    pub fn info_ids(&self) -> impl Iterator<Item = &str> {
        self.infos
            .iter()
            .chain(self.appended.iter())
            .map(|def| def.id.as_str())
    }

    /// Append a new INFO declaration to the header
    pub fn push_info(&mut self, def: InfoDef) {
        self.appended.push(def);
    }

    /// The raw meta lines as read from the file
    pub fn meta_lines(&self) -> &[String] {
        &self.lines
    }

    /// The `#CHROM ...` column header line
    pub fn column_line(&self) -> &str {
        &self.columns
    }
}

impl fmt::Display for VcfHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        for def in &self.appended {
            writeln!(f, "{}", def.header_line())?;
        }
        write!(f, "{}", self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> VcfHeader {
        VcfHeader::parse(
            vec![
                "##fileformat=VCFv4.2".to_string(),
                "##contig=<ID=chr1,length=249250621>".to_string(),
                "##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">".to_string(),
                "##INFO=<ID=CLNSIG,Number=.,Type=String,Description=\"Clinical significance, from ClinVar\">"
                    .to_string(),
            ],
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_info_declarations() {
        let header = sample_header();
        assert!(header.has_info("DP"));
        assert!(header.has_info("CLNSIG"));
        assert!(!header.has_info("SIFT_pred"));

        let dp = header.info("DP").unwrap();
        assert_eq!(dp.number, "1");
        assert_eq!(dp.ty, "Integer");
        assert_eq!(dp.description, "Total Depth");
    }

    #[test]
    fn test_quoted_description_with_comma() {
        let header = sample_header();
        let clnsig = header.info("CLNSIG").unwrap();
        assert_eq!(clnsig.description, "Clinical significance, from ClinVar");
    }

    #[test]
    fn test_missing_column_line() {
        let result = VcfHeader::parse(vec!["##fileformat=VCFv4.2".to_string()], String::new());
        assert!(matches!(result, Err(MpaError::Parse { .. })));
    }

    #[test]
    fn test_push_info_appends_after_original_lines() {
        let mut header = sample_header();
        header.push_info(
            InfoDef::new("MPA_ranking", ".", "String", "rank").with_provenance("MPA", "0.3"),
        );

        assert!(header.has_info("MPA_ranking"));
        let out = format!("{}", header);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "##fileformat=VCFv4.2");
        assert_eq!(
            lines[lines.len() - 2],
            "##INFO=<ID=MPA_ranking,Number=.,Type=String,Description=\"rank\",Source=\"MPA\",Version=\"0.3\">"
        );
        assert!(lines[lines.len() - 1].starts_with("#CHROM"));
    }

    #[test]
    fn test_info_def_header_line_round_trip() {
        let def = InfoDef::new("X", "1", "Float", "a, quoted description");
        let line = def.header_line();
        let inner = line
            .strip_prefix("##INFO=<")
            .and_then(|rest| rest.strip_suffix('>'))
            .unwrap();
        assert_eq!(InfoDef::from_meta(inner).unwrap(), def);
    }
}
