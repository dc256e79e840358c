//! Line-oriented VCF reading
//!
//! The header is consumed at construction so callers can validate the
//! declared INFO fields before iterating records. Record lines are parsed
//! lazily, one at a time.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::MpaError;

use super::header::VcfHeader;
use super::record::{Info, InfoValue, VcfRecord};

/// VCF file reader that yields VcfRecord instances
pub struct VcfReader<R> {
    inner: R,
    header: VcfHeader,
    /// 1-based line number of the last line read, for error messages
    line_no: u64,
}

impl<R: BufRead> VcfReader<R> {
    /// Create a new VCF reader, consuming the header
    pub fn new(mut reader: R) -> Result<Self, MpaError> {
        let mut lines = Vec::new();
        let mut line_no = 0u64;

        loop {
            let mut line = String::new();
            let n = reader.read_line(&mut line)?;
            if n == 0 {
                return Err(MpaError::parse(
                    line_no,
                    "unexpected end of file while reading header",
                ));
            }
            line_no += 1;
            let line = line.trim_end_matches(['\n', '\r']).to_string();

            if line.starts_with("##") {
                lines.push(line);
            } else if line.starts_with('#') {
                let header = VcfHeader::parse(lines, line)?;
                return Ok(Self {
                    inner: reader,
                    header,
                    line_no,
                });
            } else {
                return Err(MpaError::parse(
                    line_no,
                    "data line before #CHROM column header",
                ));
            }
        }
    }

    /// Get a reference to the parsed header
    pub fn header(&self) -> &VcfHeader {
        &self.header
    }

    /// Read the next VCF record, None at end of file
    pub fn read_record(&mut self) -> Result<Option<VcfRecord>, MpaError> {
        loop {
            let mut line = String::new();
            let n = self.inner.read_line(&mut line)?;
            if n == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let line = line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                continue;
            }
            return parse_record_line(line, self.line_no).map(Some);
        }
    }

    /// Iterate over all records in the VCF file
    pub fn records(self) -> VcfRecordIterator<R> {
        VcfRecordIterator {
            reader: self,
            done: false,
        }
    }
}

/// Iterator over VCF records
pub struct VcfRecordIterator<R> {
    reader: VcfReader<R>,
    done: bool,
}

impl<R: BufRead> Iterator for VcfRecordIterator<R> {
    type Item = Result<VcfRecord, MpaError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Open a VCF file from a path, transparently decompressing `.gz` inputs
pub fn open_vcf<P: AsRef<Path>>(path: P) -> Result<VcfReader<Box<dyn BufRead>>, MpaError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MpaError::Io {
        msg: format!("Failed to open VCF file {}: {}", path.display(), e),
    })?;

    let is_gz = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    VcfReader::new(reader)
}

/// Parse VCF from a string
pub fn parse_vcf_string(vcf_content: &str) -> Result<VcfReader<BufReader<&[u8]>>, MpaError> {
    VcfReader::new(BufReader::new(vcf_content.as_bytes()))
}

/// Parse a tab-separated VCF data line
///
/// Requires the full eight fixed columns; FORMAT and sample columns are
/// preserved verbatim.
pub fn parse_record_line(line: &str, line_no: u64) -> Result<VcfRecord, MpaError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 8 {
        return Err(MpaError::parse(
            line_no,
            format!("expected at least 8 fields, got {}", fields.len()),
        ));
    }

    let pos: u64 = fields[1].parse().map_err(|_| {
        MpaError::parse(
            line_no,
            format!("invalid position '{}': not a valid integer", fields[1]),
        )
    })?;

    let id = (fields[2] != ".").then(|| fields[2].to_string());
    let alternate: Vec<String> = fields[4].split(',').map(|s| s.to_string()).collect();
    let quality = (fields[5] != ".").then(|| fields[5].parse::<f32>().ok()).flatten();
    let filter = (fields[6] != ".").then(|| fields[6].to_string());
    let info = parse_info(fields[7]);
    let trailing = fields[8..].iter().map(|s| s.to_string()).collect();

    Ok(VcfRecord {
        chrom: fields[0].to_string(),
        pos,
        id,
        reference: fields[3].to_string(),
        alternate,
        quality,
        filter,
        info,
        trailing,
    })
}

/// Parse the INFO column into an ordered map.
///
/// Values are kept as declared text: a comma-separated value becomes a
/// string array, anything else a single string, a bare key a flag. Typed
/// interpretation happens at the extraction boundary (`first_str`,
/// `first_f64`), never here, so unchanged fields round-trip exactly.
fn parse_info(field: &str) -> Info {
    let mut info = Info::new();
    if field == "." || field.is_empty() {
        return info;
    }

    for entry in field.split(';') {
        match entry.split_once('=') {
            Some((key, value)) => {
                if value.contains(',') {
                    let values = value.split(',').map(|s| s.to_string()).collect();
                    info.insert(key, InfoValue::StringArray(values));
                } else {
                    info.insert(key, InfoValue::String(value.to_string()));
                }
            }
            None => info.insert(entry, InfoValue::Flag),
        }
    }
    info
}
