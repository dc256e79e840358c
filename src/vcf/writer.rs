//! VCF output
//!
//! Records are serialized through their `Display` implementation; the
//! header is written once, before any record.

use std::io::Write;

use crate::error::MpaError;

use super::header::VcfHeader;
use super::record::VcfRecord;

/// VCF writer over any `Write` sink
pub struct VcfWriter<W: Write> {
    inner: W,
}

impl<W: Write> VcfWriter<W> {
    /// Create a writer over a sink
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write the header (meta lines, appended declarations, column line)
    pub fn write_header(&mut self, header: &VcfHeader) -> Result<(), MpaError> {
        writeln!(self.inner, "{}", header)?;
        Ok(())
    }

    /// Write one record
    pub fn write_record(&mut self, record: &VcfRecord) -> Result<(), MpaError> {
        writeln!(self.inner, "{}", record)?;
        Ok(())
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> Result<(), MpaError> {
        self.inner.flush()?;
        Ok(())
    }

    /// Consume the writer, returning the sink
    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcf::header::InfoDef;
    use crate::vcf::reader::parse_vcf_string;

    #[test]
    fn test_write_round_trip() {
        let input = "##fileformat=VCFv4.2\n\
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
chr1\t12345\trs123\tA\tG\t30\tPASS\tDP=100\n";

        let mut reader = parse_vcf_string(input).unwrap();
        let header = reader.header().clone();
        let mut writer = VcfWriter::new(Vec::new());
        writer.write_header(&header).unwrap();
        while let Some(record) = reader.read_record().unwrap() {
            writer.write_record(&record).unwrap();
        }

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_appended_info_written_before_column_line() {
        let input = "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";
        let reader = parse_vcf_string(input).unwrap();
        let mut header = reader.header().clone();
        header.push_info(InfoDef::new("MPA_ranking", ".", "String", "rank"));

        let mut writer = VcfWriter::new(Vec::new());
        writer.write_header(&header).unwrap();
        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("##INFO=<ID=MPA_ranking"));
        assert!(lines[2].starts_with("#CHROM"));
    }
}
