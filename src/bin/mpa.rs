// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! mpa CLI
//!
//! Annotates a VCF file with the MPA (variant prioritization) score.
//! The input must already carry the annovar annotation fields the
//! classifiers read; the run aborts before any record when they are
//! missing, while malformed individual records are logged and skipped.

use clap::Parser;
use mpa_score::vcf::{VcfReader, VcfWriter};
use mpa_score::{
    mpa_info_defs, open_vcf, verify_required_annotations, AnnotateStats, MpaAnnotator, MpaError,
};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(name = "mpa")]
#[command(author, version, about = "Annotate a VCF with the MPA prioritization score")]
#[command(
    long_about = "Annotate a VCF with the MPA (variant prioritization) score.

The input VCF must be annotated with annovar beforehand; the MPA score is
computed from the existing annotation fields only.

Examples:
  mpa --input variants.vcf --output variants.mpa.vcf
  mpa -i variants.vcf.gz -o - --logging-level DEBUG"
)]
struct Cli {
    /// The vcf file to annotate (format: VCF, optionally gzip-compressed;
    /// use - for stdin). This vcf must be annotated with annovar.
    #[arg(short, long)]
    input: PathBuf,

    /// The output vcf file with annotation (format: VCF; use - for stdout)
    #[arg(short, long)]
    output: PathBuf,

    /// The logger level
    #[arg(
        short = 'l',
        long,
        default_value = "INFO",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]
    )]
    logging_level: String,

    /// The path to the MPA installation folder [default: the executable's
    /// directory]
    #[arg(short = 'd', long)]
    mpa_directory: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.logging_level)?;

    info!("Start MPA annotation");
    if let Some(dir) = &cli.mpa_directory {
        // accepted for pipeline compatibility; the score needs no data files
        debug!("MPA directory: {}", dir.display());
    }
    match run_annotate(&cli.input, &cli.output) {
        Ok(stats) => {
            info!(
                total = stats.total,
                annotated = stats.annotated,
                skipped = stats.skipped,
                "End MPA annotation"
            );
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Map the CLI level names onto a tracing filter and install it
fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let directive = match level {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        // tracing has no level above error; CRITICAL logs errors only
        "ERROR" | "CRITICAL" => "error",
        other => return Err(format!("Invalid log level '{}'", other).into()),
    };

    let filter = EnvFilter::try_new(directive)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    Ok(())
}

fn run_annotate(input: &Path, output: &Path) -> Result<AnnotateStats, Box<dyn std::error::Error>> {
    let mut reader = open_input(input)?;

    info!("Check vcf annotations");
    verify_required_annotations(reader.header())?;

    let mut header = reader.header().clone();
    for def in mpa_info_defs() {
        header.push_info(def);
    }

    let mut writer = VcfWriter::new(open_output(output)?);
    writer.write_header(&header)?;

    info!("Read each variant");
    let annotator = MpaAnnotator::new();
    let mut stats = AnnotateStats::default();

    while let Some(mut record) = reader.read_record()? {
        stats.total += 1;
        match annotator.annotate(&mut record) {
            Ok(_) => {
                writer.write_record(&record)?;
                stats.annotated += 1;
            }
            Err(e) if e.is_record_level() => {
                error!("{}", record);
                error!("{}", e);
                stats.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    writer.flush()?;
    Ok(stats)
}

fn open_input(path: &Path) -> Result<VcfReader<Box<dyn BufRead>>, MpaError> {
    if path.to_string_lossy() == "-" {
        let stdin: Box<dyn BufRead> = Box::new(BufReader::new(io::stdin()));
        VcfReader::new(stdin)
    } else {
        open_vcf(path)
    }
}

fn open_output(path: &Path) -> Result<Box<dyn Write>, MpaError> {
    if path.to_string_lossy() == "-" {
        Ok(Box::new(BufWriter::new(io::stdout())))
    } else {
        let file = std::fs::File::create(path).map_err(|e| MpaError::Io {
            msg: format!("Failed to create output file {}: {}", path.display(), e),
        })?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
