//! Command-line interface for flank-strand.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **strand**: Resolve the strand of a single probe
//! - **batch**: Resolve every probe in a manifest
//!
//! ## Usage
//!
//! ```text
//! # One probe against GRCh37
//! flank-strand --reference GRCh37=GRCh37.fa strand \
//!     --five-prime ATCTTTTTGTTAGTCGCCTC --three-prime ACTTTTCTTTCCTTTTTCCT \
//!     --build GRCh37 --chromosome 7 --position 117199644
//!
//! # A manifest, in parallel, as JSON
//! flank-strand --reference GRCh37=GRCh37.fa --format json batch probes.tsv --threads 8
//!
//! # Looser matching around imprecise coordinates
//! flank-strand --reference GRCh38=hg38.fa --tolerance 0.7 batch probes.csv --window 10
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};

use crate::core::config::StrandingConfig;
use crate::core::types::Assembly;
use crate::reference::IndexedFastaReference;

pub mod batch;
pub mod strand;

#[derive(Parser)]
#[command(name = "flank-strand")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Resolve the reference strand of coordinate-mapped probe flanks")]
#[command(
    long_about = "flank-strand decides whether a pair of probe flanks mapped to a position on a reference assembly lie on the forward (+1) or reverse (-1) strand.\n\nExact matches against the reference are tried first. Otherwise the flanks and their reverse complements are scored by local alignment against the reference around the mapped position, and a strand is called only when alignments on exactly one strand are accepted."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the strand of a single probe
    Strand(strand::StrandArgs),

    /// Resolve the strand of every probe in a manifest
    Batch(batch::BatchArgs),
}

/// Reference and scoring options shared by all commands
#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    /// Indexed FASTA for an assembly, as BUILD=PATH (repeatable; needs PATH.fai)
    #[arg(short, long = "reference", global = true, value_parser = parse_reference)]
    pub references: Vec<(Assembly, PathBuf)>,

    /// JSON file with scoring configuration; flags below override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Minimum length at least one flank must reach (default 15)
    #[arg(long, global = true)]
    pub min_flank_length: Option<usize>,

    /// Fraction of a perfect score an alignment must exceed (default 0.77);
    /// 1.0 with no window only accepts exact matches
    #[arg(long, global = true)]
    pub tolerance: Option<f64>,

    /// Score per matching base (default 2)
    #[arg(long, global = true)]
    pub match_score: Option<i32>,

    /// Score per mismatching base (default -1)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub mismatch_penalty: Option<i32>,

    /// Score per gap base, for both opening and extension (default -5)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub gap_penalty: Option<i32>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

fn parse_reference(s: &str) -> Result<(Assembly, PathBuf), String> {
    let (build, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected BUILD=PATH, got '{s}'"))?;
    if build.trim().is_empty() || path.trim().is_empty() {
        return Err(format!("expected BUILD=PATH, got '{s}'"));
    }
    Ok((Assembly::parse(build), PathBuf::from(path.trim())))
}

impl CommonArgs {
    /// Configuration from the optional JSON file with flag overrides applied.
    /// Advisories are logged as warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded.
    pub fn stranding_config(&self) -> anyhow::Result<StrandingConfig> {
        let mut config = match &self.config {
            Some(path) => {
                StrandingConfig::load_from_file(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?
                    .0
            }
            None => StrandingConfig::default(),
        };

        if let Some(value) = self.min_flank_length {
            config.min_flank_length = value;
        }
        if let Some(value) = self.tolerance {
            config.tolerance = value;
        }
        if let Some(value) = self.match_score {
            config.match_score = value;
        }
        if let Some(value) = self.mismatch_penalty {
            config.mismatch_penalty = value;
        }
        if let Some(value) = self.gap_penalty {
            config.gap_open_penalty = value;
        }

        for advisory in config.advisories() {
            warn!("{advisory}");
        }

        Ok(config)
    }

    /// Open every `--reference` FASTA
    ///
    /// # Errors
    ///
    /// Returns an error if no reference was given or one cannot be opened.
    pub fn reference(&self) -> anyhow::Result<IndexedFastaReference> {
        if self.references.is_empty() {
            anyhow::bail!("At least one --reference BUILD=PATH is required");
        }

        let mut reference = IndexedFastaReference::new();
        for (build, path) in &self.references {
            reference
                .add_assembly(build.clone(), path)
                .with_context(|| format!("Failed to open reference {}", path.display()))?;
        }
        debug!("Opened {} reference assemblies", reference.assemblies().len());
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference() {
        let (build, path) = parse_reference("hg19=/refs/hs37d5.fa").unwrap();
        assert_eq!(build, Assembly::Grch37);
        assert_eq!(path, PathBuf::from("/refs/hs37d5.fa"));

        assert!(parse_reference("/refs/hs37d5.fa").is_err());
        assert!(parse_reference("GRCh38=").is_err());
    }

    #[test]
    fn test_flag_overrides() {
        let cli = Cli::parse_from([
            "flank-strand",
            "--tolerance",
            "1.0",
            "--gap-penalty",
            "-3",
            "strand",
            "--five-prime",
            "ACGT",
            "--three-prime",
            "ACGT",
            "--build",
            "GRCh37",
            "--chromosome",
            "1",
            "--position",
            "100",
        ]);
        let config = cli.common.stranding_config().unwrap();
        assert!(config.is_strict());
        assert_eq!(config.gap_open_penalty, -3);
        assert_eq!(config.match_score, 2);
    }

    #[test]
    fn test_window_extension_is_bounded() {
        let strand = |window: &str| {
            Cli::try_parse_from([
                "flank-strand",
                "strand",
                "--five-prime",
                "ACGT",
                "--three-prime",
                "ACGT",
                "-b",
                "GRCh37",
                "-c",
                "MT",
                "-p",
                "50",
                "--window",
                window,
            ])
        };
        assert!(strand("10000").is_ok());
        assert!(strand("10001").is_err());
        assert!(strand("4398046511104").is_err());

        let batch = Cli::try_parse_from(["flank-strand", "batch", "probes.tsv", "-w", "20000"]);
        assert!(batch.is_err());
    }
}
