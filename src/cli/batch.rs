use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::cli::{CommonArgs, OutputFormat};
use crate::core::probe::Probe;
use crate::parsing::manifest::parse_manifest_file;
use crate::reference::ReferenceProvider;
use crate::stranding::{AlignmentEngine, StrandResolver};
use crate::utils::validation::MAX_WINDOW_EXTENSION;

#[derive(Args)]
pub struct BatchArgs {
    /// Probe manifest (TSV or CSV, optionally gzipped)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Write results here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Window extension for probes that do not set their own (at most 10000)
    #[arg(
        short,
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u64).range(..=MAX_WINDOW_EXTENSION)
    )]
    pub window: u64,

    /// Number of worker threads (0 uses all cores)
    #[arg(short, long, default_value = "1")]
    pub threads: usize,
}

/// Strand call or failure for one manifest probe
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    pub name: String,
    pub build: String,
    pub chromosome: String,
    pub position: i64,
    pub window: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strand: Option<i8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Resolve every probe, in manifest order
pub fn resolve_probes<P, E>(
    resolver: &StrandResolver<P, E>,
    probes: &[Probe],
    default_window: u64,
) -> Vec<ProbeResult>
where
    P: ReferenceProvider,
    E: AlignmentEngine,
{
    probes
        .par_iter()
        .map(|probe| {
            let window = probe.window.unwrap_or(default_window);
            let result = resolver.resolve(
                &probe.five_prime,
                &probe.three_prime,
                &probe.build,
                &probe.chromosome,
                probe.position,
                window,
            );

            let (strand, error, message) = match result {
                Ok(strand) => (Some(strand.as_i8()), None, None),
                Err(e) => {
                    debug!("{}: {e}", probe.name);
                    (None, Some(e.kind().to_string()), Some(e.to_string()))
                }
            };

            ProbeResult {
                name: probe.name.clone(),
                build: probe.build.to_string(),
                chromosome: probe.chromosome.clone(),
                position: probe.position,
                window,
                strand,
                error,
                message,
            }
        })
        .collect()
}

/// Execute batch subcommand
///
/// # Errors
///
/// Returns an error if the manifest or reference cannot be read, or output fails.
/// Probes that cannot be stranded are reported in the output, not as errors.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: BatchArgs,
    common: &CommonArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let probes = parse_manifest_file(&args.input)
        .with_context(|| format!("Failed to parse manifest {}", args.input.display()))?;

    if verbose {
        eprintln!("Parsed {} probes from {}", probes.len(), args.input.display());
    }

    let config = common.stranding_config()?;
    let reference = common.reference()?;
    let resolver = StrandResolver::new(config, reference);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build()
        .context("Failed to start worker threads")?;
    let results = pool.install(|| resolve_probes(&resolver, &probes, args.window));

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    match format {
        OutputFormat::Text => write_text_results(&mut out, &results)?,
        OutputFormat::Json => write_json_results(&mut out, &results)?,
        OutputFormat::Tsv => write_tsv_results(&mut out, &results)?,
    }
    out.flush()?;

    print_summary(&results);
    Ok(())
}

/// Counts of each result category, keyed by `+1`, `-1` or error kind
#[must_use]
pub fn summarize(results: &[ProbeResult]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for result in results {
        let key = match (&result.strand, &result.error) {
            (Some(strand), _) => format!("{strand:+}"),
            (None, Some(error)) => error.clone(),
            (None, None) => "unknown".to_string(),
        };
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

fn print_summary(results: &[ProbeResult]) {
    eprintln!("Resolved {} probes", results.len());
    for (category, count) in summarize(results) {
        eprintln!("  {category}: {count}");
    }
}

fn write_text_results(out: &mut dyn Write, results: &[ProbeResult]) -> anyhow::Result<()> {
    for result in results {
        match (&result.strand, &result.message) {
            (Some(strand), _) => writeln!(out, "{}\t{strand:+}", result.name)?,
            (None, Some(message)) => writeln!(out, "{}\tERROR\t{message}", result.name)?,
            (None, None) => writeln!(out, "{}\tERROR", result.name)?,
        }
    }
    Ok(())
}

fn write_json_results(out: &mut dyn Write, results: &[ProbeResult]) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "probes": results,
        "summary": summarize(results),
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn write_tsv_results(out: &mut dyn Write, results: &[ProbeResult]) -> anyhow::Result<()> {
    writeln!(
        out,
        "name\tbuild\tchromosome\tposition\twindow\tstrand\terror"
    )?;
    for result in results {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            result.name,
            result.build,
            result.chromosome,
            result.position,
            result.window,
            result.strand.map(|s| s.to_string()).unwrap_or_default(),
            result.error.as_deref().unwrap_or(""),
        )?;
    }
    Ok(())
}
