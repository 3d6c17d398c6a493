use clap::Args;

use crate::cli::{CommonArgs, OutputFormat};
use crate::core::types::{Assembly, Strand};
use crate::stranding::StrandResolver;
use crate::utils::validation::MAX_WINDOW_EXTENSION;

#[derive(Args)]
pub struct StrandArgs {
    /// 5' flank bases
    #[arg(long)]
    pub five_prime: String,

    /// 3' flank bases
    #[arg(long)]
    pub three_prime: String,

    /// Assembly the position refers to (GRCh37, GRCh38, hg19, hg38, ...)
    #[arg(short, long)]
    pub build: Assembly,

    /// Chromosome label (1, chr1, X, XY, MT, ...)
    #[arg(short, long)]
    pub chromosome: String,

    /// 1-based mapping coordinate
    #[arg(short, long, allow_negative_numbers = true)]
    pub position: i64,

    /// Extend the reference windows by this many bases each way (at most 10000)
    #[arg(
        short,
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u64).range(..=MAX_WINDOW_EXTENSION)
    )]
    pub window: u64,
}

/// Execute strand subcommand
///
/// # Errors
///
/// Returns an error if the reference cannot be opened or the probe cannot be stranded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: StrandArgs,
    common: &CommonArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let config = common.stranding_config()?;
    let reference = common.reference()?;

    if verbose {
        eprintln!(
            "Resolving {} {}:{} (window {}) with tolerance {}",
            args.build, args.chromosome, args.position, args.window, config.tolerance
        );
    }

    let resolver = StrandResolver::new(config, reference);
    let strand = resolver.resolve(
        &args.five_prime.to_uppercase(),
        &args.three_prime.to_uppercase(),
        &args.build,
        &args.chromosome,
        args.position,
        args.window,
    )?;

    match format {
        OutputFormat::Text => print_text_strand(&args, strand),
        OutputFormat::Json => print_json_strand(&args, strand)?,
        OutputFormat::Tsv => print_tsv_strand(&args, strand),
    }

    Ok(())
}

fn strand_label(strand: Strand) -> &'static str {
    match strand {
        Strand::Forward => "forward",
        Strand::Reverse => "reverse",
    }
}

fn print_text_strand(args: &StrandArgs, strand: Strand) {
    println!(
        "{} {}:{}\t{} ({})",
        args.build,
        args.chromosome,
        args.position,
        strand,
        strand_label(strand)
    );
}

fn print_json_strand(args: &StrandArgs, strand: Strand) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "build": args.build.to_string(),
        "chromosome": args.chromosome,
        "position": args.position,
        "window": args.window,
        "strand": strand.as_i8(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_strand(args: &StrandArgs, strand: Strand) {
    println!("build\tchromosome\tposition\twindow\tstrand");
    println!(
        "{}\t{}\t{}\t{}\t{}",
        args.build,
        args.chromosome,
        args.position,
        args.window,
        strand.as_i8()
    );
}
