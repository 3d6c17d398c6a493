//! Parsers for probe input files.
//!
//! - **Probe manifests** (TSV/CSV, optionally gzipped): one probe per line with
//!   its build, chromosome, position and flanks
//!
//! ## Example
//!
//! ```rust
//! use flank_strand::parsing::manifest::parse_manifest_text;
//!
//! let manifest = "name\tbuild\tchromosome\tposition\tfive_prime\tthree_prime\n\
//!                 rs1\tGRCh37\t1\t100\tACGTACGT\tTTGACCA\n";
//! let probes = parse_manifest_text(manifest, '\t').unwrap();
//! assert_eq!(probes[0].name, "rs1");
//! ```
//!
//! ## Columns
//!
//! | Column | Description | Required |
//! |--------|-------------|----------|
//! | name | Probe identifier | Yes |
//! | build | Assembly (GRCh37, GRCh38, hg19, hg38, ...) | Yes |
//! | chromosome | Chromosome label (1, chr1, X, XY, MT, ...) | Yes |
//! | position | 1-based mapping coordinate | Yes |
//! | five_prime | 5' flank bases | Yes |
//! | three_prime | 3' flank bases | Yes |
//! | window | Window extension for this probe | No |

pub mod manifest;
