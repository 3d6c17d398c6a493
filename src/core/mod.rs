//! Core data types for strand resolution.
//!
//! - [`Strand`]: Forward or reverse strand call (`+1` / `-1`)
//! - [`Assembly`]: Reference assembly build identifier
//! - [`Locus`]: Build, chromosome, position and window of a resolution attempt
//! - [`StrandingConfig`]: Scoring and tolerance parameters
//! - [`Probe`]: Named flank pair with its mapping coordinates
//!
//! ## Chromosome Naming
//!
//! | Source | Chromosome 1 | Mitochondrial | Pseudoautosomal |
//! |--------|--------------|---------------|-----------------|
//! | UCSC   | chr1         | chrM          | chrXY           |
//! | NCBI   | 1            | MT            | XY              |
//!
//! Mitochondrial contigs are circular and looked up with wrap-around coordinates.
//! Pseudoautosomal probes are looked up on X.

pub mod chromosome;
pub mod config;
pub mod probe;
pub mod types;

pub use config::{ConfigAdvisory, ConfigError, StrandingConfig};
pub use probe::Probe;
pub use types::{Assembly, Locus, Strand};
