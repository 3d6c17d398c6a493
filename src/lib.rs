//! # flank-strand
//!
//! A library for resolving which strand of a reference assembly a pair of
//! genotyping probe flanks lies on.
//!
//! Probe manifests report flanking sequence around each variant together with a
//! mapping coordinate, but not always the orientation of the flanks relative to
//! the reference. Before genotypes can be called the orientation has to be
//! known: the flanks are either on the forward (`+1`) or reverse (`-1`) strand.
//!
//! `flank-strand` decides this by comparing the flanks against the reference
//! around the mapped coordinate. Mapping coordinates are required; this is not a
//! sequence search tool.
//!
//! ## Features
//!
//! - **Exact matching first**: identical or reverse-complement-identical flanks
//!   are stranded without any alignment
//! - **Tolerant alignment**: otherwise local alignment scores are accepted above
//!   a length-normalized threshold
//! - **Window search**: reference windows can be widened around imprecise coordinates
//! - **Inconsistency detection**: flanks accepted on both strands are reported, not guessed
//! - **Circular mitochondria**: windows wrap around the ends of MT
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use flank_strand::{Assembly, IndexedFastaReference, StrandResolver, StrandingConfig};
//!
//! let reference = IndexedFastaReference::new()
//!     .with_assembly(Assembly::Grch37, Path::new("GRCh37.fa"))
//!     .unwrap();
//! let resolver = StrandResolver::new(StrandingConfig::default(), reference);
//!
//! let strand = resolver
//!     .resolve(
//!         "ATCTTTTTGTTAGTCGCCTC",
//!         "ACTTTTCTTTCCTTTTTCCT",
//!         &Assembly::Grch37,
//!         "7",
//!         117_199_644,
//!         0,
//!     )
//!     .unwrap();
//! println!("{strand}");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Strand, assembly, locus, probe and configuration types
//! - [`reference`]: Reference sequence providers (in-memory, indexed FASTA)
//! - [`stranding`]: Strand resolver, alignment scoring and diagnostics
//! - [`parsing`]: Probe manifest parser
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod reference;
pub mod stranding;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::config::{ConfigAdvisory, StrandingConfig};
pub use core::probe::Probe;
pub use core::types::*;
pub use reference::{InMemoryReference, IndexedFastaReference, ReferenceError, ReferenceProvider};
pub use stranding::{AlignmentScorer, StrandError, StrandResolver};
