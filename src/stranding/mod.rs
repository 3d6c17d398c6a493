//! Strand resolution engine and scoring.
//!
//! - [`StrandResolver`]: Main entry point deciding the strand of a pair of flanks
//! - [`AlignmentScorer`]: Classifies local alignment scores against query length
//! - [`AlignmentEngine`]: Local alignment backend ([`BioAligner`] by default)
//! - [`DiagnosticObserver`]: Receives diagnostics for inconsistent alignments
//!
//! ## Scoring
//!
//! A perfect alignment of a query of length `L` scores `L * match_score`. An
//! alignment is accepted when it scores strictly above
//! `L * match_score * tolerance`, making `tolerance` a length-independent
//! accuracy knob. Queries shorter than `min_flank_length` are never accepted.
//!
//! ## Example
//!
//! ```rust
//! use flank_strand::{Assembly, InMemoryReference, Strand, StrandResolver, StrandingConfig};
//!
//! let reference = InMemoryReference::new().with_sequence(
//!     Assembly::Grch37,
//!     "1",
//!     b"GATCCTGAGGCTCAAGTCATGGACCTTAGCGAATCGCTAGCCATGCAGTACCGTTGACATGAG".to_vec(),
//! );
//! let resolver = StrandResolver::new(StrandingConfig::default(), reference);
//!
//! let strand = resolver
//!     .resolve_at("GGACCTTAGCGAATCGCTAG", "CCATG", &Assembly::Grch37, "1", 40)
//!     .unwrap();
//! assert_eq!(strand, Strand::Forward);
//! ```

pub mod engine;
pub mod error;
pub mod observer;
pub mod outcome;
pub mod resolver;
pub mod scoring;

pub use engine::{AlignmentEngine, AlignmentRecord, BioAligner, ScoringScheme};
pub use error::{ErrorKind, InvalidInputReason, StrandError, UnstrandableReason};
pub use observer::{CollectingObserver, DiagnosticObserver, HypothesisReport, TracingObserver};
pub use outcome::{Hypothesis, HypothesisId, Outcome, HYPOTHESES};
pub use resolver::StrandResolver;
pub use scoring::{Aligned, AlignmentScorer};
