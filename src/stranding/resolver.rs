//! Strand resolution for coordinate-mapped flanks.
//!
//! This is not BLAT or BLAST: mapping coordinates are required. Given one or
//! both flanks and a position, the resolver decides whether the flanks
//! correspond to the forward or reverse strand of the assembly.
//!
//! ## Procedure
//!
//! 1. Reject unmapped positions/chromosomes, flanks that are all too short and
//!    oversized windows
//! 2. Fetch the 5' and 3' reference windows, extended by `window` each way
//! 3. With no window extension, exact matches against the windows or their
//!    reverse complements decide immediately; no alignment is run
//! 4. In exact-match-only mode (`tolerance == 1.0`, no window) anything else is
//!    unstrandable
//! 5. Otherwise score the four [`HYPOTHESES`] by local alignment. A perfect score
//!    decides immediately; else a strand is called if only its hypotheses are
//!    high-scoring
//!
//! Alignments accepted on both strands mean the flanks are too short or the
//! tolerance too loose for the locus. All hypotheses are reported to the
//! [`DiagnosticObserver`] and [`StrandError::InconsistentAlignment`] is returned.

use std::sync::Arc;

use tracing::debug;

use crate::core::chromosome::{is_mitochondrial, is_unmapped, lookup_name};
use crate::core::config::StrandingConfig;
use crate::core::types::{Assembly, Locus, Strand};
use crate::reference::ReferenceProvider;
use crate::stranding::engine::{AlignmentEngine, BioAligner};
use crate::stranding::error::{InvalidInputReason, StrandError, UnstrandableReason};
use crate::stranding::observer::{DiagnosticObserver, TracingObserver};
use crate::stranding::outcome::{Flanks, Outcome, Windows, HYPOTHESES};
use crate::stranding::scoring::AlignmentScorer;
use crate::utils::sequence::reverse_complement;
use crate::utils::validation::{check_window_extension, MAX_WINDOW_EXTENSION};

pub struct StrandResolver<P, E = BioAligner> {
    scorer: AlignmentScorer<E>,
    reference: P,
    observer: Arc<dyn DiagnosticObserver>,
}

impl<P: ReferenceProvider> StrandResolver<P, BioAligner> {
    pub fn new(config: StrandingConfig, reference: P) -> Self {
        Self::with_engine(config, reference, BioAligner)
    }
}

impl<P: ReferenceProvider, E: AlignmentEngine> StrandResolver<P, E> {
    pub fn with_engine(config: StrandingConfig, reference: P, engine: E) -> Self {
        Self {
            scorer: AlignmentScorer::with_engine(config, engine),
            reference,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the default `tracing` observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn DiagnosticObserver>) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub fn config(&self) -> &StrandingConfig {
        self.scorer.config()
    }

    #[must_use]
    pub fn scorer(&self) -> &AlignmentScorer<E> {
        &self.scorer
    }

    /// Resolve at the exact mapping coordinates, with no window extension
    ///
    /// # Errors
    ///
    /// See [`StrandResolver::resolve`].
    pub fn resolve_at(
        &self,
        five_prime: &str,
        three_prime: &str,
        build: &Assembly,
        chr_name: &str,
        pos: i64,
    ) -> Result<Strand, StrandError> {
        self.resolve(five_prime, three_prime, build, chr_name, pos, 0)
    }

    /// Decide which strand of `build` the flanks mapped at `chr_name:pos` lie on.
    ///
    /// `pos` is the 1-based mapping coordinate. `window` extends both reference
    /// windows in each direction, allowing for imprecise coordinates at the cost
    /// of always running alignments.
    ///
    /// # Errors
    ///
    /// - `StrandError::InvalidInput` for position 0, chromosome 0, flanks all
    ///   shorter than the minimum flank length, or a window above
    ///   [`MAX_WINDOW_EXTENSION`]
    /// - `StrandError::MissingReferenceFlank` if the reference windows cannot be read
    /// - `StrandError::Unstrandable` if no orientation is accepted
    /// - `StrandError::InconsistentAlignment` if both orientations are accepted
    pub fn resolve(
        &self,
        five_prime: &str,
        three_prime: &str,
        build: &Assembly,
        chr_name: &str,
        pos: i64,
        window: u64,
    ) -> Result<Strand, StrandError> {
        let locus = Locus::new(build.clone(), chr_name, pos, window);
        let flanks = Flanks {
            five_prime,
            three_prime,
        };

        self.validate(&locus, &flanks)?;

        let windows = self.fetch_windows(&locus, &flanks)?;
        let exact = window == 0;

        // Exact comparisons are cheap so try these first
        if exact && (three_prime == windows.three_prime || five_prime == windows.five_prime) {
            debug!("{locus}: exact forward match");
            return Ok(Strand::Forward);
        }
        if exact && (three_prime == windows.five_prime_rc || five_prime == windows.three_prime_rc)
        {
            debug!("{locus}: exact reverse match");
            return Ok(Strand::Reverse);
        }
        if exact && self.config().is_strict() {
            return Err(StrandError::Unstrandable {
                locus,
                reason: UnstrandableReason::StrictMatchFailed,
            });
        }

        let mut outcomes = Vec::with_capacity(HYPOTHESES.len());
        for hypothesis in HYPOTHESES {
            let outcome = Outcome::new(hypothesis, &windows, &flanks);
            let score = self.scorer.align_score(outcome.reference, outcome.query);
            debug!("{locus}: {} scored {score}", hypothesis.id);

            if self.scorer.is_perfect_score(score, outcome.query) {
                return Ok(hypothesis.strand);
            }
            outcomes.push(outcome.with_score(score));
        }

        let accepted = |strand: Strand| {
            outcomes.iter().any(|o| {
                o.strand() == strand && self.scorer.is_high_scoring(o.score.unwrap_or(0), o.query)
            })
        };

        match (accepted(Strand::Forward), accepted(Strand::Reverse)) {
            (true, true) => {
                self.report(&locus, &outcomes);
                Err(StrandError::InconsistentAlignment { locus })
            }
            (true, false) => Ok(Strand::Forward),
            (false, true) => Ok(Strand::Reverse),
            (false, false) => Err(StrandError::Unstrandable {
                locus,
                reason: UnstrandableReason::NoAcceptedAlignment,
            }),
        }
    }

    fn validate(&self, locus: &Locus, flanks: &Flanks<'_>) -> Result<(), StrandError> {
        let reason = if locus.position == 0 {
            Some(InvalidInputReason::UnmappedPosition)
        } else if is_unmapped(&locus.chromosome) {
            Some(InvalidInputReason::UnmappedChromosome)
        } else if flanks.max_len() < self.config().min_flank_length {
            Some(InvalidInputReason::FlanksTooShort {
                longest: flanks.max_len(),
                minimum: self.config().min_flank_length,
            })
        } else if check_window_extension(locus.window).is_some() {
            Some(InvalidInputReason::WindowTooLarge {
                window: locus.window,
                maximum: MAX_WINDOW_EXTENSION,
            })
        } else {
            None
        };

        match reason {
            Some(reason) => Err(StrandError::InvalidInput {
                locus: locus.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Fetch `[pos - window - max_len, pos + window)` and
    /// `[pos - window, pos + max_len + window + 1)`
    fn fetch_windows(&self, locus: &Locus, flanks: &Flanks<'_>) -> Result<Windows, StrandError> {
        let circular = is_mitochondrial(&locus.chromosome);
        let chromosome = lookup_name(&locus.chromosome);
        let max_len = i64::try_from(flanks.max_len()).unwrap_or(i64::MAX);
        let window = i64::try_from(locus.window).unwrap_or(i64::MAX);
        let pos = locus.position;

        let fetch = |start: i64, end: i64| {
            self.reference
                .sequence(chromosome, &locus.build, start, end, circular)
                .map_err(|source| StrandError::MissingReferenceFlank {
                    locus: locus.clone(),
                    source,
                })
        };

        let five_prime = fetch(
            pos.saturating_sub(window).saturating_sub(max_len),
            pos.saturating_add(window),
        )?;
        let three_prime = fetch(
            pos.saturating_sub(window),
            pos.saturating_add(max_len)
                .saturating_add(window)
                .saturating_add(1),
        )?;

        Ok(Windows {
            five_prime_rc: reverse_complement(&five_prime),
            three_prime_rc: reverse_complement(&three_prime),
            five_prime,
            three_prime,
        })
    }

    fn report(&self, locus: &Locus, outcomes: &[Outcome<'_>]) {
        for outcome in outcomes {
            self.observer.hypothesis(locus, outcome);
            self.scorer
                .align_and_log(locus, outcome, self.observer.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{InMemoryReference, ReferenceError};
    use crate::stranding::engine::{AlignmentRecord, ScoringScheme};

    /// Engine that fails the test if any alignment is attempted
    struct PanicEngine;

    impl AlignmentEngine for PanicEngine {
        fn score(&self, _: &str, _: &str, _: &ScoringScheme) -> Option<i32> {
            panic!("alignment should not run")
        }

        fn alignments(&self, _: &str, _: &str, _: &ScoringScheme) -> Vec<AlignmentRecord> {
            panic!("alignment should not run")
        }
    }

    /// Provider that fails the test if any lookup is attempted
    struct PanicReference;

    impl ReferenceProvider for PanicReference {
        fn sequence(
            &self,
            _: &str,
            _: &Assembly,
            _: i64,
            _: i64,
            _: bool,
        ) -> Result<String, ReferenceError> {
            panic!("reference should not be read")
        }
    }

    const CHR: &str = "GATCCTGAGGCTCAAGTCATGGACCTTAGCGAATCGCTAGCCATGCAGTACCGTTGACATGAGCTTCGGAATCCGATCA";

    fn reference() -> InMemoryReference {
        InMemoryReference::new().with_sequence(Assembly::Grch37, "1", CHR.as_bytes().to_vec())
    }

    #[test]
    fn test_invalid_input_checked_before_lookup() {
        let resolver =
            StrandResolver::with_engine(StrandingConfig::default(), PanicReference, PanicEngine);
        let flank = "A".repeat(20);

        let err = resolver
            .resolve_at(&flank, &flank, &Assembly::Grch37, "1", 0)
            .unwrap_err();
        assert!(matches!(
            err,
            StrandError::InvalidInput {
                reason: InvalidInputReason::UnmappedPosition,
                ..
            }
        ));

        let err = resolver
            .resolve_at(&flank, &flank, &Assembly::Grch37, "0", 100)
            .unwrap_err();
        assert!(matches!(
            err,
            StrandError::InvalidInput {
                reason: InvalidInputReason::UnmappedChromosome,
                ..
            }
        ));

        let err = resolver
            .resolve_at("ACGT", "ACGTACGTACGTAC", &Assembly::Grch37, "1", 100)
            .unwrap_err();
        assert!(matches!(
            err,
            StrandError::InvalidInput {
                reason: InvalidInputReason::FlanksTooShort {
                    longest: 14,
                    minimum: 15
                },
                ..
            }
        ));
    }

    #[test]
    fn test_oversized_window_rejected_before_lookup() {
        let resolver =
            StrandResolver::with_engine(StrandingConfig::default(), PanicReference, PanicEngine);
        let flank = "A".repeat(20);

        let err = resolver
            .resolve(&flank, &flank, &Assembly::Grch37, "MT", 50, 1 << 42)
            .unwrap_err();
        assert!(matches!(
            err,
            StrandError::InvalidInput {
                reason: InvalidInputReason::WindowTooLarge {
                    window: 4_398_046_511_104,
                    maximum: MAX_WINDOW_EXTENSION
                },
                ..
            }
        ));
    }

    #[test]
    fn test_exact_forward_without_alignment() {
        let resolver =
            StrandResolver::with_engine(StrandingConfig::default(), reference(), PanicEngine);
        // ref5p for pos 40 and 20 base flanks is [20, 40)
        let five_prime = &CHR[20..40];
        let strand = resolver
            .resolve_at(five_prime, "ACGTACGTAC", &Assembly::Grch37, "1", 40)
            .unwrap();
        assert_eq!(strand, Strand::Forward);
    }

    #[test]
    fn test_exact_reverse_without_alignment() {
        let resolver =
            StrandResolver::with_engine(StrandingConfig::default(), reference(), PanicEngine);
        // ref5p for pos 40 and 20 base flanks is [20, 40); its reverse complement is the 3' flank
        let three_prime = reverse_complement(&CHR[20..40]);
        let strand = resolver
            .resolve_at("ACGTACGTAC", &three_prime, &Assembly::Grch37, "1", 40)
            .unwrap();
        assert_eq!(strand, Strand::Reverse);
    }

    #[test]
    fn test_strict_mode_never_aligns() {
        let config = StrandingConfig {
            tolerance: 1.0,
            ..StrandingConfig::default()
        };
        let resolver = StrandResolver::with_engine(config, reference(), PanicEngine);

        // One mismatch from the 5' window
        let mut five_prime = CHR[20..40].to_string();
        five_prime.replace_range(10..11, if &CHR[30..31] == "A" { "C" } else { "A" });

        let err = resolver
            .resolve_at(&five_prime, "ACGTACGTAC", &Assembly::Grch37, "1", 40)
            .unwrap_err();
        assert!(matches!(
            err,
            StrandError::Unstrandable {
                reason: UnstrandableReason::StrictMatchFailed,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_reference_flank() {
        let resolver = StrandResolver::new(StrandingConfig::default(), reference());
        let flank = &CHR[0..20];

        // ref5p would start at -10
        let err = resolver
            .resolve_at(flank, flank, &Assembly::Grch37, "1", 10)
            .unwrap_err();
        assert!(matches!(
            err,
            StrandError::MissingReferenceFlank {
                source: ReferenceError::OutOfRange { .. },
                ..
            }
        ));

        let err = resolver
            .resolve_at(flank, flank, &Assembly::Grch38, "1", 40)
            .unwrap_err();
        assert!(matches!(
            err,
            StrandError::MissingReferenceFlank {
                source: ReferenceError::UnknownAssembly(_),
                ..
            }
        ));
    }

    #[test]
    fn test_pseudoautosomal_looked_up_on_x() {
        let reference = InMemoryReference::new().with_sequence(
            Assembly::Grch37,
            "X",
            CHR.as_bytes().to_vec(),
        );
        let resolver =
            StrandResolver::with_engine(StrandingConfig::default(), reference, PanicEngine);
        let strand = resolver
            .resolve_at(&CHR[20..40], "ACGTACGTAC", &Assembly::Grch37, "XY", 40)
            .unwrap();
        assert_eq!(strand, Strand::Forward);
    }
}
