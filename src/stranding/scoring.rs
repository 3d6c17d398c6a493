//! Length-normalized acceptance of local alignment scores.
//!
//! A query of length `L` scores at most `L * match_score`. Alignments are
//! accepted above a `tolerance` fraction of that, so one threshold serves every
//! flank length.

use crate::core::config::StrandingConfig;
use crate::core::types::Locus;
use crate::stranding::engine::{AlignmentEngine, AlignmentRecord, BioAligner, ScoringScheme};
use crate::stranding::observer::DiagnosticObserver;
use crate::stranding::outcome::Outcome;

/// Result of [`AlignmentScorer::align`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aligned {
    Score(i32),
    Alignments(Vec<AlignmentRecord>),
}

/// Scores flanks against reference windows and classifies the scores.
///
/// Absolute scores are not comparable across flank lengths, so acceptance is
/// normalized to the fraction of the best score achievable for the query length.
#[derive(Debug, Clone)]
pub struct AlignmentScorer<E = BioAligner> {
    config: StrandingConfig,
    engine: E,
}

impl AlignmentScorer<BioAligner> {
    #[must_use]
    pub fn new(config: StrandingConfig) -> Self {
        Self::with_engine(config, BioAligner)
    }
}

impl<E: AlignmentEngine> AlignmentScorer<E> {
    pub fn with_engine(config: StrandingConfig, engine: E) -> Self {
        Self { config, engine }
    }

    #[must_use]
    pub fn config(&self) -> &StrandingConfig {
        &self.config
    }

    /// Gap open and gap extension share the configured gap penalty
    #[must_use]
    pub fn scheme(&self) -> ScoringScheme {
        ScoringScheme {
            match_score: self.config.match_score,
            mismatch_penalty: self.config.mismatch_penalty,
            gap_open: self.config.gap_open_penalty,
            gap_extend: self.config.gap_open_penalty,
        }
    }

    /// Score of an ungapped, mismatch-free alignment of the whole query
    #[must_use]
    pub fn perfect_score(&self, query: &str) -> i64 {
        i64::try_from(query.len()).unwrap_or(i64::MAX) * i64::from(self.config.match_score)
    }

    /// Whether a non-exact alignment is good enough to accept.
    /// Queries shorter than the minimum flank length are never accepted.
    #[must_use]
    pub fn is_high_scoring(&self, score: i32, query: &str) -> bool {
        if query.len() < self.config.min_flank_length {
            return false;
        }
        #[allow(clippy::cast_precision_loss)] // flank lengths are far below 2^52
        let threshold = self.perfect_score(query) as f64 * self.config.tolerance;
        f64::from(score) > threshold
    }

    #[must_use]
    pub fn is_perfect_score(&self, score: i32, query: &str) -> bool {
        if query.len() < self.config.min_flank_length {
            return false;
        }
        i64::from(score) == self.perfect_score(query)
    }

    /// Best local alignment score; 0 when nothing aligns
    #[must_use]
    pub fn align_score(&self, reference: &str, query: &str) -> i32 {
        self.engine
            .score(reference, query, &self.scheme())
            .unwrap_or(0)
    }

    #[must_use]
    pub fn alignments(&self, reference: &str, query: &str) -> Vec<AlignmentRecord> {
        self.engine.alignments(reference, query, &self.scheme())
    }

    #[must_use]
    pub fn align(&self, reference: &str, query: &str, score_only: bool) -> Aligned {
        if score_only {
            Aligned::Score(self.align_score(reference, query))
        } else {
            Aligned::Alignments(self.alignments(reference, query))
        }
    }

    /// Recompute full alignments for an outcome and report the high-scoring ones.
    ///
    /// Returns how many alignments were reported. Only used for diagnostics.
    pub fn align_and_log(
        &self,
        locus: &Locus,
        outcome: &Outcome<'_>,
        observer: &dyn DiagnosticObserver,
    ) -> usize {
        let mut reported = 0;
        for record in self.alignments(outcome.reference, outcome.query) {
            if self.is_high_scoring(record.score, outcome.query) {
                observer.alignment(locus, outcome, &record);
                reported += 1;
            }
        }
        reported
    }
}
