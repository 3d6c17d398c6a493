//! Local alignment engines.
//!
//! The resolver never runs dynamic programming itself; it asks an
//! [`AlignmentEngine`] for the best local alignment score of a flank against a
//! reference window, and for full alignments when diagnostics are needed.

use bio::alignment::pairwise::Aligner;
use bio::alignment::{Alignment, AlignmentOperation};
use serde::Serialize;

/// Wrap width of formatted tracebacks
const TRACEBACK_COLUMNS: usize = 100;

/// Scoring quadruple handed to an alignment engine.
///
/// Gap costs follow the convention where the first base of a gap costs
/// `gap_open` and each further base costs `gap_extend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoringScheme {
    pub match_score: i32,
    pub mismatch_penalty: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
}

/// One local alignment of a query against a reference window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignmentRecord {
    pub score: i32,
    /// 0-based, half-open span of the alignment on the reference window
    pub reference_start: usize,
    pub reference_end: usize,
    /// 0-based, half-open span of the alignment on the query
    pub query_start: usize,
    pub query_end: usize,
    /// Human readable rendering of the aligned bases
    pub traceback: String,
}

impl std::fmt::Display for AlignmentRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.traceback.trim_end())?;
        write!(
            f,
            "  Score={} query={}..{} reference={}..{}",
            self.score, self.query_start, self.query_end, self.reference_start, self.reference_end
        )
    }
}

/// Local alignment with affine gap penalties
pub trait AlignmentEngine: Send + Sync {
    /// Best local alignment score, or `None` if nothing aligns
    fn score(&self, reference: &str, query: &str, scheme: &ScoringScheme) -> Option<i32>;

    /// Optimal local alignments with tracebacks, best first
    fn alignments(
        &self,
        reference: &str,
        query: &str,
        scheme: &ScoringScheme,
    ) -> Vec<AlignmentRecord>;
}

/// Smith-Waterman-Gotoh local alignment from rust-bio.
///
/// Bases are compared byte for byte, so `N` matches `N` and case matters.
/// rust-bio reports a single optimal alignment per pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct BioAligner;

impl BioAligner {
    fn local(reference: &str, query: &str, scheme: &ScoringScheme) -> Option<Alignment> {
        if reference.is_empty() || query.is_empty() {
            return None;
        }

        let (match_score, mismatch_penalty) = (scheme.match_score, scheme.mismatch_penalty);
        let score = move |a: u8, b: u8| {
            if a == b {
                match_score
            } else {
                mismatch_penalty
            }
        };

        // rust-bio charges open + k * extend for a gap of length k and rejects
        // positive gap scores
        let gap_extend = scheme.gap_extend.min(0);
        let gap_open = (scheme.gap_open - gap_extend).min(0);
        let mut aligner =
            Aligner::with_capacity(query.len(), reference.len(), gap_open, gap_extend, score);
        let alignment = aligner.local(query.as_bytes(), reference.as_bytes());

        let aligned = alignment
            .operations
            .iter()
            .any(|op| matches!(op, AlignmentOperation::Match | AlignmentOperation::Subst));
        aligned.then_some(alignment)
    }
}

impl AlignmentEngine for BioAligner {
    fn score(&self, reference: &str, query: &str, scheme: &ScoringScheme) -> Option<i32> {
        Self::local(reference, query, scheme).map(|alignment| alignment.score)
    }

    fn alignments(
        &self,
        reference: &str,
        query: &str,
        scheme: &ScoringScheme,
    ) -> Vec<AlignmentRecord> {
        Self::local(reference, query, scheme)
            .map(|alignment| AlignmentRecord {
                score: alignment.score,
                reference_start: alignment.ystart,
                reference_end: alignment.yend,
                query_start: alignment.xstart,
                query_end: alignment.xend,
                traceback: alignment.pretty(
                    query.as_bytes(),
                    reference.as_bytes(),
                    TRACEBACK_COLUMNS,
                ),
            })
            .into_iter()
            .collect()
    }
}
