//! Diagnostic reporting for ambiguous resolutions.
//!
//! When hypotheses on both strands are accepted the resolver reports every
//! hypothesis and its high-scoring alignments to an injected observer before
//! failing, so the probe can be reviewed by hand. Observers never influence the
//! strand call.

use std::sync::Mutex;

use serde::Serialize;
use tracing::error;

use crate::core::types::{Locus, Strand};
use crate::stranding::engine::AlignmentRecord;
use crate::stranding::outcome::{HypothesisId, Outcome};

pub trait DiagnosticObserver: Send + Sync {
    /// Called once per hypothesis, in evaluation order, with its score
    fn hypothesis(&self, locus: &Locus, outcome: &Outcome<'_>);

    /// Called for each high-scoring alignment of the most recently reported hypothesis
    fn alignment(&self, locus: &Locus, outcome: &Outcome<'_>, alignment: &AlignmentRecord);
}

/// Emits diagnostics as `tracing` error events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DiagnosticObserver for TracingObserver {
    fn hypothesis(&self, locus: &Locus, outcome: &Outcome<'_>) {
        error!(
            "{locus}: {} alignments ({}), score {}",
            outcome.strand(),
            outcome.hypothesis.id,
            outcome.score.unwrap_or(0)
        );
    }

    fn alignment(&self, locus: &Locus, outcome: &Outcome<'_>, alignment: &AlignmentRecord) {
        error!("{locus}: {}\n{alignment}", outcome.hypothesis.id);
    }
}

/// Owned copy of a reported hypothesis and the alignments reported for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HypothesisReport {
    pub locus: Locus,
    pub hypothesis: HypothesisId,
    pub strand: Strand,
    pub reference: String,
    pub query: String,
    pub score: Option<i32>,
    pub alignments: Vec<AlignmentRecord>,
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct CollectingObserver {
    reports: Mutex<Vec<HypothesisReport>>,
}

impl CollectingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the reports collected so far
    #[must_use]
    pub fn reports(&self) -> Vec<HypothesisReport> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticObserver for CollectingObserver {
    fn hypothesis(&self, locus: &Locus, outcome: &Outcome<'_>) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(HypothesisReport {
                locus: locus.clone(),
                hypothesis: outcome.hypothesis.id,
                strand: outcome.strand(),
                reference: outcome.reference.to_string(),
                query: outcome.query.to_string(),
                score: outcome.score,
                alignments: Vec::new(),
            });
        }
    }

    fn alignment(&self, _locus: &Locus, outcome: &Outcome<'_>, alignment: &AlignmentRecord) {
        if let Ok(mut reports) = self.reports.lock() {
            if let Some(report) = reports
                .iter_mut()
                .rev()
                .find(|r| r.hypothesis == outcome.hypothesis.id)
            {
                report.alignments.push(alignment.clone());
            }
        }
    }
}
