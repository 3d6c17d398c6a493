//! The four strand hypotheses tested when exact matching fails.
//!
//! A flank on the forward strand aligns to its own reference window. A flank on
//! the reverse strand aligns to the reverse complement of the *opposite* flank's
//! window: reverse complementing a locus swaps its 5' and 3' sides.

use serde::Serialize;

use crate::core::types::Strand;

/// Reference windows fetched around a probe position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceWindow {
    FivePrime,
    ThreePrime,
    FivePrimeRc,
    ThreePrimeRc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Flank {
    FivePrime,
    ThreePrime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HypothesisId {
    ForwardFivePrime,
    ForwardThreePrime,
    ReverseViaThreePrime,
    ReverseViaFivePrime,
}

impl std::fmt::Display for HypothesisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::ForwardFivePrime => "forward 5' flank vs 5' window",
            Self::ForwardThreePrime => "forward 3' flank vs 3' window",
            Self::ReverseViaThreePrime => "reverse 3' flank vs reverse-complemented 5' window",
            Self::ReverseViaFivePrime => "reverse 5' flank vs reverse-complemented 3' window",
        };
        write!(f, "{label}")
    }
}

/// One row of the hypothesis table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hypothesis {
    pub id: HypothesisId,
    pub window: ReferenceWindow,
    pub flank: Flank,
    pub strand: Strand,
}

/// Hypotheses in evaluation order. The first perfect score wins.
pub const HYPOTHESES: [Hypothesis; 4] = [
    Hypothesis {
        id: HypothesisId::ForwardFivePrime,
        window: ReferenceWindow::FivePrime,
        flank: Flank::FivePrime,
        strand: Strand::Forward,
    },
    Hypothesis {
        id: HypothesisId::ForwardThreePrime,
        window: ReferenceWindow::ThreePrime,
        flank: Flank::ThreePrime,
        strand: Strand::Forward,
    },
    Hypothesis {
        id: HypothesisId::ReverseViaThreePrime,
        window: ReferenceWindow::FivePrimeRc,
        flank: Flank::ThreePrime,
        strand: Strand::Reverse,
    },
    Hypothesis {
        id: HypothesisId::ReverseViaFivePrime,
        window: ReferenceWindow::ThreePrimeRc,
        flank: Flank::FivePrime,
        strand: Strand::Reverse,
    },
];

/// Reference windows for one probe, forward and reverse complemented
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Windows {
    pub five_prime: String,
    pub three_prime: String,
    pub five_prime_rc: String,
    pub three_prime_rc: String,
}

impl Windows {
    #[must_use]
    pub fn select(&self, window: ReferenceWindow) -> &str {
        match window {
            ReferenceWindow::FivePrime => &self.five_prime,
            ReferenceWindow::ThreePrime => &self.three_prime,
            ReferenceWindow::FivePrimeRc => &self.five_prime_rc,
            ReferenceWindow::ThreePrimeRc => &self.three_prime_rc,
        }
    }
}

/// Query flanks of one probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flanks<'a> {
    pub five_prime: &'a str,
    pub three_prime: &'a str,
}

impl<'a> Flanks<'a> {
    #[must_use]
    pub fn select(&self, flank: Flank) -> &'a str {
        match flank {
            Flank::FivePrime => self.five_prime,
            Flank::ThreePrime => self.three_prime,
        }
    }

    #[must_use]
    pub fn max_len(&self) -> usize {
        self.five_prime.len().max(self.three_prime.len())
    }
}

/// A hypothesis paired with the sequences it compares, and its score once aligned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<'a> {
    pub hypothesis: Hypothesis,
    pub reference: &'a str,
    pub query: &'a str,
    pub score: Option<i32>,
}

impl<'a> Outcome<'a> {
    #[must_use]
    pub fn new(hypothesis: Hypothesis, windows: &'a Windows, flanks: &Flanks<'a>) -> Self {
        Self {
            hypothesis,
            reference: windows.select(hypothesis.window),
            query: flanks.select(hypothesis.flank),
            score: None,
        }
    }

    #[must_use]
    pub fn strand(&self) -> Strand {
        self.hypothesis.strand
    }

    #[must_use]
    pub fn with_score(mut self, score: i32) -> Self {
        self.score = Some(score);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows() -> Windows {
        Windows {
            five_prime: "5P".to_string(),
            three_prime: "3P".to_string(),
            five_prime_rc: "5RC".to_string(),
            three_prime_rc: "3RC".to_string(),
        }
    }

    #[test]
    fn test_hypothesis_order_and_pairing() {
        let windows = windows();
        let flanks = Flanks {
            five_prime: "five",
            three_prime: "three",
        };

        let pairs: Vec<(&str, &str, Strand)> = HYPOTHESES
            .iter()
            .map(|h| {
                let outcome = Outcome::new(*h, &windows, &flanks);
                (outcome.reference, outcome.query, outcome.strand())
            })
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("5P", "five", Strand::Forward),
                ("3P", "three", Strand::Forward),
                ("5RC", "three", Strand::Reverse),
                ("3RC", "five", Strand::Reverse),
            ]
        );
    }

    #[test]
    fn test_outcome_score_assigned_after_alignment() {
        let windows = windows();
        let flanks = Flanks {
            five_prime: "five",
            three_prime: "three",
        };
        let outcome = Outcome::new(HYPOTHESES[0], &windows, &flanks);
        assert_eq!(outcome.score, None);
        assert_eq!(outcome.with_score(12).score, Some(12));
        assert_eq!(flanks.max_len(), 5);
    }
}
