use serde::Serialize;
use thiserror::Error;

use crate::core::types::Locus;
use crate::reference::ReferenceError;

/// Why an input was rejected before any lookup or alignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputReason {
    UnmappedPosition,
    UnmappedChromosome,
    FlanksTooShort { longest: usize, minimum: usize },
    WindowTooLarge { window: u64, maximum: u64 },
}

impl std::fmt::Display for InvalidInputReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnmappedPosition => write!(f, "position 0 is unmapped"),
            Self::UnmappedChromosome => write!(f, "chromosome 0 is unmapped"),
            Self::FlanksTooShort { longest, minimum } => write!(
                f,
                "at least one flank must be at least {minimum} bases (longest is {longest})"
            ),
            Self::WindowTooLarge { window, maximum } => {
                write!(f, "window extension {window} exceeds maximum of {maximum}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnstrandableReason {
    /// Exact-match-only mode and neither orientation matched exactly
    StrictMatchFailed,
    /// No hypothesis reached the high-scoring threshold
    NoAcceptedAlignment,
}

impl std::fmt::Display for UnstrandableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrictMatchFailed => write!(f, "strict stranding failed"),
            Self::NoAcceptedAlignment => write!(f, "no matching alignments"),
        }
    }
}

/// Terminal failures of a strand resolution. None are retryable.
#[derive(Error, Debug)]
pub enum StrandError {
    #[error("Invalid input at {locus}: {reason}")]
    InvalidInput {
        locus: Locus,
        reason: InvalidInputReason,
    },

    #[error("Could not find flanks for {locus}: {source}")]
    MissingReferenceFlank {
        locus: Locus,
        #[source]
        source: ReferenceError,
    },

    #[error("Unstrandable at {locus}: {reason}")]
    Unstrandable {
        locus: Locus,
        reason: UnstrandableReason,
    },

    #[error("Inconsistent alignments at {locus}: alignments accepted on both strands")]
    InconsistentAlignment { locus: Locus },
}

/// Category of a [`StrandError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    MissingReferenceFlank,
    Unstrandable,
    InconsistentAlignment,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "invalid_input"),
            Self::MissingReferenceFlank => write!(f, "missing_reference_flank"),
            Self::Unstrandable => write!(f, "unstrandable"),
            Self::InconsistentAlignment => write!(f, "inconsistent_alignment"),
        }
    }
}

impl StrandError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::MissingReferenceFlank { .. } => ErrorKind::MissingReferenceFlank,
            Self::Unstrandable { .. } => ErrorKind::Unstrandable,
            Self::InconsistentAlignment { .. } => ErrorKind::InconsistentAlignment,
        }
    }

    #[must_use]
    pub fn locus(&self) -> &Locus {
        match self {
            Self::InvalidInput { locus, .. }
            | Self::MissingReferenceFlank { locus, .. }
            | Self::Unstrandable { locus, .. }
            | Self::InconsistentAlignment { locus } => locus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Assembly;

    #[test]
    fn test_error_messages_carry_locus() {
        let err = StrandError::Unstrandable {
            locus: Locus::new(Assembly::Grch37, "7", 117_199_644, 0),
            reason: UnstrandableReason::StrictMatchFailed,
        };
        assert_eq!(
            err.to_string(),
            "Unstrandable at GRCh37 7:117199644 (window 0): strict stranding failed"
        );
        assert_eq!(err.kind(), ErrorKind::Unstrandable);
        assert_eq!(err.locus().chromosome, "7");
    }

    #[test]
    fn test_flanks_too_short_message() {
        let reason = InvalidInputReason::FlanksTooShort {
            longest: 10,
            minimum: 15,
        };
        assert!(reason.to_string().contains("at least 15 bases"));
    }
}
