//! Scoring and tolerance parameters for strand resolution.
//!
//! The defaults were derived empirically from stranding several hundred thousand
//! flanks from an Illumina bead chip: two points per matching base, one point
//! lost per mismatch, and a heavy five point penalty per gap base.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MIN_FLANK_LENGTH: usize = 15;
pub const DEFAULT_TOLERANCE: f64 = 0.77;
pub const DEFAULT_MATCH_SCORE: i32 = 2;
pub const DEFAULT_MISMATCH_PENALTY: i32 = -1;
pub const DEFAULT_GAP_OPEN_PENALTY: i32 = -5;
pub const DEFAULT_WINDOW_EXTENSION: u64 = 0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Non-fatal observation about a configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfigAdvisory {
    /// Flanks shorter than the recommended minimum may align ambiguously
    ShortMinFlankLength { configured: usize, recommended: usize },
}

impl std::fmt::Display for ConfigAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShortMinFlankLength {
                configured,
                recommended,
            } => write!(
                f,
                "Short flank lengths may lead to inaccurate alignments \
                 (min_flank_length {configured} < recommended {recommended})"
            ),
        }
    }
}

/// Immutable scoring configuration shared by the scorer and the resolver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrandingConfig {
    /// At least one flank must be this long; shorter queries never score as accepted
    pub min_flank_length: usize,

    /// Fraction of the perfect score an alignment must exceed to be accepted
    pub tolerance: f64,

    pub match_score: i32,

    pub mismatch_penalty: i32,

    /// Used for both gap open and gap extension
    pub gap_open_penalty: i32,
}

impl Default for StrandingConfig {
    fn default() -> Self {
        Self {
            min_flank_length: DEFAULT_MIN_FLANK_LENGTH,
            tolerance: DEFAULT_TOLERANCE,
            match_score: DEFAULT_MATCH_SCORE,
            mismatch_penalty: DEFAULT_MISMATCH_PENALTY,
            gap_open_penalty: DEFAULT_GAP_OPEN_PENALTY,
        }
    }
}

impl StrandingConfig {
    /// Build a configuration along with any advisories about its values.
    ///
    /// Construction never fails; callers decide what to do with the advisories.
    #[must_use]
    pub fn new(
        min_flank_length: usize,
        tolerance: f64,
        match_score: i32,
        mismatch_penalty: i32,
        gap_open_penalty: i32,
    ) -> (Self, Vec<ConfigAdvisory>) {
        let config = Self {
            min_flank_length,
            tolerance,
            match_score,
            mismatch_penalty,
            gap_open_penalty,
        };
        let advisories = config.advisories();
        (config, advisories)
    }

    #[must_use]
    pub fn advisories(&self) -> Vec<ConfigAdvisory> {
        let mut advisories = Vec::new();
        if self.min_flank_length < DEFAULT_MIN_FLANK_LENGTH {
            advisories.push(ConfigAdvisory::ShortMinFlankLength {
                configured: self.min_flank_length,
                recommended: DEFAULT_MIN_FLANK_LENGTH,
            });
        }
        advisories
    }

    /// Exact-match-only mode: nothing short of a perfect score can be accepted
    #[must_use]
    #[allow(clippy::float_cmp)] // 1.0 is an exact sentinel, not a computed value
    pub fn is_strict(&self) -> bool {
        self.tolerance == 1.0
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read or `ConfigError::Json`
    /// if it is not a valid configuration object.
    pub fn load_from_file(path: &Path) -> Result<(Self, Vec<ConfigAdvisory>), ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the text is not a valid configuration object.
    pub fn from_json(text: &str) -> Result<(Self, Vec<ConfigAdvisory>), ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        let advisories = config.advisories();
        Ok((config, advisories))
    }
}
