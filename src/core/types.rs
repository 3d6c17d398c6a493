use serde::{Deserialize, Serialize};

/// Strand of the reference assembly that a pair of flanks corresponds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// External representation: `+1` for forward, `-1` for reverse
    #[must_use]
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }

    #[must_use]
    pub fn from_i8(value: i8) -> Option<Self> {
        match value {
            1 => Some(Self::Forward),
            -1 => Some(Self::Reverse),
            _ => None,
        }
    }

    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "+1"),
            Self::Reverse => write!(f, "-1"),
        }
    }
}

/// Assembly build (e.g., `GRCh37`, `GRCh38`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Assembly {
    Grch37,
    Grch38,
    Other(String),
}

impl Assembly {
    /// Parse a build identifier, accepting the common UCSC aliases
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "grch37" | "hg19" | "b37" | "37" => Self::Grch37,
            "grch38" | "hg38" | "38" => Self::Grch38,
            _ => Self::Other(s.trim().to_string()),
        }
    }
}

impl std::str::FromStr for Assembly {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for Assembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grch37 => write!(f, "GRCh37"),
            Self::Grch38 => write!(f, "GRCh38"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Where a resolution was attempted. Carried by every error so a failure can be reproduced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locus {
    pub build: Assembly,
    pub chromosome: String,
    pub position: i64,
    pub window: u64,
}

impl Locus {
    pub fn new(build: Assembly, chromosome: impl Into<String>, position: i64, window: u64) -> Self {
        Self {
            build,
            chromosome: chromosome.into(),
            position,
            window,
        }
    }
}

impl std::fmt::Display for Locus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}:{} (window {})",
            self.build, self.chromosome, self.position, self.window
        )
    }
}
