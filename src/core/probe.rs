use serde::{Deserialize, Serialize};

use crate::core::types::Assembly;

/// A genotyping probe: two flanks mapped to a position on an assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    pub name: String,
    pub build: Assembly,
    pub chromosome: String,
    /// 1-based mapping coordinate
    pub position: i64,
    pub five_prime: String,
    pub three_prime: String,
    /// Per-probe window extension; falls back to the run-wide window when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<u64>,
}
