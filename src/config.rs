//! Configuration constants and settings for the registry.

use serde::{Deserialize, Serialize};

/// Similarity score a catalog part must strictly exceed to be suggested.
pub const MATCH_THRESHOLD: f64 = 95.0;

/// Number of times a generated name is re-derived after a uniqueness conflict.
pub const CONFLICT_RETRIES: u32 = 1;

/// Letters used for sub-part suffixes.
pub const SUFFIX_ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// How the next number for a part type is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingMode {
    /// Scan live part names and take max + 1.
    #[default]
    ScanMax,
    /// Ask the store for an atomic per-prefix sequence, scanning only if unsupported.
    AtomicSequence,
}

impl std::fmt::Display for NumberingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberingMode::ScanMax => write!(f, "scan-max"),
            NumberingMode::AtomicSequence => write!(f, "atomic-sequence"),
        }
    }
}

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Strict lower bound on a suggested match's score.
    pub match_threshold: f64,
    /// Re-derivations allowed after a name conflict on insert.
    pub conflict_retries: u32,
    /// Number source for top-level names.
    pub numbering: NumberingMode,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            match_threshold: MATCH_THRESHOLD,
            conflict_retries: CONFLICT_RETRIES,
            numbering: NumberingMode::default(),
        }
    }
}

impl RegistryConfig {
    /// Create a configuration using the given numbering mode.
    pub fn new(numbering: NumberingMode) -> Self {
        Self {
            numbering,
            ..Default::default()
        }
    }

    /// Override the match threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    /// Total insert attempts for a generated name (first try plus retries).
    pub fn max_attempts(&self) -> u32 {
        self.conflict_retries + 1
    }
}
