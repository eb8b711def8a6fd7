//! Language detection types and per-language marker tables

mod registry;

pub use registry::LanguageRegistry;

use serde::{Deserialize, Serialize};

/// How strongly a detection is supported by evidence.
///
/// `High` requires a manifest-tier marker. `Medium` is granted only from a
/// file-extension marker when no language anywhere scored `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    None,
    Medium,
    High,
}

impl ConfidenceTier {
    /// Numeric score used when comparing detections across languages.
    pub fn score(self) -> u8 {
        match self {
            ConfidenceTier::High => 3,
            ConfidenceTier::Medium => 2,
            ConfidenceTier::None => 0,
        }
    }
}

/// Result of language detection for a single project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageDetection {
    /// Canonical language name, or `"unknown"` when nothing matched.
    pub language: String,
    /// The marker pattern that produced the detection.
    pub marker: Option<String>,
    pub confidence: ConfidenceTier,
}

impl LanguageDetection {
    pub fn unknown() -> Self {
        Self {
            language: "unknown".to_string(),
            marker: None,
            confidence: ConfidenceTier::None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.language == "unknown"
    }
}

/// One registry row describing a language's detection surface.
///
/// `high` markers are dependency manifests; `medium` markers are source-file
/// globs. Adding a language means adding a row, not new control flow.
#[derive(Debug, Clone, Copy)]
pub struct LanguageSpec {
    pub name: &'static str,
    pub high: &'static [&'static str],
    pub medium: &'static [&'static str],
    /// File extensions (without dot) counted during test-language inference.
    pub extensions: &'static [&'static str],
}
