//! Registry of detectable languages and the tiered detection algorithm

use super::{ConfidenceTier, LanguageDetection, LanguageSpec};
use crate::markers::marker_matches;
use std::path::Path;
use tracing::debug;

/// Rows are kept sorted alphabetically by language name. When two languages
/// tie at the same confidence tier the first row wins, so alphabetical order
/// is the documented, stable tie-break.
const LANGUAGES: &[LanguageSpec] = &[
    LanguageSpec {
        name: "go",
        high: &["go.mod"],
        medium: &["*.go"],
        extensions: &["go"],
    },
    LanguageSpec {
        name: "java",
        high: &["pom.xml", "build.gradle"],
        medium: &["*.java"],
        extensions: &["java"],
    },
    LanguageSpec {
        name: "node",
        high: &["package.json"],
        medium: &["*.js", "*.ts"],
        extensions: &["js", "ts", "jsx", "tsx"],
    },
    LanguageSpec {
        name: "php",
        high: &["composer.json"],
        medium: &["*.php"],
        extensions: &["php"],
    },
    LanguageSpec {
        name: "python",
        high: &["requirements.txt", "setup.py", "pyproject.toml", "Pipfile"],
        medium: &["*.py"],
        extensions: &["py"],
    },
    LanguageSpec {
        name: "ruby",
        high: &["Gemfile"],
        medium: &["*.rb"],
        extensions: &["rb"],
    },
    LanguageSpec {
        name: "rust",
        high: &["Cargo.toml"],
        medium: &["*.rs"],
        extensions: &["rs"],
    },
];

#[derive(Clone, Default)]
pub struct LanguageRegistry;

impl LanguageRegistry {
    pub fn new() -> Self {
        Self
    }

    /// All registry rows, in tie-break order.
    pub fn languages(&self) -> &'static [LanguageSpec] {
        LANGUAGES
    }

    /// Look up a registry row by language name.
    pub fn get(&self, name: &str) -> Option<&'static LanguageSpec> {
        LANGUAGES.iter().find(|l| l.name.eq_ignore_ascii_case(name))
    }

    /// Map a file extension (without dot) to its language name.
    pub fn language_for_extension(&self, ext: &str) -> Option<&'static str> {
        LANGUAGES
            .iter()
            .find(|l| l.extensions.contains(&ext))
            .map(|l| l.name)
    }

    /// Detect the project language for a single root.
    ///
    /// Per language, the first matching high-tier marker wins that language's
    /// slot; medium-tier markers are consulted only when no high marker hit.
    /// Across languages the highest tier wins, ties resolving by registry
    /// (alphabetical) order. Zero matches yields the `"unknown"` detection,
    /// which callers must treat as fatal.
    pub fn detect(&self, root: &Path) -> LanguageDetection {
        let mut best: Option<(&LanguageSpec, &str, ConfidenceTier)> = None;

        for spec in LANGUAGES {
            let hit = spec
                .high
                .iter()
                .find(|m| marker_matches(root, m))
                .map(|m| (*m, ConfidenceTier::High))
                .or_else(|| {
                    spec.medium
                        .iter()
                        .find(|m| marker_matches(root, m))
                        .map(|m| (*m, ConfidenceTier::Medium))
                });

            if let Some((marker, tier)) = hit {
                debug!(language = spec.name, marker, ?tier, "language marker hit");
                let better = match best {
                    Some((_, _, best_tier)) => tier.score() > best_tier.score(),
                    None => true,
                };
                if better {
                    best = Some((spec, marker, tier));
                }
            }
        }

        match best {
            Some((spec, marker, tier)) => LanguageDetection {
                language: spec.name.to_string(),
                marker: Some(marker.to_string()),
                confidence: tier,
            },
            None => LanguageDetection::unknown(),
        }
    }
}
