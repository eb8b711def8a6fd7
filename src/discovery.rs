//! Multi-project discovery
//!
//! Scans a root directory's immediate children and scores each as a project
//! candidate using flat additive evidence weights. The scoring is a simple,
//! auditable function, not a probabilistic model: the same tree always
//! produces the same ranked candidates.

use crate::markers::{match_rules, MarkerRule, MarkerWeight};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Evidence table for candidate scoring. Strong rules are dependency
/// manifests, medium rules are conventional source/test directories, weak
/// rules are repository housekeeping files.
const CANDIDATE_RULES: &[MarkerRule] = &[
    MarkerRule::strong("requirements.txt"),
    MarkerRule::strong("package.json"),
    MarkerRule::strong("pom.xml"),
    MarkerRule::strong("go.mod"),
    MarkerRule::strong("setup.py"),
    MarkerRule::strong("pyproject.toml"),
    MarkerRule::strong("Cargo.toml"),
    MarkerRule::strong("composer.json"),
    MarkerRule::strong("Gemfile"),
    MarkerRule::strong("*.csproj"),
    MarkerRule::medium("src"),
    MarkerRule::medium("tests"),
    MarkerRule::medium("test"),
    MarkerRule::medium("lib"),
    MarkerRule::weak("README.md"),
    MarkerRule::weak(".gitignore"),
    MarkerRule::weak("LICENSE"),
];

/// Strong marker to language guess, keyed by pattern.
const MARKER_LANGUAGES: &[(&str, &str)] = &[
    ("requirements.txt", "python"),
    ("setup.py", "python"),
    ("pyproject.toml", "python"),
    ("package.json", "node"),
    ("pom.xml", "java"),
    ("go.mod", "go"),
    ("Cargo.toml", "rust"),
    ("composer.json", "php"),
    ("Gemfile", "ruby"),
    ("*.csproj", "csharp"),
];

/// A candidate must accumulate at least this much evidence to be accepted.
const ACCEPT_THRESHOLD: f64 = 1.0;

fn tier_weight(weight: MarkerWeight) -> f64 {
    match weight {
        MarkerWeight::Strong => 2.0,
        MarkerWeight::Medium => 1.0,
        MarkerWeight::Weak => 0.5,
    }
}

/// A directory provisionally identified as an independent project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCandidate {
    pub path: PathBuf,
    pub name: String,
    /// Best-effort guess from the first strong marker, not a full detection.
    pub language: String,
    pub confidence: f64,
}

/// Discover project candidates among the immediate children of `root`,
/// sorted by descending confidence (name as the secondary key so the order
/// is total). Hidden directories are skipped; unreadable entries count as
/// no evidence.
pub fn discover_projects(root: &Path) -> Vec<ProjectCandidate> {
    let entries = match fs::read_dir(root) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut candidates = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };
        if name.starts_with('.') {
            continue;
        }

        if let Some(candidate) = score_candidate(&path, name) {
            candidates.push(candidate);
        }
    }

    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    candidates
}

fn score_candidate(path: &Path, name: String) -> Option<ProjectCandidate> {
    let matched = match_rules(path, CANDIDATE_RULES);

    let confidence: f64 = matched.iter().map(|rule| tier_weight(rule.weight)).sum();

    let language = matched
        .iter()
        .filter(|rule| rule.weight == MarkerWeight::Strong)
        .find_map(|rule| language_for_marker(rule.pattern))
        .unwrap_or("unknown");

    debug!(candidate = %path.display(), confidence, language, "scored project candidate");

    if confidence >= ACCEPT_THRESHOLD {
        Some(ProjectCandidate {
            path: path.to_path_buf(),
            name,
            language: language.to_string(),
            confidence,
        })
    } else {
        None
    }
}

fn language_for_marker(pattern: &str) -> Option<&'static str> {
    MARKER_LANGUAGES
        .iter()
        .find(|(marker, _)| *marker == pattern)
        .map(|(_, language)| *language)
}
