//! Output formatting for classification results
//!
//! Formatters for JSON, YAML, and human-readable text. JSON/YAML go through
//! serde; the human format mirrors the section style of the rest of the
//! tool's console output.

use crate::discovery::ProjectCandidate;
use crate::engine::{ClassifyError, ProjectClassification};
use anyhow::{Context, Result};
use std::fmt::Write as _;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format a single project's classification.
    pub fn format_classification(&self, result: &ProjectClassification) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(result).context("serializing classification as JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(result).context("serializing classification as YAML")
            }
            OutputFormat::Human => Ok(self.human_classification(result)),
        }
    }

    /// Format discovered candidates.
    pub fn format_candidates(&self, candidates: &[ProjectCandidate]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(candidates).context("serializing candidates as JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(candidates).context("serializing candidates as YAML")
            }
            OutputFormat::Human => Ok(self.human_candidates(candidates)),
        }
    }

    /// Format a multi-project classification run. Per-candidate failures are
    /// reported inline rather than aborting the output.
    pub fn format_multi(
        &self,
        results: &[(ProjectCandidate, Result<ProjectClassification, ClassifyError>)],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json | OutputFormat::Yaml => {
                let value = multi_to_value(results);
                if self.format == OutputFormat::Json {
                    serde_json::to_string_pretty(&value).context("serializing results as JSON")
                } else {
                    serde_yaml::to_string(&value).context("serializing results as YAML")
                }
            }
            OutputFormat::Human => {
                let mut out = String::new();
                for (candidate, result) in results {
                    let _ = writeln!(
                        out,
                        "=== {} (confidence {:.1}) ===",
                        candidate.name, candidate.confidence
                    );
                    match result {
                        Ok(classification) => out.push_str(&self.human_classification(classification)),
                        Err(err) => {
                            let _ = writeln!(out, "  error: {err}");
                        }
                    }
                    out.push('\n');
                }
                if results.is_empty() {
                    out.push_str("No project candidates found.\n");
                }
                Ok(out)
            }
        }
    }

    fn human_classification(&self, result: &ProjectClassification) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Language:   {}", result.language.language);
        if let Some(marker) = &result.language.marker {
            let _ = writeln!(
                out,
                "Marker:     {} ({:?} confidence)",
                marker, result.language.confidence
            );
        }
        let _ = writeln!(out, "Version:    {}", result.version);
        let _ = writeln!(
            out,
            "Framework:  {}",
            result.framework.as_deref().unwrap_or("none")
        );
        let _ = writeln!(out, "Build:      {}", result.artifact.build_command);
        let _ = writeln!(
            out,
            "Artifact:   {} ({:?})",
            result.artifact.artifact_glob, result.artifact.kind
        );
        let _ = writeln!(
            out,
            "Dockerfile: {}",
            if result.dockerfile_exists {
                "found"
            } else {
                "not found"
            }
        );
        let _ = writeln!(out, "Base image: {}", result.base_image);
        if let Some(dockerfile) = &result.dockerfile {
            if let Some(port) = dockerfile.primary_port {
                let _ = writeln!(out, "Port:       {port}");
            }
        }
        if let Some(tests) = &result.tests {
            let _ = writeln!(
                out,
                "Tests:      {:?} ({} files)",
                tests.test_type, tests.test_file_count
            );
            let _ = writeln!(out, "Test cmd:   {}", tests.base_command);
        }
        out
    }

    fn human_candidates(&self, candidates: &[ProjectCandidate]) -> String {
        if candidates.is_empty() {
            return "No project candidates found.\n".to_string();
        }
        let mut out = String::new();
        for (i, candidate) in candidates.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} ({}) - confidence {:.1}",
                i + 1,
                candidate.name,
                candidate.language,
                candidate.confidence
            );
        }
        out
    }
}

fn multi_to_value(
    results: &[(ProjectCandidate, Result<ProjectClassification, ClassifyError>)],
) -> serde_json::Value {
    let projects: Vec<serde_json::Value> = results
        .iter()
        .map(|(candidate, result)| {
            let mut entry = serde_json::json!({
                "name": candidate.name,
                "path": candidate.path,
                "confidence": candidate.confidence,
            });
            match result {
                Ok(classification) => {
                    entry["classification"] =
                        serde_json::to_value(classification).unwrap_or_default();
                }
                Err(err) => {
                    entry["error"] = serde_json::Value::String(err.to_string());
                }
            }
            entry
        })
        .collect();
    serde_json::json!({ "projects": projects })
}
