//! Language version resolution
//!
//! Each language carries an ordered list of probes against a small fixed set
//! of manifest files plus a hard-coded default. Resolution never fails:
//! absence of information degrades to the default, never to an error. The
//! version string is opaque text for downstream templates; no semver parsing
//! or comparison happens here.

use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A single way to extract a version string from one file.
#[derive(Debug, Clone, Copy)]
enum VersionProbe {
    /// Regex over the whole file; capture group 1 if present, else the match.
    Regex {
        file: &'static str,
        pattern: &'static str,
    },
    /// Trimmed first line of a single-value file.
    FirstLine { file: &'static str },
    /// JSON pointer into a manifest, then regex over the string value.
    JsonField {
        file: &'static str,
        pointer: &'static str,
        pattern: &'static str,
    },
    /// Dotted path into a TOML manifest, then regex over the string value.
    TomlField {
        file: &'static str,
        path: &'static [&'static str],
        pattern: &'static str,
    },
    /// Compiler-source element lookup in a Maven POM.
    PomSource { file: &'static str },
}

struct VersionRule {
    language: &'static str,
    probes: &'static [VersionProbe],
    default: &'static str,
}

const VERSION_RULES: &[VersionRule] = &[
    VersionRule {
        language: "go",
        probes: &[VersionProbe::Regex {
            file: "go.mod",
            pattern: r"(?m)^go\s+(\S+)",
        }],
        default: "1.21",
    },
    VersionRule {
        language: "java",
        probes: &[VersionProbe::PomSource { file: "pom.xml" }],
        default: "17",
    },
    VersionRule {
        language: "node",
        probes: &[VersionProbe::JsonField {
            file: "package.json",
            pointer: "/engines/node",
            pattern: r"\d+",
        }],
        default: "20",
    },
    VersionRule {
        language: "php",
        probes: &[VersionProbe::JsonField {
            file: "composer.json",
            pointer: "/require/php",
            pattern: r"\d+\.\d+",
        }],
        default: "8.2",
    },
    VersionRule {
        language: "python",
        probes: &[
            VersionProbe::Regex {
                file: "requirements.txt",
                pattern: r"python_requires.*?(3\.\d+)",
            },
            VersionProbe::TomlField {
                file: "pyproject.toml",
                path: &["project", "requires-python"],
                pattern: r"3\.\d+",
            },
            VersionProbe::TomlField {
                file: "pyproject.toml",
                path: &["tool", "poetry", "dependencies", "python"],
                pattern: r"3\.\d+",
            },
        ],
        default: "3.11",
    },
    VersionRule {
        language: "ruby",
        probes: &[VersionProbe::FirstLine {
            file: ".ruby-version",
        }],
        default: "3.2",
    },
    VersionRule {
        language: "rust",
        probes: &[
            VersionProbe::FirstLine {
                file: "rust-toolchain",
            },
            VersionProbe::TomlField {
                file: "rust-toolchain.toml",
                path: &["toolchain", "channel"],
                pattern: r"\S+",
            },
        ],
        default: "latest",
    },
];

/// Fallback when the language itself is not in the table.
const GENERIC_DEFAULT: &str = "latest";

/// Resolve the language version for a project root.
///
/// Probes run in declared order; the first that yields a value wins. Missing
/// files, unreadable files, and non-matching content all fall through to the
/// per-language default.
pub fn resolve_version(root: &Path, language: &str) -> String {
    let rule = match VERSION_RULES.iter().find(|r| r.language == language) {
        Some(r) => r,
        None => return GENERIC_DEFAULT.to_string(),
    };

    for probe in rule.probes {
        if let Some(version) = run_probe(root, probe) {
            debug!(language, version, "resolved language version");
            return version;
        }
    }

    debug!(language, default = rule.default, "using default version");
    rule.default.to_string()
}

/// The documented default for a language, without touching the filesystem.
pub fn default_version(language: &str) -> &'static str {
    VERSION_RULES
        .iter()
        .find(|r| r.language == language)
        .map(|r| r.default)
        .unwrap_or(GENERIC_DEFAULT)
}

fn run_probe(root: &Path, probe: &VersionProbe) -> Option<String> {
    match probe {
        VersionProbe::Regex { file, pattern } => {
            let content = fs::read_to_string(root.join(file)).ok()?;
            extract(pattern, &content)
        }
        VersionProbe::FirstLine { file } => {
            let content = fs::read_to_string(root.join(file)).ok()?;
            let line = content.lines().next()?.trim();
            if line.is_empty() {
                None
            } else {
                Some(line.to_string())
            }
        }
        VersionProbe::JsonField {
            file,
            pointer,
            pattern,
        } => {
            let content = fs::read_to_string(root.join(file)).ok()?;
            let value: serde_json::Value = serde_json::from_str(&content).ok()?;
            let field = value.pointer(pointer)?.as_str()?.to_string();
            extract(pattern, &field)
        }
        VersionProbe::TomlField {
            file,
            path,
            pattern,
        } => {
            let content = fs::read_to_string(root.join(file)).ok()?;
            let value: toml::Value = content.parse().ok()?;
            let mut cursor = &value;
            for key in *path {
                cursor = cursor.get(key)?;
            }
            extract(pattern, cursor.as_str()?)
        }
        VersionProbe::PomSource { file } => {
            let content = fs::read_to_string(root.join(file)).ok()?;
            let doc = roxmltree::Document::parse(&content).ok()?;
            for tag in ["source", "maven.compiler.source", "maven.compiler.release"] {
                if let Some(node) = doc
                    .descendants()
                    .find(|n| n.has_tag_name(tag) && n.text().is_some())
                {
                    let text = node.text().unwrap_or_default().trim();
                    if !text.is_empty() {
                        return Some(text.to_string());
                    }
                }
            }
            None
        }
    }
}

fn extract(pattern: &str, haystack: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    let caps = re.captures(haystack)?;
    let m = caps.get(1).or_else(|| caps.get(0))?;
    Some(m.as_str().to_string())
}
