//! Build command and artifact strategy lookup
//!
//! Pure static table keyed by language. This is the indirection every
//! downstream pipeline stage is generated from, so an unrecognized language
//! still yields a usable fallback strategy rather than an error.

use serde::{Deserialize, Serialize};

/// Kind of artifact a build produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Wheel,
    Binary,
    Npm,
    Jar,
    Composer,
    Gem,
    Unknown,
}

/// How to build a project and where its output lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactStrategy {
    pub build_command: String,
    pub artifact_glob: String,
    pub kind: ArtifactKind,
}

struct ArtifactRow {
    language: &'static str,
    build_command: &'static str,
    artifact_glob: &'static str,
    kind: ArtifactKind,
    /// Image used for build stages when the project has no Dockerfile.
    /// `{version}` is substituted with the resolved language version.
    build_image: &'static str,
}

const ARTIFACT_ROWS: &[ArtifactRow] = &[
    ArtifactRow {
        language: "go",
        build_command: "go build -o app .",
        artifact_glob: "app",
        kind: ArtifactKind::Binary,
        build_image: "golang:{version}-alpine",
    },
    ArtifactRow {
        language: "java",
        build_command: "mvn clean package",
        artifact_glob: "target/*.jar",
        kind: ArtifactKind::Jar,
        build_image: "maven:3.9-eclipse-temurin-{version}",
    },
    ArtifactRow {
        language: "node",
        build_command: "npm run build && npm pack",
        artifact_glob: "*.tgz",
        kind: ArtifactKind::Npm,
        build_image: "node:{version}-alpine",
    },
    ArtifactRow {
        language: "php",
        build_command: "composer install --no-dev",
        artifact_glob: "vendor/",
        kind: ArtifactKind::Composer,
        build_image: "php:{version}-cli",
    },
    ArtifactRow {
        language: "python",
        build_command: "python setup.py bdist_wheel",
        artifact_glob: "dist/*.whl",
        kind: ArtifactKind::Wheel,
        build_image: "python:{version}-slim",
    },
    ArtifactRow {
        language: "ruby",
        build_command: "gem build *.gemspec",
        artifact_glob: "*.gem",
        kind: ArtifactKind::Gem,
        build_image: "ruby:{version}-alpine",
    },
    ArtifactRow {
        language: "rust",
        build_command: "cargo build --release",
        artifact_glob: "target/release/app",
        kind: ArtifactKind::Binary,
        build_image: "rust:{version}",
    },
];

/// Resolve the build/artifact strategy for a language. Always returns a
/// value; unknown languages get the generic echo fallback.
pub fn resolve_artifact(language: &str) -> ArtifactStrategy {
    match ARTIFACT_ROWS.iter().find(|r| r.language == language) {
        Some(row) => ArtifactStrategy {
            build_command: row.build_command.to_string(),
            artifact_glob: row.artifact_glob.to_string(),
            kind: row.kind,
        },
        None => ArtifactStrategy {
            build_command: "echo no build command".to_string(),
            artifact_glob: "*".to_string(),
            kind: ArtifactKind::Unknown,
        },
    }
}

/// Build-stage image for a language with the version substituted, used when
/// the project carries no Dockerfile of its own.
pub fn build_image(language: &str, version: &str) -> String {
    ARTIFACT_ROWS
        .iter()
        .find(|r| r.language == language)
        .map(|r| r.build_image.replace("{version}", version))
        .unwrap_or_else(|| "alpine:latest".to_string())
}

/// All languages present in the artifact table.
pub fn registered_languages() -> impl Iterator<Item = &'static str> {
    ARTIFACT_ROWS.iter().map(|r| r.language)
}
