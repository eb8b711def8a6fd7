//! stackprobe - heuristic project classification for CI/CD generation
//!
//! This library inspects a source-code repository and classifies it:
//! programming language, language version, web/service framework, test
//! framework, and artifact-production strategy. The classification record
//! drives generation of CI/CD pipeline stages and Dockerfiles downstream.
//!
//! # Core Concepts
//!
//! - **Markers**: files, paths, or globs whose presence is evidence for a
//!   language, framework, or test tool, weighted by tier
//! - **Registries**: static per-language dispatch tables; adding a language
//!   means adding a table row, not new control flow
//! - **Degrade, don't fail**: every per-field resolution (version,
//!   framework, artifact, test type) falls back to a documented default; the
//!   single fatal outcome is an undetectable language
//!
//! # Example Usage
//!
//! ```no_run
//! use stackprobe::{ClassifyOptions, Engine};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::new();
//! let result = engine.classify(Path::new("/path/to/repo"), &ClassifyOptions::default())?;
//!
//! println!("Language: {}", result.language.language);
//! println!("Build: {}", result.artifact.build_command);
//! if let Some(tests) = &result.tests {
//!     println!("Test command: {}", tests.base_command);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`markers`]: marker rule matching against a project root
//! - [`languages`]: tiered language detection registry
//! - [`versions`]: per-language version probes with hard-coded defaults
//! - [`frameworks`]: manifest-scan framework detection
//! - [`artifacts`]: build command and artifact strategy lookup
//! - [`testing`]: test file discovery and framework classification
//! - [`discovery`]: multi-project candidate scoring
//! - [`engine`]: the aggregate classification entry point

pub mod artifacts;
pub mod cli;
pub mod discovery;
pub mod docker;
pub mod engine;
pub mod frameworks;
pub mod languages;
pub mod markers;
pub mod testing;
pub mod util;
pub mod versions;

pub use artifacts::{resolve_artifact, ArtifactKind, ArtifactStrategy};
pub use discovery::{discover_projects, ProjectCandidate};
pub use docker::{inspect_dockerfile, DockerfileInfo, DockerfileTemplater};
pub use engine::{ClassifyError, ClassifyOptions, Engine, ProjectClassification};
pub use frameworks::detect_framework;
pub use languages::{ConfidenceTier, LanguageDetection, LanguageRegistry};
pub use testing::{TestClassification, TestClassifier, TestType};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};
pub use versions::resolve_version;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "stackprobe");
    }
}
