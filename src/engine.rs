//! Aggregate classification engine
//!
//! Orchestrates the individual detectors into one classification record per
//! project. The only fatal failure is an undetectable language; everything
//! else resolves to a documented default so the caller always receives a
//! complete, internally consistent record.

use crate::artifacts::{self, ArtifactStrategy};
use crate::discovery::{discover_projects, ProjectCandidate};
use crate::docker::{
    inspect_dockerfile, write_dockerfile, DefaultTemplates, DockerfileError, DockerfileInfo,
    DockerfileTemplater,
};
use crate::frameworks::detect_framework;
use crate::languages::{LanguageDetection, LanguageRegistry};
use crate::testing::{TestClassification, TestClassifier};
use crate::versions::resolve_version;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from the aggregate classification call.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Project path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Project path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The single fatal detection outcome: downstream pipeline stages all
    /// key off the language, so there is nothing useful to emit without one.
    #[error("No recognized project markers found in {0}")]
    NoLanguageDetected(PathBuf),

    #[error(transparent)]
    Dockerfile(#[from] DockerfileError),
}

/// Options for a classification run.
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Generate a Dockerfile at the project root when none exists.
    pub generate_dockerfile: bool,
    /// Run the test framework classifier and include its result.
    pub classify_tests: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            generate_dockerfile: false,
            classify_tests: true,
        }
    }
}

/// Complete classification of one project, consumed by the pipeline and
/// Dockerfile template layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectClassification {
    pub language: LanguageDetection,
    pub version: String,
    pub framework: Option<String>,
    pub artifact: ArtifactStrategy,
    pub dockerfile_exists: bool,
    /// Image downstream build stages run in: the Dockerfile's final image
    /// when one exists, otherwise the language's build image.
    pub base_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<DockerfileInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests: Option<TestClassification>,
}

/// The classification engine. Holds the detector registries; every detector
/// is a pure function of the directory tree, so the engine is freely
/// shareable and reusable across projects.
#[derive(Clone, Default)]
pub struct Engine {
    languages: LanguageRegistry,
    tests: TestClassifier,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            languages: LanguageRegistry::new(),
            tests: TestClassifier::new(),
        }
    }

    /// Classify a single project root.
    pub fn classify(
        &self,
        root: &Path,
        options: &ClassifyOptions,
    ) -> Result<ProjectClassification, ClassifyError> {
        if !root.exists() {
            return Err(ClassifyError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ClassifyError::NotADirectory(root.to_path_buf()));
        }

        let started = Instant::now();

        let language = self.languages.detect(root);
        if language.is_unknown() {
            return Err(ClassifyError::NoLanguageDetected(root.to_path_buf()));
        }

        let version = resolve_version(root, &language.language);
        let framework = detect_framework(root, &language.language);
        let artifact = artifacts::resolve_artifact(&language.language);

        let dockerfile_path = root.join("Dockerfile");
        let mut dockerfile_exists = dockerfile_path.exists();

        if !dockerfile_exists && options.generate_dockerfile {
            if let Some(content) = DefaultTemplates.render(&language.language, &version) {
                write_dockerfile(root, &content)?;
                info!(language = %language.language, %version, "generated Dockerfile");
                dockerfile_exists = true;
            } else {
                warn!(language = %language.language, "no Dockerfile template for language");
            }
        }

        let dockerfile = if dockerfile_exists {
            match inspect_dockerfile(&dockerfile_path) {
                Ok(info) => Some(info),
                Err(err) => {
                    // An unreadable Dockerfile degrades to "no Dockerfile".
                    warn!(error = %err, "failed to inspect Dockerfile");
                    None
                }
            }
        } else {
            None
        };

        let base_image = dockerfile
            .as_ref()
            .map(|d| d.final_image.clone())
            .unwrap_or_else(|| artifacts::build_image(&language.language, &version));

        let tests = options
            .classify_tests
            .then(|| self.tests.classify(root));

        info!(
            language = %language.language,
            %version,
            framework = framework.as_deref().unwrap_or("none"),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "project classified"
        );

        Ok(ProjectClassification {
            language,
            version,
            framework,
            artifact,
            dockerfile_exists,
            base_image,
            dockerfile,
            tests,
        })
    }

    /// Discover and classify every project under a multi-project root.
    ///
    /// Candidates are returned in discovery (confidence) order; a failure on
    /// one candidate does not abort the others.
    pub fn classify_all(
        &self,
        root: &Path,
        options: &ClassifyOptions,
    ) -> Vec<(ProjectCandidate, Result<ProjectClassification, ClassifyError>)> {
        discover_projects(root)
            .into_iter()
            .map(|candidate| {
                let result = self.classify(&candidate.path, options);
                (candidate, result)
            })
            .collect()
    }
}
