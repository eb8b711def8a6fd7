//! Test framework discovery and classification
//!
//! The classifier is deliberately standalone: it discovers test files across
//! multi-language glob conventions, infers the project's primary language from
//! file-extension frequency (independently of the top-level language
//! detector), runs a per-language cascade of increasingly expensive checks,
//! and emits a canonical run command plus a small set of command variants.

mod classifier;
mod commands;
mod discovery;

pub use classifier::TestClassifier;
pub use commands::{base_command, command_variants};
pub use discovery::discover_test_files;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Recognized test frameworks across language ecosystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    // Python
    Pytest,
    Unittest,
    Nose,
    Django,
    FastApi,
    Flask,
    Starlette,
    // JavaScript / TypeScript
    Jest,
    Mocha,
    Jasmine,
    Cypress,
    Playwright,
    Vitest,
    // Java
    Junit,
    Testng,
    Spock,
    // Go
    GoTest,
    GoCheck,
    Testify,
    // C++
    GoogleTest,
    Catch2,
    BoostTest,
    CppUnit,
    // C#
    Nunit,
    Xunit,
    Mstest,
    // PHP
    Phpunit,
    // Ruby
    Rspec,
    Minitest,
    /// No test files found and no language inferable.
    Unknown,
}

/// Full classification of a project's test setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestClassification {
    pub test_type: TestType,
    pub test_file_count: usize,
    /// First few discovered test files, relative to the project root.
    pub test_files: Vec<String>,
    /// Language inferred from extension frequency, if any.
    pub language: Option<String>,
    pub base_command: String,
    pub commands: BTreeMap<String, String>,
}
