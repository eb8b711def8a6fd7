//! Per-language test framework cascades
//!
//! Each cascade runs increasingly expensive checks in order (dependency
//! manifests, then conventional config files, then a small sample of test
//! file contents) and stops at the first hit. A cascade that finds nothing
//! returns the ecosystem's most common framework, never `Unknown`; `Unknown`
//! is reserved for projects with no test files and no inferable language.

use super::{base_command, command_variants, discover_test_files, TestClassification, TestType};
use ignore::WalkBuilder;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Number of discovered test files whose contents are sampled per cascade.
const CONTENT_SAMPLE: usize = 10;

/// Extension (without dot) to language family, for test-purpose inference.
/// Covers more families than the top-level language registry because test
/// conventions exist for ecosystems the build classifier does not target.
const EXTENSION_FAMILIES: &[(&str, &str)] = &[
    ("cc", "cpp"),
    ("cpp", "cpp"),
    ("cs", "csharp"),
    ("cxx", "cpp"),
    ("go", "go"),
    ("java", "java"),
    ("js", "node"),
    ("jsx", "node"),
    ("php", "php"),
    ("py", "python"),
    ("rb", "ruby"),
    ("ts", "node"),
    ("tsx", "node"),
];

fn family_for_extension(ext: &str) -> Option<&'static str> {
    EXTENSION_FAMILIES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, family)| *family)
}

#[derive(Clone, Default)]
pub struct TestClassifier;

impl TestClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a project's test setup. Pure function of the directory tree;
    /// always succeeds.
    pub fn classify(&self, root: &Path) -> TestClassification {
        let files = discover_test_files(root);
        let language = self
            .infer_language(root)
            .or_else(|| infer_from_test_files(&files));

        let test_type = match language {
            Some(family) => self.cascade(root, &files, family),
            None => TestType::Unknown,
        };

        debug!(
            ?test_type,
            files = files.len(),
            language = language.unwrap_or("unknown"),
            "test classification complete"
        );

        TestClassification {
            test_type,
            test_file_count: files.len(),
            test_files: files
                .iter()
                .take(10)
                .map(|p| p.display().to_string())
                .collect(),
            language: language.map(str::to_string),
            base_command: base_command(test_type).to_string(),
            commands: command_variants(test_type),
        }
    }

    /// Infer the project's primary language from file-extension frequency
    /// across the whole tree. Independent of the top-level language detector
    /// so the classifier stays usable standalone. Frequency ties resolve by
    /// alphabetical extension for determinism.
    pub fn infer_language(&self, root: &Path) -> Option<&'static str> {
        let mut counts: HashMap<String, usize> = HashMap::new();

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .hidden(true)
            .filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                !matches!(
                    name.as_ref(),
                    ".git" | "node_modules" | "target" | "vendor" | "venv" | ".venv"
                        | "__pycache__" | "dist" | "build"
                )
            })
            .build();

        for entry in walker.flatten() {
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            if let Some(ext) = entry.path().extension().and_then(|e| e.to_str()) {
                *counts.entry(ext.to_ascii_lowercase()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&String, &usize)> = counts.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        ranked
            .into_iter()
            .find_map(|(ext, _)| family_for_extension(ext))
    }

    fn cascade(&self, root: &Path, files: &BTreeSet<PathBuf>, family: &str) -> TestType {
        match family {
            "python" => python_cascade(root, files),
            "node" => js_cascade(root),
            "java" => java_cascade(root, files),
            "go" => go_cascade(root, files),
            "cpp" => cpp_cascade(root, files),
            "csharp" => csharp_cascade(root, files),
            "php" => php_cascade(root, files),
            "ruby" => ruby_cascade(root, files),
            _ => TestType::Unknown,
        }
    }
}

/// Fall back to the test files' own extensions when the tree-wide frequency
/// count found nothing recognizable.
fn infer_from_test_files(files: &BTreeSet<PathBuf>) -> Option<&'static str> {
    files.iter().find_map(|f| {
        f.extension()
            .and_then(|e| e.to_str())
            .and_then(family_for_extension)
    })
}

fn read_lower(path: PathBuf) -> Option<String> {
    fs::read_to_string(path).ok().map(|c| c.to_lowercase())
}

fn sample_contents<'a>(
    root: &'a Path,
    files: &'a BTreeSet<PathBuf>,
    ext: &'a str,
) -> impl Iterator<Item = String> + 'a {
    files
        .iter()
        .filter(move |f| f.extension().and_then(|e| e.to_str()) == Some(ext))
        .take(CONTENT_SAMPLE)
        .filter_map(|f| fs::read_to_string(root.join(f)).ok())
}

fn python_cascade(root: &Path, files: &BTreeSet<PathBuf>) -> TestType {
    const CONFIGS: &[&str] = &[
        "requirements.txt",
        "pyproject.toml",
        "setup.py",
        "Pipfile",
        "setup.cfg",
        "tox.ini",
    ];
    for config in CONFIGS {
        if let Some(content) = read_lower(root.join(config)) {
            if content.contains("pytest") {
                return TestType::Pytest;
            } else if content.contains("nose") {
                return TestType::Nose;
            } else if content.contains("fastapi") {
                return TestType::FastApi;
            } else if content.contains("django") {
                return TestType::Django;
            } else if content.contains("flask") {
                return TestType::Flask;
            } else if content.contains("starlette") {
                return TestType::Starlette;
            }
        }
    }

    for entry in ["main.py", "app.py", "application.py"] {
        if let Some(content) = read_lower(root.join(entry)) {
            if content.contains("fastapi") {
                return TestType::FastApi;
            } else if content.contains("flask") {
                return TestType::Flask;
            }
        }
    }

    for content in sample_contents(root, files, "py") {
        let content = content.to_lowercase();
        if ["import pytest", "from pytest", "@pytest"]
            .iter()
            .any(|t| content.contains(t))
        {
            return TestType::Pytest;
        } else if ["import unittest", "unittest.main", "testcase"]
            .iter()
            .any(|t| content.contains(t))
        {
            return TestType::Unittest;
        } else if content.contains("import nose") {
            return TestType::Nose;
        } else if content.contains("testclient") || content.contains("fastapi") {
            return TestType::FastApi;
        } else if content.contains("django.test") || content.contains("from django") {
            return TestType::Django;
        } else if content.contains("flask_testing") {
            return TestType::Flask;
        }
    }

    if root.join("pytest.ini").exists() {
        return TestType::Pytest;
    }
    if let Some(content) = read_lower(root.join("pyproject.toml")) {
        if content.contains("[tool.pytest") {
            return TestType::Pytest;
        }
    }

    TestType::Pytest
}

fn js_cascade(root: &Path) -> TestType {
    if let Ok(content) = fs::read_to_string(root.join("package.json")) {
        if let Ok(pkg) = serde_json::from_str::<serde_json::Value>(&content) {
            let has_dep = |name: &str| {
                ["/dependencies/", "/devDependencies/"]
                    .iter()
                    .any(|section| pkg.pointer(&format!("{section}{name}")).is_some())
            };

            if has_dep("cypress") {
                return TestType::Cypress;
            } else if has_dep("jest") {
                return TestType::Jest;
            } else if has_dep("mocha") {
                return TestType::Mocha;
            } else if has_dep("vitest") {
                return TestType::Vitest;
            } else if has_dep("playwright") || has_dep("@playwright~1test") {
                return TestType::Playwright;
            } else if has_dep("jasmine") {
                return TestType::Jasmine;
            }
        }
    }

    if root.join("cypress").is_dir() {
        return TestType::Cypress;
    }
    if root.join("playwright.config.js").exists() || root.join("playwright.config.ts").exists() {
        return TestType::Playwright;
    }
    if root.join("jest.config.js").exists() || root.join("jest.config.ts").exists() {
        return TestType::Jest;
    }
    if root.join("vitest.config.js").exists() || root.join("vitest.config.ts").exists() {
        return TestType::Vitest;
    }
    if root.join(".mocharc.js").exists() || root.join(".mocharc.json").exists() {
        return TestType::Mocha;
    }

    TestType::Jest
}

fn java_cascade(root: &Path, files: &BTreeSet<PathBuf>) -> TestType {
    for manifest in ["pom.xml", "build.gradle"] {
        if let Some(content) = read_lower(root.join(manifest)) {
            if content.contains("testng") {
                return TestType::Testng;
            } else if content.contains("spock") {
                return TestType::Spock;
            } else if content.contains("junit") {
                return TestType::Junit;
            }
        }
    }

    for content in sample_contents(root, files, "java").take(5) {
        if content.contains("@Test") && content.contains("org.testng") {
            return TestType::Testng;
        } else if content.contains("extends Specification") || content.contains("spock.lang") {
            return TestType::Spock;
        } else if content.contains("@Test") && content.contains("org.junit") {
            return TestType::Junit;
        }
    }

    TestType::Junit
}

fn go_cascade(root: &Path, files: &BTreeSet<PathBuf>) -> TestType {
    if let Some(content) = read_lower(root.join("go.mod")) {
        if content.contains("gopkg.in/check.v1") {
            return TestType::GoCheck;
        } else if content.contains("github.com/stretchr/testify") {
            return TestType::Testify;
        }
    }

    for content in sample_contents(root, files, "go").take(5) {
        if content.contains("gopkg.in/check.v1") {
            return TestType::GoCheck;
        } else if content.contains("github.com/stretchr/testify") {
            return TestType::Testify;
        }
    }

    TestType::GoTest
}

fn cpp_cascade(root: &Path, files: &BTreeSet<PathBuf>) -> TestType {
    if let Some(content) = read_lower(root.join("CMakeLists.txt")) {
        if content.contains("gtest") {
            return TestType::GoogleTest;
        } else if content.contains("catch2") {
            return TestType::Catch2;
        } else if content.contains("boost_test") {
            return TestType::BoostTest;
        }
    }

    for content in sample_contents(root, files, "cpp").take(5) {
        if content.contains("#include <gtest/gtest.h>") || content.contains("TEST_F") {
            return TestType::GoogleTest;
        } else if content.contains("catch2/catch") || content.contains("CATCH_TEST_CASE") {
            return TestType::Catch2;
        } else if content.contains("#include <boost/test/") {
            return TestType::BoostTest;
        } else if content.contains("#include <cppunit/") {
            return TestType::CppUnit;
        }
    }

    TestType::GoogleTest
}

fn csharp_cascade(root: &Path, files: &BTreeSet<PathBuf>) -> TestType {
    // Project files can sit anywhere below the root in .NET solutions.
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(true)
        .build();
    for entry in walker.flatten() {
        if entry.path().extension().and_then(|e| e.to_str()) != Some("csproj") {
            continue;
        }
        if let Some(content) = read_lower(entry.path().to_path_buf()) {
            if content.contains("nunit") {
                return TestType::Nunit;
            } else if content.contains("xunit") {
                return TestType::Xunit;
            } else if content.contains("mstest") {
                return TestType::Mstest;
            }
        }
    }

    for content in sample_contents(root, files, "cs").take(5) {
        if content.contains("[TestFixture]") || content.contains("using NUnit.Framework") {
            return TestType::Nunit;
        } else if content.contains("[Fact]") || content.contains("using Xunit") {
            return TestType::Xunit;
        } else if content.contains("[TestMethod]")
            || content.contains("Microsoft.VisualStudio.TestTools.UnitTesting")
        {
            return TestType::Mstest;
        }
    }

    TestType::Nunit
}

fn php_cascade(root: &Path, files: &BTreeSet<PathBuf>) -> TestType {
    if let Ok(content) = fs::read_to_string(root.join("composer.json")) {
        if let Ok(composer) = serde_json::from_str::<serde_json::Value>(&content) {
            let has_phpunit = ["/require/phpunit~1phpunit", "/require-dev/phpunit~1phpunit"]
                .iter()
                .any(|ptr| composer.pointer(ptr).is_some());
            if has_phpunit {
                return TestType::Phpunit;
            }
        }
    }

    for content in sample_contents(root, files, "php").take(5) {
        if content.contains("PHPUnit\\Framework\\TestCase") {
            return TestType::Phpunit;
        }
    }

    TestType::Phpunit
}

fn ruby_cascade(root: &Path, files: &BTreeSet<PathBuf>) -> TestType {
    if let Some(content) = read_lower(root.join("Gemfile")) {
        if content.contains("rspec") {
            return TestType::Rspec;
        } else if content.contains("minitest") {
            return TestType::Minitest;
        }
    }

    if root.join("spec").is_dir() || root.join(".rspec").exists() {
        return TestType::Rspec;
    }
    if root.join("test").is_dir() {
        return TestType::Minitest;
    }

    for content in sample_contents(root, files, "rb").take(5) {
        if content.contains("RSpec") {
            return TestType::Rspec;
        } else if content.contains("Minitest::Test") || content.contains("MiniTest::Unit") {
            return TestType::Minitest;
        }
    }

    TestType::Rspec
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_pytest_from_file_content() {
        let dir = TempDir::new().unwrap();
        touch(
            dir.path(),
            "test_foo.py",
            "import pytest\n\ndef test_foo():\n    assert True\n",
        );

        let result = TestClassifier::new().classify(dir.path());
        assert_eq!(result.test_type, TestType::Pytest);
        assert_eq!(result.test_file_count, 1);
        assert_eq!(result.base_command, "pytest");
        assert_eq!(result.language.as_deref(), Some("python"));
    }

    #[test]
    fn test_pytest_from_manifest_wins_over_content() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "requirements.txt", "pytest-cov==4.0\n");
        touch(dir.path(), "test_it.py", "import unittest\n");

        let result = TestClassifier::new().classify(dir.path());
        assert_eq!(result.test_type, TestType::Pytest);
    }

    #[test]
    fn test_unittest_from_content() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "test_legacy.py", "import unittest\n");

        let result = TestClassifier::new().classify(dir.path());
        assert_eq!(result.test_type, TestType::Unittest);
    }

    #[test]
    fn test_jest_from_package_json() {
        let dir = TempDir::new().unwrap();
        touch(
            dir.path(),
            "package.json",
            r#"{"devDependencies": {"jest": "^29.0.0"}}"#,
        );
        touch(dir.path(), "app.test.js", "test('x', () => {});\n");

        let result = TestClassifier::new().classify(dir.path());
        assert_eq!(result.test_type, TestType::Jest);
        assert_eq!(result.language.as_deref(), Some("node"));
    }

    #[test]
    fn test_cypress_beats_jest_in_manifest_order() {
        let dir = TempDir::new().unwrap();
        touch(
            dir.path(),
            "package.json",
            r#"{"devDependencies": {"jest": "^29.0.0", "cypress": "^13.0.0"}}"#,
        );
        touch(dir.path(), "e2e.spec.ts", "");

        let result = TestClassifier::new().classify(dir.path());
        assert_eq!(result.test_type, TestType::Cypress);
    }

    #[test]
    fn test_vitest_config_file_presence() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "package.json", r#"{"name": "x"}"#);
        touch(dir.path(), "vitest.config.ts", "export default {}\n");
        touch(dir.path(), "sum.test.ts", "");

        let result = TestClassifier::new().classify(dir.path());
        assert_eq!(result.test_type, TestType::Vitest);
    }

    #[test]
    fn test_testng_from_pom() {
        let dir = TempDir::new().unwrap();
        touch(
            dir.path(),
            "pom.xml",
            "<project><dependencies><dependency>\
             <groupId>org.testng</groupId><artifactId>testng</artifactId>\
             </dependency></dependencies></project>",
        );
        touch(dir.path(), "src/test/java/AppTest.java", "");

        let result = TestClassifier::new().classify(dir.path());
        assert_eq!(result.test_type, TestType::Testng);
    }

    #[test]
    fn test_testify_from_go_mod() {
        let dir = TempDir::new().unwrap();
        touch(
            dir.path(),
            "go.mod",
            "module x\n\nrequire github.com/stretchr/testify v1.8.0\n",
        );
        touch(dir.path(), "main_test.go", "package main\n");
        touch(dir.path(), "main.go", "package main\n");

        let result = TestClassifier::new().classify(dir.path());
        assert_eq!(result.test_type, TestType::Testify);
    }

    #[test]
    fn test_go_default() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "go.mod", "module x\n");
        touch(dir.path(), "main_test.go", "package main\n");
        touch(dir.path(), "main.go", "package main\n");

        let result = TestClassifier::new().classify(dir.path());
        assert_eq!(result.test_type, TestType::GoTest);
        assert_eq!(result.base_command, "go test ./...");
    }

    #[test]
    fn test_rspec_from_spec_dir() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Gemfile", "gem 'rake'\n");
        touch(dir.path(), "spec/user_spec.rb", "");

        let result = TestClassifier::new().classify(dir.path());
        assert_eq!(result.test_type, TestType::Rspec);
    }

    #[test]
    fn test_phpunit_from_composer() {
        let dir = TempDir::new().unwrap();
        touch(
            dir.path(),
            "composer.json",
            r#"{"require-dev": {"phpunit/phpunit": "^10.0"}}"#,
        );
        touch(dir.path(), "tests/AppTest.php", "<?php\n");

        let result = TestClassifier::new().classify(dir.path());
        assert_eq!(result.test_type, TestType::Phpunit);
    }

    #[test]
    fn test_unknown_when_empty() {
        let dir = TempDir::new().unwrap();
        let result = TestClassifier::new().classify(dir.path());
        assert_eq!(result.test_type, TestType::Unknown);
        assert_eq!(result.test_file_count, 0);
        assert!(result.language.is_none());
    }

    #[test]
    fn test_language_default_without_test_files() {
        // Python sources but no tests: cascade still yields the ecosystem
        // default instead of Unknown.
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "main.py", "print('hi')\n");

        let result = TestClassifier::new().classify(dir.path());
        assert_eq!(result.test_type, TestType::Pytest);
        assert_eq!(result.test_file_count, 0);
    }

    #[test]
    fn test_extension_frequency_inference() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.py", "");
        touch(dir.path(), "b.py", "");
        touch(dir.path(), "c.js", "");

        let classifier = TestClassifier::new();
        assert_eq!(classifier.infer_language(dir.path()), Some("python"));
    }

    #[test]
    fn test_frequency_tie_is_alphabetical() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.py", "");
        touch(dir.path(), "b.go", "");

        // go vs py at one file each: "go" sorts before "py".
        let classifier = TestClassifier::new();
        assert_eq!(classifier.infer_language(dir.path()), Some("go"));
    }
}
