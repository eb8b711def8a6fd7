//! End-to-end classification scenarios against synthetic project trees

use stackprobe::engine::{ClassifyError, ClassifyOptions, Engine};
use stackprobe::languages::ConfidenceTier;
use stackprobe::testing::TestType;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn touch(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn empty_directory_raises_no_language_error() {
    let dir = TempDir::new().unwrap();
    let result = Engine::new().classify(dir.path(), &ClassifyOptions::default());

    match result {
        Err(ClassifyError::NoLanguageDetected(path)) => assert_eq!(path, dir.path()),
        other => panic!("expected NoLanguageDetected, got {other:?}"),
    }
}

#[test]
fn flask_requirements_project() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "requirements.txt", "flask==2.0\n");

    let result = Engine::new()
        .classify(dir.path(), &ClassifyOptions::default())
        .unwrap();

    assert_eq!(result.language.language, "python");
    assert_eq!(result.language.confidence, ConfidenceTier::High);
    assert_eq!(result.language.marker.as_deref(), Some("requirements.txt"));
    assert_eq!(result.framework.as_deref(), Some("Flask"));
    // No python_requires constraint, so the documented default applies.
    assert_eq!(result.version, "3.11");
    assert_eq!(result.artifact.build_command, "python setup.py bdist_wheel");
}

#[test]
fn go_module_with_version_directive() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "go.mod", "module x\n\ngo 1.20\n");

    let result = Engine::new()
        .classify(dir.path(), &ClassifyOptions::default())
        .unwrap();

    assert_eq!(result.language.language, "go");
    assert_eq!(result.version, "1.20");
    assert_eq!(result.base_image, "golang:1.20-alpine");
}

#[test]
fn two_high_markers_are_deterministic_across_runs() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "requirements.txt", "");
    touch(dir.path(), "Cargo.toml", "[package]\nname = \"x\"\n");

    let engine = Engine::new();
    let options = ClassifyOptions {
        generate_dockerfile: false,
        classify_tests: false,
    };
    let first = engine.classify(dir.path(), &options).unwrap();
    for _ in 0..10 {
        let next = engine.classify(dir.path(), &options).unwrap();
        assert_eq!(next.language.language, first.language.language);
        assert_eq!(next.version, first.version);
    }
    // python sorts before rust in the registry.
    assert_eq!(first.language.language, "python");
}

#[test]
fn medium_marker_only_project() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "script.rb", "puts 'hi'\n");

    let result = Engine::new()
        .classify(dir.path(), &ClassifyOptions::default())
        .unwrap();

    assert_eq!(result.language.language, "ruby");
    assert_eq!(result.language.confidence, ConfidenceTier::Medium);
    assert_eq!(result.version, "3.2");
}

#[test]
fn detector_and_test_classifier_agree_on_pure_python_tree() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "requirements.txt", "pytest\n");
    touch(dir.path(), "app.py", "import json\n");
    touch(dir.path(), "tests/test_app.py", "import pytest\n");

    let result = Engine::new()
        .classify(dir.path(), &ClassifyOptions::default())
        .unwrap();

    let tests = result.tests.expect("test classification requested");
    // The two language inferences are independent; on a single-language tree
    // they must not disagree.
    assert_eq!(result.language.language, "python");
    assert_eq!(tests.language.as_deref(), Some("python"));
    assert_eq!(tests.test_type, TestType::Pytest);
}

#[test]
fn generated_dockerfile_feeds_base_image() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "go.mod", "module x\n\ngo 1.21\n");

    let options = ClassifyOptions {
        generate_dockerfile: true,
        classify_tests: false,
    };
    let result = Engine::new().classify(dir.path(), &options).unwrap();

    assert!(result.dockerfile_exists);
    let info = result.dockerfile.expect("generated Dockerfile is inspected");
    assert_eq!(info.final_image, "alpine:latest");
    assert_eq!(result.base_image, "alpine:latest");

    let content = fs::read_to_string(dir.path().join("Dockerfile")).unwrap();
    assert!(content.contains("FROM golang:1.21-alpine"));
}

#[test]
fn classification_is_serializable() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "package.json", r#"{"name": "svc"}"#);

    let result = Engine::new()
        .classify(dir.path(), &ClassifyOptions::default())
        .unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["language"]["language"], "node");
    assert_eq!(parsed["version"], "20");
    assert_eq!(parsed["artifact"]["kind"], "npm");
}
