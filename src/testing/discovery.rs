//! Test file discovery across language-specific naming conventions

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

/// Glob catalogue of test-file conventions, one group per ecosystem.
const TEST_PATTERNS: &[&str] = &[
    // Python
    "**/test_*.py",
    "**/*_test.py",
    "**/test/**/*.py",
    "**/tests/**/*.py",
    // JavaScript / TypeScript
    "**/*.test.js",
    "**/*.test.ts",
    "**/*.spec.js",
    "**/*.spec.ts",
    "**/test/**/*.js",
    "**/test/**/*.ts",
    "**/cypress/**/*.js",
    "**/cypress/**/*.ts",
    // Java (Maven/Gradle source layouts plus loose conventions)
    "**/src/test/java/**/*Test.java",
    "**/src/test/java/**/*Tests.java",
    "**/test/java/**/*Test.java",
    "**/test/java/**/*Tests.java",
    "**/*Test.java",
    "**/*Tests.java",
    // Go
    "**/*_test.go",
    // C++
    "**/*_test.cpp",
    "**/test/**/*.cpp",
    // C#
    "**/*Test.cs",
    "**/test/**/*.cs",
    // PHP
    "**/*Test.php",
    "**/test/**/*.php",
    // Ruby
    "**/*_spec.rb",
    "**/spec/**/*.rb",
    "**/test/**/*.rb",
];

/// Directories never worth descending into during discovery.
const SKIP_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "target",
    "dist",
    "build",
    "venv",
    ".venv",
    "__pycache__",
    ".pytest_cache",
    "vendor",
];

fn test_globset() -> Option<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in TEST_PATTERNS {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(err) => warn!(pattern, error = %err, "skipping invalid test glob"),
        }
    }
    builder.build().ok()
}

/// Discover test files under `root`, deduplicated and in a stable order.
///
/// A file matching several patterns counts once; the `BTreeSet` makes the
/// result independent of directory traversal order. Unreadable entries are
/// skipped silently.
pub fn discover_test_files(root: &Path) -> BTreeSet<PathBuf> {
    let mut found = BTreeSet::new();
    let set = match test_globset() {
        Some(s) => s,
        None => return found,
    };

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(true)
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !SKIP_DIRS.contains(&name.as_ref())
        })
        .build();

    for entry in walker.flatten() {
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let rel = match entry.path().strip_prefix(root) {
            Ok(r) => r,
            Err(_) => continue,
        };
        if set.is_match(rel) {
            trace!(path = %rel.display(), "test file discovered");
            found.insert(rel.to_path_buf());
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_python_conventions() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "test_api.py");
        touch(dir.path(), "util_test.py");
        touch(dir.path(), "tests/test_db.py");
        touch(dir.path(), "main.py");

        let files = discover_test_files(dir.path());
        assert_eq!(files.len(), 3);
        assert!(!files.contains(&PathBuf::from("main.py")));
    }

    #[test]
    fn test_deduplication_across_patterns() {
        // Matches both **/test_*.py and **/tests/**/*.py.
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "tests/test_core.py");

        let files = discover_test_files(dir.path());
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_mixed_ecosystems() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "api.test.ts");
        touch(dir.path(), "handler_test.go");
        touch(dir.path(), "src/test/java/FooTest.java");
        touch(dir.path(), "spec/user_spec.rb");

        let files = discover_test_files(dir.path());
        assert_eq!(files.len(), 4);
    }

    #[test]
    fn test_skips_dependency_dirs() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "node_modules/pkg/index.test.js");
        touch(dir.path(), "vendor/lib/FooTest.php");
        touch(dir.path(), "app.test.js");

        let files = discover_test_files(dir.path());
        assert_eq!(files.len(), 1);
        assert!(files.contains(&PathBuf::from("app.test.js")));
    }

    #[test]
    fn test_stable_order() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b/test_b.py");
        touch(dir.path(), "a/test_a.py");
        touch(dir.path(), "test_root.py");

        let first = discover_test_files(dir.path());
        for _ in 0..5 {
            assert_eq!(discover_test_files(dir.path()), first);
        }
        let ordered: Vec<_> = first.into_iter().collect();
        assert_eq!(
            ordered,
            vec![
                PathBuf::from("a/test_a.py"),
                PathBuf::from("b/test_b.py"),
                PathBuf::from("test_root.py"),
            ]
        );
    }

    #[test]
    fn test_empty_or_missing_root() {
        let dir = TempDir::new().unwrap();
        assert!(discover_test_files(dir.path()).is_empty());
        assert!(discover_test_files(Path::new("/nonexistent/stackprobe")).is_empty());
    }
}
