//! Filesystem marker matching
//!
//! A marker is a file, exact path, or glob whose presence is evidence for a
//! language, framework, or test tool. Rules are declared in static tables and
//! matched read-only against a project root. A filesystem error on one rule
//! never aborts the scan of the remaining rules.

use globset::{Glob, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::Path;
use tracing::trace;

/// Evidentiary weight of a marker rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MarkerWeight {
    Weak,
    Medium,
    Strong,
}

/// A single marker rule: an exact relative path or a glob pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRule {
    pub pattern: &'static str,
    pub weight: MarkerWeight,
}

impl MarkerRule {
    pub const fn strong(pattern: &'static str) -> Self {
        Self {
            pattern,
            weight: MarkerWeight::Strong,
        }
    }

    pub const fn medium(pattern: &'static str) -> Self {
        Self {
            pattern,
            weight: MarkerWeight::Medium,
        }
    }

    pub const fn weak(pattern: &'static str) -> Self {
        Self {
            pattern,
            weight: MarkerWeight::Weak,
        }
    }
}

/// Returns the subset of `rules` that matched under `root`.
pub fn match_rules<'a>(root: &Path, rules: &'a [MarkerRule]) -> Vec<&'a MarkerRule> {
    rules
        .iter()
        .filter(|rule| marker_matches(root, rule.pattern))
        .collect()
}

/// Checks a single marker pattern against a project root.
///
/// Exact patterns are plain existence checks. Glob patterns must match at
/// least one entry at the depth the glob itself names; there is no implicit
/// recursion. Errors (unreadable directories, invalid patterns) count as
/// "no match".
pub fn marker_matches(root: &Path, pattern: &str) -> bool {
    if !pattern.contains('*') {
        return root.join(pattern).exists();
    }

    let glob = match Glob::new(pattern) {
        Ok(g) => g,
        Err(err) => {
            trace!(pattern, error = %err, "invalid marker glob");
            return false;
        }
    };
    let mut builder = GlobSetBuilder::new();
    builder.add(glob);
    let set = match builder.build() {
        Ok(s) => s,
        Err(_) => return false,
    };

    // Depth is bounded by the number of path components the glob names.
    let depth = pattern.split('/').count();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(false)
        .max_depth(Some(depth))
        .build();

    for entry in walker.flatten() {
        let rel = match entry.path().strip_prefix(root) {
            Ok(r) => r,
            Err(_) => continue,
        };
        if rel.as_os_str().is_empty() {
            continue;
        }
        if set.is_match(rel) {
            return true;
        }
    }
    false
}
