//! Web/service framework detection
//!
//! Per-language tables map framework names to identifier strings searched as
//! raw substrings of the lower-cased dependency manifest. The first framework
//! in declared table order whose identifier appears wins; declared order is
//! therefore the documented tie-break (a meta-framework is listed before the
//! library it wraps). Absence of a manifest or identifier yields `None`,
//! never an error.

use std::fs;
use std::path::Path;
use tracing::debug;

/// One framework row: name plus lower-cased identifier substrings.
#[derive(Debug, Clone, Copy)]
pub struct FrameworkSpec {
    pub name: &'static str,
    pub identifiers: &'static [&'static str],
}

struct FrameworkTable {
    language: &'static str,
    /// Dependency manifests scanned for identifiers, in order.
    manifests: &'static [&'static str],
    /// Entry-point source files also scanned (python only).
    entry_points: &'static [&'static str],
    frameworks: &'static [FrameworkSpec],
}

const FRAMEWORK_TABLES: &[FrameworkTable] = &[
    FrameworkTable {
        language: "go",
        manifests: &["go.mod"],
        entry_points: &[],
        frameworks: &[
            FrameworkSpec {
                name: "Gin",
                identifiers: &["github.com/gin-gonic/gin"],
            },
            FrameworkSpec {
                name: "Echo",
                identifiers: &["github.com/labstack/echo"],
            },
            FrameworkSpec {
                name: "Fiber",
                identifiers: &["github.com/gofiber/fiber"],
            },
        ],
    },
    FrameworkTable {
        language: "java",
        manifests: &["pom.xml", "build.gradle"],
        entry_points: &[],
        frameworks: &[
            FrameworkSpec {
                name: "Spring Boot",
                identifiers: &["spring-boot"],
            },
            FrameworkSpec {
                name: "Quarkus",
                identifiers: &["quarkus"],
            },
            FrameworkSpec {
                name: "Micronaut",
                identifiers: &["micronaut"],
            },
        ],
    },
    FrameworkTable {
        language: "node",
        manifests: &["package.json"],
        entry_points: &[],
        frameworks: &[
            // Next.js ships express-like deps; keep the meta-framework first.
            FrameworkSpec {
                name: "Next.js",
                identifiers: &["\"next\""],
            },
            FrameworkSpec {
                name: "NestJS",
                identifiers: &["@nestjs/core"],
            },
            FrameworkSpec {
                name: "Express",
                identifiers: &["\"express\""],
            },
            FrameworkSpec {
                name: "Fastify",
                identifiers: &["fastify"],
            },
        ],
    },
    FrameworkTable {
        language: "php",
        manifests: &["composer.json"],
        entry_points: &[],
        frameworks: &[
            FrameworkSpec {
                name: "Laravel",
                identifiers: &["laravel/framework"],
            },
            FrameworkSpec {
                name: "Symfony",
                identifiers: &["symfony/"],
            },
        ],
    },
    FrameworkTable {
        language: "python",
        manifests: &["requirements.txt", "pyproject.toml", "Pipfile", "setup.py"],
        entry_points: &["main.py", "app.py", "application.py"],
        frameworks: &[
            FrameworkSpec {
                name: "Django",
                identifiers: &["django"],
            },
            FrameworkSpec {
                name: "FastAPI",
                identifiers: &["fastapi"],
            },
            FrameworkSpec {
                name: "Flask",
                identifiers: &["flask"],
            },
            FrameworkSpec {
                name: "Starlette",
                identifiers: &["starlette"],
            },
        ],
    },
    FrameworkTable {
        language: "ruby",
        manifests: &["Gemfile"],
        entry_points: &[],
        frameworks: &[
            FrameworkSpec {
                name: "Rails",
                identifiers: &["rails"],
            },
            FrameworkSpec {
                name: "Sinatra",
                identifiers: &["sinatra"],
            },
        ],
    },
    FrameworkTable {
        language: "rust",
        manifests: &["Cargo.toml"],
        entry_points: &[],
        frameworks: &[
            FrameworkSpec {
                name: "Axum",
                identifiers: &["axum"],
            },
            FrameworkSpec {
                name: "Actix",
                identifiers: &["actix-web"],
            },
            FrameworkSpec {
                name: "Rocket",
                identifiers: &["rocket"],
            },
        ],
    },
];

/// Detect the project's web/service framework, if any.
///
/// At most one framework is reported per project: the first table entry whose
/// identifier appears in any scanned file. Unreadable files are skipped.
pub fn detect_framework(root: &Path, language: &str) -> Option<String> {
    let table = FRAMEWORK_TABLES.iter().find(|t| t.language == language)?;

    let files = table.manifests.iter().chain(table.entry_points.iter());
    for file in files {
        let content = match fs::read_to_string(root.join(file)) {
            Ok(c) => c.to_lowercase(),
            Err(_) => continue,
        };

        for spec in table.frameworks {
            if spec.identifiers.iter().any(|id| content.contains(id)) {
                debug!(language, framework = spec.name, file, "framework detected");
                return Some(spec.name.to_string());
            }
        }
    }

    None
}

/// Framework rows registered for a language, in tie-break order.
pub fn frameworks_for(language: &str) -> &'static [FrameworkSpec] {
    FRAMEWORK_TABLES
        .iter()
        .find(|t| t.language == language)
        .map(|t| t.frameworks)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use yare::parameterized;

    #[parameterized(
        flask = { "requirements.txt", "flask==2.0\n", "python", "Flask" },
        django = { "requirements.txt", "Django>=4.2\n", "python", "Django" },
        gin = { "go.mod", "module x\nrequire github.com/gin-gonic/gin v1.9.0\n", "go", "Gin" },
        spring = { "pom.xml", "<artifactId>spring-boot-starter-web</artifactId>", "java", "Spring Boot" },
        laravel = { "composer.json", r#"{"require": {"laravel/framework": "^10.0"}}"#, "php", "Laravel" },
        rails = { "Gemfile", "gem 'rails', '~> 7.0'\n", "ruby", "Rails" },
        axum = { "Cargo.toml", "[dependencies]\naxum = \"0.7\"\n", "rust", "Axum" },
    )]
    fn test_manifest_detection(file: &str, content: &str, language: &str, expected: &str) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(file), content).unwrap();
        assert_eq!(detect_framework(dir.path(), language).as_deref(), Some(expected));
    }

    #[test]
    fn test_case_insensitive_match() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("requirements.txt"), "Flask==2.0\n").unwrap();
        assert_eq!(
            detect_framework(dir.path(), "python").as_deref(),
            Some("Flask")
        );
    }

    #[test]
    fn test_python_entry_point_scan() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("requirements.txt"), "uvicorn\n").unwrap();
        fs::write(
            dir.path().join("main.py"),
            "from fastapi import FastAPI\napp = FastAPI()\n",
        )
        .unwrap();
        assert_eq!(
            detect_framework(dir.path(), "python").as_deref(),
            Some("FastAPI")
        );
    }

    #[test]
    fn test_first_match_wins_in_table_order() {
        // Both identifiers appear; Django precedes Flask in the table.
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("requirements.txt"), "flask\ndjango\n").unwrap();
        assert_eq!(
            detect_framework(dir.path(), "python").as_deref(),
            Some("Django")
        );
    }

    #[test]
    fn test_nextjs_before_express() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"next": "14.0.0", "express": "4.18.0"}}"#,
        )
        .unwrap();
        assert_eq!(
            detect_framework(dir.path(), "node").as_deref(),
            Some("Next.js")
        );
    }

    #[test]
    fn test_no_manifest_is_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(detect_framework(dir.path(), "python"), None);
        assert_eq!(detect_framework(dir.path(), "cobol"), None);
    }
}
