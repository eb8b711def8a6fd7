//! Dockerfile collaborators
//!
//! The classification engine only ever reads two facts from an existing
//! Dockerfile: the final base image and the first exposed port. Generation of
//! a missing Dockerfile is delegated through the `DockerfileTemplater` trait;
//! `DefaultTemplates` carries per-language multi-stage templates with plain
//! `{version}` substitution.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DockerfileError {
    #[error("Failed to read Dockerfile {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to write Dockerfile {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Summary of an existing Dockerfile, as far as classification cares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerfileInfo {
    /// Image of the last build stage (the runtime image).
    pub final_image: String,
    /// First exposed port, if any.
    pub primary_port: Option<u16>,
}

/// Extract the final stage image and primary port from a Dockerfile.
///
/// Instruction parsing is line-oriented: the last `FROM` wins (multi-stage
/// builds), the first `EXPOSE` wins, stage aliases after `AS` are dropped.
pub fn inspect_dockerfile(path: &Path) -> Result<DockerfileInfo, DockerfileError> {
    let content = fs::read_to_string(path).map_err(|source| DockerfileError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let mut final_image = String::from("unknown");
    let mut primary_port = None;

    for line in content.lines() {
        let line = line.trim();
        let upper = line.to_uppercase();
        if upper.starts_with("FROM ") {
            let mut parts = line.split_whitespace().skip(1);
            if let Some(image) = parts.next() {
                final_image = image.to_string();
            }
        } else if upper.starts_with("EXPOSE ") && primary_port.is_none() {
            primary_port = line
                .split_whitespace()
                .nth(1)
                .and_then(|p| p.split('/').next())
                .and_then(|p| p.parse().ok());
        }
    }

    Ok(DockerfileInfo {
        final_image,
        primary_port,
    })
}

/// Renders Dockerfile content for a detected language and version.
pub trait DockerfileTemplater {
    /// Returns rendered content, or `None` when no template exists for the
    /// language.
    fn render(&self, language: &str, version: &str) -> Option<String>;
}

/// Built-in multi-stage templates, one per supported language.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTemplates;

const TEMPLATES: &[(&str, &str)] = &[
    (
        "python",
        "FROM python:{version}-slim AS builder\n\
         WORKDIR /app\n\
         COPY requirements.txt .\n\
         RUN pip install --no-cache-dir -r requirements.txt\n\
         \n\
         FROM python:{version}-slim\n\
         RUN useradd -m -u 1000 appuser\n\
         WORKDIR /app\n\
         COPY --from=builder /usr/local/lib/python{version_short}/site-packages /usr/local/lib/python{version_short}/site-packages\n\
         COPY --chown=appuser:appuser . .\n\
         EXPOSE 3000\n\
         USER appuser\n\
         CMD [\"python\", \"-m\", \"main\"]\n",
    ),
    (
        "go",
        "FROM golang:{version}-alpine AS builder\n\
         WORKDIR /app\n\
         COPY go.mod go.sum ./\n\
         RUN go mod download\n\
         COPY . .\n\
         RUN CGO_ENABLED=0 GOOS=linux go build -o app .\n\
         \n\
         FROM alpine:latest\n\
         RUN apk --no-cache add ca-certificates\n\
         RUN adduser -D -u 1000 appuser\n\
         WORKDIR /home/appuser\n\
         COPY --from=builder --chown=appuser:appuser /app/app .\n\
         EXPOSE 3000\n\
         USER appuser\n\
         CMD [\"./app\"]\n",
    ),
    (
        "node",
        "FROM node:{version}-alpine AS builder\n\
         WORKDIR /app\n\
         COPY package*.json ./\n\
         RUN npm ci --only=production\n\
         \n\
         FROM node:{version}-alpine\n\
         RUN adduser -D -u 1000 appuser\n\
         WORKDIR /app\n\
         COPY --from=builder --chown=appuser:appuser /app/node_modules ./node_modules\n\
         COPY --chown=appuser:appuser . .\n\
         EXPOSE 3000\n\
         USER appuser\n\
         CMD [\"npm\", \"start\"]\n",
    ),
    (
        "java",
        "FROM maven:3.9-eclipse-temurin-{version} AS builder\n\
         WORKDIR /app\n\
         COPY pom.xml .\n\
         RUN mvn dependency:go-offline\n\
         COPY . .\n\
         RUN mvn clean package -DskipTests\n\
         \n\
         FROM eclipse-temurin:{version}-jre-alpine\n\
         RUN adduser -D -u 1000 appuser\n\
         WORKDIR /app\n\
         COPY --from=builder --chown=appuser:appuser /app/target/*.jar app.jar\n\
         EXPOSE 3000\n\
         USER appuser\n\
         CMD [\"java\", \"-jar\", \"app.jar\"]\n",
    ),
    (
        "php",
        "FROM php:{version}-fpm-alpine AS builder\n\
         WORKDIR /app\n\
         COPY composer.json composer.lock ./\n\
         RUN curl -sS https://getcomposer.org/installer | php -- --install-dir=/usr/local/bin --filename=composer && \\\n\
         \tcomposer install --no-interaction --no-dev\n\
         \n\
         FROM php:{version}-fpm-alpine\n\
         RUN adduser -D -u 1000 appuser\n\
         WORKDIR /app\n\
         COPY --from=builder --chown=appuser:appuser /app ./\n\
         EXPOSE 3000\n\
         USER appuser\n\
         CMD [\"php\", \"-S\", \"0.0.0.0:3000\"]\n",
    ),
    (
        "rust",
        "FROM rust:{version} AS builder\n\
         WORKDIR /app\n\
         COPY Cargo.toml Cargo.lock ./\n\
         COPY src ./src\n\
         RUN cargo build --release\n\
         \n\
         FROM debian:bookworm-slim\n\
         RUN apt-get update && apt-get install -y ca-certificates && rm -rf /var/lib/apt/lists/*\n\
         RUN useradd -m -u 1000 appuser\n\
         WORKDIR /app\n\
         COPY --from=builder --chown=appuser:appuser /app/target/release/app .\n\
         EXPOSE 3000\n\
         USER appuser\n\
         CMD [\"./app\"]\n",
    ),
    (
        "ruby",
        "FROM ruby:{version}-alpine\n\
         WORKDIR /app\n\
         COPY Gemfile Gemfile.lock ./\n\
         RUN gem install bundler && bundle install\n\
         RUN adduser -D -u 1000 appuser\n\
         COPY --chown=appuser:appuser . .\n\
         EXPOSE 3000\n\
         USER appuser\n\
         CMD [\"rails\", \"server\", \"-b\", \"0.0.0.0\", \"-p\", \"3000\"]\n",
    ),
];

impl DockerfileTemplater for DefaultTemplates {
    fn render(&self, language: &str, version: &str) -> Option<String> {
        let template = TEMPLATES
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, t)| *t)?;

        let version_short = version
            .split('.')
            .take(2)
            .collect::<Vec<_>>()
            .join(".");

        Some(
            template
                .replace("{version_short}", &version_short)
                .replace("{version}", version),
        )
    }
}

/// Write a generated Dockerfile at the project root.
pub fn write_dockerfile(root: &Path, content: &str) -> Result<(), DockerfileError> {
    let path = root.join("Dockerfile");
    fs::write(&path, content).map_err(|source| DockerfileError::Write {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_inspect_multistage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Dockerfile");
        fs::write(
            &path,
            "FROM golang:1.21-alpine AS builder\n\
             WORKDIR /app\n\
             FROM alpine:latest\n\
             EXPOSE 8080\n\
             EXPOSE 9090\n\
             CMD [\"./app\"]\n",
        )
        .unwrap();

        let info = inspect_dockerfile(&path).unwrap();
        assert_eq!(info.final_image, "alpine:latest");
        assert_eq!(info.primary_port, Some(8080));
    }

    #[test]
    fn test_inspect_expose_with_protocol() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Dockerfile");
        fs::write(&path, "FROM nginx\nEXPOSE 443/tcp\n").unwrap();

        let info = inspect_dockerfile(&path).unwrap();
        assert_eq!(info.primary_port, Some(443));
    }

    #[test]
    fn test_inspect_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        assert!(inspect_dockerfile(&dir.path().join("Dockerfile")).is_err());
    }

    #[test]
    fn test_render_substitutes_version() {
        let content = DefaultTemplates.render("python", "3.11").unwrap();
        assert!(content.contains("FROM python:3.11-slim"));
        assert!(content.contains("python3.11/site-packages"));
        assert!(!content.contains("{version"));
    }

    #[test]
    fn test_render_unknown_language() {
        assert!(DefaultTemplates.render("cobol", "1.0").is_none());
    }

    #[test]
    fn test_rendered_template_round_trips_through_inspection() {
        let dir = TempDir::new().unwrap();
        let content = DefaultTemplates.render("go", "1.21").unwrap();
        write_dockerfile(dir.path(), &content).unwrap();

        let info = inspect_dockerfile(&dir.path().join("Dockerfile")).unwrap();
        assert_eq!(info.final_image, "alpine:latest");
        assert_eq!(info.primary_port, Some(3000));
    }
}
