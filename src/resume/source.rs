//! Locating and reading the resume source, and writing the JSON record

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

use super::models::Resume;
use super::normalize_resume_text;
use crate::document::{load_document, LoadOptions};
use crate::error::ResumeKitError;
use crate::export::{export_to_markdown_with_options, MarkdownOptions};

/// Checked in order, relative to the project root
pub const CANDIDATE_PATHS: [&str; 6] = [
    "data/resume.json",
    "assets/docs/resume.json",
    "assets/docs/resume.normalized.json",
    "assets/docs/resume.txt",
    "assets/docs/resume.md",
    "assets/docs/resume.docx",
];

#[derive(Debug, Clone, PartialEq)]
pub enum SourceContent {
    /// Already structured; only needs validation
    Json(String),
    /// Free text to run through the resume parser
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeSource {
    pub path: PathBuf,
    pub content: SourceContent,
}

/// Find and read the resume source
///
/// An explicit path is used as is (relative paths resolve against `root`);
/// otherwise the first existing candidate wins. `.docx` files are converted
/// to unescaped markdown first.
pub async fn read_resume_source(root: &Path, explicit: Option<&Path>) -> Result<ResumeSource> {
    let path = match explicit {
        Some(path) => root.join(path),
        None => CANDIDATE_PATHS
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|candidate| candidate.is_file())
            .ok_or(ResumeKitError::NoResumeSource)?,
    };
    debug!("Reading resume source {}", path.display());

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    let content = match extension.as_str() {
        "json" => SourceContent::Json(read_text(&path).await?),
        "txt" | "md" => SourceContent::Text(read_text(&path).await?),
        "docx" => {
            let document = load_document(&path, LoadOptions::default()).await?;
            let options = MarkdownOptions {
                escape_special_chars: false,
            };
            SourceContent::Text(export_to_markdown_with_options(&document, &options)?)
        }
        _ => {
            return Err(ResumeKitError::InvalidDocument {
                path,
                reason: "unsupported resume source (expected .json, .txt, .md or .docx)"
                    .to_string(),
            }
            .into());
        }
    };

    Ok(ResumeSource { path, content })
}

async fn read_text(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(ResumeKitError::DocumentNotFound(path.to_path_buf()).into())
        }
        Err(err) => Err(err).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Turn source content into a validated `Resume`
pub fn normalize_source(content: &SourceContent) -> Result<Resume> {
    let resume = match content {
        SourceContent::Json(json) => serde_json::from_str::<Resume>(json)
            .map_err(|err| ResumeKitError::InvalidResume(err.to_string()))?
            .normalize()?,
        SourceContent::Text(text) => normalize_resume_text(text)?,
    };
    Ok(resume)
}

/// Read, parse and validate the resume found under `root`
pub async fn extract_resume(root: &Path, explicit: Option<&Path>) -> Result<Resume> {
    let source = read_resume_source(root, explicit).await?;
    let resume = normalize_source(&source.content)
        .with_context(|| format!("Failed to extract resume from {}", source.path.display()))?;
    info!(
        "Extracted resume for {} from {} ({} experience entries, {} projects)",
        resume.name,
        source.path.display(),
        resume.experience.len(),
        resume.projects.len()
    );
    Ok(resume)
}

/// Serialize as pretty JSON, writing to `output` when given
///
/// Returns the JSON either way so callers can print it.
pub fn write_resume_json(resume: &Resume, output: Option<&Path>) -> Result<String> {
    let json = serde_json::to_string_pretty(resume)?;

    if let Some(path) = output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, format!("{json}\n"))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Resume JSON written to {}", path.display());
    }

    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[tokio::test]
    async fn test_no_source_found() {
        let dir = TempDir::new().unwrap();
        let err = read_resume_source(dir.path(), None).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResumeKitError>(),
            Some(ResumeKitError::NoResumeSource)
        ));
    }

    #[tokio::test]
    async fn test_json_candidate_wins_over_text() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "assets/docs/resume.md", "Text Name\nEngineer");
        write(dir.path(), "data/resume.json", r#"{"name": "Json Name"}"#);

        let source = read_resume_source(dir.path(), None).await.unwrap();
        assert!(source.path.ends_with("data/resume.json"));
        assert!(matches!(source.content, SourceContent::Json(_)));
    }

    #[tokio::test]
    async fn test_extract_from_markdown() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "assets/docs/resume.md",
            "Jane Doe\nEngineer\njane@example.com\nSkills\nRust, Go\n",
        );

        let resume = extract_resume(dir.path(), None).await.unwrap();
        assert_eq!(resume.name, "Jane Doe");
        assert_eq!(resume.email, "jane@example.com");
        assert_eq!(resume.skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_invalid_json_is_invalid_resume() {
        let err = normalize_source(&SourceContent::Json("{not json".to_string())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResumeKitError>(),
            Some(ResumeKitError::InvalidResume(_))
        ));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out/nested/resume.json");
        let resume = Resume {
            name: "Jane Doe".to_string(),
            ..Default::default()
        };

        let json = write_resume_json(&resume, Some(&output)).unwrap();
        assert!(json.contains("\n  \"name\": \"Jane Doe\""));
        assert_eq!(std::fs::read_to_string(output).unwrap(), format!("{json}\n"));
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "resume.pdf", "%PDF");
        let err = read_resume_source(dir.path(), Some(Path::new("resume.pdf")))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResumeKitError>(),
            Some(ResumeKitError::InvalidDocument { .. })
        ));
    }
}
