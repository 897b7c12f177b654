//! resume-kit: resume document tooling
//!
//! This library converts Microsoft Word resumes into markdown, applies the
//! fixed `buildProjects` signature patch to the site's source, and extracts
//! a normalized resume record from markdown, text or JSON sources.

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod patch;
pub mod resume;

// Re-export commonly used types
pub use config::Config;
pub use document::{load_document, Document, DocumentElement, LoadOptions};
pub use error::ResumeKitError;
pub use export::{export_to_markdown, export_to_markdown_with_options, MarkdownOptions};
pub use patch::{PatchMode, PatchOutcome, TextPatch, BUILD_PROJECTS_PATCH};
pub use resume::Resume;
