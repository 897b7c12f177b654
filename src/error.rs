//! Error types for resume-kit
//!
//! Library functions return `anyhow::Result`; the variants here are the
//! failures callers may want to tell apart (via `downcast_ref`).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeKitError {
    /// The document to preview does not exist
    #[error("Document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    /// The file exists but is not a usable .docx
    #[error("Invalid document {}: {reason}", .path.display())]
    InvalidDocument { path: PathBuf, reason: String },

    /// None of the candidate resume sources exist
    #[error("No supported resume source found. Place resume.json/txt/md/docx in data/ or assets/docs/")]
    NoResumeSource,

    #[error("Resume text is empty")]
    EmptyResumeText,

    /// The parsed resume failed validation
    #[error("Resume data failed validation: {0}")]
    InvalidResume(String),

    /// `--check` was requested and the patch target substring is absent
    #[error("Patch target not found in {}", .0.display())]
    PatchTargetMissing(PathBuf),
}
