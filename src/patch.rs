//! Fixed literal source patch
//!
//! Rewrites the `buildProjects` signature in the site's formatter module.
//! The substitution is a compile-time constant; `TextPatch::apply` is pure and
//! `patch_file` only writes back when asked to and when something changed.

use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;

use crate::error::ResumeKitError;

pub const DEFAULT_PATCH_TARGET: &str = "src/lib/formatters.ts";

const BUILD_PROJECTS_SIGNATURE: &str =
    "export function buildProjects(resume: Resume): ProjectCard[] {";
const BUILD_PROJECTS_PARTIAL_SIGNATURE: &str =
    "export function buildProjects(resume: Partial[Resume] | None): ProjectCard[] {";

/// A single literal find-and-replace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPatch {
    pub find: &'static str,
    pub replace: &'static str,
}

/// The one patch this tool applies
pub const BUILD_PROJECTS_PATCH: TextPatch = TextPatch {
    find: BUILD_PROJECTS_SIGNATURE,
    replace: BUILD_PROJECTS_PARTIAL_SIGNATURE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub text: String,
    pub replacements: usize,
}

impl PatchOutcome {
    pub fn is_changed(&self) -> bool {
        self.replacements > 0
    }
}

impl TextPatch {
    /// Replace every occurrence of `find`; text without a match is returned unchanged
    pub fn apply(&self, text: &str) -> PatchOutcome {
        let replacements = text.matches(self.find).count();
        let text = if replacements == 0 {
            text.to_string()
        } else {
            text.replace(self.find, self.replace)
        };

        PatchOutcome { text, replacements }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatchMode {
    /// Compute the patched text without touching the file
    #[default]
    DryRun,
    /// Persist the patched text when at least one replacement happened
    Write,
}

/// Read `path`, apply `patch`, and optionally write the result back
pub fn patch_file(path: &Path, patch: &TextPatch, mode: PatchMode) -> Result<PatchOutcome> {
    let original = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read patch target {}", path.display()))?;

    let outcome = patch.apply(&original);

    if !outcome.is_changed() {
        warn!("No occurrence of the target signature in {}", path.display());
        return Ok(outcome);
    }

    info!(
        "{} replacement(s) in {}",
        outcome.replacements,
        path.display()
    );

    if mode == PatchMode::Write {
        std::fs::write(path, &outcome.text)
            .with_context(|| format!("Failed to write patched {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    Ok(outcome)
}

/// Fail with `PatchTargetMissing` when the outcome made no replacement
pub fn ensure_patched(path: &Path, outcome: &PatchOutcome) -> Result<()> {
    if outcome.is_changed() {
        Ok(())
    } else {
        Err(ResumeKitError::PatchTargetMissing(path.to_path_buf()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_signature() {
        let source = format!("import x;\n\n{BUILD_PROJECTS_SIGNATURE}\n  return [];\n}}\n");
        let outcome = BUILD_PROJECTS_PATCH.apply(&source);

        assert_eq!(outcome.replacements, 1);
        assert!(outcome.text.contains(BUILD_PROJECTS_PARTIAL_SIGNATURE));
        assert!(!outcome.text.contains(BUILD_PROJECTS_SIGNATURE));
        assert!(outcome.text.starts_with("import x;\n\n"));
    }

    #[test]
    fn test_apply_without_match_is_identical() {
        let source = "export function buildProjects(resume: Partial<Resume> | null): ProjectCard[] {\n";
        let outcome = BUILD_PROJECTS_PATCH.apply(source);

        assert_eq!(outcome.replacements, 0);
        assert!(!outcome.is_changed());
        assert_eq!(outcome.text, source);
    }

    #[test]
    fn test_apply_replaces_every_occurrence() {
        let source = format!("{BUILD_PROJECTS_SIGNATURE}\n{BUILD_PROJECTS_SIGNATURE}\n");
        let outcome = BUILD_PROJECTS_PATCH.apply(&source);
        assert_eq!(outcome.replacements, 2);
        assert_eq!(outcome.text.matches(BUILD_PROJECTS_PARTIAL_SIGNATURE).count(), 2);
    }

    #[test]
    fn test_match_is_literal() {
        // Whitespace differences are not a match
        let source = "export function buildProjects( resume: Resume ): ProjectCard[] {";
        assert_eq!(BUILD_PROJECTS_PATCH.apply(source).text, source);
    }

    #[test]
    fn test_ensure_patched() {
        let path = Path::new("formatters.ts");
        let unchanged = BUILD_PROJECTS_PATCH.apply("nothing here");
        let err = ensure_patched(path, &unchanged).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResumeKitError>(),
            Some(ResumeKitError::PatchTargetMissing(_))
        ));
    }
}
