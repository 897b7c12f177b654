use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::patch::DEFAULT_PATCH_TARGET;

pub const DEFAULT_DOCUMENT_PATH: &str = "assets/docs/resume.docx";

/// Project-local config file, checked before the user config directory
const LOCAL_CONFIG_FILE: &str = "resume-kit.toml";

/// Configuration for resume-kit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preview: PreviewConfig,
    pub patch: PatchConfig,
    pub extract: ExtractConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Document converted by `preview`
    pub document_path: PathBuf,
    /// Backslash-escape markdown special characters
    pub escape_markdown: bool,
    /// Infer headings and lists from plain paragraphs
    pub infer_structure: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    pub target_path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Where `extract` writes JSON; empty prints to stdout
    pub output_path: PathBuf,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from(DEFAULT_DOCUMENT_PATH),
            escape_markdown: true,
            infer_structure: false,
        }
    }
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            target_path: PathBuf::from(DEFAULT_PATCH_TARGET),
        }
    }
}

impl PreviewConfig {
    /// Apply `--escape`/`--no-escape` and `--infer-structure`/
    /// `--no-infer-structure`; `None` keeps the configured value
    pub fn with_overrides(mut self, escape: Option<bool>, infer_structure: Option<bool>) -> Self {
        if let Some(escape) = escape {
            self.escape_markdown = escape;
        }
        if let Some(infer_structure) = infer_structure {
            self.infer_structure = infer_structure;
        }
        self
    }
}

impl ExtractConfig {
    /// Output file for `extract`, or `None` for stdout
    pub fn destination(&self) -> Option<&Path> {
        Some(self.output_path.as_path()).filter(|path| !path.as_os_str().is_empty())
    }
}

impl Config {
    /// Load config from an explicit path, the working directory, or the
    /// user config directory, falling back to defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let candidates = [Some(PathBuf::from(LOCAL_CONFIG_FILE)), Self::get_config_path()];
        Self::load_first(explicit, candidates.into_iter().flatten())
    }

    /// An explicit path must exist; otherwise the first existing candidate wins
    fn load_first(
        explicit: Option<&Path>,
        candidates: impl IntoIterator<Item = PathBuf>,
    ) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match candidates.into_iter().find(|path| path.exists()) {
            Some(path) => {
                debug!("Using config {}", path.display());
                Self::load_from(&path)
            }
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Save config to the user config directory
    pub fn save(&self) -> Result<Option<PathBuf>> {
        let Some(config_path) = Self::get_config_path() else {
            return Ok(None);
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&config_path, toml::to_string_pretty(self)?)?;
        Ok(Some(config_path))
    }

    /// Get the path to the user config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("resume-kit").join("config.toml"))
    }

    /// Initialize default config file
    pub fn init_default() -> Result<Option<PathBuf>> {
        Config::default().save()
    }
}
