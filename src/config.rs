//! Tool configuration: comment syntax, tag keywords, modifiers.
//!
//! Loaded from a JSON file where every key is optional; anything left out
//! falls back to the defaults below.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub comments: CommentsConfig,
    pub tags: TagsConfig,
    pub modifiers: ModifiersConfig,
    pub dependencies: DependenciesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// Regex fragment matching the comment marker of a tag line
    pub format: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            format: "##".to_string(),
        }
    }
}

/// Tag keywords; each is inserted into a pattern as a regex fragment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TagsConfig {
    pub param: String,
    pub section: String,
    pub skip: String,
    pub extra: String,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            param: "@param".to_string(),
            section: "@section".to_string(),
            skip: "@skip".to_string(),
            extra: "@extra".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModifiersConfig {
    pub array: String,
    pub object: String,
    pub string: String,
    pub nullable: String,
    pub default: String,
}

impl Default for ModifiersConfig {
    fn default() -> Self {
        Self {
            array: "array".to_string(),
            object: "object".to_string(),
            string: "string".to_string(),
            nullable: "nullable".to_string(),
            default: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DependenciesConfig {
    /// Per-request timeout for repository index downloads
    pub timeout_secs: u64,
}

impl Default for DependenciesConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl DependenciesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
