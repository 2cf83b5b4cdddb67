//! Search configuration via `dirsearch.toml`
//!
//! Every field has a default, so an empty file (or no file) yields a working
//! configuration. Use [`SearchConfig::write_default_if_missing`] to drop a
//! commented template next to the application's other settings.

use crate::error::{Error, Result};
use crate::types::KEY_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "dirsearch.toml";

/// Per-field scoring weights
///
/// A term occurrence in a field contributes that field's weight to the
/// document's relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    /// Title (listing) or name (category)
    #[serde(default = "default_title_weight")]
    pub title: f32,
    /// Short description
    #[serde(default = "default_description_weight")]
    pub description: f32,
    /// Long body content
    #[serde(default = "default_content_weight")]
    pub content: f32,
}

fn default_title_weight() -> f32 {
    3.0
}

fn default_description_weight() -> f32 {
    2.0
}

fn default_content_weight() -> f32 {
    1.0
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: default_title_weight(),
            description: default_description_weight(),
            content: default_content_weight(),
        }
    }
}

/// Search configuration loaded from `dirsearch.toml`.
///
/// # Example
///
/// ```toml
/// key_prefix = "dirsearch"
/// default_limit = 20
/// content_prefix_chars = 1000
///
/// [weights]
/// title = 3.0
/// description = 2.0
/// content = 1.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Leading segment of every store key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Page size used when a request does not give one
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Characters of listing body content that are tokenized and projected
    #[serde(default = "default_content_prefix_chars")]
    pub content_prefix_chars: usize,
    /// Scoring weights
    #[serde(default)]
    pub weights: FieldWeights,
}

fn default_key_prefix() -> String {
    "dirsearch".to_string()
}

fn default_limit() -> usize {
    20
}

fn default_content_prefix_chars() -> usize {
    1000
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            default_limit: default_limit(),
            content_prefix_chars: default_content_prefix_chars(),
            weights: FieldWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Check that the configuration can be used.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for an unusable key prefix, a zero page size,
    /// or a negative / non-finite weight.
    pub fn validate(&self) -> Result<()> {
        if self.key_prefix.is_empty()
            || self.key_prefix.contains(KEY_SEPARATOR)
            || self.key_prefix.chars().any(char::is_whitespace)
        {
            return Err(Error::Config(format!(
                "key_prefix '{}' must be a non-empty segment without ':' or whitespace",
                self.key_prefix
            )));
        }
        if self.default_limit == 0 {
            return Err(Error::Config("default_limit must be greater than 0".to_string()));
        }
        let w = &self.weights;
        for (name, value) in [
            ("title", w.title),
            ("description", w.description),
            ("content", w.content),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "weights.{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# dirsearch configuration
#
# Leading segment of every key written to the backing store.
key_prefix = "dirsearch"

# Page size when a search request does not specify one.
default_limit = 20

# Characters of listing body content that are indexed (caps indexing cost).
content_prefix_chars = 1000

# Relevance weight per occurrence of a query term in each field.
[weights]
title = 3.0
description = 2.0
content = 1.0
"#
    }

    /// Parse and validate config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SearchConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(target: "dirsearch::config", path = %path.display(), "Loaded search config");
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::Config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::Config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
