//! Configuration and catalog types
//!
//! This module contains the connector's input documents: the user
//! configuration passed with `--config`, the discovered and configured
//! catalogs, and the helpers that load them from disk.

use crate::error::{Error, Result, ResultExt};
use crate::http::DEFAULT_BASE_URL;
use crate::types::{DestinationSyncMode, JsonValue, SyncMode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

// ============================================================================
// Source Config
// ============================================================================

/// User configuration for the source
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// NYTimes developer API key
    #[serde(default)]
    pub api_key: String,

    /// Override for the API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl SourceConfig {
    /// Create a config holding only an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    /// Set the base URL override
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Parse and validate a config from its JSON document
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let config = Self::parse(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config without checking its fields.
    ///
    /// Callers that may never reach the API use this and call
    /// [`validate`](Self::validate) once a request is about to be made.
    pub fn parse(value: JsonValue) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::config("config must be a JSON object"));
        }
        serde_json::from_value(value)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))
    }

    /// Check required fields and value formats
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        if let Some(base_url) = &self.base_url {
            Url::parse(base_url).map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        }
        Ok(())
    }

    /// Base URL to call, falling back to the public API
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

// ============================================================================
// Catalog Types
// ============================================================================

/// Discovered catalog (available streams)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Available streams
    pub streams: Vec<CatalogStream>,
}

/// Stream in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStream {
    /// Stream name
    pub name: String,

    /// JSON schema for the stream
    #[serde(default)]
    pub json_schema: JsonValue,

    /// Supported sync modes
    #[serde(default)]
    pub supported_sync_modes: Vec<SyncMode>,

    /// Default cursor field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_cursor_field: Option<Vec<String>>,

    /// Source-defined primary key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_defined_primary_key: Option<Vec<Vec<String>>>,
}

/// Configured catalog (selected streams for sync)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredCatalog {
    /// Selected streams
    pub streams: Vec<ConfiguredStream>,
}

impl ConfiguredCatalog {
    /// Find the configured entry for a stream.
    ///
    /// Entries are scanned in order and a later entry with the same name
    /// replaces an earlier one.
    pub fn find_stream(&self, name: &str) -> Option<&ConfiguredStream> {
        self.streams
            .iter()
            .rev()
            .find(|configured| configured.stream.name == name)
    }
}

/// Configured stream for sync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredStream {
    /// Stream reference
    pub stream: CatalogStream,

    /// Selected sync mode, `None` when the entry names none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_mode: Option<SyncMode>,

    /// Destination sync mode
    #[serde(default)]
    pub destination_sync_mode: DestinationSyncMode,

    /// Cursor field to use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_field: Option<Vec<String>>,

    /// Primary key to use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<Vec<Vec<String>>>,
}

// ============================================================================
// Loading
// ============================================================================

/// Resolve a user-supplied path against the current working directory.
///
/// Absolute paths are returned unchanged.
pub fn resolve_input_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    Ok(cwd.join(path))
}

/// Read and deserialize a JSON file
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let path = resolve_input_path(path)?;
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(serde_json::from_str(&content)?)
}
