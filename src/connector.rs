//! Connector trait and protocol payloads
//!
//! Defines the core Connector trait behind the four protocol commands
//! and the payload types that `spec` and `check` produce.

use crate::config::{Catalog, ConfiguredCatalog, SourceConfig};
use crate::error::Result;
use crate::output::MessageSink;
use crate::types::{DestinationSyncMode, JsonValue, Status};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Connector Specification
// ============================================================================

/// Connector specification returned by `spec`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorSpecification {
    /// Where users find setup documentation
    #[serde(rename = "documentationUrl")]
    pub documentation_url: String,

    /// JSON schema of the configuration document
    #[serde(rename = "connectionSpecification")]
    pub connection_specification: JsonValue,

    /// Whether incremental syncs are available
    #[serde(rename = "supportsIncremental")]
    pub supports_incremental: bool,

    /// Destination sync modes the connector can feed
    pub supported_destination_sync_modes: Vec<DestinationSyncMode>,

    /// JSON schema of the records of each stream, keyed by stream name
    #[serde(
        rename = "recordSchemas",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub record_schemas: BTreeMap<String, JsonValue>,
}

// ============================================================================
// Connection Status
// ============================================================================

/// Result of a connection check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    /// Whether the check succeeded
    pub status: Status,

    /// Explanation when the check failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConnectionStatus {
    /// Create a successful check result
    pub fn succeeded() -> Self {
        Self {
            status: Status::Succeeded,
            message: None,
        }
    }

    /// Create a failed check result
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Status::Failed,
            message: Some(message.into()),
        }
    }

    /// Whether the check succeeded
    pub fn is_success(&self) -> bool {
        self.status == Status::Succeeded
    }
}

// ============================================================================
// Connector Trait
// ============================================================================

/// Core trait behind the `spec`, `check`, `discover` and `read` commands
#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns the connector specification
    fn spec(&self) -> ConnectorSpecification;

    /// Tests if credentials and configuration are valid.
    ///
    /// Failures are reported in the returned status, never as an error.
    async fn check(&self, config: &SourceConfig) -> ConnectionStatus;

    /// Lists available streams from the source
    fn discover(&self) -> Catalog;

    /// Reads the selected streams, writing messages to `out` as they are
    /// produced. Returns the number of records emitted.
    async fn read(
        &self,
        config: &SourceConfig,
        catalog: &ConfiguredCatalog,
        out: &mut (dyn MessageSink + Send),
    ) -> Result<usize>;
}
