//! Protocol message envelope

use crate::config::Catalog;
use crate::connector::{ConnectionStatus, ConnectorSpecification};
use crate::types::{JsonValue, LogLevel};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A message emitted on stdout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Log line for the orchestrator
    Log {
        /// Log payload
        log: LogMessage,
    },
    /// Result of a connection check
    ConnectionStatus {
        /// Check outcome
        #[serde(rename = "connectionStatus")]
        connection_status: ConnectionStatus,
    },
    /// Discovered streams
    Catalog {
        /// Catalog payload
        catalog: Catalog,
    },
    /// Connector specification
    Spec {
        /// Specification payload
        spec: ConnectorSpecification,
    },
    /// A single record
    Record {
        /// Record payload
        record: RecordMessage,
    },
}

/// Payload of a `LOG` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessage {
    /// Severity
    pub level: LogLevel,
    /// Human-readable text
    pub message: String,
}

/// Payload of a `RECORD` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMessage {
    /// Stream the record belongs to
    pub stream: String,
    /// Record data
    pub data: JsonValue,
    /// Unix timestamp in milliseconds
    pub emitted_at: i64,
}

impl RecordMessage {
    /// Create a record stamped with the current time
    pub fn new(stream: impl Into<String>, data: JsonValue) -> Self {
        Self {
            stream: stream.into(),
            data,
            emitted_at: Utc::now().timestamp_millis(),
        }
    }
}

impl Message {
    /// Create a log message
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            log: LogMessage {
                level,
                message: message.into(),
            },
        }
    }

    /// Create an info log message
    pub fn info(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Info, message)
    }

    /// Create a fatal log message
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Fatal, message)
    }

    /// Create a connection status message
    pub fn connection_status(status: ConnectionStatus) -> Self {
        Self::ConnectionStatus {
            connection_status: status,
        }
    }

    /// Create a catalog message
    pub fn catalog(catalog: Catalog) -> Self {
        Self::Catalog { catalog }
    }

    /// Create a spec message
    pub fn spec(spec: ConnectorSpecification) -> Self {
        Self::Spec { spec }
    }

    /// Create a record message stamped with the current time
    pub fn record(stream: impl Into<String>, data: JsonValue) -> Self {
        Self::Record {
            record: RecordMessage::new(stream, data),
        }
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// Check if this is a log message
    pub fn is_log(&self) -> bool {
        matches!(self, Self::Log { .. })
    }
}
