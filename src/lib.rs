// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # NYTimes Books Source
//!
//! A source connector that extracts the New York Times best-seller history
//! and emits it as newline-delimited protocol messages.
//!
//! ## Features
//!
//! - **Four commands**: `spec`, `check`, `discover` and `read`
//! - **One stream**: `best_sellers`, full refresh only
//! - **Strict projection**: each upstream book is reduced to a fixed set of keys
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use source_nytimes_books::{Connector, MessageWriter, NytBooksSource, SourceConfig};
//!
//! #[tokio::main]
//! async fn main() -> source_nytimes_books::Result<()> {
//!     let config = SourceConfig::new("my-api-key");
//!     let source = NytBooksSource::from_config(&config)?;
//!
//!     // Check connection
//!     let status = source.check(&config).await;
//!
//!     // Discover available streams
//!     let catalog = source.discover();
//!
//!     // Read data
//!     let configured = serde_json::from_str(
//!         r#"{"streams":[{"stream":{"name":"best_sellers"},"sync_mode":"full_refresh"}]}"#,
//!     )?;
//!     let mut out = MessageWriter::stdout();
//!     source.read(&config, &configured, &mut out).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         CLI                                │
//! │  spec | check --config | discover --config | read ...      │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//! ┌────────────────────────────┴───────────────────────────────┐
//! │                  Connector (NytBooksSource)                │
//! └────────────────────────────────────────────────────────────┘
//!          │                   │                    │
//! ┌────────┴───────┐  ┌────────┴────────┐  ┌────────┴─────────┐
//! │     Config     │  │      HTTP       │  │      Output      │
//! │ config/catalog │  │ api-key query   │  │ LOG, SPEC,       │
//! │ files          │  │ single GET      │  │ CATALOG, RECORD  │
//! └────────────────┘  └─────────────────┘  └──────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the connector
pub mod error;

/// Common types and type aliases
pub mod types;

/// Connector configuration and catalogs
pub mod config;

/// HTTP client for the Books API
pub mod http;

/// Protocol messages and the stdout writer
pub mod output;

/// Connector trait
pub mod connector;

/// The NYTimes Books source
pub mod source;

/// Command-line interface
pub mod cli;

/// Diagnostic logging setup
pub mod logging;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{Catalog, ConfiguredCatalog, SourceConfig};
pub use connector::{ConnectionStatus, Connector, ConnectorSpecification};
pub use output::{Message, MessageSink, MessageWriter};
pub use source::{BookRecord, NytBooksSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
