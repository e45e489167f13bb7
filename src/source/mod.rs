//! NYTimes Books source
//!
//! Implements [`Connector`] for the Books API. A single stream,
//! `best_sellers`, is offered and only full refresh is supported.

mod best_sellers;

pub use best_sellers::{
    catalog_stream, extract_results, json_schema, project_at, BookRecord, HISTORY_PATH,
    STREAM_NAME,
};

use crate::config::{Catalog, ConfiguredCatalog, SourceConfig};
use crate::connector::{ConnectionStatus, Connector, ConnectorSpecification};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, DEFAULT_BASE_URL};
use crate::output::{Message, MessageSink};
use crate::types::{DestinationSyncMode, SyncMode};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Endpoint probed by `check`
pub const CHECK_PATH: &str = HISTORY_PATH;

/// Setup documentation for the Books API
pub const DOCUMENTATION_URL: &str = "https://developer.nytimes.com/docs/books-product/1/overview";

/// `check` message for a rejected API key
pub const INVALID_API_KEY_MESSAGE: &str = "API Key is incorrect.";

/// `check` message for any other upstream failure
pub const INVALID_CONFIG_MESSAGE: &str =
    "Input configuration is incorrect. Please verify the API key.";

/// `read` log line when the catalog does not select `best_sellers`
pub const NO_STREAMS_MESSAGE: &str = "No streams selected";

/// Classify the status returned by the check endpoint
pub fn classify_check_status(status: StatusCode) -> ConnectionStatus {
    match status {
        StatusCode::OK => ConnectionStatus::succeeded(),
        StatusCode::FORBIDDEN => ConnectionStatus::failed(INVALID_API_KEY_MESSAGE),
        _ => ConnectionStatus::failed(INVALID_CONFIG_MESSAGE),
    }
}

/// Connector for the NYTimes Books API
#[derive(Debug)]
pub struct NytBooksSource {
    client: HttpClient,
}

impl NytBooksSource {
    /// Create a source over an existing client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Create a source pointed at the public API
    pub fn public() -> Result<Self> {
        Self::for_base_url(DEFAULT_BASE_URL)
    }

    /// Create a source pointed at the base URL chosen by `config`
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Self::for_base_url(config.base_url())
    }

    fn for_base_url(base_url: &str) -> Result<Self> {
        let http_config = HttpClientConfig::builder().base_url(base_url).build();
        Ok(Self::new(HttpClient::with_config(http_config)?))
    }
}

#[async_trait]
impl Connector for NytBooksSource {
    fn spec(&self) -> ConnectorSpecification {
        ConnectorSpecification {
            documentation_url: DOCUMENTATION_URL.to_string(),
            connection_specification: json!({
                "$schema": "http://json-schema.org/draft-07/schema#",
                "title": "NYTimes Books API Spec",
                "type": "object",
                "required": ["api_key"],
                "additionalProperties": false,
                "properties": {
                    "api_key": {
                        "type": "string",
                        "title": "API Key",
                        "description": "Books API key from the NYTimes developer portal",
                        "airbyte_secret": true
                    },
                    "base_url": {
                        "type": "string",
                        "title": "Base URL",
                        "description": "Override for the API base URL",
                        "default": DEFAULT_BASE_URL,
                        "format": "uri"
                    }
                }
            }),
            supports_incremental: false,
            supported_destination_sync_modes: vec![
                DestinationSyncMode::Overwrite,
                DestinationSyncMode::Append,
            ],
            record_schemas: BTreeMap::from([(STREAM_NAME.to_string(), json_schema())]),
        }
    }

    async fn check(&self, config: &SourceConfig) -> ConnectionStatus {
        match self.client.call_endpoint(CHECK_PATH, &config.api_key).await {
            Ok(response) => {
                let status = classify_check_status(response.status);
                debug!(
                    status = response.status_code(),
                    succeeded = status.is_success(),
                    "Connection check classified"
                );
                status
            }
            Err(e) => {
                warn!(error = %e, "Connection check could not reach the API");
                ConnectionStatus::failed(format!("Could not reach the Books API: {e}"))
            }
        }
    }

    fn discover(&self) -> Catalog {
        Catalog {
            streams: vec![catalog_stream()],
        }
    }

    async fn read(
        &self,
        config: &SourceConfig,
        catalog: &ConfiguredCatalog,
        out: &mut (dyn MessageSink + Send),
    ) -> Result<usize> {
        let Some(configured) = catalog.find_stream(STREAM_NAME) else {
            out.emit(&Message::info(NO_STREAMS_MESSAGE))?;
            return Ok(0);
        };

        match configured.sync_mode {
            Some(SyncMode::FullRefresh) => {}
            Some(mode) => return Err(Error::unsupported_sync_mode(STREAM_NAME, mode)),
            None => return Err(Error::unsupported_sync_mode(STREAM_NAME, "no sync mode")),
        }
        config.validate()?;

        let response = self
            .client
            .call_endpoint(HISTORY_PATH, &config.api_key)
            .await?;
        if !response.is_ok() {
            return Err(Error::upstream_status(response.status_code()));
        }

        let body = response.json()?;
        let results = extract_results(&body)?;
        debug!(count = results.len(), "Fetched best-seller history");

        for (index, item) in results.iter().enumerate() {
            let record = project_at(index, item)?;
            out.emit(&Message::record(STREAM_NAME, record.to_value()?))?;
        }

        info!(records = results.len(), stream = STREAM_NAME, "Finished reading stream");
        Ok(results.len())
    }
}

#[cfg(test)]
mod tests;
