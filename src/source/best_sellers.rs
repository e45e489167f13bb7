//! The `best_sellers` stream
//!
//! Records come from the best-seller history endpoint, one per entry of the
//! response's `results` array. Each record is a projection of the upstream
//! item: the listed keys are copied with their values untouched and every
//! other key is dropped.

use crate::config::CatalogStream;
use crate::error::{Error, Result};
use crate::types::{JsonValue, SyncMode};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Stream name in the catalog
pub const STREAM_NAME: &str = "best_sellers";

/// Endpoint serving the full best-seller history
pub const HISTORY_PATH: &str = "lists/best-sellers/history.json";

/// One book from the best-seller history.
///
/// Every key must be present upstream. Values may be `null`, and the nested
/// groups are passed through as delivered (the live API sends arrays).
/// A text field holding anything other than a string or `null` makes the
/// item malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(deserialize_with = "Option::deserialize")]
    pub title: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub description: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub contributor: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub author: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub contributor_note: Option<String>,
    pub price: JsonValue,
    #[serde(deserialize_with = "Option::deserialize")]
    pub age_group: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub publisher: Option<String>,
    pub isbns: JsonValue,
    pub ranks_history: JsonValue,
    pub reviews: JsonValue,
}

impl BookRecord {
    /// Project an upstream result item onto the record fields
    pub fn project(item: &JsonValue) -> std::result::Result<Self, serde_json::Error> {
        Self::deserialize(item)
    }

    /// Record as a JSON value for a `RECORD` message
    pub fn to_value(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Borrow the `results` array from a history response body
pub fn extract_results(body: &JsonValue) -> Result<&Vec<JsonValue>> {
    body.get("results")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| Error::decode("response has no `results` array"))
}

/// Project the result item found at `index` in the response
pub fn project_at(index: usize, item: &JsonValue) -> Result<BookRecord> {
    BookRecord::project(item).map_err(|e| Error::projection(index, e.to_string()))
}

/// Catalog entry advertised by `discover`
pub fn catalog_stream() -> CatalogStream {
    CatalogStream {
        name: STREAM_NAME.to_string(),
        json_schema: json_schema(),
        supported_sync_modes: vec![SyncMode::FullRefresh],
        default_cursor_field: None,
        source_defined_primary_key: None,
    }
}

/// JSON schema of [`BookRecord`]
pub fn json_schema() -> JsonValue {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "description": { "type": "string" },
            "contributor": { "type": "string" },
            "author": { "type": "string" },
            "contributor_note": { "type": "string" },
            "price": { "type": "number" },
            "age_group": { "type": "string" },
            "publisher": { "type": "string" },
            "isbns": {
                "type": "object",
                "properties": {
                    "isbn10": { "type": "string" },
                    "isbn13": { "type": "string" }
                }
            },
            "ranks_history": {
                "type": "object",
                "properties": {
                    "primary_isbn10": { "type": "string" },
                    "primary_isbn13": { "type": "string" },
                    "rank": { "type": "number" },
                    "list_name": { "type": "string" },
                    "display_name": { "type": "string" },
                    "published_date": { "type": "string" },
                    "bestsellers_date": { "type": "string" },
                    "weeks_on_list": { "type": "number" },
                    "ranks_last_week": { "type": "string" },
                    "asterisk": { "type": "number" },
                    "dagger": { "type": "number" }
                }
            },
            "reviews": {
                "type": "object",
                "properties": {
                    "book_review_link": { "type": "string" },
                    "first_chapter_link": { "type": "string" },
                    "sunday_review_link": { "type": "string" },
                    "article_chapter_link": { "type": "string" }
                }
            }
        }
    })
}
