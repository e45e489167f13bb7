//! HTTP client module
//!
//! Provides the client used to reach the NYTimes Books API.
//!
//! # Features
//!
//! - **Fixed Base URL**: Paths are joined onto a single configured base
//! - **Query Authentication**: The API key travels as the `api-key` parameter
//! - **Raw Responses**: Status and body are returned as data for the caller
//!   to classify

mod client;

pub use client::{ApiResponse, HttpClient, HttpClientConfig, API_KEY_PARAM, DEFAULT_BASE_URL};
