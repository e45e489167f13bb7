//! Tests for the NYTimes Books source

use super::*;
use crate::config::{ConfiguredCatalog, SourceConfig};
use crate::connector::{ConnectionStatus, Connector};
use crate::error::Error;
use crate::output::{Message, MessageWriter};
use crate::types::{JsonValue, Status, SyncMode};
use reqwest::StatusCode;
use serde_json::json;
use pretty_assertions::assert_eq;
use test_case::test_case;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_PATH: &str = "/svc/books/v3/lists/best-sellers/history.json";

fn sample_book(title: &str) -> JsonValue {
    json!({
        "title": title,
        "description": "A look at the workings of power.",
        "contributor": "by Jane Doe",
        "author": "Jane Doe",
        "contributor_note": "",
        "price": 27.99,
        "age_group": "",
        "publisher": "Knopf",
        "isbns": [{"isbn10": "0399178570", "isbn13": "9780399178573"}],
        "ranks_history": [{
            "primary_isbn10": "0399178570",
            "primary_isbn13": "9780399178573",
            "rank": 8,
            "list_name": "Hardcover Nonfiction",
            "display_name": "Hardcover Nonfiction",
            "published_date": "2016-09-04",
            "bestsellers_date": "2016-08-20",
            "weeks_on_list": 1,
            "ranks_last_week": null,
            "asterisk": 0,
            "dagger": 0
        }],
        "reviews": [{
            "book_review_link": "",
            "first_chapter_link": "",
            "sunday_review_link": "",
            "article_chapter_link": ""
        }]
    })
}

fn catalog(sync_mode: &str) -> ConfiguredCatalog {
    serde_json::from_value(json!({
        "streams": [{
            "stream": {"name": "best_sellers", "supported_sync_modes": ["full_refresh"]},
            "sync_mode": sync_mode,
            "destination_sync_mode": "overwrite"
        }]
    }))
    .unwrap()
}

async fn source_for(server: &MockServer) -> (NytBooksSource, SourceConfig) {
    let config =
        SourceConfig::new("test-key").with_base_url(format!("{}/svc/books/v3/", server.uri()));
    let source = NytBooksSource::from_config(&config).unwrap();
    (source, config)
}

fn parse_output(writer: MessageWriter<Vec<u8>>) -> Vec<Message> {
    String::from_utf8(writer.into_inner())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn record_data(message: &Message) -> &JsonValue {
    match message {
        Message::Record { record } => {
            assert_eq!(record.stream, STREAM_NAME);
            &record.data
        }
        other => panic!("Expected record, got {other:?}"),
    }
}

// ============================================================================
// Projection Tests
// ============================================================================

#[test]
fn test_projection_keeps_modeled_fields_verbatim() {
    let item = sample_book("Foo");
    let record = BookRecord::project(&item).unwrap();

    assert_eq!(record.title.as_deref(), Some("Foo"));
    assert_eq!(record.to_value().unwrap(), item);
}

#[test]
fn test_projection_drops_extra_fields() {
    let mut item = sample_book("Foo");
    item["book_image"] = json!("https://example.com/cover.jpg");
    item["amazon_product_url"] = json!("https://example.com/buy");

    let value = BookRecord::project(&item).unwrap().to_value().unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 11);
    assert!(!object.contains_key("book_image"));
    assert_eq!(value["title"], "Foo");
}

#[test]
fn test_projection_preserves_nulls_and_string_prices() {
    let mut item = sample_book("Foo");
    item["description"] = JsonValue::Null;
    item["price"] = json!("0.00");

    let record = BookRecord::project(&item).unwrap();
    assert_eq!(record.description, None);

    let value = record.to_value().unwrap();
    assert!(value.as_object().unwrap().contains_key("description"));
    assert_eq!(value["description"], JsonValue::Null);
    assert_eq!(value["price"], "0.00");
}

#[test_case("title")]
#[test_case("contributor_note")]
#[test_case("price")]
#[test_case("isbns")]
#[test_case("reviews")]
fn test_projection_requires_every_field(field: &str) {
    let mut item = sample_book("Foo");
    item.as_object_mut().unwrap().remove(field);

    let err = project_at(4, &item).unwrap_err();
    match err {
        Error::RecordProjection { index, message } => {
            assert_eq!(index, 4);
            assert!(message.contains(field), "{message}");
        }
        other => panic!("Expected projection error, got {other}"),
    }
}

#[test]
fn test_projection_rejects_non_string_text_field() {
    let mut item = sample_book("Numbered");
    item["title"] = json!(42);

    let err = project_at(2, &item).unwrap_err();
    assert!(matches!(err, Error::RecordProjection { index: 2, .. }));
}

#[test]
fn test_extract_results() {
    let body = json!({"status": "OK", "num_results": 1, "results": [sample_book("Foo")]});
    assert_eq!(extract_results(&body).unwrap().len(), 1);

    let err = extract_results(&json!({"fault": "bad"})).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

// ============================================================================
// Spec / Discover Tests
// ============================================================================

#[test]
fn test_spec_requires_api_key() {
    let source = NytBooksSource::public().unwrap();
    let spec = source.spec();

    assert_eq!(spec.documentation_url, DOCUMENTATION_URL);
    assert!(!spec.supports_incremental);
    assert_eq!(spec.connection_specification["required"], json!(["api_key"]));
    assert_eq!(
        spec.connection_specification["properties"]["api_key"]["airbyte_secret"],
        true
    );
    assert_eq!(spec.record_schemas.len(), 1);
    assert_eq!(spec.record_schemas[STREAM_NAME], json_schema());
}

#[test]
fn test_discover_offers_single_full_refresh_stream() {
    let source = NytBooksSource::public().unwrap();
    let catalog = source.discover();

    assert_eq!(catalog.streams.len(), 1);
    let stream = &catalog.streams[0];
    assert_eq!(stream.name, "best_sellers");
    assert_eq!(stream.supported_sync_modes, vec![SyncMode::FullRefresh]);

    let properties = stream.json_schema["properties"].as_object().unwrap();
    for field in [
        "title",
        "description",
        "contributor",
        "author",
        "contributor_note",
        "price",
        "age_group",
        "publisher",
        "isbns",
        "ranks_history",
        "reviews",
    ] {
        assert!(properties.contains_key(field), "schema is missing {field}");
    }
    assert_eq!(properties["price"]["type"], "number");
}

#[test]
fn test_discover_does_not_depend_on_base_url() {
    let public = NytBooksSource::public().unwrap();
    let custom = NytBooksSource::from_config(
        &SourceConfig::new("other").with_base_url("http://localhost:1/"),
    )
    .unwrap();
    assert_eq!(public.discover(), custom.discover());
}

// ============================================================================
// Check Tests
// ============================================================================

#[test_case(200, Status::Succeeded, None ; "ok")]
#[test_case(403, Status::Failed, Some(INVALID_API_KEY_MESSAGE) ; "forbidden")]
#[test_case(401, Status::Failed, Some(INVALID_CONFIG_MESSAGE) ; "unauthorized")]
#[test_case(429, Status::Failed, Some(INVALID_CONFIG_MESSAGE) ; "throttled")]
#[test_case(500, Status::Failed, Some(INVALID_CONFIG_MESSAGE) ; "server error")]
fn test_classify_check_status(code: u16, status: Status, message: Option<&str>) {
    let result = classify_check_status(StatusCode::from_u16(code).unwrap());
    assert_eq!(result.status, status);
    assert_eq!(result.message.as_deref(), message);
}

#[tokio::test]
async fn test_check_calls_history_endpoint_with_key() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (source, config) = source_for(&mock_server).await;
    assert!(source.check(&config).await.is_success());
}

#[tokio::test]
async fn test_check_forbidden() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let (source, config) = source_for(&mock_server).await;
    let status = source.check(&config).await;
    assert_eq!(status, ConnectionStatus::failed(INVALID_API_KEY_MESSAGE));
}

#[tokio::test]
async fn test_check_unreachable_reports_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = SourceConfig::new("k").with_base_url(format!("http://{addr}/"));
    let source = NytBooksSource::from_config(&config).unwrap();

    let status = source.check(&config).await;
    assert_eq!(status.status, Status::Failed);
    assert!(status
        .message
        .unwrap()
        .starts_with("Could not reach the Books API"));
}

// ============================================================================
// Read Tests
// ============================================================================

#[tokio::test]
async fn test_read_emits_one_record_per_result_in_order() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "num_results": 3,
            "results": [sample_book("First"), sample_book("Second"), sample_book("Third")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (source, config) = source_for(&mock_server).await;
    let mut out = MessageWriter::new(Vec::new());
    let count = source
        .read(&config, &catalog("full_refresh"), &mut out)
        .await
        .unwrap();
    assert_eq!(count, 3);

    let messages = parse_output(out);
    assert_eq!(messages.len(), 3);
    let titles: Vec<&str> = messages
        .iter()
        .map(|m| record_data(m)["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert_eq!(record_data(&messages[0])["isbns"], sample_book("First")["isbns"]);
}

#[tokio::test]
async fn test_read_empty_results() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&mock_server)
        .await;

    let (source, config) = source_for(&mock_server).await;
    let mut out = MessageWriter::new(Vec::new());
    let count = source
        .read(&config, &catalog("full_refresh"), &mut out)
        .await
        .unwrap();

    assert_eq!(count, 0);
    assert_eq!(out.written(), 0);
}

#[tokio::test]
async fn test_read_without_best_sellers_logs_and_skips_api() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let other: ConfiguredCatalog = serde_json::from_value(json!({
        "streams": [{"stream": {"name": "lists"}, "sync_mode": "full_refresh"}]
    }))
    .unwrap();

    let (source, config) = source_for(&mock_server).await;
    let mut out = MessageWriter::new(Vec::new());
    let count = source.read(&config, &other, &mut out).await.unwrap();
    assert_eq!(count, 0);

    let messages = parse_output(out);
    assert_eq!(messages, vec![Message::info(NO_STREAMS_MESSAGE)]);
}

#[tokio::test]
async fn test_read_rejects_incremental_before_calling_api() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (source, config) = source_for(&mock_server).await;
    let mut out = MessageWriter::new(Vec::new());
    let err = source
        .read(&config, &catalog("incremental"), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::UnsupportedSyncMode { ref mode, .. } if mode == "incremental"
    ));
    assert_eq!(out.written(), 0);
}

#[tokio::test]
async fn test_read_rejects_entry_without_sync_mode() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [sample_book("Never")]
        })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let no_mode: ConfiguredCatalog = serde_json::from_value(json!({
        "streams": [{"stream": {"name": "best_sellers"}}]
    }))
    .unwrap();

    let (source, config) = source_for(&mock_server).await;
    let mut out = MessageWriter::new(Vec::new());
    let err = source.read(&config, &no_mode, &mut out).await.unwrap_err();

    assert!(matches!(
        err,
        Error::UnsupportedSyncMode { ref mode, .. } if mode == "no sync mode"
    ));
    assert_eq!(out.written(), 0);
}

#[tokio::test]
async fn test_read_checks_api_key_only_when_fetching() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = SourceConfig::new("").with_base_url(mock_server.uri());
    let source = NytBooksSource::from_config(&config).unwrap();

    let mut out = MessageWriter::new(Vec::new());
    let empty = ConfiguredCatalog::default();
    assert_eq!(source.read(&config, &empty, &mut out).await.unwrap(), 0);
    assert_eq!(parse_output(out), vec![Message::info(NO_STREAMS_MESSAGE)]);

    let mut out = MessageWriter::new(Vec::new());
    let err = source
        .read(&config, &catalog("full_refresh"), &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { ref field } if field == "api_key"));
    assert_eq!(out.written(), 0);
}

#[tokio::test]
async fn test_read_upstream_failure_is_fatal() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (source, config) = source_for(&mock_server).await;
    let mut out = MessageWriter::new(Vec::new());
    let err = source
        .read(&config, &catalog("full_refresh"), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UpstreamStatus { status: 500 }));
    assert!(err
        .to_string()
        .starts_with("Failure occurred when calling API"));
    assert_eq!(out.written(), 0);
}

#[tokio::test]
async fn test_read_stops_at_malformed_item() {
    let mut broken = sample_book("Broken");
    broken.as_object_mut().unwrap().remove("publisher");

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [sample_book("Good"), broken, sample_book("Never")]
        })))
        .mount(&mock_server)
        .await;

    let (source, config) = source_for(&mock_server).await;
    let mut out = MessageWriter::new(Vec::new());
    let err = source
        .read(&config, &catalog("full_refresh"), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RecordProjection { index: 1, .. }));
    let messages = parse_output(out);
    assert_eq!(messages.len(), 1);
    assert_eq!(record_data(&messages[0])["title"], "Good");
}

#[tokio::test]
async fn test_read_body_without_results_is_decode_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .mount(&mock_server)
        .await;

    let (source, config) = source_for(&mock_server).await;
    let mut out = MessageWriter::new(Vec::new());
    let err = source
        .read(&config, &catalog("full_refresh"), &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}
