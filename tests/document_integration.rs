//! Integration tests for file and node retrieval.

use std::sync::Arc;

use figma_fetch::{DesignSimplifier, FigmaError, FigmaService, RawDesign};
use serde::Serialize;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::{RecordingLogger, service_with_config, test_config, test_service};

#[tokio::test]
async fn test_get_file_passes_depth_and_returns_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/ABC123"))
        .and(query_param("depth", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Landing",
            "document": {"id": "0:0", "children": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (service, logger) = test_service(&server);
    let design = service.get_file("ABC123", Some(2)).await.unwrap();

    assert_eq!(design["name"], "Landing");
    let lines = logger.lines();
    assert!(
        lines.iter().any(|l| l == "Retrieving Figma file: ABC123 (depth: 2)"),
        "{lines:?}"
    );
    assert!(lines.iter().any(|l| l == "Got response"), "{lines:?}");
}

#[tokio::test]
async fn test_get_file_without_depth_omits_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/ABC123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Landing"})))
        .expect(1)
        .mount(&server)
        .await;

    let (service, logger) = test_service(&server);
    service.get_file("ABC123", None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
    assert!(
        logger
            .lines()
            .iter()
            .any(|l| l == "Retrieving Figma file: ABC123 (depth: default)")
    );
}

#[tokio::test]
async fn test_get_file_not_found_propagates_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"status": 404, "err": "Not found"})))
        .mount(&server)
        .await;

    let (service, logger) = test_service(&server);
    let err = service.get_file("missing", None).await.unwrap_err();

    assert!(matches!(err, FigmaError::Service { status: 404, .. }), "got: {err:?}");
    assert!(!logger.lines().iter().any(|l| l == "Got response"));
}

#[tokio::test]
async fn test_get_node_requests_single_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/ABC123/nodes"))
        .and(query_param("ids", "1:2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Landing",
            "nodes": {"1:2": {"document": {"id": "1:2", "name": "Hero"}}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (service, logger) = test_service(&server);
    let design = service.get_node("ABC123", "1:2", None).await.unwrap();

    assert_eq!(design["nodes"]["1:2"]["document"]["name"], "Hero");
    assert!(
        logger
            .lines()
            .iter()
            .any(|l| l == "Got response from getNode, now parsing.")
    );
}

#[tokio::test]
async fn test_get_node_passes_depth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/ABC123/nodes"))
        .and(query_param("ids", "1:2"))
        .and(query_param("depth", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nodes": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _logger) = test_service(&server);
    service.get_node("ABC123", "1:2", Some(3)).await.unwrap();
}

#[tokio::test]
async fn test_dev_mode_writes_raw_and_simplified_snapshots() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/ABC123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Landing"})))
        .mount(&server)
        .await;

    let logs = TempDir::new().unwrap();
    let config = test_config(&server).with_dev_mode(true, logs.path().join("logs"));
    let (service, _logger) = service_with_config(config);

    service.get_file("ABC123", None).await.unwrap();

    let raw = std::fs::read_to_string(logs.path().join("logs/figma-raw.json")).unwrap();
    let simplified =
        std::fs::read_to_string(logs.path().join("logs/figma-simplified.json")).unwrap();
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&raw).unwrap(),
        json!({"name": "Landing"})
    );
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&simplified).unwrap(),
        json!({"name": "Landing"})
    );
}

#[tokio::test]
async fn test_dev_mode_off_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let logs = TempDir::new().unwrap();
    let config = test_config(&server).with_dev_mode(false, logs.path().join("logs"));
    let (service, _logger) = service_with_config(config);

    service.get_file("ABC123", None).await.unwrap();

    assert!(!logs.path().join("logs").exists());
}

#[derive(Debug, Serialize, PartialEq)]
struct Summary {
    source: &'static str,
    name: String,
}

struct SummarySimplifier;

impl DesignSimplifier for SummarySimplifier {
    type Output = Summary;

    fn simplify(&self, raw: &RawDesign) -> Summary {
        let source = match raw {
            RawDesign::File(_) => "file",
            RawDesign::Nodes(_) => "nodes",
        };
        Summary {
            source,
            name: raw.as_json()["name"].as_str().unwrap_or_default().to_string(),
        }
    }
}

#[tokio::test]
async fn test_custom_simplifier_sees_both_payload_shapes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/ABC123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Landing"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/files/ABC123/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Landing"})))
        .mount(&server)
        .await;

    let service = FigmaService::with_parts(
        test_config(&server),
        Arc::new(RecordingLogger::default()),
        SummarySimplifier,
    )
    .unwrap();

    let file = service.get_file("ABC123", None).await.unwrap();
    let node = service.get_node("ABC123", "1:2", None).await.unwrap();

    assert_eq!(
        file,
        Summary {
            source: "file",
            name: "Landing".to_string()
        }
    );
    assert_eq!(node.source, "nodes");
    assert_eq!(node.name, "Landing");
}
