//! End-to-end checks against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every `Api`
//! endpoint over real HTTP through `UreqTransport`. Validates that request
//! building, the transport and response parsing agree with the server.

use rag_hh_core::{
    Api, ApiClient, ApiConfig, ApiError, HealthStatus, RagResponse, RequestOptions, SearchResponse, UreqTransport,
    DEFAULT_RAG_LIMIT, DEFAULT_SKILLS_LIMIT,
};

/// Start the mock server on a random port and return its origin.
async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

fn api(base: &str) -> Api<UreqTransport> {
    Api::new(ApiClient::from_config(&ApiConfig::new(base)), UreqTransport::new())
}

#[tokio::test(flavor = "multi_thread")]
async fn health_and_stats() {
    let api = api(&start_server().await);

    let health: HealthStatus = serde_json::from_value(api.health().await.unwrap()).unwrap();
    assert_eq!(health.status, "ok");

    let stats = api.get_stats().await.unwrap();
    assert_eq!(stats["total_vacancies"], 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn search_and_rag_decode_into_dtos() {
    let api = api(&start_server().await);

    let value = api.search("  python airflow  ", 3).await.unwrap();
    let search: SearchResponse = serde_json::from_value(value).unwrap();
    assert_eq!(search.query, "python airflow");
    assert_eq!(search.results.len(), 3);
    assert_eq!(search.results[0].hh_id, "100001");

    let value = api.rag("sql", DEFAULT_RAG_LIMIT).await.unwrap();
    let rag: RagResponse = serde_json::from_value(value).unwrap();
    assert_eq!(rag.sources.len(), 4);
    assert!(rag.context.starts_with("[Вакансия 1] "));
}

#[tokio::test(flavor = "multi_thread")]
async fn skills_are_unwrapped() {
    let api = api(&start_server().await);

    let skills = api.get_skills(DEFAULT_SKILLS_LIMIT).await.unwrap();
    assert_eq!(skills.len(), 10);
    assert_eq!(skills[0].name, "python");

    let skills = api.get_skills(1).await.unwrap();
    assert_eq!(skills.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn blank_query_surfaces_server_detail() {
    let api = api(&start_server().await);

    let err = api.search("   ", 3).await.unwrap_err();
    assert_eq!(err.to_string(), "Query is empty");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test(flavor = "multi_thread")]
async fn non_json_error_falls_back_to_status_text() {
    let api = api(&start_server().await);

    let err = api
        .request("/search?q=sql&limit=ten", &RequestOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Bad Request");

    let err = api.request("/missing", &RequestOptions::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "Not Found");
}

#[tokio::test(flavor = "multi_thread")]
async fn relative_base_resolves_against_origin() {
    let origin = start_server().await;
    let api = Api::new(ApiClient::new(""), UreqTransport::new().with_origin(&origin));

    let health = api.health().await.unwrap();
    assert_eq!(health["status"], "ok");
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_failure_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = api(&format!("http://{addr}")).health().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
