#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use studybot::config::{GeminiConfig, StudybotConfig};
use studybot::gemini::GeminiClient;
use studybot::handlers::AppState;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GENERATE_PATH: &str = "/v1/models/gemini-pro:generateText";
pub const PAGES_PATH: &str = "/v1/pages";
pub const NOTION_TOKEN: &str = "secret_test";
pub const DATABASE_ID: &str = "db-test";

/// Config pointing both services at mock servers, with Notion fully configured.
pub fn test_config(gemini: &MockServer, notion: &MockServer, keys: &[&str]) -> StudybotConfig {
    let mut config = StudybotConfig::default();
    config.gemini.base_url = gemini.uri();
    config.gemini.api_keys = keys.iter().map(|k| k.to_string()).collect();
    config.notion.base_url = notion.uri();
    config.notion.api_key = Some(NOTION_TOKEN.to_string());
    config.notion.database_id = Some(DATABASE_ID.to_string());
    config
}

/// Base URL of a server that has already shut down, so connections are refused.
pub async fn closed_uri() -> String {
    // wiremock pools `MockServer`s and keeps their ports listening after drop,
    // so bind and release a plain listener to get a port that really refuses.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// A Gemini client with the given key slots, talking to `server`.
pub fn gemini_client(server: &MockServer, keys: &[&str]) -> GeminiClient {
    GeminiClient::new(&GeminiConfig {
        base_url: server.uri(),
        api_keys: keys.iter().map(|k| k.to_string()).collect(),
        ..GeminiConfig::default()
    })
    .unwrap()
}

/// Serve the app on an ephemeral port and return its base URL.
pub async fn spawn_app(config: &StudybotConfig) -> String {
    let state = Arc::new(AppState::from_config(config).unwrap());
    let app = studybot::server::router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Gemini answers `key` with a `text` field.
pub fn gemini_replies(key: &str, text: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", key))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": text })))
}

/// Gemini answers `key` with an arbitrary response.
pub fn gemini_responds(key: &str, response: ResponseTemplate) -> Mock {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", key))
        .respond_with(response)
}

/// Notion answers every page creation with `status` and a JSON body.
pub fn notion_responds(status: u16, body: Value) -> Mock {
    Mock::given(method("POST"))
        .and(path(PAGES_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
}

/// JSON bodies of every request `server` has received.
pub async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.body_json::<Value>().unwrap())
        .collect()
}

pub async fn post_json(url: &str, body: &Value) -> reqwest::Response {
    reqwest::Client::new().post(url).json(body).send().await.unwrap()
}
