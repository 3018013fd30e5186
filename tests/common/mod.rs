//! Shared helpers for router-level tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use cses_blog::{
    AppState,
    assistant::{AiAssistant, AssistantError, DisabledAssistant, TagSuggestion},
    cache::MemoryViewCache,
    config::{AdminConfig, AiConfig, CacheConfig, Config, DatabaseConfig, JwtConfig, ServerConfig},
    create_router,
    db::repositories::MemorySolutionStore,
};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct-horse";
pub const JWT_SECRET: &str = "integration-secret";

/// Assistant answering with canned output
pub struct StubAssistant;

#[async_trait]
impl AiAssistant for StubAssistant {
    async fn summarize(&self, text: &str) -> Result<String, AssistantError> {
        Ok(format!("Summary of {} characters.", text.chars().count()))
    }

    async fn suggest_tags_and_category(&self, _text: &str) -> Result<TagSuggestion, AssistantError> {
        Ok(TagSuggestion {
            tags: vec!["dp".to_string(), "greedy".to_string()],
            categories: vec!["Introductory".to_string()],
        })
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "warn".to_string(),
            json_logs: false,
        },
        database: DatabaseConfig {
            url: None,
            name: None,
            max_connections: 1,
        },
        cache: CacheConfig {
            redis_url: None,
            ttl_secs: 60,
        },
        admin: AdminConfig {
            username: Some(ADMIN_USERNAME.to_string()),
            password: Some(ADMIN_PASSWORD.to_string()),
            password_hash: None,
            secure_cookie: false,
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            expiry_hours: 1,
        },
        ai: AiConfig {
            api_url: None,
            api_key: None,
            model: "stub".to_string(),
            timeout_secs: 1,
        },
    }
}

/// Router over fresh in-memory storage with the stub assistant
pub fn test_app() -> Router {
    app_with(Arc::new(StubAssistant), test_config())
}

/// Router whose assistant is not configured
pub fn app_without_assistant() -> Router {
    app_with(Arc::new(DisabledAssistant), test_config())
}

pub fn app_with(assistant: Arc<dyn AiAssistant>, config: Config) -> Router {
    let state = AppState::new(
        Arc::new(MemorySolutionStore::new()),
        Arc::new(MemoryViewCache::new(config.cache.ttl_secs)),
        assistant,
        config,
    );
    create_router(state)
}

/// Response pieces the tests look at
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn json_request(method: Method, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("admin_auth_token={}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("admin_auth_token={}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_empty(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("admin_auth_token={}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn two_sets() -> Value {
    json!({
        "title": "Two Sets",
        "problemId": "1092",
        "problemStatementLink": "https://cses.fi/problemset/task/1092",
        "sections": [
            {"type": "paragraph", "content": "Split 1..n into two sets with equal sums."},
            {"type": "code", "content": "int main() {}"}
        ],
        "tags": "dp, greedy",
        "category": "Introductory"
    })
}

pub async fn submit(app: &Router, body: Value) -> TestResponse {
    send(app, json_request(Method::POST, "/api/solutions", body, None)).await
}

/// Log in as the configured admin and return the session token
pub async fn login(app: &Router) -> String {
    let response = send(
        app,
        json_request(
            Method::POST,
            "/api/admin/login",
            json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD}),
            None,
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    response.body["token"].as_str().unwrap().to_string()
}
