#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use animagen_api::config::ServerConfig;
use animagen_api::routes;
use animagen_api::state::AppState;
use animagen_gemini::{GeminiClient, GeminiConfig};
use animagen_render::{RenderConfig, ScriptRunner};
use animagen_storage::{StorageConfig, SupabaseStorage};

/// Build a test `ServerConfig` with safe defaults and the given media dir.
pub fn test_config(media_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_dir,
    }
}

/// Build an `AppState` whose pipeline components point at the given
/// endpoints. Tests that never run the pipeline can pass throwaway values.
pub fn test_state(
    media_dir: PathBuf,
    gemini_base: String,
    supabase_url: String,
    render_config: RenderConfig,
) -> AppState {
    let gemini = GeminiConfig {
        api_key: "test-key".to_string(),
        model: "gemini-1.5-flash".to_string(),
        api_base: gemini_base,
    };
    let storage = StorageConfig {
        url: supabase_url,
        key: "anon-key".to_string(),
        bucket: "manim-videos".to_string(),
    };

    AppState {
        config: Arc::new(test_config(media_dir)),
        generator: Arc::new(GeminiClient::new(gemini)),
        runner: Arc::new(ScriptRunner::new(render_config)),
        storage: Arc::new(SupabaseStorage::new(storage)),
    }
}

/// A state for tests that only exercise routing, health, or local file
/// serving — the pipeline endpoints are unreachable throwaways.
pub fn minimal_state(media_dir: PathBuf) -> AppState {
    test_state(
        media_dir,
        "http://127.0.0.1:9".to_string(),
        "http://127.0.0.1:9".to_string(),
        RenderConfig::default(),
    )
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::router())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Send a GET request to the app and return the response.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body to the app and return the response.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Write an executable stub renderer into `dir` and return its path.
///
/// The stub mimics manim's output layout: it derives the script stem from
/// its second argument and writes the given bytes to
/// `media/videos/{stem}/480p15/{scene}.mp4` relative to its cwd.
#[cfg(unix)]
pub fn write_stub_renderer(dir: &Path, video_bytes: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-manim");
    let script = format!(
        r#"#!/bin/sh
stem=$(basename "$2" .py)
mkdir -p "media/videos/$stem/480p15"
printf '%s' '{video_bytes}' > "media/videos/$stem/480p15/$3.mp4"
"#
    );
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
