//! Handler for the backward-compatibility `/video/{*path}` endpoint.
//!
//! Earlier deployments served rendered videos straight off the local disk;
//! this endpoint keeps those URLs working. New clients get a Supabase
//! public URL from `/generate-video` instead.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use serde_json::json;
use std::path::Component;
use tokio_util::io::ReaderStream;

use crate::state::AppState;

/// GET /video/{*path} -- serve a locally cached video file.
///
/// The wildcard capture arrives percent-decoded, so the requested path may
/// contain anything, including an absolute path (which `PathBuf::join`
/// would substitute for the media root wholesale). Only plain path
/// segments are accepted; root dirs, prefixes, and `..` are all rejected.
async fn get_video(State(state): State<AppState>, Path(video_path): Path<String>) -> Response {
    let requested = std::path::Path::new(&video_path);
    if requested
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return not_found();
    }

    let full_path = state.config.media_dir.join(requested);

    let file = match tokio::fs::File::open(&full_path).await {
        Ok(file) => file,
        Err(_) => return not_found(),
    };

    let content_length = match file.metadata().await {
        Ok(meta) if meta.is_file() => meta.len(),
        _ => return not_found(),
    };

    let stream = ReaderStream::new(file);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(header::CONTENT_LENGTH, content_length.to_string())
        .body(Body::from_stream(stream))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Video not found" })),
    )
        .into_response()
}

/// Mount the local video route.
pub fn router() -> Router<AppState> {
    Router::new().route("/video/{*path}", get(get_video))
}
