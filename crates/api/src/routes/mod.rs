pub mod generate;
pub mod health;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                 service health (GET)
/// /generate-video         generate, render, and upload a video (POST)
/// /video/{*path}          serve a locally cached video (GET, backward compat)
/// ```
///
/// Routes live at the root rather than under `/api/v1` because the paths
/// are a compatibility contract with existing clients.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(generate::router())
        .merge(video::router())
}
