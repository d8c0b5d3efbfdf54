//! Handler for the `/generate-video` endpoint.

use axum::extract::State;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::pipeline;
use crate::state::AppState;

/// An animation generation request.
#[derive(Debug, Deserialize, Validate)]
pub struct AnimationRequest {
    /// The user's description of the animation concept.
    #[validate(length(min = 10, message = "prompt must be at least 10 characters long"))]
    pub prompt: String,
}

/// Response payload for a successfully generated video.
#[derive(Debug, Serialize)]
pub struct AnimationResponse {
    /// Public URL of the uploaded video.
    pub video_url: String,
    /// Human-readable status message.
    pub message: &'static str,
}

/// POST /generate-video -- run the generate → render → upload pipeline.
async fn create_animation_video(
    State(state): State<AppState>,
    Json(request): Json<AnimationRequest>,
) -> AppResult<Json<AnimationResponse>> {
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    tracing::info!(prompt_len = request.prompt.len(), "Animation request received");

    let video_url = pipeline::run(&state, &request.prompt).await?;

    Ok(Json(AnimationResponse {
        video_url,
        message: "Video generated and uploaded successfully",
    }))
}

/// Mount the generation route.
pub fn router() -> Router<AppState> {
    Router::new().route("/generate-video", post(create_animation_video))
}
