//! The request pipeline: generate, render, upload, clean up.
//!
//! Strictly sequential; each stage's output is the next stage's sole input,
//! and any stage failure is fatal for the request. The local artifact is
//! removed after a successful upload and on upload failure; cleanup itself
//! never fails the request.

use animagen_storage::cleanup::delete_local_video;

use crate::error::AppError;
use crate::state::AppState;

/// Run the full pipeline for one prompt and return the public video URL.
pub async fn run(state: &AppState, prompt: &str) -> Result<String, AppError> {
    let code = state.generator.generate_scene_code(prompt).await?;

    tracing::info!("Executing manim script");
    let video_path = state.runner.render_script(&code).await?;
    tracing::info!(path = %video_path.display(), "Video rendered");

    let video_url = match state.storage.upload_video(&video_path).await {
        Ok(url) => url,
        Err(e) => {
            // The artifact is owned by this request; don't leave it behind
            // just because the upload failed.
            delete_local_video(&video_path);
            return Err(e.into());
        }
    };
    tracing::info!(url = %video_url, "Video uploaded to Supabase");

    delete_local_video(&video_path);
    tracing::info!("Local video file cleaned up");

    Ok(video_url)
}
