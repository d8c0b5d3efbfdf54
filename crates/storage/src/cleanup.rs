//! Advisory cleanup of local rendered artifacts.
//!
//! Cleanup must never fail the overall request: every failure here is
//! logged and swallowed.

use std::path::Path;

/// Delete a local video file, then remove its parent directory if (and only
/// if) the directory is now empty.
///
/// A still-populated parent directory is left alone silently. Missing files
/// are a no-op.
pub fn delete_local_video(video_path: &Path) {
    if !video_path.exists() {
        return;
    }

    if let Err(e) = std::fs::remove_file(video_path) {
        tracing::warn!(
            path = %video_path.display(),
            error = %e,
            "Could not delete local video file",
        );
        return;
    }
    tracing::info!(path = %video_path.display(), "Deleted local video file");

    let Some(parent) = video_path.parent() else {
        return;
    };

    match std::fs::read_dir(parent) {
        Ok(mut entries) => {
            if entries.next().is_none() {
                // remove_dir fails on non-empty directories, so a race with
                // a concurrent writer is harmless.
                match std::fs::remove_dir(parent) {
                    Ok(()) => {
                        tracing::info!(path = %parent.display(), "Deleted empty directory")
                    }
                    Err(e) => tracing::debug!(
                        path = %parent.display(),
                        error = %e,
                        "Leaving parent directory in place",
                    ),
                }
            }
        }
        Err(e) => {
            tracing::debug!(
                path = %parent.display(),
                error = %e,
                "Could not inspect parent directory",
            );
        }
    }
}
