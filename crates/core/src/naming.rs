//! Rendered-output naming convention.
//!
//! Manim writes its output under a fixed directory layout derived from the
//! script filename, the quality profile, and the scene class name. The
//! runner does not parse renderer output to find the file — it computes the
//! expected location from this convention and checks that it exists.

use std::path::{Path, PathBuf};

/// Directory segment for the low-quality profile (`-ql`: 480p at 15 fps).
pub const QUALITY_DIR: &str = "480p15";

/// File extension of rendered artifacts.
pub const VIDEO_EXT: &str = "mp4";

/// Compute the conventional path of a rendered video.
///
/// Convention: `{media_root}/videos/{script_stem}/480p15/{scene}.mp4`, where
/// `script_stem` is the temp script's filename without extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use animagen_core::naming::rendered_video_path;
///
/// let path = rendered_video_path(Path::new("media"), "temp_manim_script_abc", "DemoScene");
/// assert_eq!(path, Path::new("media/videos/temp_manim_script_abc/480p15/DemoScene.mp4"));
/// ```
pub fn rendered_video_path(media_root: &Path, script_stem: &str, scene: &str) -> PathBuf {
    media_root
        .join("videos")
        .join(script_stem)
        .join(QUALITY_DIR)
        .join(format!("{scene}.{VIDEO_EXT}"))
}
