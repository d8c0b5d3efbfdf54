//! Subprocess execution of the manim renderer.
//!
//! [`ScriptRunner::render_script`] persists the script body to a uniquely
//! named temp file, discovers the scene class before spawning anything,
//! invokes `manim` as a blocking subprocess with a fixed quality flag, and
//! locates the produced video by the naming convention in
//! [`animagen_core::naming`].
//!
//! There is no timeout on the subprocess; a hung renderer hangs the
//! current request.

use std::path::{Path, PathBuf};

use animagen_core::naming::rendered_video_path;
use animagen_core::scene::find_scene_class;
use animagen_core::CoreError;

/// Errors from the rendering layer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The generated script has no top-level class declaration. Reported
    /// before any subprocess is spawned.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The renderer binary could not be launched at all.
    #[error("failed to launch renderer '{binary}': {source}")]
    Spawn {
        binary: String,
        source: std::io::Error,
    },

    /// The renderer exited non-zero.
    #[error("manim rendering failed (exit code {exit_code:?}): {stderr}")]
    RenderFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The renderer exited cleanly but the conventional output path is
    /// missing.
    #[error("manim output video not found at expected path: {0}")]
    OutputMissing(String),

    /// Filesystem error while writing or inspecting files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for the script runner.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Renderer executable (default: `manim`).
    pub binary: String,
    /// Quality flag passed to the renderer (default: `-ql`, 480p15).
    pub quality_flag: String,
    /// Media root the renderer writes under, relative to `work_dir`
    /// (default: `media`).
    pub media_root: PathBuf,
    /// Directory temp scripts are written to and the renderer runs in
    /// (default: the process working directory).
    pub work_dir: PathBuf,
}

impl RenderConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Default |
    /// |----------------------|---------|
    /// | `MANIM_BINARY`       | `manim` |
    /// | `MANIM_QUALITY_FLAG` | `-ql`   |
    /// | `MEDIA_ROOT`         | `media` |
    /// | `RENDER_WORK_DIR`    | `.`     |
    pub fn from_env() -> Self {
        Self {
            binary: std::env::var("MANIM_BINARY").unwrap_or_else(|_| "manim".into()),
            quality_flag: std::env::var("MANIM_QUALITY_FLAG").unwrap_or_else(|_| "-ql".into()),
            media_root: std::env::var("MEDIA_ROOT")
                .unwrap_or_else(|_| "media".into())
                .into(),
            work_dir: std::env::var("RENDER_WORK_DIR")
                .unwrap_or_else(|_| ".".into())
                .into(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            binary: "manim".into(),
            quality_flag: "-ql".into(),
            media_root: "media".into(),
            work_dir: ".".into(),
        }
    }
}

/// Renders generated script bodies via the external manim CLI.
pub struct ScriptRunner {
    config: RenderConfig,
}

impl ScriptRunner {
    /// Create a runner from configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a script body to a video file and return the video's path.
    ///
    /// The temp script file is removed on both success and failure paths
    /// (best-effort; a failed removal is logged, not raised).
    ///
    /// # Errors
    ///
    /// - [`RenderError::Core`] when the script declares no class (checked
    ///   before spawning).
    /// - [`RenderError::Spawn`] / [`RenderError::RenderFailed`] for renderer
    ///   launch and non-zero-exit failures, with captured stderr.
    /// - [`RenderError::OutputMissing`] when the conventional output path
    ///   does not exist after a clean exit.
    pub async fn render_script(&self, code: &str) -> Result<PathBuf, RenderError> {
        let script_stem = format!("temp_manim_script_{}", uuid::Uuid::new_v4());
        let script_path = self.config.work_dir.join(format!("{script_stem}.py"));

        tokio::fs::write(&script_path, code).await?;

        let result = self.render_written_script(code, &script_path, &script_stem).await;

        // Temp script cleanup happens on every path, success or failure.
        if let Err(e) = tokio::fs::remove_file(&script_path).await {
            tracing::warn!(
                path = %script_path.display(),
                error = %e,
                "Failed to remove temp script",
            );
        }

        result
    }

    /// The render steps that run while the temp script exists on disk.
    /// Kept separate so the caller can guarantee cleanup around it.
    async fn render_written_script(
        &self,
        code: &str,
        script_path: &Path,
        script_stem: &str,
    ) -> Result<PathBuf, RenderError> {
        let scene = find_scene_class(code)?;

        tracing::info!(
            scene = %scene,
            script = %script_path.display(),
            "Rendering scene",
        );

        let output = tokio::process::Command::new(&self.config.binary)
            .arg(&self.config.quality_flag)
            .arg(script_path)
            .arg(&scene)
            .current_dir(&self.config.work_dir)
            .output()
            .await
            .map_err(|e| RenderError::Spawn {
                binary: self.config.binary.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::error!(
                exit_code = ?output.status.code(),
                stderr = %stderr,
                "Manim execution failed",
            );
            return Err(RenderError::RenderFailed {
                exit_code: output.status.code(),
                stderr,
            });
        }

        tracing::debug!(
            stdout = %String::from_utf8_lossy(&output.stdout),
            "Manim finished",
        );

        let media_root = self.config.work_dir.join(&self.config.media_root);
        let video_path = rendered_video_path(&media_root, script_stem, &scene);

        if !tokio::fs::try_exists(&video_path).await.unwrap_or(false) {
            return Err(RenderError::OutputMissing(
                video_path.to_string_lossy().into_owned(),
            ));
        }

        Ok(video_path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// The stub renderer relies on `/bin/sh` and unix permission bits.
#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SCENE_SCRIPT: &str =
        "from manim import *\n\nclass DemoScene(Scene):\n    def construct(self):\n        pass\n";

    /// Write an executable stub renderer into `dir` and return its path.
    ///
    /// The stub mimics manim's output layout: it derives the script stem
    /// from its second argument and creates
    /// `media/videos/{stem}/480p15/{scene}.mp4` relative to its cwd.
    fn write_stub_renderer(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-manim");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn config_for(dir: &Path, binary: &Path) -> RenderConfig {
        RenderConfig {
            binary: binary.to_string_lossy().into_owned(),
            quality_flag: "-ql".into(),
            media_root: "media".into(),
            work_dir: dir.to_path_buf(),
        }
    }

    /// No temp script (or any other stray file) may remain in the work dir.
    fn assert_no_temp_scripts(dir: &Path) {
        let leftovers: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("temp_manim_script_"))
            .collect();
        assert!(leftovers.is_empty(), "leftover temp scripts: {leftovers:?}");
    }

    #[tokio::test]
    async fn script_without_class_fails_before_spawning() {
        let dir = tempfile::tempdir().unwrap();
        // A binary that would fail loudly if it were ever invoked.
        let stub = write_stub_renderer(dir.path(), "echo 'should not run' >&2; exit 99");
        let runner = ScriptRunner::new(config_for(dir.path(), &stub));

        let err = runner.render_script("print('no scene')\n").await.unwrap_err();

        assert_matches!(err, RenderError::Core(CoreError::NoSceneClass));
        assert_no_temp_scripts(dir.path());
    }

    #[tokio::test]
    async fn successful_render_returns_conventional_path() {
        let dir = tempfile::tempdir().unwrap();
        let stub = write_stub_renderer(
            dir.path(),
            r#"stem=$(basename "$2" .py)
mkdir -p "media/videos/$stem/480p15"
: > "media/videos/$stem/480p15/$3.mp4""#,
        );
        let runner = ScriptRunner::new(config_for(dir.path(), &stub));

        let video_path = runner.render_script(SCENE_SCRIPT).await.unwrap();

        assert!(video_path.exists());
        assert!(video_path
            .to_string_lossy()
            .ends_with("/480p15/DemoScene.mp4"));
        assert!(video_path
            .to_string_lossy()
            .contains("media/videos/temp_manim_script_"));
        assert_no_temp_scripts(dir.path());
    }

    #[tokio::test]
    async fn renderer_failure_surfaces_stderr_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let stub = write_stub_renderer(dir.path(), "echo 'LaTeX not found' >&2; exit 3");
        let runner = ScriptRunner::new(config_for(dir.path(), &stub));

        let err = runner.render_script(SCENE_SCRIPT).await.unwrap_err();

        assert_matches!(
            err,
            RenderError::RenderFailed { exit_code: Some(3), ref stderr } if stderr.contains("LaTeX not found")
        );
        assert_no_temp_scripts(dir.path());
    }

    #[tokio::test]
    async fn clean_exit_without_output_is_output_missing() {
        let dir = tempfile::tempdir().unwrap();
        let stub = write_stub_renderer(dir.path(), "exit 0");
        let runner = ScriptRunner::new(config_for(dir.path(), &stub));

        let err = runner.render_script(SCENE_SCRIPT).await.unwrap_err();

        assert_matches!(err, RenderError::OutputMissing(ref path) if path.contains("480p15"));
        assert_no_temp_scripts(dir.path());
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let runner = ScriptRunner::new(config_for(dir.path(), &missing));

        let err = runner.render_script(SCENE_SCRIPT).await.unwrap_err();

        assert_matches!(err, RenderError::Spawn { .. });
        assert_no_temp_scripts(dir.path());
    }
}
