use std::sync::Arc;

use animagen_gemini::CodeGenerator;
use animagen_render::ScriptRunner;
use animagen_storage::SupabaseStorage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Code-generation client (trait object so tests can inject a fake).
    pub generator: Arc<dyn CodeGenerator>,
    /// Manim script runner.
    pub runner: Arc<ScriptRunner>,
    /// Supabase Storage client.
    pub storage: Arc<SupabaseStorage>,
}
