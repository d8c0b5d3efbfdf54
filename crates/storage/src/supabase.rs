//! REST client for Supabase Storage object upload and public URLs.
//!
//! Uploads go to `POST {url}/storage/v1/object/{bucket}/{object}` with
//! bearer auth; public URLs follow the
//! `{url}/storage/v1/object/public/{bucket}/{object}` convention. Each
//! sub-step (read, transfer, URL resolution) wraps its failure with enough
//! context to identify it.

use std::path::Path;

/// Content type sent with every uploaded artifact.
const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Default bucket used when `SUPABASE_BUCKET` is unset.
const DEFAULT_BUCKET: &str = "manim-videos";

/// Configuration for the storage client, loaded once at startup.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Supabase project URL, from `SUPABASE_URL` (required).
    pub url: String,
    /// Anon key used as the bearer token, from `SUPABASE_ANON_KEY` (required).
    pub key: String,
    /// Target bucket name.
    pub bucket: String,
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var             | Default        |
    /// |---------------------|----------------|
    /// | `SUPABASE_URL`      | (required)     |
    /// | `SUPABASE_ANON_KEY` | (required)     |
    /// | `SUPABASE_BUCKET`   | `manim-videos` |
    ///
    /// # Panics
    ///
    /// Panics when a required variable is unset — misconfiguration should
    /// fail at startup, not on the first upload.
    pub fn from_env() -> Self {
        let url = std::env::var("SUPABASE_URL")
            .expect("SUPABASE_URL must be set in environment variables");
        let key = std::env::var("SUPABASE_ANON_KEY")
            .expect("SUPABASE_ANON_KEY must be set in environment variables");
        let bucket = std::env::var("SUPABASE_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.into());

        Self { url, key, bucket }
    }
}

/// Errors from the storage layer, one variant per failing sub-step.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading the local artifact failed.
    #[error("failed to read video file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// The upload request itself failed (network, DNS, TLS, etc.).
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Supabase rejected the upload with a non-2xx status.
    #[error("upload failed ({status}): {body}")]
    Upload {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Client for a single Supabase Storage bucket.
pub struct SupabaseStorage {
    client: reqwest::Client,
    config: StorageConfig,
}

impl SupabaseStorage {
    /// Create a new storage client from configuration.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: StorageConfig) -> Self {
        Self { client, config }
    }

    /// Upload a local video file under a freshly generated object name and
    /// return its public URL.
    ///
    /// The object name is a UUID v4 preserving the source file's extension,
    /// so two uploads never collide.
    pub async fn upload_video(&self, video_path: &Path) -> Result<String, StorageError> {
        let extension = video_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("mp4");
        let object_name = format!("{}.{}", uuid::Uuid::new_v4(), extension);

        let data = tokio::fs::read(video_path)
            .await
            .map_err(|e| StorageError::Read {
                path: video_path.to_string_lossy().into_owned(),
                source: e,
            })?;

        tracing::info!(
            object = %object_name,
            bucket = %self.config.bucket,
            bytes = data.len(),
            "Uploading video to Supabase",
        );

        let response = self
            .client
            .post(format!(
                "{}/storage/v1/object/{}/{}",
                self.config.url, self.config.bucket, object_name
            ))
            .bearer_auth(&self.config.key)
            .header(reqwest::header::CONTENT_TYPE, VIDEO_CONTENT_TYPE)
            .body(data)
            .send()
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        if !status.is_success() {
            return Err(StorageError::Upload {
                status: status.as_u16(),
                body,
            });
        }

        // The upload response body shape has not been stable across storage
        // API versions; normalize whatever came back into a public URL.
        let parsed = serde_json::from_str(&body).ok();
        Ok(self.normalize_public_url(parsed.as_ref(), &object_name))
    }

    /// Normalize a storage response into a public URL.
    ///
    /// Compatibility shim: the storage API has returned different shapes
    /// across versions, so an enumerated set is accepted — a plain string
    /// URL, an object carrying a `publicUrl` field, or (fallback) manual
    /// construction from the configured project URL and bucket.
    fn normalize_public_url(
        &self,
        response: Option<&serde_json::Value>,
        object_name: &str,
    ) -> String {
        match response {
            Some(serde_json::Value::String(url)) if url.starts_with("http") => url.clone(),
            Some(serde_json::Value::Object(map)) => match map.get("publicUrl") {
                Some(serde_json::Value::String(url)) => url.clone(),
                _ => self.manual_public_url(object_name),
            },
            _ => self.manual_public_url(object_name),
        }
    }

    /// Construct the public URL by convention.
    fn manual_public_url(&self, object_name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.url, self.config.bucket, object_name
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
