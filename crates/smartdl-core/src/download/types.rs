//! Inputs and outputs of one download.

use serde::Serialize;
use std::path::PathBuf;

/// What to download and where. Immutable for the duration of a call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    /// Free text (title, description) used to name the file.
    pub context: Option<String>,
    /// Target directory; the engine's default when `None`.
    pub target_directory: Option<PathBuf>,
    /// Exact filename to use instead of a generated one.
    pub filename_override: Option<String>,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn in_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target_directory = Some(dir.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename_override = Some(filename.into());
        self
    }
}

/// The URL actually fetched, after rewrites and landing-page resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub final_url: String,
    pub warnings: Vec<String>,
}

/// Response facts recorded for a completed download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadMetadata {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub final_url: String,
}

/// Outcome of one URL. `path` is `None` only for failed batch items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadResult {
    pub path: Option<PathBuf>,
    pub url: String,
    pub warnings: Vec<String>,
    pub metadata: Option<DownloadMetadata>,
}

impl DownloadResult {
    /// Batch record for a URL that could not be downloaded.
    pub fn failed(url: &str, error: &dyn std::fmt::Display) -> Self {
        Self {
            path: None,
            url: url.to_string(),
            warnings: vec![format!("Failed: {error}")],
            metadata: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.path.is_some()
    }
}
