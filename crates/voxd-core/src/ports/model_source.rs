//! Model source port — fetches a voice model onto the local filesystem.
//!
//! Used only by the registry when a model is not locally present.
//! Implementations must materialize the destination directory atomically:
//! download into a staging location and publish with a rename, so a
//! half-written model is never observable at the final path.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::VoiceModelId;

/// Static description of a voice model known to the catalog.
///
/// Carries everything the registry needs without touching the network or the
/// model artifact: in particular the native sample rate, which the
/// orchestrator reads to default a request's target rate before any model is
/// loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSpec {
    /// Model identifier (e.g., `"en_US-kathleen-low"`).
    pub id: VoiceModelId,

    /// Human-readable name.
    pub name: String,

    /// Native sample rate the model synthesizes at, in Hz.
    pub native_sample_rate: u32,

    /// URL of the downloadable model archive.
    pub archive_url: String,

    /// On-disk directory name of the materialized model.
    pub dir_name: String,

    /// Approximate download size in bytes.
    pub size_bytes: u64,
}

/// Errors from fetching a model artifact.
#[derive(Debug, Error)]
pub enum ModelFetchError {
    /// The source returned a non-success status.
    #[error("HTTP {status} fetching {url}")]
    Http { url: String, status: u16 },

    /// The request itself failed (connect, TLS, read).
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// Archive extraction failed.
    #[error("failed to extract model archive: {0}")]
    Extract(String),

    /// The archive did not contain the expected directory.
    #[error("archive did not contain expected directory '{0}'")]
    Layout(String),

    /// Filesystem error while staging or publishing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches a voice model artifact into a local directory.
#[async_trait]
pub trait ModelSource: Send + Sync {
    /// Materialize `spec`'s model at `dest_dir`.
    ///
    /// On success `dest_dir` exists and is complete. On failure `dest_dir`
    /// must not exist (staging keeps partial downloads out of the final
    /// path).
    async fn fetch(&self, spec: &VoiceSpec, dest_dir: &Path) -> Result<(), ModelFetchError>;
}
