//! HTTP model source — downloads and extracts voice model archives.
//!
//! Archives are `.tar.bz2` bundles that extract to a single top-level
//! directory named after the voice. Extraction happens in a staging
//! directory next to the destination; the final step is a rename, so the
//! destination directory either exists complete or not at all. A crash
//! mid-extraction leaves only a staging directory, which is cleared on the
//! next attempt.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use voxd_core::ports::{ModelFetchError, ModelSource, VoiceSpec};

/// Downloads voice model archives over HTTPS.
pub struct HttpModelSource {
    client: reqwest::Client,
}

impl HttpModelSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ModelFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ModelFetchError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModelFetchError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ModelFetchError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(body.to_vec())
    }
}

impl Default for HttpModelSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelSource for HttpModelSource {
    async fn fetch(&self, spec: &VoiceSpec, dest_dir: &Path) -> Result<(), ModelFetchError> {
        let parent = dest_dir
            .parent()
            .ok_or_else(|| ModelFetchError::Extract("destination has no parent directory".into()))?;
        tokio::fs::create_dir_all(parent).await?;

        tracing::info!(
            model = %spec.id,
            url = %spec.archive_url,
            approx_bytes = spec.size_bytes,
            "downloading voice model archive"
        );
        let archive = self.download(&spec.archive_url).await?;
        tracing::debug!(model = %spec.id, bytes = archive.len(), "archive downloaded");

        let staging = parent.join(format!(".staging-{}", spec.dir_name));
        if tokio::fs::try_exists(&staging).await.unwrap_or(false) {
            tokio::fs::remove_dir_all(&staging).await?;
        }
        tokio::fs::create_dir_all(&staging).await?;

        let extracted = extract_archive(archive, staging.clone(), spec.dir_name.clone()).await;
        let extracted_dir = match extracted {
            Ok(dir) => dir,
            Err(e) => {
                let _ = tokio::fs::remove_dir_all(&staging).await;
                return Err(e);
            }
        };

        tokio::fs::rename(&extracted_dir, dest_dir).await?;
        let _ = tokio::fs::remove_dir_all(&staging).await;

        tracing::info!(model = %spec.id, dir = %dest_dir.display(), "voice model extracted");
        Ok(())
    }
}

/// Unpack the bz2 tarball on the blocking pool and return the extracted
/// model directory inside `staging`.
async fn extract_archive(
    archive: Vec<u8>,
    staging: PathBuf,
    dir_name: String,
) -> Result<PathBuf, ModelFetchError> {
    let staging_for_task = staging.clone();
    let unpacked = tokio::task::spawn_blocking(move || {
        let decoder = bzip2::read::BzDecoder::new(Cursor::new(archive));
        let mut tar = tar::Archive::new(decoder);
        tar.unpack(&staging_for_task)
    })
    .await
    .map_err(|e| ModelFetchError::Extract(format!("extraction task failed: {e}")))?;
    unpacked.map_err(|e| ModelFetchError::Extract(e.to_string()))?;

    let extracted_dir = staging.join(&dir_name);
    if !extracted_dir.is_dir() {
        return Err(ModelFetchError::Layout(dir_name));
    }
    Ok(extracted_dir)
}
