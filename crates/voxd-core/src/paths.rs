//! On-disk layout: data root and voice model storage.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors resolving application paths.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("could not determine a platform data directory")]
    NoDataDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application data root (`{platform data dir}/voxd`).
pub fn data_root() -> Result<PathBuf, PathError> {
    dirs::data_dir()
        .map(|dir| dir.join("voxd"))
        .ok_or(PathError::NoDataDir)
}

/// Directory where voice models are materialized.
///
/// `override_dir` (settings/CLI) wins; otherwise `{data_root}/voice_models`.
/// When the chosen directory is not writable, falls back to
/// `~/.voxd/voice_models` so a read-only install location does not break
/// lazy downloads.
pub fn models_dir(override_dir: Option<&Path>) -> Result<PathBuf, PathError> {
    let preferred = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => data_root()?.join("voice_models"),
    };

    if is_writable(&preferred) {
        return Ok(preferred);
    }

    let fallback = dirs::home_dir()
        .map(|home| home.join(".voxd").join("voice_models"))
        .ok_or(PathError::NoDataDir)?;
    tracing::warn!(
        preferred = %preferred.display(),
        fallback = %fallback.display(),
        "model directory not writable, falling back"
    );
    Ok(fallback)
}

/// Best-effort writability probe: the directory (or its closest existing
/// ancestor) must be creatable.
fn is_writable(dir: &Path) -> bool {
    if dir.exists() {
        let probe = dir.join(".voxd-write-probe");
        match std::fs::File::create(&probe) {
            Ok(_) => {
                let _ = std::fs::remove_file(&probe);
                true
            }
            Err(_) => false,
        }
    } else {
        std::fs::create_dir_all(dir).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_dir_wins_when_writable() {
        let tmp = std::env::temp_dir().join("voxd-paths-test");
        let resolved = models_dir(Some(&tmp)).unwrap();
        assert_eq!(resolved, tmp);
        let _ = std::fs::remove_dir_all(&tmp);
    }
}
