//! Sherpa-ONNX VITS backend — runs Piper voices via `sherpa-rs`.
//!
//! Wraps `sherpa_rs::tts::VitsTts` behind the engine-agnostic
//! [`SynthesisBackend`] trait. The sherpa-rs `create` method requires
//! `&mut self`, while the trait uses `&self`, so the inner engine is
//! wrapped in an `Arc<Mutex<…>>`. Inference is CPU-bound and dispatched
//! via `tokio::task::spawn_blocking` so Tokio worker threads are never
//! stalled.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sherpa_rs::tts::{VitsTts, VitsTtsConfig};

use voxd_core::ports::{SynthesisBackend, SynthesisBackendError, VoiceSpec};

use crate::registry::BackendLoader;

/// A loaded Piper VITS voice.
pub struct SherpaVitsBackend {
    /// The sherpa-onnx engine. `VitsTts` is `Send + Sync` per sherpa-rs's
    /// own impls; the mutex exists because `create` takes `&mut self`.
    engine: Arc<Mutex<VitsTts>>,
    sample_rate: u32,
}

impl SherpaVitsBackend {
    /// Load a Piper VITS model from a directory.
    ///
    /// The directory must contain `model.onnx`, `tokens.txt`, and an
    /// `espeak-ng-data/` directory, as laid out by the release archives.
    pub fn load(model_dir: &Path, sample_rate: u32) -> anyhow::Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokens_path = model_dir.join("tokens.txt");
        let data_dir = model_dir.join("espeak-ng-data");

        for path in [&model_path, &tokens_path, &data_dir] {
            if !path.exists() {
                anyhow::bail!("missing model file: {}", path.display());
            }
        }

        tracing::info!(dir = %model_dir.display(), "loading VITS voice model");

        let config = VitsTtsConfig {
            model: path_to_string(&model_path)?,
            tokens: path_to_string(&tokens_path)?,
            data_dir: path_to_string(&data_dir)?,
            length_scale: 1.0,
            ..Default::default()
        };

        let engine = VitsTts::new(config);

        tracing::info!(dir = %model_dir.display(), "VITS voice model loaded");

        Ok(Self {
            engine: Arc::new(Mutex::new(engine)),
            sample_rate,
        })
    }
}

#[async_trait]
impl SynthesisBackend for SherpaVitsBackend {
    async fn synthesize(&self, text: &str) -> Result<Vec<i16>, SynthesisBackendError> {
        let engine = Arc::clone(&self.engine);
        let text = text.to_string();

        let audio = tokio::task::spawn_blocking(move || {
            engine
                .lock()
                .map_err(|e| SynthesisBackendError::Engine(format!("engine lock poisoned: {e}")))
                .and_then(|mut guard| {
                    guard
                        .create(&text, 0, 1.0)
                        .map_err(|e| SynthesisBackendError::Engine(e.to_string()))
                })
        })
        .await
        .map_err(|e| SynthesisBackendError::Engine(format!("synthesis task failed: {e}")))??;

        Ok(quantize(&audio.samples))
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// Loads catalog voices into [`SherpaVitsBackend`] instances.
pub struct SherpaVitsLoader;

#[async_trait]
impl BackendLoader for SherpaVitsLoader {
    async fn load(
        &self,
        spec: &VoiceSpec,
        model_dir: &Path,
    ) -> anyhow::Result<Arc<dyn SynthesisBackend>> {
        let backend = SherpaVitsBackend::load(model_dir, spec.native_sample_rate)?;
        Ok(Arc::new(backend))
    }
}

/// Convert normalized f32 samples to 16-bit PCM.
fn quantize(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| {
            #[allow(clippy::cast_possible_truncation)]
            let sample = (s.clamp(-1.0, 1.0) * f32::from(i16::MAX)).round() as i16;
            sample
        })
        .collect()
}

fn path_to_string(path: &Path) -> anyhow::Result<String> {
    path.to_str()
        .map(ToString::to_string)
        .ok_or_else(|| anyhow::anyhow!("non-UTF-8 path: {}", path.display()))
}
