//! Synthesis engine port — opaque text-to-PCM capability.
//!
//! A backend instance is bound to one loaded voice model and produces mono
//! i16 samples at that model's fixed native sample rate. The pipeline
//! depends only on this input/output contract; the engine itself (ONNX
//! runtime, subprocess, remote service) is a black box behind the trait.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a synthesis backend.
#[derive(Debug, Error)]
pub enum SynthesisBackendError {
    /// The engine failed during inference.
    #[error("synthesis engine failure: {0}")]
    Engine(String),
}

/// A loaded voice model's synthesis capability.
///
/// Implementations must be `Send + Sync`; one instance is shared across all
/// request tasks via `Arc`. Synthesis may block its task for the duration of
/// inference (compute-bound); implementations backed by blocking engines
/// should dispatch to a blocking thread pool.
#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    /// Synthesize `text` into mono i16 PCM at [`Self::sample_rate`] Hz.
    async fn synthesize(&self, text: &str) -> Result<Vec<i16>, SynthesisBackendError>;

    /// The fixed native output sample rate of this backend, in Hz.
    fn sample_rate(&self) -> u32;
}
