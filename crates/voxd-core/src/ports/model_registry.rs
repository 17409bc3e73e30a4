//! Model registry port — voice model lifecycle and lookup.
//!
//! The registry owns one record per distinct model id for the process
//! lifetime. Resolution is lazy: the first `resolve` for an id downloads and
//! loads the model; concurrent resolves for the same id share that single
//! acquisition. Successfully resolved models stay `Ready` — bounding
//! resident models is a catalog-size concern, not a runtime eviction policy.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::VoiceModelId;
use crate::ports::model_source::VoiceSpec;
use crate::ports::synthesis::SynthesisBackend;

/// Lifecycle state of a voice model.
///
/// Transitions are monotonic (`Unresolved → Resolving → Ready`) except
/// `Failed → Resolving`, which a retrying `resolve` call is allowed to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// No acquisition attempted yet.
    Unresolved,
    /// An acquisition (download + load) is in flight.
    Resolving,
    /// Loaded and usable for the rest of the process lifetime.
    Ready,
    /// The last acquisition failed; eligible for retry.
    Failed,
}

/// An immutable, atomically-published record of a loaded voice model.
#[derive(Clone)]
pub struct ResolvedVoice {
    /// Model identifier.
    pub id: VoiceModelId,

    /// Native sample rate of the loaded model, in Hz.
    pub native_sample_rate: u32,

    /// The loaded synthesis capability.
    pub backend: Arc<dyn SynthesisBackend>,
}

impl std::fmt::Debug for ResolvedVoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedVoice")
            .field("id", &self.id)
            .field("native_sample_rate", &self.native_sample_rate)
            .finish_non_exhaustive()
    }
}

/// Errors from resolving a voice model.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The id is not in the catalog. No fetch is attempted.
    #[error("unknown voice model '{0}'")]
    UnknownModel(VoiceModelId),

    /// Downloading the model artifact failed.
    #[error("failed to fetch voice model '{model}': {reason}")]
    Fetch {
        model: VoiceModelId,
        reason: String,
    },

    /// Loading the downloaded artifact into the engine failed.
    #[error("failed to load voice model '{model}': {reason}")]
    Load {
        model: VoiceModelId,
        reason: String,
    },
}

/// Voice model lookup and lazy acquisition.
#[async_trait]
pub trait ModelRegistry: Send + Sync {
    /// Catalog lookup: static metadata for `id`, without any I/O.
    fn spec(&self, id: &VoiceModelId) -> Option<VoiceSpec>;

    /// Resolve `id` to a loaded model, downloading and loading it if
    /// necessary. At most one acquisition per id is in flight at any time;
    /// concurrent callers await it rather than fetching redundantly.
    async fn resolve(&self, id: &VoiceModelId) -> Result<Arc<ResolvedVoice>, RegistryError>;

    /// Current lifecycle state of `id`.
    fn state(&self, id: &VoiceModelId) -> ModelState;
}
