//! Voice model registry — lazy acquisition with per-model single-flight.
//!
//! # Locking discipline
//!
//! Two layers of state, locked differently:
//!
//! - `ready` — a read-biased map of published [`ResolvedVoice`] records.
//!   Requests for already-resolved voices take a brief read lock and clone
//!   an `Arc`; nothing is ever held across an `.await`.
//! - `slots` — one acquisition slot per model id, created on demand. The
//!   slot's async mutex is held across the whole download + load sequence,
//!   so exactly one acquisition per id is in flight at any time and
//!   concurrent resolvers for the same id await it instead of fetching
//!   redundantly. Unrelated models never contend: the slot map's own lock
//!   is only held long enough to clone the slot `Arc`.
//!
//! Resolved voices stay `Ready` for the process lifetime. A failed
//! acquisition leaves the slot `Failed`; the next `resolve` for that id
//! retries (`Failed → Resolving`). Failures are not broadcast to waiters:
//! each resolver queued on the guard re-attempts the acquisition in turn
//! when its predecessor failed, so one transient download error costs one
//! extra attempt per waiter instead of failing them all.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex, RwLock};

use async_trait::async_trait;
use tokio::sync::Mutex as AsyncMutex;

use voxd_core::domain::VoiceModelId;
use voxd_core::ports::{
    ModelRegistry, ModelSource, ModelState, RegistryError, ResolvedVoice, SynthesisBackend,
    VoiceSpec,
};

use crate::catalog::VoiceCatalog;

// ── Backend loader ─────────────────────────────────────────────────

/// Turns a materialized model directory into a loaded synthesis backend.
///
/// Separated from the registry so engine bindings stay behind a feature
/// flag and tests can inject stubs.
#[async_trait]
pub trait BackendLoader: Send + Sync {
    /// Load the model at `model_dir` into an engine instance.
    async fn load(
        &self,
        spec: &VoiceSpec,
        model_dir: &Path,
    ) -> anyhow::Result<Arc<dyn SynthesisBackend>>;
}

/// Loader used when the binary was built without any engine backend.
///
/// Cache hits still work; anything requiring synthesis resolves to a load
/// failure with an actionable message.
pub struct UnsupportedLoader;

#[async_trait]
impl BackendLoader for UnsupportedLoader {
    async fn load(
        &self,
        _spec: &VoiceSpec,
        _model_dir: &Path,
    ) -> anyhow::Result<Arc<dyn SynthesisBackend>> {
        anyhow::bail!("built without a synthesis backend (enable the `sherpa` feature)")
    }
}

// ── Registry ───────────────────────────────────────────────────────

/// Per-id acquisition slot.
struct Slot {
    /// Held across the download + load sequence; this is the single-flight
    /// guard.
    guard: AsyncMutex<()>,

    /// Lifecycle state for observability. Kept in a sync mutex because it
    /// is only touched at transition points, never across an `.await`.
    state: StdMutex<ModelState>,
}

impl Slot {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            guard: AsyncMutex::new(()),
            state: StdMutex::new(ModelState::Unresolved),
        })
    }

    fn set_state(&self, state: ModelState) {
        if let Ok(mut slot_state) = self.state.lock() {
            *slot_state = state;
        }
    }

    fn get_state(&self) -> ModelState {
        self.state.lock().map_or(ModelState::Unresolved, |s| *s)
    }
}

/// The process-wide voice model table.
pub struct VoiceModelRegistry {
    catalog: VoiceCatalog,
    source: Arc<dyn ModelSource>,
    loader: Arc<dyn BackendLoader>,
    models_dir: PathBuf,
    ready: RwLock<HashMap<VoiceModelId, Arc<ResolvedVoice>>>,
    slots: StdMutex<HashMap<VoiceModelId, Arc<Slot>>>,
}

impl VoiceModelRegistry {
    /// Create a registry over `models_dir`.
    #[must_use]
    pub fn new(
        catalog: VoiceCatalog,
        source: Arc<dyn ModelSource>,
        loader: Arc<dyn BackendLoader>,
        models_dir: PathBuf,
    ) -> Self {
        Self {
            catalog,
            source,
            loader,
            models_dir,
            ready: RwLock::new(HashMap::new()),
            slots: StdMutex::new(HashMap::new()),
        }
    }

    /// The catalog this registry serves.
    #[must_use]
    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    fn published(&self, id: &VoiceModelId) -> Option<Arc<ResolvedVoice>> {
        self.ready
            .read()
            .ok()
            .and_then(|ready| ready.get(id).cloned())
    }

    fn slot(&self, id: &VoiceModelId) -> Arc<Slot> {
        let mut slots = self.slots.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(slots.entry(id.clone()).or_insert_with(Slot::new))
    }

    /// The acquisition itself: fetch if absent, then load. Runs with the
    /// slot guard held.
    async fn acquire(
        &self,
        spec: &VoiceSpec,
        slot: &Slot,
    ) -> Result<Arc<ResolvedVoice>, RegistryError> {
        let model_dir = self.models_dir.join(&spec.dir_name);

        if model_dir.is_dir() {
            tracing::debug!(model = %spec.id, dir = %model_dir.display(), "model already materialized");
        } else {
            tracing::info!(model = %spec.id, url = %spec.archive_url, "fetching voice model");
            self.source
                .fetch(spec, &model_dir)
                .await
                .map_err(|e| {
                    slot.set_state(ModelState::Failed);
                    RegistryError::Fetch {
                        model: spec.id.clone(),
                        reason: e.to_string(),
                    }
                })?;
        }

        let backend = self
            .loader
            .load(spec, &model_dir)
            .await
            .map_err(|e| {
                slot.set_state(ModelState::Failed);
                RegistryError::Load {
                    model: spec.id.clone(),
                    reason: e.to_string(),
                }
            })?;

        let resolved = Arc::new(ResolvedVoice {
            id: spec.id.clone(),
            native_sample_rate: spec.native_sample_rate,
            backend,
        });

        if let Ok(mut ready) = self.ready.write() {
            ready.insert(spec.id.clone(), Arc::clone(&resolved));
        }
        slot.set_state(ModelState::Ready);

        tracing::info!(
            model = %spec.id,
            native_rate = spec.native_sample_rate,
            "voice model ready"
        );
        Ok(resolved)
    }
}

#[async_trait]
impl ModelRegistry for VoiceModelRegistry {
    fn spec(&self, id: &VoiceModelId) -> Option<VoiceSpec> {
        self.catalog.find(id).cloned()
    }

    async fn resolve(&self, id: &VoiceModelId) -> Result<Arc<ResolvedVoice>, RegistryError> {
        // Fast path: already published.
        if let Some(voice) = self.published(id) {
            return Ok(voice);
        }

        let spec = self
            .catalog
            .find(id)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownModel(id.clone()))?;

        let slot = self.slot(id);
        let _guard = slot.guard.lock().await;

        // A concurrent acquisition may have finished while we waited.
        if let Some(voice) = self.published(id) {
            return Ok(voice);
        }

        slot.set_state(ModelState::Resolving);
        self.acquire(&spec, &slot).await
    }

    fn state(&self, id: &VoiceModelId) -> ModelState {
        if self.published(id).is_some() {
            return ModelState::Ready;
        }
        let slots = self.slots.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        slots.get(id).map_or(ModelState::Unresolved, |slot| slot.get_state())
    }
}
