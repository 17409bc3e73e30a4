//! Shared test doubles for route tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use voxd_axum::routes::create_router;
use voxd_axum::state::AxumContext;
use voxd_core::domain::VoiceModelId;
use voxd_core::ports::{
    CacheStore, ModelRegistry, ModelState, RegistryError, ResolvedVoice, SynthesisBackend,
    SynthesisBackendError, VoiceSpec,
};
use voxd_core::{Settings, SynthesisService};

pub struct StubBackend {
    pub rate: u32,
    pub samples: Vec<i16>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl StubBackend {
    pub fn new(rate: u32, samples: Vec<i16>) -> Self {
        Self {
            rate,
            samples,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SynthesisBackend for StubBackend {
    async fn synthesize(&self, _text: &str) -> Result<Vec<i16>, SynthesisBackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SynthesisBackendError::Engine("inference aborted".into()));
        }
        Ok(self.samples.clone())
    }

    fn sample_rate(&self) -> u32 {
        self.rate
    }
}

/// Registry that knows exactly one voice.
pub struct StubRegistry {
    voice: Arc<ResolvedVoice>,
    spec: VoiceSpec,
}

impl StubRegistry {
    pub fn single(id: &str, backend: Arc<StubBackend>) -> Self {
        let rate = backend.rate;
        Self {
            voice: Arc::new(ResolvedVoice {
                id: VoiceModelId::from(id),
                native_sample_rate: rate,
                backend,
            }),
            spec: VoiceSpec {
                id: VoiceModelId::from(id),
                name: format!("Stub voice {id}"),
                native_sample_rate: rate,
                archive_url: String::new(),
                dir_name: format!("stub-{id}"),
                size_bytes: 0,
            },
        }
    }
}

#[async_trait]
impl ModelRegistry for StubRegistry {
    fn spec(&self, id: &VoiceModelId) -> Option<VoiceSpec> {
        (*id == self.spec.id).then(|| self.spec.clone())
    }

    async fn resolve(&self, id: &VoiceModelId) -> Result<Arc<ResolvedVoice>, RegistryError> {
        if *id == self.voice.id {
            Ok(Arc::clone(&self.voice))
        } else {
            Err(RegistryError::UnknownModel(id.clone()))
        }
    }

    fn state(&self, id: &VoiceModelId) -> ModelState {
        if *id == self.voice.id {
            ModelState::Ready
        } else {
            ModelState::Unresolved
        }
    }
}

/// Settings with the stub voice as the default model.
pub fn test_settings(default_model: &str) -> Settings {
    Settings {
        default_model: default_model.to_string(),
        ..Settings::default()
    }
}

pub fn router(
    registry: Arc<StubRegistry>,
    cache: Option<Arc<dyn CacheStore>>,
    settings: Settings,
) -> axum::Router {
    let service =
        SynthesisService::new(registry as Arc<dyn ModelRegistry>, cache, settings);
    create_router(Arc::new(AxumContext { service }))
}
