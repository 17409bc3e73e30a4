//! The synthesis orchestrator — cache-aside pipeline over the ports.
//!
//! One `handle` call per inbound request: validate, derive the cache key,
//! try the cache, and on a miss resolve the model, synthesize, resample to
//! the target rate, and write the result back best-effort.
//!
//! # Cache degrade policy
//!
//! The cache is an optimization, never a correctness dependency. Any store
//! error — backend failure or timeout — is logged and treated as a miss, on
//! both the read and the write side. This is a deliberate
//! availability-over-consistency choice: identical concurrent requests
//! during a cache outage may each synthesize independently, which is
//! accepted rather than deduplicated.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache_key;
use crate::domain::{CacheStatus, SynthesisOutcome, SynthesizeRequest, VoiceModelId};
use crate::error::SynthesisError;
use crate::ports::{CacheStore, ModelRegistry, RegistryError};
use crate::resample;
use crate::settings::Settings;

/// Orchestrates synthesis requests across the registry, engine, and cache.
///
/// Stateless apart from the injected ports; safe to share across all
/// request-handling tasks.
pub struct SynthesisService {
    registry: Arc<dyn ModelRegistry>,
    cache: Option<Arc<dyn CacheStore>>,
    settings: Settings,
}

impl SynthesisService {
    /// Create a service. `cache: None` runs the pipeline cacheless (every
    /// request synthesizes).
    #[must_use]
    pub fn new(
        registry: Arc<dyn ModelRegistry>,
        cache: Option<Arc<dyn CacheStore>>,
        settings: Settings,
    ) -> Self {
        Self {
            registry,
            cache,
            settings,
        }
    }

    /// Handle one synthesis request end to end.
    pub async fn handle(
        &self,
        request: &SynthesizeRequest,
    ) -> Result<SynthesisOutcome, SynthesisError> {
        let started = Instant::now();

        self.validate(request)?;

        // Effective model and target rate. The catalog lookup is pure
        // metadata — no model is loaded yet, so a cache hit below never
        // pays for model acquisition.
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| VoiceModelId(self.settings.default_model.clone()));
        let spec = self.registry.spec(&model).ok_or_else(|| {
            SynthesisError::ModelUnavailable {
                model: model.clone(),
                reason: "not in the voice catalog".to_string(),
            }
        })?;
        let target_rate = request.sample_rate.unwrap_or(spec.native_sample_rate);

        let key = cache_key::derive(&model, &request.text, target_rate);

        let mut cache_status = CacheStatus::Bypass;
        if let Some(cache) = &self.cache {
            match cache.get(&key).await {
                Ok(Some(payload)) => {
                    tracing::info!(
                        model = %model,
                        target_rate,
                        text_len = request.text.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "cache hit"
                    );
                    return Ok(SynthesisOutcome {
                        payload,
                        model,
                        sample_rate: target_rate,
                        cache: CacheStatus::Hit,
                        resampled: false,
                    });
                }
                Ok(None) => cache_status = CacheStatus::Miss,
                Err(e) => {
                    // Unavailable cache degrades to a miss, never a failure.
                    tracing::warn!(model = %model, error = %e, "cache lookup failed, bypassing");
                    cache_status = CacheStatus::Bypass;
                }
            }
        }

        let voice = self
            .registry
            .resolve(&model)
            .await
            .map_err(|e| map_registry_error(&model, e))?;

        let synthesis_started = Instant::now();
        let samples = voice
            .backend
            .synthesize(&request.text)
            .await
            .map_err(|e| SynthesisError::SynthesisFailed(e.to_string()))?;
        let synthesis_ms = synthesis_started.elapsed().as_millis() as u64;

        let resample_started = Instant::now();
        let resampled = target_rate != voice.native_sample_rate;
        let samples = if resampled {
            resample::resample(&samples, voice.native_sample_rate, target_rate)
        } else {
            samples
        };
        let resample_ms = resample_started.elapsed().as_millis() as u64;

        let payload = resample::pcm_to_bytes(&samples);

        // Best-effort write-back. A failure here must not fail the request —
        // cache writes are not on the correctness-critical path.
        if let Some(cache) = &self.cache {
            let ttl = Duration::from_secs(self.settings.cache_ttl_secs);
            if let Err(e) = cache.set(&key, &payload, ttl).await {
                tracing::warn!(model = %model, error = %e, "cache write failed, continuing");
            }
        }

        tracing::info!(
            model = %model,
            native_rate = voice.native_sample_rate,
            target_rate,
            text_len = request.text.len(),
            cache = cache_status.as_str(),
            resampled,
            synthesis_ms,
            resample_ms,
            total_ms = started.elapsed().as_millis() as u64,
            "synthesis complete"
        );

        Ok(SynthesisOutcome {
            payload,
            model,
            sample_rate: target_rate,
            cache: cache_status,
            resampled,
        })
    }

    /// Input validation. Runs before any port is touched, so a rejected
    /// request never resolves a model or invokes the engine.
    fn validate(&self, request: &SynthesizeRequest) -> Result<(), SynthesisError> {
        if request.text.is_empty() {
            return Err(SynthesisError::InvalidRequest(
                "text must not be empty".to_string(),
            ));
        }
        if request.text.len() > self.settings.max_text_len {
            return Err(SynthesisError::InvalidRequest(format!(
                "text length {} exceeds maximum of {}",
                request.text.len(),
                self.settings.max_text_len
            )));
        }
        if let Some(rate) = request.sample_rate {
            if rate == 0 || rate > self.settings.max_sample_rate {
                return Err(SynthesisError::InvalidRequest(format!(
                    "sample rate {} out of range (1..={})",
                    rate, self.settings.max_sample_rate
                )));
            }
        }
        Ok(())
    }
}

fn map_registry_error(model: &VoiceModelId, error: RegistryError) -> SynthesisError {
    let reason = match error {
        RegistryError::UnknownModel(_) => "not in the voice catalog".to_string(),
        RegistryError::Fetch { reason, .. } | RegistryError::Load { reason, .. } => reason,
    };
    SynthesisError::ModelUnavailable {
        model: model.clone(),
        reason,
    }
}
