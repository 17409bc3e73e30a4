//! Composition root: wires settings, cache, registry, and service.
//!
//! Cache connectivity is best-effort at startup. A Redis that is down when
//! the process starts degrades the service to cacheless operation instead
//! of failing the boot; every request then runs with `X-Cache: BYPASS`
//! until a restart.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;

use voxd_cache::RedisCacheStore;
use voxd_core::{Settings, SynthesisService, paths};
use voxd_core::ports::{CacheStore, ModelRegistry, ModelSource};
use voxd_engine::registry::BackendLoader;
use voxd_engine::{HttpModelSource, VoiceCatalog, VoiceModelRegistry};

use crate::routes::create_router;
use crate::state::{AppState, AxumContext};

#[cfg(feature = "sherpa")]
fn backend_loader() -> Arc<dyn BackendLoader> {
    Arc::new(voxd_engine::SherpaVitsLoader)
}

#[cfg(not(feature = "sherpa"))]
fn backend_loader() -> Arc<dyn BackendLoader> {
    Arc::new(voxd_engine::UnsupportedLoader)
}

/// Assemble the application state from validated settings.
pub async fn bootstrap(settings: Settings) -> anyhow::Result<AppState> {
    settings.validate().context("invalid settings")?;

    let models_dir = paths::models_dir(settings.models_dir.as_deref())
        .context("resolving model directory")?;
    tracing::info!(dir = %models_dir.display(), "model directory resolved");

    let catalog = VoiceCatalog::builtin();
    let default_model = voxd_core::domain::VoiceModelId(settings.default_model.clone());
    anyhow::ensure!(
        catalog.contains(&default_model),
        "default model '{default_model}' is not in the voice catalog"
    );

    let registry = Arc::new(VoiceModelRegistry::new(
        catalog,
        Arc::new(HttpModelSource::new()) as Arc<dyn ModelSource>,
        backend_loader(),
        models_dir,
    ));

    let cache = connect_cache(&settings).await;

    let service = SynthesisService::new(
        registry as Arc<dyn ModelRegistry>,
        cache,
        settings,
    );

    Ok(Arc::new(AxumContext { service }))
}

async fn connect_cache(settings: &Settings) -> Option<Arc<dyn CacheStore>> {
    if !settings.cache_enabled {
        tracing::info!("cache disabled by configuration");
        return None;
    }

    let op_timeout = Duration::from_millis(settings.cache_op_timeout_ms);
    match RedisCacheStore::connect(&settings.cache_url, op_timeout).await {
        Ok(store) => Some(Arc::new(store) as Arc<dyn CacheStore>),
        Err(e) => {
            tracing::warn!(
                url = %settings.cache_url,
                error = %e,
                "cache backend unreachable at startup, running cacheless"
            );
            None
        }
    }
}

/// Bind and serve until ctrl-c.
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let router = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!(%addr, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
