//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core pipeline expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `redis`, `reqwest`, or engine types in any signature
//! - Errors are per-port `thiserror` enums; only the orchestrator maps them
//!   into the caller-facing [`SynthesisError`](crate::error::SynthesisError)
//! - Traits are `Send + Sync` so adapters can be shared as `Arc<dyn …>`
//!   across request-handling tasks

pub mod cache_store;
pub mod model_registry;
pub mod model_source;
pub mod synthesis;

pub use cache_store::{CacheStore, CacheStoreError};
pub use model_registry::{ModelRegistry, ModelState, RegistryError, ResolvedVoice};
pub use model_source::{ModelFetchError, ModelSource, VoiceSpec};
pub use synthesis::{SynthesisBackend, SynthesisBackendError};
