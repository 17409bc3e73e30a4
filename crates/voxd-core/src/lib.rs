#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod cache_key;
pub mod domain;
pub mod error;
pub mod paths;
pub mod ports;
pub mod resample;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{CacheKey, CacheStatus, SynthesisOutcome, SynthesizeRequest, VoiceModelId};
pub use error::SynthesisError;
pub use ports::{
    CacheStore, CacheStoreError, ModelFetchError, ModelRegistry, ModelState, ModelSource,
    RegistryError, ResolvedVoice, SynthesisBackend, SynthesisBackendError, VoiceSpec,
};
pub use services::SynthesisService;
pub use settings::{Settings, SettingsError};
