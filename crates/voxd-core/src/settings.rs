//! Service settings and validation.
//!
//! Pure domain types with no infrastructure dependencies. Environment
//! overrides use the `VOXD_` prefix; unparseable values fall back to the
//! default rather than aborting startup.

use serde::{Deserialize, Serialize};

/// Default voice when a request names none.
pub const DEFAULT_MODEL: &str = "en_US-kathleen-low";

/// Default maximum accepted text length, in bytes.
pub const DEFAULT_MAX_TEXT_LEN: usize = 2048;

/// Default maximum accepted target sample rate, in Hz.
pub const DEFAULT_MAX_SAMPLE_RATE: u32 = 48_000;

/// Default cache TTL: 7 days.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60 * 24 * 7;

/// Default per-operation cache timeout, in milliseconds.
pub const DEFAULT_CACHE_OP_TIMEOUT_MS: u64 = 250;

/// Default HTTP bind port.
pub const DEFAULT_PORT: u16 = 8000;

/// Service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Voice model used when a request does not name one.
    pub default_model: String,

    /// Maximum accepted request text length, in bytes.
    pub max_text_len: usize,

    /// Maximum accepted target sample rate, in Hz.
    pub max_sample_rate: u32,

    /// Whether the shared cache is used at all.
    pub cache_enabled: bool,

    /// Cache connection URL (e.g., `redis://127.0.0.1:6379`).
    pub cache_url: String,

    /// Time-to-live for cached payloads, in seconds.
    pub cache_ttl_secs: u64,

    /// Per-operation cache timeout, in milliseconds. A store call slower
    /// than this is treated as a miss.
    pub cache_op_timeout_ms: u64,

    /// Override for the voice model storage directory.
    pub models_dir: Option<std::path::PathBuf>,

    /// HTTP bind port.
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            max_text_len: DEFAULT_MAX_TEXT_LEN,
            max_sample_rate: DEFAULT_MAX_SAMPLE_RATE,
            cache_enabled: true,
            cache_url: "redis://127.0.0.1:6379".to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            cache_op_timeout_ms: DEFAULT_CACHE_OP_TIMEOUT_MS,
            models_dir: None,
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Build settings from defaults overridden by `VOXD_*` environment
    /// variables.
    ///
    /// Recognized: `VOXD_DEFAULT_MODEL`, `VOXD_MAX_TEXT_LEN`,
    /// `VOXD_MAX_SAMPLE_RATE`, `VOXD_CACHE_ENABLED`, `VOXD_CACHE_URL`,
    /// `VOXD_CACHE_TTL_SECS`, `VOXD_CACHE_OP_TIMEOUT_MS`, `VOXD_MODELS_DIR`,
    /// `VOXD_PORT`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(v) = std::env::var("VOXD_DEFAULT_MODEL") {
            settings.default_model = v;
        }
        if let Some(v) = env_parse("VOXD_MAX_TEXT_LEN") {
            settings.max_text_len = v;
        }
        if let Some(v) = env_parse("VOXD_MAX_SAMPLE_RATE") {
            settings.max_sample_rate = v;
        }
        if let Some(v) = env_parse::<bool>("VOXD_CACHE_ENABLED") {
            settings.cache_enabled = v;
        }
        if let Ok(v) = std::env::var("VOXD_CACHE_URL") {
            settings.cache_url = v;
        }
        if let Some(v) = env_parse("VOXD_CACHE_TTL_SECS") {
            settings.cache_ttl_secs = v;
        }
        if let Some(v) = env_parse("VOXD_CACHE_OP_TIMEOUT_MS") {
            settings.cache_op_timeout_ms = v;
        }
        if let Ok(v) = std::env::var("VOXD_MODELS_DIR") {
            settings.models_dir = Some(std::path::PathBuf::from(v));
        }
        if let Some(v) = env_parse("VOXD_PORT") {
            settings.port = v;
        }

        settings
    }

    /// Validate the settings, returning the first violation found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.default_model.is_empty() {
            return Err(SettingsError::EmptyDefaultModel);
        }
        if self.max_text_len == 0 {
            return Err(SettingsError::InvalidMaxTextLen(self.max_text_len));
        }
        if self.max_sample_rate < 8_000 {
            return Err(SettingsError::InvalidMaxSampleRate(self.max_sample_rate));
        }
        if self.cache_ttl_secs == 0 {
            return Err(SettingsError::InvalidCacheTtl(self.cache_ttl_secs));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "unparseable environment override, using default");
            None
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("default model must not be empty")]
    EmptyDefaultModel,

    #[error("max text length must be at least 1, got {0}")]
    InvalidMaxTextLen(usize),

    #[error("max sample rate must be at least 8000 Hz, got {0}")]
    InvalidMaxSampleRate(u32),

    #[error("cache TTL must be at least 1 second, got {0}")]
    InvalidCacheTtl(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn zero_text_len_is_rejected() {
        let settings = Settings {
            max_text_len: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidMaxTextLen(0))
        ));
    }

    #[test]
    fn tiny_sample_rate_cap_is_rejected() {
        let settings = Settings {
            max_sample_rate: 4_000,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidMaxSampleRate(4_000))
        ));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let settings = Settings {
            cache_ttl_secs: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidCacheTtl(0))
        ));
    }

    #[test]
    fn empty_default_model_is_rejected() {
        let settings = Settings {
            default_model: String::new(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::EmptyDefaultModel)
        ));
    }
}
