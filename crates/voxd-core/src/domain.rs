//! Domain types for the synthesis pipeline.
//!
//! These are pure value types with no infrastructure dependencies. A
//! [`SynthesizeRequest`] is constructed once per call (after transport-level
//! parsing) and consumed by
//! [`SynthesisService`](crate::services::SynthesisService), which produces a
//! [`SynthesisOutcome`].

use serde::{Deserialize, Serialize};

// ── Model identifier ───────────────────────────────────────────────

/// Unique identifier for a voice model (e.g., `"en_US-kathleen-low"`).
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceModelId(pub String);

impl VoiceModelId {
    /// View the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VoiceModelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ── Cache key ──────────────────────────────────────────────────────

/// Derived cache key for a `(model, text, sample rate)` triple.
///
/// Constructed only by [`cache_key::derive`](crate::cache_key::derive);
/// opaque to everything else. Stable across process restarts so the cache
/// stays warm across deployments.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CacheKey(pub(crate) String);

impl CacheKey {
    /// View the key as a string slice (the store's key namespace).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Request ────────────────────────────────────────────────────────

/// A validated synthesis request.
///
/// `model` and `sample_rate` are optional; the orchestrator resolves them to
/// the configured default voice and the model's native rate respectively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeRequest {
    /// Text to synthesize. Must be non-empty and within the configured
    /// maximum length.
    pub text: String,

    /// Voice model to use. `None` selects the configured default.
    pub model: Option<VoiceModelId>,

    /// Target sample rate in Hz. `None` selects the model's native rate.
    pub sample_rate: Option<u32>,
}

impl SynthesizeRequest {
    /// Request with default model and native sample rate.
    #[must_use]
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
            sample_rate: None,
        }
    }
}

// ── Outcome ────────────────────────────────────────────────────────

/// How the cache participated in serving a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Payload served straight from the cache.
    Hit,

    /// Key was absent; audio was synthesized and written back.
    Miss,

    /// Cache was unreachable or not configured; synthesis proceeded without it.
    Bypass,
}

impl CacheStatus {
    /// Wire label used in the `X-Cache` response header and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
            Self::Bypass => "BYPASS",
        }
    }
}

/// Result of a handled synthesis request.
///
/// `payload` is signed 16-bit little-endian PCM, mono, at `sample_rate` Hz.
/// The encoding is contract, not self-describing — there is no header.
#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    /// Raw PCM bytes (i16 LE, mono).
    pub payload: Vec<u8>,

    /// The effective model that produced (or keyed) the audio.
    pub model: VoiceModelId,

    /// The effective sample rate of `payload` in Hz.
    pub sample_rate: u32,

    /// Whether the cache served, missed, or was bypassed.
    pub cache: CacheStatus,

    /// Whether sample-rate conversion was applied.
    pub resampled: bool,
}
