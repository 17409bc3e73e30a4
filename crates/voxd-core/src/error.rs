//! Caller-facing error taxonomy.
//!
//! Lower components (ports, adapters) return their own typed errors; the
//! orchestrator is the only place that converts those into this taxonomy.
//! Cache failures never appear here — the cache is an optimization, and an
//! unreachable store silently degrades to a bypass.

use thiserror::Error;

use crate::domain::VoiceModelId;

/// Errors surfaced to the caller of
/// [`SynthesisService::handle`](crate::services::SynthesisService::handle).
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// Bad input — not retried, a client error at the transport layer.
    #[error("{0}")]
    InvalidRequest(String),

    /// The requested voice model could not be resolved (unknown id, or
    /// download/load failure). A subsequent request may retry.
    #[error("voice model '{model}' unavailable: {reason}")]
    ModelUnavailable {
        model: VoiceModelId,
        reason: String,
    },

    /// The synthesis engine failed on valid input.
    #[error("audio synthesis failed: {0}")]
    SynthesisFailed(String),
}
