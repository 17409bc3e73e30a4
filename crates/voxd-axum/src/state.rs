//! Shared application state.

use std::sync::Arc;

use voxd_core::SynthesisService;

/// Everything the handlers need, assembled once at bootstrap.
pub struct AxumContext {
    /// The synthesis orchestrator.
    pub service: SynthesisService,
}

/// Shared application state threaded through the router.
pub type AppState = Arc<AxumContext>;
