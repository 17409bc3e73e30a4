//! Wire-level request/response shapes.

use serde::{Deserialize, Serialize};

use voxd_core::domain::{SynthesizeRequest, VoiceModelId};

/// Body of `POST /synthesize`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeBody {
    /// Text to synthesize.
    pub text: String,

    /// Voice model id; server default when omitted.
    #[serde(default)]
    pub model: Option<String>,

    /// Target sample rate in Hz; the model's native rate when omitted.
    #[serde(default)]
    pub sample_rate: Option<u32>,
}

impl From<SynthesizeBody> for SynthesizeRequest {
    fn from(body: SynthesizeBody) -> Self {
        Self {
            text: body.text,
            model: body.model.map(VoiceModelId),
            sample_rate: body.sample_rate,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
}
