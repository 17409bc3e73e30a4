//! Voice model catalog — curated list of known voices.
//!
//! Voices are Piper VITS models packaged as `.tar.bz2` archives on the
//! [`k2-fsa/sherpa-onnx`](https://github.com/k2-fsa/sherpa-onnx/releases)
//! release pages. Each archive extracts to a directory containing
//! `model.onnx`, `tokens.txt`, and the espeak-ng data the engine needs.
//!
//! The catalog is static metadata only: native sample rates come from here
//! (not from loading the model), so request defaulting and cache lookups
//! never pay for model acquisition. The catalog size is also the bound on
//! resident models — there is no runtime eviction.

use voxd_core::domain::VoiceModelId;
use voxd_core::ports::VoiceSpec;

const SHERPA_TTS_BASE: &str =
    "https://github.com/k2-fsa/sherpa-onnx/releases/download/tts-models";

/// The curated voice catalog.
#[derive(Debug, Clone)]
pub struct VoiceCatalog {
    voices: Vec<VoiceSpec>,
}

impl VoiceCatalog {
    /// The built-in voice list.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            voices: vec![
                // Piper "low" voices synthesize at 16 kHz, "medium" at 22.05 kHz.
                piper_voice("en_US-kathleen-low", "Kathleen (US, low)", 16_000, 66_000_000),
                piper_voice("en_US-ryan-medium", "Ryan (US, medium)", 22_050, 77_000_000),
                piper_voice("en_US-amy-low", "Amy (US, low)", 16_000, 66_000_000),
            ],
        }
    }

    /// Build a catalog from an explicit voice list.
    #[must_use]
    pub fn new(voices: Vec<VoiceSpec>) -> Self {
        Self { voices }
    }

    /// Look up a voice by id.
    #[must_use]
    pub fn find(&self, id: &VoiceModelId) -> Option<&VoiceSpec> {
        self.voices.iter().find(|v| v.id == *id)
    }

    /// Whether `id` is a known voice.
    #[must_use]
    pub fn contains(&self, id: &VoiceModelId) -> bool {
        self.find(id).is_some()
    }

    /// All known voice ids.
    #[must_use]
    pub fn ids(&self) -> Vec<VoiceModelId> {
        self.voices.iter().map(|v| v.id.clone()).collect()
    }

    /// All voice specs.
    #[must_use]
    pub fn voices(&self) -> &[VoiceSpec] {
        &self.voices
    }
}

fn piper_voice(id: &str, name: &str, native_sample_rate: u32, size_bytes: u64) -> VoiceSpec {
    let dir_name = format!("vits-piper-{id}");
    VoiceSpec {
        id: VoiceModelId::from(id),
        name: name.to_string(),
        native_sample_rate,
        archive_url: format!("{SHERPA_TTS_BASE}/{dir_name}.tar.bz2"),
        dir_name,
        size_bytes,
    }
}
