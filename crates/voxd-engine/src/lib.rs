#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod catalog;
pub mod registry;
pub mod source;

#[cfg(feature = "sherpa")]
pub mod sherpa;

pub use catalog::VoiceCatalog;
pub use registry::{BackendLoader, UnsupportedLoader, VoiceModelRegistry};
pub use source::HttpModelSource;

#[cfg(feature = "sherpa")]
pub use sherpa::{SherpaVitsBackend, SherpaVitsLoader};
