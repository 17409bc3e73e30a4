//! Core services — the composition of ports into the request pipeline.

pub mod synthesis;

pub use synthesis::SynthesisService;
