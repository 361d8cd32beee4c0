// src/config/mod.rs
pub mod digest;
pub mod sources;

pub use digest::{DigestConfig, ParseLimits};
pub use sources::{load_sources_default, load_sources_from};
