//! Infrastructure adapters for the Conflux placeholder engine.
//!
//! Loads property sources from filesystem or embedded locations into the
//! flat mapping the engine consumes, and provides the process-environment
//! override source.

pub mod overrides;
pub mod sources;

pub use overrides::EnvOverrides;
pub use sources::{EMBEDDED_SCHEME, EmbeddedResources, FILE_SCHEME, PropertiesLoader, SourceError};
