//! Application layer for the Conflux placeholder engine.
//!
//! Exposes the recursive placeholder expander together with the ports it
//! reaches collaborators through (process-level overrides and the per-value
//! post-processing hook).

pub mod placeholder_resolver;
pub mod ports;

pub use placeholder_resolver::{Placeholder, PlaceholderExpander, expand, read_placeholder};
pub use ports::{IdentityHook, NoOverrides, OverrideSource, PropertyHook};
