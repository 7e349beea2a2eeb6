//! Domain types for the Conflux property placeholder engine.
//!
//! Holds the value types the expansion engine operates on: the flat
//! property mapping, the delimiter pair, the key augmentation rule, and the
//! error types surfaced to callers.

pub mod error;
pub mod placeholder;
pub mod properties;

pub use error::{DomainError, DomainResult, PlaceholderError, PlaceholderResult};
pub use placeholder::{AugmentationRule, DEFAULT_PREFIX_TOKEN, DEFAULT_SUFFIX_TOKEN, Delimiters};
pub use properties::PropertySet;
