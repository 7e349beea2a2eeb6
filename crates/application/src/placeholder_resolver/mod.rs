//! Placeholder resolution module
//!
//! Scans configuration strings for `{{key}}`-style placeholders and
//! substitutes them recursively from a [`conflux_domain::PropertySet`].
//!
//! # Usage
//!
//! ```
//! use conflux_application::placeholder_resolver::PlaceholderExpander;
//! use conflux_domain::{Delimiters, PropertySet};
//!
//! let properties = PropertySet::from_pairs([("host", "localhost")]);
//! let expander = PlaceholderExpander::new(Delimiters::default());
//!
//! let expanded = expander.expand("http://{{host}}/api", &properties)?;
//! assert_eq!(expanded, "http://localhost/api");
//! # Ok::<(), conflux_domain::PlaceholderError>(())
//! ```

pub mod engine;
pub mod scanner;

pub use engine::{PlaceholderExpander, expand};
pub use scanner::{Placeholder, read_placeholder};
