//! Property-source loading.
//!
//! Resolves a comma-separated list of locations into one merged
//! [`PropertySet`]. Two schemes are understood:
//!
//! - `file:config/app.properties` — a filesystem path (also the default
//!   for bare locations)
//! - `embedded:app` — a named resource registered on the loader, the
//!   bundled-resource analog for callers that ship defaults via
//!   `include_str!`
//!
//! `.json` locations are parsed as a flat string→string object, everything
//! else as Java properties format. Locations load in order and later
//! sources override earlier ones.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use conflux_domain::PropertySet;

/// Scheme prefix for filesystem locations.
pub const FILE_SCHEME: &str = "file:";

/// Scheme prefix for registered in-memory resources.
pub const EMBEDDED_SCHEME: &str = "embedded:";

/// Errors raised while loading property sources.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The named location does not exist.
    #[error("properties resource not found: {0}")]
    NotFound(String),

    /// Reading a filesystem location failed.
    #[error("failed to read properties from {location}: {source}")]
    Io {
        /// The location being read.
        location: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The resource exists but its contents could not be parsed.
    #[error("failed to parse properties from {location}: {reason}")]
    Parse {
        /// The location being parsed.
        location: String,
        /// What went wrong.
        reason: String,
    },

    /// The location names a scheme the loader does not understand.
    #[error("unsupported properties scheme: {0}")]
    UnsupportedScheme(String),
}

/// Named in-memory property resources.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResources {
    resources: HashMap<String, String>,
}

impl EmbeddedResources {
    /// Creates an empty resource table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resource under `name`, replacing any previous contents.
    /// Names ending in `.json` are parsed as JSON when loaded.
    pub fn register(&mut self, name: impl Into<String>, contents: impl Into<String>) {
        self.resources.insert(name.into(), contents.into());
    }

    /// Returns the contents registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.resources.get(name).map(String::as_str)
    }
}

/// Loads and merges property sources from a location list.
#[derive(Debug, Clone, Default)]
pub struct PropertiesLoader {
    embedded: EmbeddedResources,
}

impl PropertiesLoader {
    /// Creates a loader with no embedded resources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the embedded resource table.
    #[must_use]
    pub fn with_embedded(mut self, embedded: EmbeddedResources) -> Self {
        self.embedded = embedded;
        self
    }

    /// Loads every location in the comma-separated list, in order.
    /// Whitespace around commas is ignored; later locations override
    /// earlier ones on conflicting keys.
    ///
    /// # Errors
    ///
    /// Any [`SourceError`] from the first failing location.
    pub fn load(&self, locations: &str) -> Result<PropertySet, SourceError> {
        let mut merged = PropertySet::new();
        for location in locations.split(',').map(str::trim).filter(|l| !l.is_empty()) {
            let source = self.load_location(location)?;
            debug!(location, count = source.len(), "loaded property source");
            merged.merge(source);
        }
        Ok(merged)
    }

    fn load_location(&self, location: &str) -> Result<PropertySet, SourceError> {
        if let Some(name) = location.strip_prefix(EMBEDDED_SCHEME) {
            let contents = self
                .embedded
                .get(name)
                .ok_or_else(|| SourceError::NotFound(location.to_string()))?;
            return parse_contents(contents, location, is_json(name));
        }

        if let Some(scheme) = unknown_scheme(location) {
            return Err(SourceError::UnsupportedScheme(scheme.to_string()));
        }

        let path = location.strip_prefix(FILE_SCHEME).unwrap_or(location);
        Self::load_file(Path::new(path), location)
    }

    fn load_file(path: &Path, location: &str) -> Result<PropertySet, SourceError> {
        if !path.exists() {
            return Err(SourceError::NotFound(location.to_string()));
        }

        let file = File::open(path).map_err(|source| SourceError::Io {
            location: location.to_string(),
            source,
        })?;
        let reader = BufReader::new(file);

        if is_json(&path.to_string_lossy()) {
            let properties: HashMap<String, String> =
                serde_json::from_reader(reader).map_err(|e| SourceError::Parse {
                    location: location.to_string(),
                    reason: e.to_string(),
                })?;
            return Ok(PropertySet::from(properties));
        }

        let properties = java_properties::read(reader).map_err(|e| SourceError::Parse {
            location: location.to_string(),
            reason: e.to_string(),
        })?;
        Ok(PropertySet::from(properties))
    }
}

fn parse_contents(
    contents: &str,
    location: &str,
    json: bool,
) -> Result<PropertySet, SourceError> {
    let properties: HashMap<String, String> = if json {
        serde_json::from_str(contents).map_err(|e| SourceError::Parse {
            location: location.to_string(),
            reason: e.to_string(),
        })?
    } else {
        java_properties::read(contents.as_bytes()).map_err(|e| SourceError::Parse {
            location: location.to_string(),
            reason: e.to_string(),
        })?
    };
    Ok(PropertySet::from(properties))
}

fn is_json(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Returns the scheme of a location the loader cannot handle. Single
/// letters pass through so Windows drive paths stay plain file paths.
fn unknown_scheme(location: &str) -> Option<&str> {
    if location.starts_with(FILE_SCHEME) {
        return None;
    }
    let (scheme, _) = location.split_once(':')?;
    (scheme.len() > 1 && scheme.chars().all(|c| c.is_ascii_alphabetic())).then_some(scheme)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_embedded_properties() {
        let mut embedded = EmbeddedResources::new();
        embedded.register("defaults", "host=localhost\nport=8080\n");

        let loader = PropertiesLoader::new().with_embedded(embedded);
        let properties = loader.load("embedded:defaults").unwrap();

        assert_eq!(properties.get("host"), Some("localhost"));
        assert_eq!(properties.get("port"), Some("8080"));
    }

    #[test]
    fn test_embedded_json() {
        let mut embedded = EmbeddedResources::new();
        embedded.register("defaults.json", r#"{"host": "localhost"}"#);

        let loader = PropertiesLoader::new().with_embedded(embedded);
        let properties = loader.load("embedded:defaults.json").unwrap();

        assert_eq!(properties.get("host"), Some("localhost"));
    }

    #[test]
    fn test_embedded_not_found() {
        let loader = PropertiesLoader::new();
        let err = loader.load("embedded:nope").unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let loader = PropertiesLoader::new();
        let err = loader.load("file:/definitely/not/here.properties").unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn test_unsupported_scheme() {
        let loader = PropertiesLoader::new();
        let err = loader.load("http://example.org/app.properties").unwrap_err();
        match err {
            SourceError::UnsupportedScheme(scheme) => assert_eq!(scheme, "http"),
            other => panic!("expected UnsupportedScheme, got {other:?}"),
        }
    }

    #[test]
    fn test_later_location_overrides_earlier() {
        let mut embedded = EmbeddedResources::new();
        embedded.register("base", "port=8000\nname=app\n");
        embedded.register("prod", "port=8080\n");

        let loader = PropertiesLoader::new().with_embedded(embedded);
        let properties = loader.load("embedded:base, embedded:prod").unwrap();

        assert_eq!(properties.get("port"), Some("8080"));
        assert_eq!(properties.get("name"), Some("app"));
    }

    #[test]
    fn test_empty_location_segments_ignored() {
        let loader = PropertiesLoader::new();
        let properties = loader.load(" , ,").unwrap();
        assert!(properties.is_empty());
    }

    #[test]
    fn test_is_json() {
        assert!(is_json("app.json"));
        assert!(is_json("APP.JSON"));
        assert!(!is_json("app.properties"));
        assert!(!is_json("json"));
    }

    #[test]
    fn test_unknown_scheme_detection() {
        assert_eq!(unknown_scheme("http://x"), Some("http"));
        assert_eq!(unknown_scheme("classpath:x"), Some("classpath"));
        assert_eq!(unknown_scheme("file:x"), None);
        assert_eq!(unknown_scheme("plain/path.properties"), None);
        assert_eq!(unknown_scheme(r"C:\props\app.properties"), None);
    }
}
