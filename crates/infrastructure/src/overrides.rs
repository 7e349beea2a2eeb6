//! Process-level override sources.

use tracing::debug;

use conflux_application::ports::OverrideSource;

/// Overrides backed by process environment variables.
///
/// Consulted before the property set, so a deployment can override any
/// placeholder without touching the property files. This is the analog of
/// the JVM system-property lookup in the original system.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvOverrides;

impl OverrideSource for EnvOverrides {
    fn get(&self, key: &str) -> Option<String> {
        let value = std::env::var(key).ok()?;
        debug!(key, "found process environment override");
        Some(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_variable_resolves() {
        // PATH is always present in the test environment.
        assert!(EnvOverrides.get("PATH").is_some());
    }

    #[test]
    fn test_missing_variable_is_none() {
        assert!(EnvOverrides.get("CONFLUX_DEFINITELY_NOT_SET_XYZ").is_none());
    }
}
