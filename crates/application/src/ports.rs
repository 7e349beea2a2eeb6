//! Ports through which the expansion engine reaches its collaborators.

use conflux_domain::PropertySet;

/// Process-level override lookup, consulted before the property set.
///
/// Any key the source answers for wins unconditionally, letting a
/// deployment override individual placeholders without touching the
/// property files. The original system used JVM system properties here.
pub trait OverrideSource {
    /// Returns the override value for `key`, if one is defined.
    fn get(&self, key: &str) -> Option<String>;
}

/// An override source with no entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl OverrideSource for NoOverrides {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Post-processing applied to every resolved value before substitution.
///
/// This is the engine's only outward extension point: callers can rewrite
/// individual values without touching the expansion algorithm. Returning
/// `None` vetoes the value, and lookup continues as if the key had not been
/// resolved from that source.
pub trait PropertyHook {
    /// Processes the `value` resolved for `key`.
    fn process(&self, key: &str, value: String, properties: &PropertySet) -> Option<String>;
}

/// The default hook: passes every value through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityHook;

impl PropertyHook for IdentityHook {
    fn process(&self, _key: &str, value: String, _properties: &PropertySet) -> Option<String> {
        Some(value)
    }
}
