//! Recursive placeholder expansion.
//!
//! Drives the scanner over the input, substitutes resolved values back into
//! the string, and recurses into each resolved value's own placeholders
//! while tracking the keys on the current resolution path.

use std::collections::HashSet;

use tracing::debug;

use conflux_domain::{
    AugmentationRule, Delimiters, PlaceholderError, PlaceholderResult, PropertySet,
};

use super::scanner::read_placeholder;
use crate::ports::{IdentityHook, NoOverrides, OverrideSource, PropertyHook};

/// Expands property placeholders in configuration strings.
///
/// Configured once with a delimiter pair, an optional key augmentation
/// rule, a process-level override source, and a per-value hook; `expand`
/// may then be called any number of times. Each call tracks its own
/// resolution path, so an expander can be shared freely between calls.
pub struct PlaceholderExpander {
    delimiters: Delimiters,
    augmentation: AugmentationRule,
    overrides: Box<dyn OverrideSource>,
    hook: Box<dyn PropertyHook>,
}

impl PlaceholderExpander {
    /// Creates an expander with no augmentation, no overrides, and the
    /// identity hook.
    #[must_use]
    pub fn new(delimiters: Delimiters) -> Self {
        Self {
            delimiters,
            augmentation: AugmentationRule::none(),
            overrides: Box::new(NoOverrides),
            hook: Box::new(IdentityHook),
        }
    }

    /// Sets the key augmentation rule.
    #[must_use]
    pub fn with_augmentation(mut self, rule: AugmentationRule) -> Self {
        self.augmentation = rule;
        self
    }

    /// Sets the process-level override source.
    #[must_use]
    pub fn with_overrides(mut self, overrides: impl OverrideSource + 'static) -> Self {
        self.overrides = Box::new(overrides);
        self
    }

    /// Sets the per-value post-processing hook.
    #[must_use]
    pub fn with_hook(mut self, hook: impl PropertyHook + 'static) -> Self {
        self.hook = Box::new(hook);
        self
    }

    /// Returns the configured delimiter pair.
    #[must_use]
    pub const fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Quick check for whether `input` can contain a placeholder at all.
    #[must_use]
    pub fn has_placeholders(&self, input: &str) -> bool {
        input.contains(self.delimiters.prefix()) && input.contains(self.delimiters.suffix())
    }

    /// Expands every placeholder in `input` against `properties`.
    ///
    /// Values may themselves contain placeholders, which are resolved
    /// recursively before being spliced in. Inputs without placeholders
    /// come back unchanged.
    ///
    /// # Errors
    ///
    /// Any [`PlaceholderError`]; no partially expanded string is returned.
    pub fn expand(&self, input: &str, properties: &PropertySet) -> PlaceholderResult<String> {
        self.do_expand(input, input, properties, &HashSet::new())
    }

    fn do_expand(
        &self,
        input: &str,
        root: &str,
        properties: &PropertySet,
        visited: &HashSet<String>,
    ) -> PlaceholderResult<String> {
        let mut text = input.to_string();
        while let Some(placeholder) = read_placeholder(&text, &self.delimiters)? {
            if visited.contains(&placeholder.key) {
                return Err(PlaceholderError::CircularReference {
                    key: placeholder.key,
                    text: root.to_string(),
                });
            }

            // Each placeholder at this level recurses with its own copy of
            // the visited set: only the ancestor chain carries forward,
            // siblings do not poison each other.
            let mut branch = visited.clone();
            branch.insert(placeholder.key.clone());

            let value = self.resolve_value(&placeholder.key, &text, properties)?;
            let expanded = self.do_expand(&value, root, properties, &branch)?;

            let mut spliced =
                String::with_capacity(text.len() - placeholder.span.len() + expanded.len());
            spliced.push_str(&text[..placeholder.span.start]);
            spliced.push_str(&expanded);
            spliced.push_str(&text[placeholder.span.end..]);
            text = spliced;
        }
        Ok(text)
    }

    fn resolve_value(
        &self,
        key: &str,
        text: &str,
        properties: &PropertySet,
    ) -> PlaceholderResult<String> {
        let augmented = self.augmentation.augment(key);
        let should_fallback = self.augmentation.fallback_enabled() && augmented != key;

        if augmented != key {
            debug!(key, augmented = %augmented, "augmented placeholder key before lookup");
        }

        if let Some(value) = self.lookup(&augmented, properties) {
            return Ok(value);
        }
        if should_fallback {
            debug!(
                augmented_key = %augmented,
                key,
                "augmented key not found, falling back to unaugmented key"
            );
            if let Some(value) = self.lookup(key, properties) {
                return Ok(value);
            }
        }

        Err(PlaceholderError::PropertyNotFound {
            key: augmented,
            fallback_key: should_fallback.then(|| key.to_string()),
            text: text.to_string(),
        })
    }

    /// Overrides win unconditionally over the property set; values from
    /// either source run through the hook, which may veto them.
    fn lookup(&self, key: &str, properties: &PropertySet) -> Option<String> {
        let value = if let Some(value) = self.overrides.get(key) {
            debug!(key, "using process-level override for placeholder");
            value
        } else {
            properties.get(key)?.to_string()
        };
        self.hook.process(key, value, properties)
    }
}

/// One-shot expansion without building a [`PlaceholderExpander`] by hand.
///
/// # Errors
///
/// Any [`PlaceholderError`] raised during expansion.
pub fn expand(
    input: &str,
    properties: &PropertySet,
    delimiters: Delimiters,
    augmentation: AugmentationRule,
) -> PlaceholderResult<String> {
    PlaceholderExpander::new(delimiters)
        .with_augmentation(augmentation)
        .expand(input, properties)
}
