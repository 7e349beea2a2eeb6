//! Placeholder delimiters and key augmentation.

use crate::error::{DomainError, DomainResult};

/// Default prefix token marking the start of a placeholder.
pub const DEFAULT_PREFIX_TOKEN: &str = "{{";

/// Default suffix token marking the end of a placeholder.
pub const DEFAULT_SUFFIX_TOKEN: &str = "}}";

/// The delimiter token pair enclosing placeholder keys.
///
/// Both tokens are non-empty and distinct; `new` rejects anything else so
/// the scanner never has to handle degenerate pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    prefix: String,
    suffix: String,
}

impl Delimiters {
    /// Creates a validated delimiter pair.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidDelimiters`] when either token is
    /// empty or the tokens are equal.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> DomainResult<Self> {
        let prefix = prefix.into();
        let suffix = suffix.into();

        if prefix.is_empty() || suffix.is_empty() {
            return Err(DomainError::InvalidDelimiters(
                "delimiter tokens must be non-empty".to_string(),
            ));
        }
        if prefix == suffix {
            return Err(DomainError::InvalidDelimiters(
                "prefix and suffix tokens must differ".to_string(),
            ));
        }

        Ok(Self { prefix, suffix })
    }

    /// Returns the prefix token.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the suffix token.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl Default for Delimiters {
    /// The `{{` / `}}` pair used for endpoint URIs.
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX_TOKEN.to_string(),
            suffix: DEFAULT_SUFFIX_TOKEN.to_string(),
        }
    }
}

/// Optional decoration applied to a raw key before lookup.
///
/// The augmented key is `prefix + raw key + suffix`, each part concatenated
/// only when configured. With fallback enabled, a failed lookup of the
/// augmented key is retried with the raw key. One rule applies uniformly to
/// every key encountered during a single expansion call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AugmentationRule {
    prefix: Option<String>,
    suffix: Option<String>,
    fallback_to_unaugmented: bool,
}

impl AugmentationRule {
    /// Creates a rule that leaves keys untouched.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets the key prefix. Empty strings count as unset.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    /// Sets the key suffix. Empty strings count as unset.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.suffix = (!suffix.is_empty()).then_some(suffix);
        self
    }

    /// Enables or disables fallback to the unaugmented key.
    #[must_use]
    pub const fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback_to_unaugmented = fallback;
        self
    }

    /// Returns the augmented form of `key`.
    #[must_use]
    pub fn augment(&self, key: &str) -> String {
        let mut augmented = String::with_capacity(
            key.len()
                + self.prefix.as_ref().map_or(0, String::len)
                + self.suffix.as_ref().map_or(0, String::len),
        );
        if let Some(prefix) = &self.prefix {
            augmented.push_str(prefix);
        }
        augmented.push_str(key);
        if let Some(suffix) = &self.suffix {
            augmented.push_str(suffix);
        }
        augmented
    }

    /// True when fallback to the unaugmented key is enabled.
    #[must_use]
    pub const fn fallback_enabled(&self) -> bool {
        self.fallback_to_unaugmented
    }

    /// True when the rule leaves every key unchanged.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.prefix.is_none() && self.suffix.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_delimiters() {
        let delimiters = Delimiters::default();
        assert_eq!(delimiters.prefix(), "{{");
        assert_eq!(delimiters.suffix(), "}}");
    }

    #[test]
    fn test_custom_delimiters() {
        let delimiters = Delimiters::new("[[", "]]").unwrap();
        assert_eq!(delimiters.prefix(), "[[");
        assert_eq!(delimiters.suffix(), "]]");
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(matches!(
            Delimiters::new("", "}}"),
            Err(DomainError::InvalidDelimiters(_))
        ));
        assert!(matches!(
            Delimiters::new("{{", ""),
            Err(DomainError::InvalidDelimiters(_))
        ));
    }

    #[test]
    fn test_equal_tokens_rejected() {
        assert!(matches!(
            Delimiters::new("%%", "%%"),
            Err(DomainError::InvalidDelimiters(_))
        ));
    }

    #[test]
    fn test_augment_noop() {
        let rule = AugmentationRule::none();
        assert!(rule.is_noop());
        assert_eq!(rule.augment("name"), "name");
    }

    #[test]
    fn test_augment_prefix_and_suffix() {
        let rule = AugmentationRule::none()
            .with_prefix("app.")
            .with_suffix(".prod");
        assert_eq!(rule.augment("name"), "app.name.prod");
        assert!(!rule.is_noop());
    }

    #[test]
    fn test_empty_decoration_counts_as_unset() {
        let rule = AugmentationRule::none().with_prefix("").with_suffix("");
        assert!(rule.is_noop());
        assert_eq!(rule.augment("name"), "name");
    }

    #[test]
    fn test_fallback_flag() {
        let rule = AugmentationRule::none().with_fallback(true);
        assert!(rule.fallback_enabled());
        assert!(!AugmentationRule::none().fallback_enabled());
    }
}
