//! Quote-aware scanner for property placeholders.
//!
//! Locates the next well-formed placeholder in a string: the first suffix
//! token not wrapped in matching quotes, paired with the nearest preceding
//! unescaped prefix token. Scanning backward from the suffix resolves the
//! innermost pair first, which is what recursive expansion needs when an
//! inner placeholder closes before an outer one.

use std::ops::Range;

use conflux_domain::{Delimiters, PlaceholderError, PlaceholderResult};

/// A placeholder located in an input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte range of the whole placeholder, both delimiter tokens included.
    pub span: Range<usize>,
    /// The raw key between the delimiters. May be empty.
    pub key: String,
}

/// Finds the next well-formed placeholder in `input`.
///
/// Returns `Ok(None)` when the input holds no further placeholders, which
/// is the normal termination condition rather than an error.
///
/// # Errors
///
/// [`PlaceholderError::MissingSuffix`] when an unescaped prefix token
/// exists but no unescaped suffix token closes it, and
/// [`PlaceholderError::MissingPrefix`] when an unescaped suffix token has
/// no preceding unescaped prefix token.
pub fn read_placeholder(
    input: &str,
    delimiters: &Delimiters,
) -> PlaceholderResult<Option<Placeholder>> {
    let prefix = delimiters.prefix();
    let suffix = delimiters.suffix();

    let Some(suffix_at) = suffix_index(input, suffix) else {
        // No usable suffix. Any unescaped prefix left in the string means
        // an unterminated placeholder, which is never treated as literal
        // text.
        if matching_prefix_index(input, prefix, input.len()).is_some() {
            return Err(PlaceholderError::MissingSuffix {
                token: suffix.to_string(),
                text: input.to_string(),
            });
        }
        return Ok(None);
    };

    let Some(prefix_at) = matching_prefix_index(input, prefix, suffix_at) else {
        return Err(PlaceholderError::MissingPrefix {
            token: prefix.to_string(),
            text: input.to_string(),
        });
    };

    let key = input[prefix_at + prefix.len()..suffix_at].to_string();
    Ok(Some(Placeholder {
        span: prefix_at..suffix_at + suffix.len(),
        key,
    }))
}

/// First occurrence of the suffix token that is not quote-escaped.
fn suffix_index(input: &str, token: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    let token = token.as_bytes();

    let mut from = 0;
    while let Some(at) = find_token(bytes, token, from) {
        if !is_quoted(bytes, at, token.len()) {
            return Some(at);
        }
        from = at + 1;
    }
    None
}

/// Nearest unescaped occurrence of the prefix token that ends at or before
/// `limit`, scanning backward.
fn matching_prefix_index(input: &str, token: &str, limit: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    let token = token.as_bytes();

    let mut limit = limit;
    while let Some(at) = rfind_token(bytes, token, limit) {
        if !is_quoted(bytes, at, token.len()) {
            return Some(at);
        }
        // Continue strictly before this occurrence.
        limit = at + token.len() - 1;
    }
    None
}

/// First occurrence of `token` starting at or after `from`.
fn find_token(haystack: &[u8], token: &[u8], from: usize) -> Option<usize> {
    if token.is_empty() || haystack.len() < token.len() {
        return None;
    }
    (from..=haystack.len() - token.len()).find(|&i| &haystack[i..i + token.len()] == token)
}

/// Last occurrence of `token` ending at or before `limit`.
fn rfind_token(haystack: &[u8], token: &[u8], limit: usize) -> Option<usize> {
    if token.is_empty() || limit < token.len() {
        return None;
    }
    (0..=limit - token.len())
        .rev()
        .find(|&i| &haystack[i..i + token.len()] == token)
}

/// True when the token occurrence at `at` is wrapped in identical single or
/// double quote characters. A quote on one side only does not escape.
fn is_quoted(bytes: &[u8], at: usize, token_len: usize) -> bool {
    let after = at + token_len;
    if at == 0 || after >= bytes.len() {
        return false;
    }
    let before = bytes[at - 1];
    before == bytes[after] && (before == b'\'' || before == b'"')
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(input: &str) -> PlaceholderResult<Option<Placeholder>> {
        read_placeholder(input, &Delimiters::default())
    }

    #[test]
    fn test_no_placeholder() {
        assert_eq!(scan("plain text").unwrap(), None);
        assert_eq!(scan("").unwrap(), None);
    }

    #[test]
    fn test_simple_placeholder() {
        let placeholder = scan("{{name}}").unwrap().unwrap();
        assert_eq!(placeholder.key, "name");
        assert_eq!(placeholder.span, 0..8);
    }

    #[test]
    fn test_placeholder_with_surrounding_text() {
        let input = "http://{{host}}/api";
        let placeholder = scan(input).unwrap().unwrap();
        assert_eq!(placeholder.key, "host");
        assert_eq!(&input[placeholder.span], "{{host}}");
    }

    #[test]
    fn test_first_suffix_wins() {
        let placeholder = scan("{{a}} and {{b}}").unwrap().unwrap();
        assert_eq!(placeholder.key, "a");
    }

    #[test]
    fn test_nested_resolves_inner_pair_first() {
        // The inner suffix closes first, so backward scanning pairs it with
        // the nearest preceding prefix.
        let placeholder = scan("{{outer{{inner}}}}").unwrap().unwrap();
        assert_eq!(placeholder.key, "inner");
        assert_eq!(placeholder.span, 7..16);
    }

    #[test]
    fn test_empty_key_is_valid() {
        let placeholder = scan("{{}}").unwrap().unwrap();
        assert_eq!(placeholder.key, "");
        assert_eq!(placeholder.span, 0..4);
    }

    #[test]
    fn test_missing_suffix() {
        let err = scan("{{key").unwrap_err();
        assert_eq!(
            err,
            PlaceholderError::MissingSuffix {
                token: "}}".to_string(),
                text: "{{key".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_prefix() {
        let err = scan("key}}").unwrap_err();
        assert_eq!(
            err,
            PlaceholderError::MissingPrefix {
                token: "{{".to_string(),
                text: "key}}".to_string(),
            }
        );
    }

    #[test]
    fn test_quoted_suffix_skipped() {
        // The first }} is wrapped in double quotes and does not close the
        // placeholder; the next genuine suffix does.
        let input = r#"{{a"}}"b}}"#;
        let placeholder = scan(input).unwrap().unwrap();
        assert_eq!(placeholder.key, r#"a"}}"b"#);
        assert_eq!(placeholder.span, 0..input.len());
    }

    #[test]
    fn test_quoted_prefix_skipped() {
        let input = r#"{{a'{{'b}}"#;
        let placeholder = scan(input).unwrap().unwrap();
        assert_eq!(placeholder.key, r#"a'{{'b"#);
        assert_eq!(placeholder.span, 0..input.len());
    }

    #[test]
    fn test_mismatched_quotes_do_not_escape() {
        let input = r#"{{a}}'x"#;
        let placeholder = scan(input).unwrap().unwrap();
        assert_eq!(placeholder.key, "a");
    }

    #[test]
    fn test_quote_on_one_side_does_not_escape() {
        let placeholder = scan(r#"{{a}}""#).unwrap().unwrap();
        assert_eq!(placeholder.key, "a");
    }

    #[test]
    fn test_fully_quoted_placeholder_is_invisible() {
        // Both tokens escaped: nothing to scan, and no unescaped prefix
        // remains to complain about.
        assert_eq!(scan(r#"x"{{"y"}}"z"#).unwrap(), None);
    }

    #[test]
    fn test_quoted_suffix_with_unescaped_prefix_is_missing_suffix() {
        let err = scan(r#"{{key"}}""#).unwrap_err();
        assert!(matches!(err, PlaceholderError::MissingSuffix { .. }));
    }

    #[test]
    fn test_custom_delimiters() {
        let delimiters = Delimiters::new("[[", "]]").unwrap();
        let placeholder = read_placeholder("x[[key]]y", &delimiters)
            .unwrap()
            .unwrap();
        assert_eq!(placeholder.key, "key");
        assert_eq!(placeholder.span, 1..8);
    }

    #[test]
    fn test_multibyte_text_around_placeholder() {
        let input = "héllo {{clé}} wörld";
        let placeholder = scan(input).unwrap().unwrap();
        assert_eq!(placeholder.key, "clé");
        assert_eq!(&input[placeholder.span], "{{clé}}");
    }
}
