//! URL slugs for categories and posts.

/// Derive a slug from a human-readable name or title.
///
/// Punctuation is dropped rather than turned into a separator, so
/// `"Don't Panic!"` becomes `"dont-panic"`. Underscores survive. The result
/// may be empty when the input holds no letters or digits, and may be longer
/// than the input once non-ASCII text is transliterated.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .collect();
    let joined = kept
        .split('_')
        .map(slug::slugify)
        .collect::<Vec<_>>()
        .join("_");
    joined.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Whether `value` may be used verbatim as a slug.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Test Post"), "test-post");
        assert_eq!(slugify("Technology"), "technology");
        assert_eq!(slugify("  Web   Development "), "web-development");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Don't Panic!"), "dont-panic");
        assert_eq!(slugify("C++ & Rust: a tour"), "c-rust-a-tour");
    }

    #[test]
    fn test_slugify_transliterates() {
        assert_eq!(slugify("Café Crème"), "cafe-creme");
    }

    #[test]
    fn test_slugify_keeps_underscores() {
        assert_eq!(slugify("snake_case title"), "snake_case-title");
        assert_eq!(slugify("_private_ "), "private");
    }

    #[test]
    fn test_slugify_empty_for_symbols_only() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("getting-started_2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("has space"));
        assert!(!is_valid_slug("slash/inside"));
    }
}
