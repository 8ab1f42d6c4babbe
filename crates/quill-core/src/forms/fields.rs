//! Shared field checks.

use super::errors::FormErrors;
use crate::domain::slug::{is_valid_slug, slugify};

pub(crate) const REQUIRED: &str = "This field is required.";

/// Trimmed value of a required field; records an error when blank.
pub(crate) fn required(errors: &mut FormErrors, field: &str, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
        None
    } else {
        Some(value.to_string())
    }
}

/// Trimmed value of an optional field, `None` when blank.
pub(crate) fn optional(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Records an error when `value` is longer than `max` characters.
pub(crate) fn max_chars(errors: &mut FormErrors, field: &str, value: &str, max: usize) -> bool {
    let count = value.chars().count();
    if count > max {
        errors.add(
            field,
            format!("Ensure this value has at most {max} characters (it has {count})."),
        );
        false
    } else {
        true
    }
}

/// Optional slug field: letters, numbers, underscores or hyphens.
pub(crate) fn optional_slug(
    errors: &mut FormErrors,
    field: &str,
    raw: &str,
    max: usize,
) -> Option<String> {
    let value = optional(raw)?;
    if !is_valid_slug(&value) {
        errors.add(
            field,
            "Enter a valid \u{201c}slug\u{201d} consisting of letters, numbers, underscores or hyphens.",
        );
        return None;
    }
    max_chars(errors, field, &value, max).then_some(value)
}

/// Checks the slug `source` would derive to when none is supplied.
///
/// Transliteration can make it longer than `source`, so it is bounded
/// against the slug column on its own.
pub(crate) fn derived_slug(
    errors: &mut FormErrors,
    field: &str,
    source: &str,
    max: usize,
    empty: &str,
) {
    let slug = slugify(source);
    let count = slug.chars().count();
    if slug.is_empty() {
        errors.add(field, empty);
    } else if count > max {
        errors.add(
            field,
            format!(
                "The slug made from this value would have {count} characters (at most {max}). \
                 Shorten it or enter a slug."
            ),
        );
    }
}
