//! Query token normalization.
//!
//! Ingredients and tags are stored trimmed and lowercased. Every comparison
//! against user input must pass through the same folding, or the filter
//! silently returns wrong results.

/// Normalizes a single raw value.
pub fn normalize_token(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Splits a comma-separated parameter into normalized tokens.
///
/// Empty segments are dropped; an empty input produces an empty vector,
/// which callers treat as "dimension omitted". Duplicates are not removed
/// (harmless under set-containment matching).
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_token)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Tokenizes an optional query parameter.
pub fn tokenize_opt(raw: Option<&str>) -> Vec<String> {
    raw.map(tokenize).unwrap_or_default()
}

/// Normalizes a list of values for storage, dropping entries that are
/// empty after trimming.
pub fn normalize_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| normalize_token(v))
        .filter(|v| !v.is_empty())
        .collect()
}
