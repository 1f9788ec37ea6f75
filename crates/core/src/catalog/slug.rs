//! Slug normalization for fuzzy category matching.

/// Canonicalize a slug or display name for comparison.
///
/// Lowercases the input and drops every whitespace character, hyphen and
/// underscore, so `"Land Rover"`, `"land-rover"` and `"LAND_ROVER "` all
/// compare equal as `"landrover"`.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !(c.is_whitespace() || *c == '-' || *c == '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
