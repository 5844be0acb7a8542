//! URL-safe identifiers derived from listing titles.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Base used when a title contains no usable characters.
pub const FALLBACK_SLUG: &str = "item";

static NON_SLUG_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Lower-case the title and collapse every run outside `[a-z0-9]` into one hyphen.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let hyphenated = NON_SLUG_RUN.replace_all(&lowered, "-");
    hyphenated.trim_matches('-').to_string()
}

/// Derive a slug for `title` that does not collide with any of `existing`.
///
/// Collisions get the lowest free numeric suffix (`-1`, `-2`, ...).
pub fn generate<'a>(title: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let taken: HashSet<&str> = existing.into_iter().collect();

    let mut base = slugify(title);
    if base.is_empty() {
        base = FALLBACK_SLUG.to_string();
    }

    if !taken.contains(base.as_str()) {
        return base;
    }

    let mut suffix = 1usize;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        suffix += 1;
    }
}
