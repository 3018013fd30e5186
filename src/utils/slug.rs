//! Slug generation for solution ids

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::FALLBACK_SLUG;

static NON_ALPHANUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern"));

/// Lower-case the title and collapse every run of non `[a-z0-9]` characters into `-`
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let slug = NON_ALPHANUMERIC_RUN.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Candidate ids for `base`: the base itself, then `base-1` .. `base-{max_suffix}`
pub fn candidates(base: &str, max_suffix: u32) -> impl Iterator<Item = String> + '_ {
    std::iter::once(base.to_string()).chain((1..=max_suffix).map(move |n| format!("{}-{}", base, n)))
}
