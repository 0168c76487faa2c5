//! Page slug and locale code utilities.
//!
//! Checks identifiers and maps `(locale, slug)` pairs to output paths and URLs.

use regex::Regex;
use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// Slug of the page served at the locale root.
pub const HOME_SLUG: &str = "home";

static RE_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

static RE_LOCALE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(?:-[A-Z]{2})?$").unwrap());

// ============================================================================
// Validation
// ============================================================================

/// Lowercase ASCII words joined by single hyphens, e.g. `about-us`.
pub fn is_valid_slug(slug: &str) -> bool {
    RE_SLUG.is_match(slug)
}

/// Two-letter language code with an optional region, e.g. `en` or `pt-BR`.
pub fn is_valid_locale(locale: &str) -> bool {
    RE_LOCALE.is_match(locale)
}

// ============================================================================
// Page Paths
// ============================================================================

/// URL path of a page, e.g. `/fr/about/`. The home page maps to `/fr/`.
pub fn page_url_path(locale: &str, slug: &str) -> String {
    if slug == HOME_SLUG {
        format!("/{locale}/")
    } else {
        format!("/{locale}/{slug}/")
    }
}

/// Absolute URL of a page under `base_url`.
pub fn page_url(base_url: &str, locale: &str, slug: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), page_url_path(locale, slug))
}

/// Output HTML file of a page.
///
/// | locale | slug | html |
/// |--------|------|------|
/// | `en` | `home` | `public/en/index.html` |
/// | `en` | `about` | `public/en/about/index.html` |
pub fn page_html_path(output: &Path, locale: &str, slug: &str) -> PathBuf {
    let dir = output.join(locale);
    if slug == HOME_SLUG {
        dir.join("index.html")
    } else {
        dir.join(slug).join("index.html")
    }
}
