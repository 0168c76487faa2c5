//! `[base]` section configuration.
//!
//! Contains basic site information and the locales the site is published in.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in vitrine.toml - site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Acme Consulting"
/// description = "Strategy and delivery for growing teams"
/// url = "https://acme.example"
/// default_locale = "en"
/// locales = ["en", "fr"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, appended to every page title.
    pub title: String,

    /// Fallback SEO description for pages without one.
    pub description: String,

    /// Base URL for absolute links in the sitemap and `og:` tags.
    /// Required when `[build.sitemap].enable = true`.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// Locale served at the site root.
    #[serde(default = "defaults::base::default_locale")]
    #[educe(Default = defaults::base::default_locale())]
    pub default_locale: String,

    /// Every locale the site is published in.
    #[serde(default = "defaults::base::locales")]
    #[educe(Default = defaults::base::locales())]
    pub locales: Vec<String>,

    /// Copyright notice for the page footer.
    #[serde(default)]
    pub copyright: String,
}
