//! Sitemap generation.
//!
//! Lists every published page translation for search engine indexing. Pages
//! published in more than one locale link their siblings with `xhtml:link`
//! alternates.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:xhtml="http://www.w3.org/1999/xhtml">
//!   <url>
//!     <loc>https://example.com/en/about/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <xhtml:link rel="alternate" hreflang="fr" href="https://example.com/fr/about/"/>
//!   </url>
//! </urlset>
//! ```

use crate::{log, page::TranslationRecord, utils::slug::page_url};
use anyhow::{Context, Result};
use std::{collections::BTreeMap, fs, path::Path};

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// XML namespace for hreflang alternates
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

// ============================================================================
// Public API
// ============================================================================

/// Write `sitemap.xml` for the published records to `path`.
pub fn build_sitemap(base_url: &str, records: &[&TranslationRecord], path: &Path) -> Result<()> {
    Sitemap::from_records(base_url, records).write(path)
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

/// Sitemap data structure
#[derive(Debug)]
pub struct Sitemap {
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
#[derive(Debug)]
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// Last modification date (YYYY-MM-DD)
    lastmod: Option<String>,
    /// `(locale, url)` of every translation of the same page, self included
    alternates: Vec<(String, String)>,
}

impl Sitemap {
    /// Build entries from published records. Drafts are skipped.
    pub fn from_records(base_url: &str, records: &[&TranslationRecord]) -> Self {
        let mut by_slug: BTreeMap<&str, Vec<&TranslationRecord>> = BTreeMap::new();
        for &record in records.iter().filter(|r| r.is_published()) {
            by_slug.entry(record.slug()).or_default().push(record);
        }

        let mut urls = Vec::with_capacity(records.len());
        for (slug, mut translations) in by_slug {
            translations.sort_by(|a, b| a.locale().cmp(b.locale()));
            let alternates: Vec<_> = if translations.len() > 1 {
                translations
                    .iter()
                    .map(|r| (r.locale().to_owned(), page_url(base_url, r.locale(), slug)))
                    .collect()
            } else {
                Vec::new()
            };

            for record in translations {
                urls.push(UrlEntry {
                    loc: page_url(base_url, record.locale(), slug),
                    lastmod: record
                        .translation
                        .updated_at
                        .map(|t| t.format("%Y-%m-%d").to_string()),
                    alternates: alternates.clone(),
                });
            }
        }

        Self { urls }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Generate sitemap XML string.
    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<urlset xmlns="{SITEMAP_NS}" xmlns:xhtml="{XHTML_NS}">"#
        ));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            for (locale, href) in &entry.alternates {
                xml.push_str(&format!(
                    "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>\n",
                    escape_xml(locale),
                    escape_xml(href)
                ));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to output file.
    pub fn write(self, path: &Path) -> Result<()> {
        let xml = self.into_xml();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, xml)
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

        log!("sitemap"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================
