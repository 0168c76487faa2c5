//! Public HTML renderer.
//!
//! Renders a translation's raw block sequence in array order. Every
//! registered block type has a rendering; blocks that failed to load render
//! as a visible placeholder so a bad block never takes the page down.
//!
//! ```text
//! render_page(translation, ctx)
//!     ├── <head>  title, description, og:*, canonical, hreflang alternates
//!     └── <main>  render_blocks(blocks, ctx)
//!                     └── blocks::render_block() per block
//! ```

mod blocks;

use crate::block::Block;
use crate::page::Translation;
use crate::store::SiteData;
use crate::utils::slug::page_url;
use std::borrow::Cow;

/// Everything a page needs besides its own translation.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub slug: &'a str,
    pub locale: &'a str,
    /// Site title appended to page titles.
    pub site_title: &'a str,
    /// Fallback description for pages without `seoDescription`.
    pub site_description: &'a str,
    /// Absolute site URL without trailing slash.
    pub base_url: Option<&'a str>,
    /// Locales this page is published in, for `hreflang` links.
    pub alternates: &'a [String],
    pub copyright: &'a str,
    pub data: &'a SiteData,
}

/// Render blocks to an HTML fragment.
pub fn render_blocks(blocks: &[Block], ctx: &RenderContext<'_>) -> String {
    let mut html = String::with_capacity(blocks.len() * 256);
    for block in blocks {
        blocks::render_block(&mut html, block, ctx);
    }
    html
}

/// Number of blocks that will render as placeholders.
pub fn count_unknown(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .filter(|block| matches!(block, Block::Unknown(_)))
        .count()
}

/// Render a complete HTML document for one translation.
pub fn render_page(translation: &Translation, ctx: &RenderContext<'_>) -> String {
    let title = page_title(translation, ctx.site_title);
    let description = translation
        .seo_description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(ctx.site_description);

    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!(r#"<html lang="{}">"#, escape_html(ctx.locale)));
    html.push_str("\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
    html.push_str(&meta("name", "description", description));
    html.push_str(&meta("property", "og:type", "website"));
    html.push_str(&meta("property", "og:title", &title));
    html.push_str(&meta("property", "og:description", description));
    html.push_str(&meta("property", "og:locale", ctx.locale));
    if let Some(image) = translation.og_image.as_deref().filter(|i| !i.is_empty()) {
        html.push_str(&meta("property", "og:image", image));
    }

    if let Some(base_url) = ctx.base_url {
        let url = page_url(base_url, ctx.locale, ctx.slug);
        html.push_str(&meta("property", "og:url", &url));
        html.push_str(&format!(
            "<link rel=\"canonical\" href=\"{}\">\n",
            escape_html(&url)
        ));
        for locale in ctx.alternates {
            html.push_str(&format!(
                "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">\n",
                escape_html(locale),
                escape_html(&page_url(base_url, locale, ctx.slug))
            ));
        }
    }

    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<main class=\"page page-{}\">\n",
        escape_html(ctx.slug)
    ));
    html.push_str(&render_blocks(&translation.blocks, ctx));
    html.push_str("</main>\n");
    if !ctx.copyright.is_empty() {
        html.push_str(&format!(
            "<footer><p>{}</p></footer>\n",
            escape_html(ctx.copyright)
        ));
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// `seoTitle` (or `title`) followed by the site title.
fn page_title(translation: &Translation, site_title: &str) -> String {
    let title = translation
        .seo_title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(&translation.title);

    if site_title.is_empty() || title == site_title {
        title.to_owned()
    } else {
        format!("{title} | {site_title}")
    }
}

fn meta(attr: &str, key: &str, content: &str) -> String {
    format!(
        "<meta {attr}=\"{key}\" content=\"{}\">\n",
        escape_html(content)
    )
}

/// Escape HTML special characters.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape a link target, replacing script URLs with `#`.
pub fn safe_href(href: &str) -> Cow<'_, str> {
    let scheme = href.trim_start().to_ascii_lowercase();
    if scheme.starts_with("javascript:") || scheme.starts_with("data:") {
        Cow::Borrowed("#")
    } else {
        escape_html(href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Status;
    use serde_json::json;

    fn ctx<'a>(data: &'a SiteData, alternates: &'a [String]) -> RenderContext<'a> {
        RenderContext {
            slug: "about",
            locale: "en",
            site_title: "Acme",
            site_description: "Acme Consulting",
            base_url: Some("https://acme.example"),
            alternates,
            copyright: "",
            data,
        }
    }

    fn blocks(value: serde_json::Value) -> Vec<Block> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("hello"), "hello");
        assert!(matches!(escape_html("hello"), Cow::Borrowed(_)));
        assert_eq!(escape_html("<b>"), "&lt;b&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_html("it's"), "it&#39;s");
    }

    #[test]
    fn test_safe_href() {
        assert_eq!(safe_href("/contact"), "/contact");
        assert_eq!(safe_href("JavaScript:alert(1)"), "#");
        assert_eq!(safe_href(" data:text/html,x"), "#");
        assert_eq!(safe_href("/search?a=1&b=2"), "/search?a=1&amp;b=2");
    }

    #[test]
    fn test_render_blocks_in_order() {
        let data = SiteData::default();
        let html = render_blocks(
            &blocks(json!([
                { "type": "heading", "level": 1, "text": "About" },
                { "type": "paragraph", "text": "We build things." },
                { "type": "divider" }
            ])),
            &ctx(&data, &[]),
        );

        let h1 = html.find("<h1>About</h1>").unwrap();
        let p = html.find("<p>We build things.</p>").unwrap();
        let hr = html.find("<hr>").unwrap();
        assert!(h1 < p && p < hr);
    }

    #[test]
    fn test_render_unknown_block_placeholder() {
        let data = SiteData::default();
        let blocks = blocks(json!([
            { "type": "carousel", "slides": [] },
            { "type": "hero" },
            { "noType": true },
            { "type": "paragraph", "text": "Still here" }
        ]));

        let html = render_blocks(&blocks, &ctx(&data, &[]));

        assert_eq!(count_unknown(&blocks), 3);
        assert_eq!(html.matches("class=\"block-unknown\"").count(), 3);
        assert!(html.contains("data-type=\"carousel\""));
        assert!(html.contains("<p>Still here</p>"));
    }

    #[test]
    fn test_render_escapes_text() {
        let data = SiteData::default();
        let html = render_blocks(
            &blocks(json!([{ "type": "paragraph", "text": "<script>alert(1)</script>" }])),
            &ctx(&data, &[]),
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_page_seo_head() {
        let data = SiteData::default();
        let alternates = vec!["en".to_string(), "fr".to_string()];
        let translation = Translation {
            title: "About us".into(),
            seo_title: Some("About Acme".into()),
            og_image: Some("https://cdn.acme.example/og.png".into()),
            blocks: blocks(json!([{ "type": "paragraph", "text": "Hi" }])),
            status: Status::Published,
            ..Default::default()
        };

        let html = render_page(&translation, &ctx(&data, &alternates));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="en">"#));
        assert!(html.contains("<title>About Acme | Acme</title>"));
        assert!(html.contains(r#"<meta name="description" content="Acme Consulting">"#));
        assert!(html.contains(r#"<meta property="og:title" content="About Acme | Acme">"#));
        assert!(html.contains(r#"<meta property="og:image" content="https://cdn.acme.example/og.png">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://acme.example/en/about/">"#));
        assert!(html.contains(
            r#"<link rel="alternate" hreflang="fr" href="https://acme.example/fr/about/">"#
        ));
        assert!(html.contains("<main class=\"page page-about\">"));
    }

    #[test]
    fn test_render_page_without_base_url() {
        let data = SiteData::default();
        let mut context = ctx(&data, &[]);
        context.base_url = None;
        let translation = Translation {
            title: "Acme".into(),
            seo_description: Some("Custom".into()),
            ..Default::default()
        };

        let html = render_page(&translation, &context);

        assert!(html.contains("<title>Acme</title>"));
        assert!(html.contains(r#"content="Custom""#));
        assert!(!html.contains("canonical"));
        assert!(!html.contains("og:image"));
    }
}
