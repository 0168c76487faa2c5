//! Site building orchestration.
//!
//! Renders every published translation to static HTML.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── prepare_output()     clean or create the output directory
//!     │
//!     ├── rayon::join
//!     │       ├── DirStore::list()   translations
//!     │       └── SiteData::load()   partners, insights
//!     │
//!     ├── render_pages()       published translations, in parallel
//!     │
//!     ├── write_root_index()   `/` redirects to the default locale
//!     │
//!     └── build_sitemap()      when enabled
//! ```

use crate::{
    config::SiteConfig,
    generator::sitemap::build_sitemap,
    log,
    logger::Progress,
    page::TranslationRecord,
    render::{RenderContext, count_unknown, escape_html, render_page},
    store::{DirStore, SiteData, TranslationStore},
    utils::slug::{HOME_SLUG, page_html_path, page_url_path},
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::{
    fs,
    path::Path,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Counts reported after a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub pages_written: usize,
    pub drafts_skipped: usize,
    /// Translations in locales missing from `[base.locales]`.
    pub locales_skipped: usize,
    /// Blocks rendered as placeholders.
    pub unknown_blocks: usize,
}

/// Build the entire site into `config.build.output`.
///
/// If `config.build.clean` is true, clears the output directory first.
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let output = &config.build.output;
    let content = &config.build.content;

    prepare_output(output, config.build.clean)?;

    let (records, data) = rayon::join(
        || DirStore::new(content).list(),
        || SiteData::load(content),
    );
    let records = records?;
    let data = data?;

    let mut report = BuildReport::default();
    let mut published = Vec::with_capacity(records.len());
    for record in &records {
        if !record.is_published() {
            report.drafts_skipped += 1;
        } else if !config.base.locales.contains(&record.locale_code) {
            log!("build"; "skipping `{}`: locale `{}` is not configured", record.page_id, record.locale_code);
            report.locales_skipped += 1;
        } else {
            published.push(record);
        }
    }
    log!("build"; "rendering {} pages ({} drafts skipped)", published.len(), report.drafts_skipped);

    let (written, unknown) = render_pages(config, &published, &data)?;
    report.pages_written = written;
    report.unknown_blocks = unknown;

    write_root_index(output, &config.base.default_locale)?;

    if config.build.sitemap.enable {
        let base_url = config
            .base_url()
            .ok_or_else(|| anyhow!("[base.url] is required for sitemap generation"))?;
        build_sitemap(base_url, &published, &output.join(&config.build.sitemap.path))?;
    }

    log_build_result(&report);
    Ok(report)
}

/// Create the output directory, removing old content when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Render and write pages in parallel. Returns `(pages, unknown blocks)`.
fn render_pages(
    config: &SiteConfig,
    published: &[&TranslationRecord],
    data: &SiteData,
) -> Result<(usize, usize)> {
    let mut alternates: FxHashMap<&str, Vec<String>> = FxHashMap::default();
    for record in published {
        alternates
            .entry(record.slug())
            .or_default()
            .push(record.locale_code.clone());
    }

    let progress = Progress::start("pages", published.len());
    let has_error = AtomicBool::new(false);
    let unknown = AtomicUsize::new(0);

    published.par_iter().try_for_each(|record| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }

        let ctx = RenderContext {
            slug: record.slug(),
            locale: record.locale(),
            site_title: &config.base.title,
            site_description: &config.base.description,
            base_url: config.base_url(),
            alternates: alternates
                .get(record.slug())
                .map_or(&[][..], Vec::as_slice),
            copyright: &config.base.copyright,
            data,
        };

        let placeholders = count_unknown(&record.translation.blocks);
        if placeholders > 0 {
            log!("build"; "`{}` ({}) has {placeholders} unsupported blocks", record.page_id, record.locale_code);
            unknown.fetch_add(placeholders, Ordering::Relaxed);
        }

        if let Err(e) = write_page(config, record, &ctx) {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", record.page_id, e);
            }
            return Err(anyhow!("Build failed"));
        }

        if let Some(progress) = &progress {
            progress.inc();
        }
        Ok(())
    })?;

    if let Some(progress) = progress {
        progress.finish();
    }

    Ok((published.len(), unknown.into_inner()))
}

fn write_page(config: &SiteConfig, record: &TranslationRecord, ctx: &RenderContext<'_>) -> Result<()> {
    let path = page_html_path(&config.build.output, record.locale(), record.slug());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let html = render_page(&record.translation, ctx);
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write `index.html` at the output root, redirecting to the default locale.
fn write_root_index(output: &Path, default_locale: &str) -> Result<()> {
    let target = escape_html(&page_url_path(default_locale, HOME_SLUG)).into_owned();
    let html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"0; url={target}\">\n\
         <link rel=\"canonical\" href=\"{target}\">\n</head>\n\
         <body><a href=\"{target}\">{target}</a></body>\n</html>\n"
    );
    let path = output.join("index.html");
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))
}

fn log_build_result(report: &BuildReport) {
    if report.pages_written == 0 {
        log!("warn"; "no published pages, check translation status in content");
    } else if report.unknown_blocks > 0 {
        log!(
            "build";
            "done: {} pages, {} unsupported blocks",
            report.pages_written,
            report.unknown_blocks
        );
    } else {
        log!("build"; "done: {} pages", report.pages_written);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Status, Translation};
    use serde_json::json;
    use tempfile::TempDir;

    fn config(dir: &Path) -> SiteConfig {
        let mut config = SiteConfig::from_str(
            r#"
            [base]
            title = "Acme"
            description = "Acme Consulting"
            url = "https://acme.example"
            locales = ["en", "fr"]
            "#,
        )
        .unwrap();
        config.update_path_with_root(dir);
        config
    }

    fn save(dir: &Path, slug: &str, locale: &str, status: Status, blocks: serde_json::Value) {
        let record = TranslationRecord::new(
            slug,
            locale,
            Translation {
                title: slug.into(),
                blocks: serde_json::from_value(blocks).unwrap(),
                status,
                ..Default::default()
            },
        );
        DirStore::new(dir.join("content")).save(&record).unwrap();
    }

    #[test]
    fn test_build_writes_published_pages() {
        let dir = TempDir::new().unwrap();
        let paragraph = json!([{ "type": "paragraph", "text": "Hello" }]);
        save(dir.path(), "home", "en", Status::Published, paragraph.clone());
        save(dir.path(), "home", "fr", Status::Published, paragraph.clone());
        save(dir.path(), "about", "en", Status::Draft, paragraph);
        let config = config(dir.path());

        let report = build_site(&config).unwrap();

        assert_eq!(report.pages_written, 2);
        assert_eq!(report.drafts_skipped, 1);
        let output = &config.build.output;
        assert!(output.join("en/index.html").is_file());
        assert!(output.join("fr/index.html").is_file());
        assert!(!output.join("en/about/index.html").exists());

        let root = fs::read_to_string(output.join("index.html")).unwrap();
        assert!(root.contains("url=/en/"));

        let sitemap = fs::read_to_string(output.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://acme.example/fr/</loc>"));
        assert!(!sitemap.contains("about"));
    }

    #[test]
    fn test_build_counts_unknown_blocks() {
        let dir = TempDir::new().unwrap();
        save(
            dir.path(),
            "about",
            "en",
            Status::Published,
            json!([{ "type": "carousel" }, { "type": "divider" }]),
        );
        let config = config(dir.path());

        let report = build_site(&config).unwrap();

        assert_eq!(report.unknown_blocks, 1);
        let html = fs::read_to_string(config.build.output.join("en/about/index.html")).unwrap();
        assert!(html.contains("block-unknown"));
        assert!(html.contains("<hr>"));
    }

    #[test]
    fn test_build_skips_unconfigured_locale() {
        let dir = TempDir::new().unwrap();
        save(dir.path(), "home", "de", Status::Published, json!([]));
        let config = config(dir.path());

        let report = build_site(&config).unwrap();

        assert_eq!(report.pages_written, 0);
        assert_eq!(report.locales_skipped, 1);
        assert!(!config.build.output.join("de").exists());
    }

    #[test]
    fn test_build_ignores_record_claiming_outside_path() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content/home");
        fs::create_dir_all(&content).unwrap();
        fs::write(
            content.join("en.json"),
            r#"{"pageId":"../../../escaped","localeCode":"en","title":"x","status":"PUBLISHED"}"#,
        )
        .unwrap();
        let config = config(dir.path());

        let report = build_site(&config).unwrap();

        assert_eq!(report.pages_written, 0);
        assert!(!dir.path().join("escaped").exists());
        assert!(!config.build.output.join("en").exists());
    }

    #[test]
    fn test_clean_removes_stale_output() {
        let dir = TempDir::new().unwrap();
        let mut config = config(dir.path());
        config.build.clean = true;
        config.build.sitemap.enable = false;
        fs::create_dir_all(&config.build.output).unwrap();
        fs::write(config.build.output.join("stale.html"), "old").unwrap();

        build_site(&config).unwrap();

        assert!(!config.build.output.join("stale.html").exists());
        assert!(config.build.output.join("index.html").is_file());
    }
}
