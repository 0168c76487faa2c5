//! Persistence boundary for page translations.
//!
//! # Directory layout
//!
//! ```text
//! content/
//! ├── partners.json         # SiteData partners
//! ├── insights.json         # SiteData insights
//! ├── home/
//! │   ├── en.json           # TranslationRecord (home, en)
//! │   └── fr.json
//! └── about/
//!     └── en.json
//! ```

use crate::log;
use crate::page::{Status, TranslationRecord, prepare_save};
use crate::utils::slug::{is_valid_locale, is_valid_slug};
use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Where translations are loaded from and saved to.
pub trait TranslationStore: Send + Sync {
    fn load(&self, slug: &str, locale: &str) -> Result<Option<TranslationRecord>>;

    /// Replace the stored translation of `(record.page_id, record.locale_code)`.
    fn save(&self, record: &TranslationRecord) -> Result<()>;

    /// Every stored translation, ordered by slug then locale.
    fn list(&self) -> Result<Vec<TranslationRecord>>;
}

/// Validate, stamp and store a translation.
pub fn save_translation(store: &dyn TranslationStore, record: &mut TranslationRecord) -> Result<()> {
    prepare_save(record, Utc::now()).with_context(|| {
        format!(
            "Rejected save of `{}` ({})",
            record.page_id, record.locale_code
        )
    })?;
    store.save(record)
}

// ============================================================================
// In-memory Store
// ============================================================================

/// Translations held in memory, keyed by `(slug, locale)`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<(String, String), TranslationRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl TranslationStore for MemoryStore {
    fn load(&self, slug: &str, locale: &str) -> Result<Option<TranslationRecord>> {
        let key = (slug.to_owned(), locale.to_owned());
        Ok(self.records.read().get(&key).cloned())
    }

    fn save(&self, record: &TranslationRecord) -> Result<()> {
        let key = (record.page_id.clone(), record.locale_code.clone());
        self.records.write().insert(key, record.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<TranslationRecord>> {
        Ok(self.records.read().values().cloned().collect())
    }
}

// ============================================================================
// Directory Store
// ============================================================================

/// Translations stored as `<root>/<slug>/<locale>.json`.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn record_path(&self, slug: &str, locale: &str) -> PathBuf {
        self.root.join(slug).join(format!("{locale}.json"))
    }
}

impl TranslationStore for DirStore {
    fn load(&self, slug: &str, locale: &str) -> Result<Option<TranslationRecord>> {
        if !is_valid_slug(slug) || !is_valid_locale(locale) {
            return Ok(None);
        }
        let path = self.record_path(slug, locale);
        if !path.is_file() {
            return Ok(None);
        }
        read_record(&path, slug, locale)
    }

    fn save(&self, record: &TranslationRecord) -> Result<()> {
        if !is_valid_slug(&record.page_id) || !is_valid_locale(&record.locale_code) {
            bail!(
                "Refusing to store `{}` ({}): invalid page slug or locale",
                record.page_id,
                record.locale_code
            );
        }
        let path = self.record_path(&record.page_id, &record.locale_code);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn list(&self) -> Result<Vec<TranslationRecord>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut records = WalkDir::new(&self.root)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .filter_map(|e| {
                let slug = e.path().parent()?.file_name()?.to_str()?.to_owned();
                let locale = e.path().file_stem()?.to_str()?.to_owned();
                read_record(e.path(), &slug, &locale).transpose()
            })
            .collect::<Result<Vec<_>>>()?;

        records.sort_by(|a, b| {
            (a.page_id.as_str(), a.locale_code.as_str())
                .cmp(&(b.page_id.as_str(), b.locale_code.as_str()))
        });
        Ok(records)
    }
}

/// Read a record stored at `<slug>/<locale>.json`.
///
/// Records whose `pageId`/`localeCode` disagree with their location, or are
/// not valid identifiers, are skipped with a log line.
fn read_record(path: &Path, slug: &str, locale: &str) -> Result<Option<TranslationRecord>> {
    let record: TranslationRecord = read_json(path)?;
    if record.page_id != slug
        || record.locale_code != locale
        || !is_valid_slug(slug)
        || !is_valid_locale(locale)
    {
        log!(
            "store";
            "skipping {}: claims `{}` ({})",
            path.display(),
            record.page_id,
            record.locale_code
        );
        return Ok(None);
    }
    Ok(Some(record))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

// ============================================================================
// Site Data
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Status,
}

/// Records the `partners` and `insights` blocks list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteData {
    pub partners: Vec<Partner>,
    pub insights: Vec<Insight>,
}

impl SiteData {
    /// Number of insights the `insights` block shows.
    pub const LATEST_INSIGHTS: usize = 3;

    /// Read `partners.json` and `insights.json`; missing files mean empty lists.
    pub fn load(content: &Path) -> Result<Self> {
        Ok(Self {
            partners: read_optional_list(&content.join("partners.json"))?,
            insights: read_optional_list(&content.join("insights.json"))?,
        })
    }

    /// Newest published insights first.
    pub fn latest_insights(&self, limit: usize) -> Vec<&Insight> {
        let mut published: Vec<_> = self
            .insights
            .iter()
            .filter(|insight| insight.status.is_published())
            .collect();
        published.sort_by(|a, b| b.date.cmp(&a.date));
        published.truncate(limit);
        published
    }
}

fn read_optional_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if path.is_file() {
        read_json(path)
    } else {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::page::Translation;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(slug: &str, locale: &str) -> TranslationRecord {
        TranslationRecord::new(
            slug,
            locale,
            Translation {
                title: format!("{slug} ({locale})"),
                blocks: vec![Block::from_value(json!({ "type": "paragraph", "text": "Hi" }))],
                ..Default::default()
            },
        )
    }

    fn insight(title: &str, date: &str, status: Status) -> Insight {
        Insight {
            title: title.into(),
            date: date.parse().unwrap(),
            excerpt: None,
            url: None,
            status,
        }
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.save(&record("home", "fr")).unwrap();
        store.save(&record("about", "en")).unwrap();
        store.save(&record("home", "en")).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.load("home", "fr").unwrap().unwrap().translation.title, "home (fr)");
        assert!(store.load("home", "de").unwrap().is_none());

        let keys: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|r| format!("{}/{}", r.page_id, r.locale_code))
            .collect();
        assert_eq!(keys, vec!["about/en", "home/en", "home/fr"]);
    }

    #[test]
    fn test_memory_store_save_replaces() {
        let store = MemoryStore::new();
        store.save(&record("home", "en")).unwrap();

        let mut updated = record("home", "en");
        updated.translation.blocks.clear();
        store.save(&updated).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.load("home", "en").unwrap().unwrap().translation.blocks.is_empty());
    }

    #[test]
    fn test_dir_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = DirStore::new(dir.path());

        store.save(&record("about", "en")).unwrap();
        store.save(&record("about", "fr")).unwrap();
        store.save(&record("home", "en")).unwrap();

        assert!(dir.path().join("about/fr.json").is_file());
        let loaded = store.load("about", "en").unwrap().unwrap();
        assert_eq!(loaded, record("about", "en"));
        assert!(store.load("contact", "en").unwrap().is_none());

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].page_id, "about");
        assert_eq!(listed[2].page_id, "home");
    }

    #[test]
    fn test_dir_store_skips_misplaced_records() {
        let dir = TempDir::new().unwrap();
        let store = DirStore::new(dir.path());
        store.save(&record("about", "en")).unwrap();

        let mut escaped = record("home", "en");
        escaped.page_id = "../../escaped".into();
        fs::create_dir_all(dir.path().join("home")).unwrap();
        fs::write(
            dir.path().join("home/en.json"),
            serde_json::to_string(&escaped).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join("home/fr.json"),
            serde_json::to_string(&record("about", "en")).unwrap(),
        )
        .unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].page_id, "about");
        assert!(store.load("home", "en").unwrap().is_none());
        assert!(store.load("home", "fr").unwrap().is_none());
        assert!(store.load("../about", "en").unwrap().is_none());
    }

    #[test]
    fn test_dir_store_refuses_invalid_identity() {
        let dir = TempDir::new().unwrap();
        let store = DirStore::new(dir.path().join("content"));
        let mut escaped = record("home", "en");
        escaped.page_id = "../escaped".into();

        assert!(store.save(&escaped).is_err());
        assert!(!dir.path().join("escaped").exists());
    }

    #[test]
    fn test_dir_store_ignores_site_data_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("partners.json"), "[]").unwrap();
        let store = DirStore::new(dir.path());
        store.save(&record("home", "en")).unwrap();

        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_dir_store_reports_broken_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("home")).unwrap();
        fs::write(dir.path().join("home/en.json"), "{ not json").unwrap();

        let err = DirStore::new(dir.path()).list().unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_dir_store_missing_root() {
        let store = DirStore::new("/nonexistent/content");
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_translation_validates() {
        let store = MemoryStore::new();

        let mut good = record("home", "en");
        save_translation(&store, &mut good).unwrap();
        let stored = store.load("home", "en").unwrap().unwrap();
        assert!(stored.translation.updated_at.is_some());

        let mut bad = record("home", "fr");
        bad.translation
            .blocks
            .push(Block::from_value(json!({ "type": "carousel" })));
        let err = save_translation(&store, &mut bad).unwrap_err();
        assert!(err.to_string().contains("Rejected save of `home` (fr)"));
        assert!(store.load("home", "fr").unwrap().is_none());
    }

    #[test]
    fn test_site_data_load() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("partners.json"),
            r#"[{ "name": "Globex", "url": "https://globex.example" }]"#,
        )
        .unwrap();

        let data = SiteData::load(dir.path()).unwrap();
        assert_eq!(data.partners.len(), 1);
        assert_eq!(data.partners[0].url.as_deref(), Some("https://globex.example"));
        assert!(data.insights.is_empty());
    }

    #[test]
    fn test_latest_insights() {
        let data = SiteData {
            partners: vec![],
            insights: vec![
                insight("Oldest", "2023-01-10", Status::Published),
                insight("Draft", "2025-06-01", Status::Draft),
                insight("Newest", "2025-02-01", Status::Published),
                insight("Middle", "2024-05-20", Status::Published),
                insight("Older", "2023-11-02", Status::Published),
            ],
        };

        let titles: Vec<_> = data
            .latest_insights(SiteData::LATEST_INSIGHTS)
            .into_iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Older"]);
    }
}
