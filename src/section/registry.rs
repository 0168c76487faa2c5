//! Section registry: which guided-editor sections each page offers.
//!
//! The registry is built once (built-in pages, then `[pages.<slug>]`
//! overrides from `vitrine.toml`) and passed by reference to the adapter
//! and the editor. Pages without an entry have no guided editor and are
//! edited as raw JSON.

use super::SectionKind;
use crate::config::{PageConfig, SectionEntry};
use crate::log;
use crate::utils::slug::is_valid_slug;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("invalid page slug `{0}`")]
    InvalidSlug(String),

    #[error("malformed section registry entry `{slug}.{section}`: {reason}")]
    MalformedEntry {
        slug: String,
        section: String,
        reason: String,
    },
}

/// One section of a page's guided editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionMeta {
    pub id: String,
    pub kind: SectionKind,
    pub label: String,
    pub icon: String,
    pub description: String,
}

impl SectionMeta {
    /// Section with the kind's default presentation.
    pub fn new(id: impl Into<String>, kind: SectionKind) -> Self {
        let (label, icon, description) = kind.presentation();
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            icon: icon.into(),
            description: description.into(),
        }
    }

    /// Resolve a `[pages.<slug>]` entry.
    fn from_entry(slug: &str, entry: &SectionEntry) -> Result<Self, RegistryError> {
        let malformed = |reason: String| RegistryError::MalformedEntry {
            slug: slug.to_owned(),
            section: entry.id.clone(),
            reason,
        };

        if entry.id.trim().is_empty() {
            return Err(malformed("section id is empty".into()));
        }

        let kind = match entry.kind.as_deref() {
            Some(name) => SectionKind::from_name(name)
                .ok_or_else(|| malformed(format!("unknown section kind `{name}`")))?,
            None => SectionKind::from_section_id(&entry.id).ok_or_else(|| {
                malformed("`kind` is required for sections without a well-known id".into())
            })?,
        };

        let mut meta = Self::new(&entry.id, kind);
        if let Some(label) = &entry.label {
            meta.label.clone_from(label);
        }
        if let Some(icon) = &entry.icon {
            meta.icon.clone_from(icon);
        }
        if let Some(description) = &entry.description {
            meta.description.clone_from(description);
        }
        Ok(meta)
    }
}

/// Page slug -> ordered guided-editor sections.
#[derive(Debug, Clone, Default)]
pub struct SectionRegistry {
    pages: FxHashMap<String, Vec<SectionMeta>>,
}

impl SectionRegistry {
    /// Empty registry: every page uses raw JSON editing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in marketing pages.
    pub fn builtin() -> Self {
        use SectionKind::*;

        const PAGES: &[(&str, &[(&str, SectionKind)])] = &[
            (
                "home",
                &[
                    ("hero", Hero),
                    ("whoWeAre", WhoWeAre),
                    ("services", Services),
                    ("contactTeaser", Contact),
                ],
            ),
            (
                "about",
                &[
                    ("intro", Intro),
                    ("story", Story),
                    ("values", Values),
                    ("team", Team),
                    ("milestones", Milestones),
                    ("cta", Cta),
                ],
            ),
            (
                "services",
                &[
                    ("intro", Intro),
                    ("services", Services),
                    ("process", Process),
                    ("cta", Cta),
                ],
            ),
            ("partners", &[("intro", Intro), ("partners", Partners), ("cta", Cta)]),
            ("insights", &[("intro", Intro), ("insights", Insights)]),
            ("contact", &[("intro", Intro), ("contactDetails", Contact)]),
        ];

        let mut registry = Self::new();
        for (slug, sections) in PAGES {
            let sections = sections
                .iter()
                .map(|(id, kind)| SectionMeta::new(*id, *kind))
                .collect();
            registry.pages.insert((*slug).to_owned(), sections);
        }
        registry
    }

    /// Register (or replace) the sections of a page.
    ///
    /// An empty section list removes the page's guided editor.
    pub fn register(
        &mut self,
        slug: impl Into<String>,
        sections: Vec<SectionMeta>,
    ) -> Result<(), RegistryError> {
        let slug = slug.into();
        if !is_valid_slug(&slug) {
            return Err(RegistryError::InvalidSlug(slug));
        }

        let mut seen = FxHashSet::default();
        if let Some(dup) = sections.iter().find(|s| !seen.insert(s.id.as_str())) {
            return Err(RegistryError::MalformedEntry {
                section: dup.id.clone(),
                reason: "duplicate section id".into(),
                slug,
            });
        }

        if sections.is_empty() {
            self.pages.remove(&slug);
        } else {
            self.pages.insert(slug, sections);
        }
        Ok(())
    }

    /// Built-in pages overridden by `[pages.<slug>]` tables.
    ///
    /// In strict mode the first malformed entry is returned as an error. Otherwise
    /// the offending page is dropped, so it falls back to raw JSON editing.
    pub fn from_config(
        pages: &BTreeMap<String, PageConfig>,
        strict: bool,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::builtin();

        for (slug, page) in pages {
            let result = page
                .sections
                .iter()
                .map(|entry| SectionMeta::from_entry(slug, entry))
                .collect::<Result<Vec<_>, _>>()
                .and_then(|sections| registry.register(slug.as_str(), sections));

            match result {
                Ok(()) => {}
                Err(err) if strict => return Err(err),
                Err(err) => {
                    log!("registry"; "{err}; `{slug}` falls back to raw JSON editing");
                    registry.pages.remove(slug);
                }
            }
        }

        Ok(registry)
    }

    /// Sections of a page in editor order. Empty for pages without a guided
    /// editor.
    pub fn sections_for(&self, slug: &str) -> &[SectionMeta] {
        self.pages.get(slug).map_or(&[], Vec::as_slice)
    }

    pub fn section(&self, slug: &str, id: &str) -> Option<&SectionMeta> {
        self.sections_for(slug).iter().find(|meta| meta.id == id)
    }

    pub fn has_guided_editor(&self, slug: &str) -> bool {
        !self.sections_for(slug).is_empty()
    }

    /// Registered slugs, sorted.
    pub fn slugs(&self) -> Vec<&str> {
        let mut slugs: Vec<_> = self.pages.keys().map(String::as_str).collect();
        slugs.sort_unstable();
        slugs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, kind: Option<&str>) -> SectionEntry {
        SectionEntry {
            id: id.into(),
            kind: kind.map(Into::into),
            ..Default::default()
        }
    }

    fn pages(slug: &str, sections: Vec<SectionEntry>) -> BTreeMap<String, PageConfig> {
        BTreeMap::from([(slug.to_owned(), PageConfig { sections })])
    }

    fn ids<'a>(registry: &'a SectionRegistry, slug: &str) -> Vec<&'a str> {
        registry
            .sections_for(slug)
            .iter()
            .map(|meta| meta.id.as_str())
            .collect()
    }

    #[test]
    fn test_builtin_pages() {
        let registry = SectionRegistry::builtin();

        assert_eq!(
            registry.slugs(),
            vec!["about", "contact", "home", "insights", "partners", "services"]
        );
        assert_eq!(
            ids(&registry, "home"),
            vec!["hero", "whoWeAre", "services", "contactTeaser"]
        );
        assert_eq!(
            ids(&registry, "about"),
            vec!["intro", "story", "values", "team", "milestones", "cta"]
        );
        assert_eq!(
            registry.section("contact", "contactDetails").map(|m| m.kind),
            Some(SectionKind::Contact)
        );
    }

    #[test]
    fn test_builtin_section_ids_are_unique() {
        let registry = SectionRegistry::builtin();
        for slug in registry.slugs() {
            let ids = ids(&registry, slug);
            let unique: FxHashSet<_> = ids.iter().collect();
            assert_eq!(unique.len(), ids.len(), "duplicate id on `{slug}`");
        }
    }

    #[test]
    fn test_unregistered_slug_is_degraded() {
        let registry = SectionRegistry::builtin();
        assert!(registry.sections_for("legal").is_empty());
        assert!(!registry.has_guided_editor("legal"));
        assert!(registry.has_guided_editor("home"));
    }

    #[test]
    fn test_section_meta_presentation() {
        let meta = SectionMeta::new("whoWeAre", SectionKind::WhoWeAre);
        assert_eq!(meta.label, "Who we are");
        assert_eq!(meta.icon, "users");
    }

    #[test]
    fn test_from_config_adds_page() {
        let mut entries = vec![entry("intro", None), entry("openings", Some("cta"))];
        entries[1].label = Some("Open roles".into());

        let registry = SectionRegistry::from_config(&pages("careers", entries), true).unwrap();

        assert_eq!(ids(&registry, "careers"), vec!["intro", "openings"]);
        let openings = registry.section("careers", "openings").unwrap();
        assert_eq!(openings.kind, SectionKind::Cta);
        assert_eq!(openings.label, "Open roles");
        assert_eq!(openings.icon, "megaphone");
        assert!(registry.has_guided_editor("home"));
    }

    #[test]
    fn test_from_config_replaces_builtin() {
        let entries = vec![entry("hero", None), entry("stats", None)];
        let registry = SectionRegistry::from_config(&pages("home", entries), true).unwrap();
        assert_eq!(ids(&registry, "home"), vec!["hero", "stats"]);
    }

    #[test]
    fn test_from_config_empty_sections_disable_guided_editor() {
        let registry = SectionRegistry::from_config(&pages("about", vec![]), true).unwrap();
        assert!(!registry.has_guided_editor("about"));
    }

    #[test]
    fn test_malformed_entry_strict() {
        let entries = vec![entry("gallery", None)];
        let err = SectionRegistry::from_config(&pages("careers", entries), true).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::MalformedEntry { ref slug, ref section, .. }
                if slug == "careers" && section == "gallery"
        ));

        let entries = vec![entry("intro", Some("carousel"))];
        let err = SectionRegistry::from_config(&pages("careers", entries), true).unwrap_err();
        assert!(err.to_string().contains("unknown section kind `carousel`"));
    }

    #[test]
    fn test_malformed_entry_lenient_drops_page() {
        let entries = vec![entry("hero", None), entry("hero", None)];
        let registry = SectionRegistry::from_config(&pages("home", entries), false).unwrap();

        assert!(!registry.has_guided_editor("home"));
        assert!(registry.has_guided_editor("about"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = SectionRegistry::new();
        let err = registry
            .register(
                "home",
                vec![
                    SectionMeta::new("cta", SectionKind::Cta),
                    SectionMeta::new("cta", SectionKind::Cta),
                ],
            )
            .unwrap_err();
        assert!(err.to_string().contains("duplicate section id"));
    }

    #[test]
    fn test_invalid_slug_rejected() {
        let mut registry = SectionRegistry::new();
        let err = registry
            .register("Not A Slug", vec![SectionMeta::new("cta", SectionKind::Cta)])
            .unwrap_err();
        assert_eq!(err, RegistryError::InvalidSlug("Not A Slug".into()));
    }
}
