//! `[pages.<slug>]` section configuration.
//!
//! Adds guided-editor pages or replaces the built-in section list of a page.
//! Entries are resolved by [`SectionRegistry::from_config`].
//!
//! [`SectionRegistry::from_config`]: crate::section::SectionRegistry::from_config

use serde::{Deserialize, Serialize};

/// Guided editor layout of one page.
///
/// # Example
/// ```toml
/// [pages.careers]
/// sections = [
///     { id = "intro" },
///     { id = "openings", kind = "cta", label = "Open roles" },
/// ]
/// ```
///
/// An empty `sections` list disables the guided editor for the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    #[serde(default)]
    pub sections: Vec<SectionEntry>,
}

/// One section of a configured page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionEntry {
    /// Section id, unique within the page.
    pub id: String,

    /// Form kind; may be omitted for well-known ids such as `hero`.
    #[serde(default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_pages_config() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"

            [pages.careers]
            sections = [
                { id = "intro" },
                { id = "openings", kind = "cta", label = "Open roles" },
            ]

            [pages.legal]
            sections = []
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        let careers = &config.pages["careers"];
        assert_eq!(careers.sections.len(), 2);
        assert_eq!(careers.sections[0].id, "intro");
        assert_eq!(careers.sections[0].kind, None);
        assert_eq!(careers.sections[1].kind.as_deref(), Some("cta"));
        assert_eq!(careers.sections[1].label.as_deref(), Some("Open roles"));
        assert!(config.pages["legal"].sections.is_empty());
    }

    #[test]
    fn test_unknown_entry_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"

            [pages.careers]
            sections = [{ id = "intro", form = "IntroForm" }]
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
