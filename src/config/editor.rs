//! `[editor]` section configuration.
//!
//! Autosave timing and how strictly the section registry is checked.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[editor]` section in vitrine.toml - guided editor settings.
///
/// # Example
/// ```toml
/// [editor]
/// autosave_interval_ms = 5000  # how often pending changes are flushed
/// autosave_debounce_ms = 1500  # quiet time after the last keystroke
/// strict_registry = true       # fail on misconfigured [pages.*] entries
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct EditorConfig {
    #[serde(default = "defaults::editor::autosave_interval_ms")]
    #[educe(Default = defaults::editor::autosave_interval_ms())]
    pub autosave_interval_ms: u64,

    #[serde(default = "defaults::editor::autosave_debounce_ms")]
    #[educe(Default = defaults::editor::autosave_debounce_ms())]
    pub autosave_debounce_ms: u64,

    /// Reject misconfigured registry entries instead of dropping the page's
    /// guided editor.
    #[serde(default = "defaults::editor::strict_registry")]
    #[educe(Default = defaults::editor::strict_registry())]
    pub strict_registry: bool,
}

impl EditorConfig {
    pub fn autosave_interval(&self) -> Duration {
        Duration::from_millis(self.autosave_interval_ms)
    }

    pub fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::time::Duration;

    #[test]
    fn test_editor_config() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"

            [editor]
            autosave_interval_ms = 10000
            autosave_debounce_ms = 500
            strict_registry = false
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.editor.autosave_interval(), Duration::from_secs(10));
        assert_eq!(config.editor.autosave_debounce(), Duration::from_millis(500));
        assert!(!config.editor.strict_registry);
    }

    #[test]
    fn test_editor_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.editor.autosave_interval_ms, 5000);
        assert_eq!(config.editor.autosave_debounce_ms, 1500);
        assert_eq!(config.editor.strict_registry, cfg!(debug_assertions));
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"

            [editor]
            autosave = true
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
