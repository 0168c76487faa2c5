//! Site configuration management for `vitrine.toml`.
//!
//! # Sections
//!
//! | Section          | Purpose                                         |
//! |------------------|-------------------------------------------------|
//! | `[base]`         | Site metadata (title, url, locales)             |
//! | `[build]`        | Content/output paths, sitemap                   |
//! | `[editor]`       | Autosave timing, registry strictness            |
//! | `[pages.<slug>]` | Guided editor sections per page                 |
//! | `[extra]`        | User-defined custom fields                      |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Acme Consulting"
//! description = "Strategy and delivery for growing teams"
//! url = "https://acme.example"
//! locales = ["en", "fr"]
//!
//! [build]
//! output = "public"
//!
//! [pages.careers]
//! sections = [{ id = "intro" }, { id = "openings", kind = "cta" }]
//!
//! [extra]
//! analytics_id = "UA-12345"
//! ```

mod base;
mod build;
pub mod defaults;
mod editor;
mod error;
mod pages;

pub use base::BaseConfig;
pub use build::{BuildConfig, SitemapConfig};
pub use editor::EditorConfig;
pub use error::ConfigError;
pub use pages::{PageConfig, SectionEntry};

use crate::cli::{Cli, Commands};
use crate::section::{RegistryError, SectionRegistry};
use crate::utils::slug::is_valid_locale;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing vitrine.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Guided editor settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Guided editor layouts, keyed by page slug
    #[serde(default)]
    pub pages: BTreeMap<String, PageConfig>,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Section registry: built-in pages overridden by `[pages.<slug>]`.
    pub fn registry(&self) -> Result<SectionRegistry, RegistryError> {
        SectionRegistry::from_config(&self.pages, self.editor.strict_registry)
    }

    /// Absolute URL of the site, without a trailing slash.
    pub fn base_url(&self) -> Option<&str> {
        self.base.url.as_deref().map(|url| url.trim_end_matches('/'))
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.config_path = cli.config.clone();
        self.update_path_with_root(&root);

        if let Commands::Build { build_args } = &cli.command {
            self.build.clean |= build_args.clean;
            Self::update_option(&mut self.build.sitemap.enable, build_args.sitemap.as_ref());
            if let Some(url) = &build_args.base_url {
                self.base.url = Some(url.clone());
            }
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root directory and normalize them
    pub fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(&self.config_path));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values that serde cannot check.
    pub fn validate(&self) -> Result<()> {
        if self.base.locales.is_empty() {
            bail!(ConfigError::Validation(
                "[base.locales] must not be empty".into()
            ));
        }

        if let Some(locale) = self.base.locales.iter().find(|l| !is_valid_locale(l)) {
            bail!(ConfigError::Validation(format!(
                "[base.locales] contains invalid locale `{locale}`"
            )));
        }

        if !self.base.locales.contains(&self.base.default_locale) {
            bail!(ConfigError::Validation(format!(
                "[base.default_locale] `{}` is not listed in [base.locales]",
                self.base.default_locale
            )));
        }

        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.editor.autosave_interval_ms == 0 {
            bail!(ConfigError::Validation(
                "[editor.autosave_interval_ms] must be greater than 0".into()
            ));
        }

        Ok(())
    }

    /// Extra checks before writing the site.
    pub fn validate_build(&self) -> Result<()> {
        self.validate()?;

        if self.build.sitemap.enable && self.base.url.is_none() {
            bail!("[base.url] is required for sitemap generation");
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
