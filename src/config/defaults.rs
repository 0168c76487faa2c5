//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn default_locale() -> String {
        "en".into()
    }

    pub fn locales() -> Vec<String> {
        vec!["en".into()]
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub mod sitemap {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "sitemap.xml".into()
        }
    }
}

// ============================================================================
// [editor] Section Defaults
// ============================================================================

pub mod editor {
    pub fn autosave_interval_ms() -> u64 {
        5000
    }

    pub fn autosave_debounce_ms() -> u64 {
        1500
    }

    /// Misconfigured pages fail loudly in debug builds and fall back to raw
    /// JSON editing in release builds.
    pub fn strict_registry() -> bool {
        cfg!(debug_assertions)
    }
}
