//! Page translations and the save boundary.
//!
//! A page is identified by its slug and owns one translation per locale.
//! Saving replaces the translation's block array wholesale; before anything
//! reaches storage it goes through [`prepare_save`].

use crate::block::{Block, BlockError};
use crate::utils::slug::{is_valid_locale, is_valid_slug};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("invalid page slug `{0}`")]
    InvalidSlug(String),

    #[error("invalid locale code `{0}`")]
    InvalidLocale(String),

    #[error("translation has no title")]
    MissingTitle,

    #[error("cannot save translation: {0}")]
    InvalidBlock(#[from] BlockError),

    #[error("cannot serialize translation")]
    Serialization(#[from] serde_json::Error),
}

/// Publication state of a translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    #[default]
    Draft,
    Published,
}

impl Status {
    pub const fn is_published(self) -> bool {
        matches!(self, Self::Published)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
        })
    }
}

/// Content of a page in one locale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A translation as stored: `{ pageId, localeCode, title, ..., updatedAt }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    /// Page slug.
    pub page_id: String,
    pub locale_code: String,
    #[serde(flatten)]
    pub translation: Translation,
}

impl TranslationRecord {
    pub fn new(
        slug: impl Into<String>,
        locale: impl Into<String>,
        translation: Translation,
    ) -> Self {
        Self {
            page_id: slug.into(),
            locale_code: locale.into(),
            translation,
        }
    }

    pub fn slug(&self) -> &str {
        &self.page_id
    }

    pub fn locale(&self) -> &str {
        &self.locale_code
    }

    pub fn is_published(&self) -> bool {
        self.translation.status.is_published()
    }

    /// Check identifiers and every block without modifying the record.
    pub fn check(&self) -> Result<(), PageError> {
        self.check_identity()?;
        for (index, block) in self.translation.blocks.iter().enumerate() {
            block.validated().map_err(|error| BlockError { index, error })?;
        }
        Ok(())
    }

    fn check_identity(&self) -> Result<(), PageError> {
        if !is_valid_slug(&self.page_id) {
            return Err(PageError::InvalidSlug(self.page_id.clone()));
        }
        if !is_valid_locale(&self.locale_code) {
            return Err(PageError::InvalidLocale(self.locale_code.clone()));
        }
        if self.translation.title.trim().is_empty() {
            return Err(PageError::MissingTitle);
        }
        Ok(())
    }
}

/// Validate a translation, stamp `updatedAt` and serialize it for storage.
///
/// Unknown or invalid blocks reject the whole save; nothing is dropped
/// silently. On success every block of `record` is in its typed form.
pub fn prepare_save(
    record: &mut TranslationRecord,
    now: DateTime<Utc>,
) -> Result<Value, PageError> {
    record.check_identity()?;

    let blocks = record
        .translation
        .blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            block
                .validated()
                .map(Block::Known)
                .map_err(|error| BlockError { index, error })
        })
        .collect::<Result<Vec<_>, _>>()?;

    record.translation.blocks = blocks;
    record.translation.updated_at = Some(now);
    Ok(serde_json::to_value(&*record)?)
}
