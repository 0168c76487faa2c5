//! Guided section editor session.
//!
//! # State Machine
//!
//! ```text
//!            update_section / replace_raw
//!   ┌────────┐ ─────────────────────────▶ ┌─────────┐
//!   │ Loaded │                            │ Editing │
//!   └────────┘ ◀───────────────────────── └─────────┘
//!                 listener accepts blocks
//! ```
//!
//! Every change rebuilds the page's whole block array and hands it to a
//! [`BlocksListener`] (the page editor that owns persistence). Pages the
//! registry has no sections for open in [`EditorMode::RawJson`], where the
//! block array is edited as JSON text.

pub mod autosave;

pub use autosave::{AutosaveHandle, AutosaveSchedule, AutosaveTask};

use crate::block::{Block, BlockError, validate_blocks};
use crate::log;
use crate::section::{
    PageSections, SectionData, SectionKind, SectionMeta, SectionRegistry, blocks_to_sections,
    sections_to_blocks,
};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("page `{slug}` has no section `{id}`")]
    UnknownSection { slug: String, id: String },

    #[error("section `{id}` edits {expected} data, got {found}")]
    KindMismatch {
        id: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("page `{0}` has no guided editor; edit its blocks as JSON")]
    GuidedUnavailable(String),

    #[error("blocks are not valid JSON")]
    InvalidJson(#[from] serde_json::Error),

    #[error("blocks must be a JSON array")]
    NotAnArray,

    #[error(transparent)]
    InvalidBlock(#[from] BlockError),
}

/// Receives the rebuilt block array after every change.
pub trait BlocksListener {
    /// Return `true` once the blocks are accepted.
    fn on_blocks(&mut self, blocks: &[Block]) -> bool;
}

impl<F> BlocksListener for F
where
    F: FnMut(&[Block]) -> bool,
{
    fn on_blocks(&mut self, blocks: &[Block]) -> bool {
        self(blocks)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Typed section forms.
    Guided,
    /// JSON text fallback for pages without registry sections.
    RawJson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Loaded,
    /// A change has not been accepted by the listener yet.
    Editing,
}

/// Editing session for one page translation.
#[derive(Debug)]
pub struct GuidedEditor<'r> {
    registry: &'r SectionRegistry,
    slug: String,
    mode: EditorMode,
    sections: PageSections,
    blocks: Vec<Block>,
    state: EditorState,
}

impl<'r> GuidedEditor<'r> {
    pub fn open(registry: &'r SectionRegistry, slug: impl Into<String>, blocks: Vec<Block>) -> Self {
        let slug = slug.into();
        let mode = if registry.has_guided_editor(&slug) {
            EditorMode::Guided
        } else {
            EditorMode::RawJson
        };
        let sections = match mode {
            EditorMode::Guided => blocks_to_sections(registry, &slug, &blocks),
            EditorMode::RawJson => PageSections::default(),
        };

        Self {
            registry,
            slug,
            mode,
            sections,
            blocks,
            state: EditorState::Loaded,
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub const fn mode(&self) -> EditorMode {
        self.mode
    }

    pub const fn state(&self) -> EditorState {
        self.state
    }

    /// `false` means the page degrades to raw JSON editing.
    pub fn has_guided_editor(&self) -> bool {
        self.mode == EditorMode::Guided
    }

    /// Section list shown in the editor sidebar.
    pub fn section_meta(&self) -> &[SectionMeta] {
        self.registry.sections_for(&self.slug)
    }

    pub fn sections(&self) -> &PageSections {
        &self.sections
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.state == EditorState::Editing
    }

    /// Replace one section's form data and publish the rebuilt block array.
    ///
    /// Returns whether the listener accepted the blocks.
    pub fn update_section(
        &mut self,
        id: &str,
        data: SectionData,
        listener: &mut impl BlocksListener,
    ) -> Result<bool, EditorError> {
        if self.mode != EditorMode::Guided {
            return Err(EditorError::GuidedUnavailable(self.slug.clone()));
        }

        let meta = self
            .registry
            .section(&self.slug, id)
            .ok_or_else(|| EditorError::UnknownSection {
                slug: self.slug.clone(),
                id: id.to_owned(),
            })?;
        if data.kind() != meta.kind {
            return Err(kind_mismatch(id, meta.kind, data.kind()));
        }

        self.state = EditorState::Editing;
        self.sections.insert(id, data);
        self.blocks = sections_to_blocks(self.registry, &self.slug, &self.sections);
        Ok(self.notify(listener))
    }

    /// Replace the whole block array from JSON text.
    ///
    /// Every element must pass validation; nothing changes otherwise.
    pub fn replace_raw(
        &mut self,
        json: &str,
        listener: &mut impl BlocksListener,
    ) -> Result<bool, EditorError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Array(items) = value else {
            return Err(EditorError::NotAnArray);
        };
        let blocks = validate_blocks(&items)?;

        self.state = EditorState::Editing;
        self.blocks = blocks.into_iter().map(Block::Known).collect();
        if self.mode == EditorMode::Guided {
            self.sections = blocks_to_sections(self.registry, &self.slug, &self.blocks);
        }
        Ok(self.notify(listener))
    }

    /// Current blocks as pretty JSON, for the raw editor.
    pub fn raw_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.blocks)?)
    }

    fn notify(&mut self, listener: &mut impl BlocksListener) -> bool {
        let accepted = listener.on_blocks(&self.blocks);
        if accepted {
            self.state = EditorState::Loaded;
        } else {
            log!("editor"; "changes to `{}` were not accepted; keeping them unsaved", self.slug);
        }
        accepted
    }
}

fn kind_mismatch(id: &str, expected: SectionKind, found: SectionKind) -> EditorError {
    EditorError::KindMismatch {
        id: id.to_owned(),
        expected: expected.as_str(),
        found: found.as_str(),
    }
}
