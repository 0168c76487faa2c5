//! Guided-editor sections.
//!
//! A page's guided editor shows a fixed, ordered list of named sections
//! (e.g. `hero`, `whoWeAre`, `services`, `contactTeaser` for the home page).
//! Each section edits one block through a typed form.
//!
//! | Module       | Purpose                                          |
//! |--------------|--------------------------------------------------|
//! | [`forms`]    | Form data types and block <-> form conversions   |
//! | [`registry`] | Which sections each page slug offers, in order   |
//! | [`adapter`]  | `blocks_to_sections` / `sections_to_blocks`      |

pub mod adapter;
pub mod forms;
pub mod registry;

pub use adapter::{blocks_to_sections, sections_to_blocks};
pub use forms::*;
pub use registry::{RegistryError, SectionMeta, SectionRegistry};

use crate::block::{Block, BlockType, ContentBlock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Section Kind
// ============================================================================

/// The form component a section uses, and the block type it edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Hero,
    WhoWeAre,
    Services,
    Contact,
    Intro,
    Story,
    Values,
    Team,
    Milestones,
    Process,
    Cta,
    Partners,
    Insights,
    Stats,
}

impl SectionKind {
    pub const ALL: &'static [SectionKind] = &[
        Self::Hero,
        Self::WhoWeAre,
        Self::Services,
        Self::Contact,
        Self::Intro,
        Self::Story,
        Self::Values,
        Self::Team,
        Self::Milestones,
        Self::Process,
        Self::Cta,
        Self::Partners,
        Self::Insights,
        Self::Stats,
    ];

    /// Name used in configuration files and on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::WhoWeAre => "whoWeAre",
            Self::Services => "services",
            Self::Contact => "contact",
            Self::Intro => "intro",
            Self::Story => "story",
            Self::Values => "values",
            Self::Team => "team",
            Self::Milestones => "milestones",
            Self::Process => "process",
            Self::Cta => "cta",
            Self::Partners => "partners",
            Self::Insights => "insights",
            Self::Stats => "stats",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == name)
    }

    /// Block type this section reads and writes.
    pub const fn block_type(self) -> BlockType {
        match self {
            Self::Hero => BlockType::Hero,
            Self::WhoWeAre => BlockType::About,
            Self::Services => BlockType::Services,
            Self::Contact => BlockType::Contact,
            Self::Intro => BlockType::Intro,
            Self::Story => BlockType::Story,
            Self::Values => BlockType::Values,
            Self::Team => BlockType::Team,
            Self::Milestones => BlockType::Milestones,
            Self::Process => BlockType::Process,
            Self::Cta => BlockType::Cta,
            Self::Partners => BlockType::Partners,
            Self::Insights => BlockType::Insights,
            Self::Stats => BlockType::Stats,
        }
    }

    /// Resolve a well-known section id.
    pub fn from_section_id(id: &str) -> Option<Self> {
        Some(match id {
            "hero" => Self::Hero,
            "whoWeAre" => Self::WhoWeAre,
            "services" => Self::Services,
            "contactTeaser" | "contactDetails" => Self::Contact,
            "intro" => Self::Intro,
            "story" => Self::Story,
            "values" => Self::Values,
            "team" => Self::Team,
            "milestones" => Self::Milestones,
            "process" => Self::Process,
            "cta" => Self::Cta,
            "partners" => Self::Partners,
            "insights" => Self::Insights,
            "stats" => Self::Stats,
            _ => return None,
        })
    }

    /// Default `(label, icon, description)` shown in the editor sidebar.
    pub const fn presentation(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Hero => ("Hero", "sparkles", "Tagline and main calls to action"),
            Self::WhoWeAre => ("Who we are", "users", "Mission and pillars"),
            Self::Services => ("Services", "briefcase", "Service offerings"),
            Self::Contact => ("Contact", "mail", "Contact form and map"),
            Self::Intro => ("Introduction", "type", "Page headline and lead text"),
            Self::Story => ("Story", "book-open", "Company history in paragraphs"),
            Self::Values => ("Values", "heart", "What the company stands for"),
            Self::Team => ("Team", "user-circle", "Team members"),
            Self::Milestones => ("Milestones", "flag", "Timeline of key events"),
            Self::Process => ("Process", "list-ordered", "How engagements run"),
            Self::Cta => ("Call to action", "megaphone", "Closing call to action"),
            Self::Partners => ("Partners", "handshake", "Partner list heading"),
            Self::Insights => ("Insights", "newspaper", "Latest insights heading"),
            Self::Stats => ("Key figures", "bar-chart", "Numbers that matter"),
        }
    }
}

// ============================================================================
// Section Data
// ============================================================================

/// Form data of one section, tagged with its kind.
///
/// Serialized as `{ "kind": "hero", "data": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum SectionData {
    Hero(HeroSectionForm),
    WhoWeAre(WhoWeAreSectionForm),
    Services(ServicesSectionForm),
    Contact(ContactSectionForm),
    Intro(IntroSectionForm),
    Story(StorySectionForm),
    Values(ValuesSectionForm),
    Team(TeamSectionForm),
    Milestones(MilestonesSectionForm),
    Process(ProcessSectionForm),
    Cta(CtaSectionForm),
    Partners(PartnersSectionForm),
    Insights(InsightsSectionForm),
    Stats(StatsSectionForm),
}

impl SectionData {
    pub const fn kind(&self) -> SectionKind {
        match self {
            Self::Hero(_) => SectionKind::Hero,
            Self::WhoWeAre(_) => SectionKind::WhoWeAre,
            Self::Services(_) => SectionKind::Services,
            Self::Contact(_) => SectionKind::Contact,
            Self::Intro(_) => SectionKind::Intro,
            Self::Story(_) => SectionKind::Story,
            Self::Values(_) => SectionKind::Values,
            Self::Team(_) => SectionKind::Team,
            Self::Milestones(_) => SectionKind::Milestones,
            Self::Process(_) => SectionKind::Process,
            Self::Cta(_) => SectionKind::Cta,
            Self::Partners(_) => SectionKind::Partners,
            Self::Insights(_) => SectionKind::Insights,
            Self::Stats(_) => SectionKind::Stats,
        }
    }

    /// Empty form for a section with no content yet.
    pub fn empty(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Hero => Self::Hero(Default::default()),
            SectionKind::WhoWeAre => Self::WhoWeAre(Default::default()),
            SectionKind::Services => Self::Services(Default::default()),
            SectionKind::Contact => Self::Contact(Default::default()),
            SectionKind::Intro => Self::Intro(Default::default()),
            SectionKind::Story => Self::Story(Default::default()),
            SectionKind::Values => Self::Values(Default::default()),
            SectionKind::Team => Self::Team(Default::default()),
            SectionKind::Milestones => Self::Milestones(Default::default()),
            SectionKind::Process => Self::Process(Default::default()),
            SectionKind::Cta => Self::Cta(Default::default()),
            SectionKind::Partners => Self::Partners(Default::default()),
            SectionKind::Insights => Self::Insights(Default::default()),
            SectionKind::Stats => Self::Stats(Default::default()),
        }
    }

    /// Load a block into the form of `kind`. `None` if the block has a
    /// different type.
    pub fn from_block(kind: SectionKind, block: ContentBlock) -> Option<Self> {
        Some(match (kind, block) {
            (SectionKind::Hero, ContentBlock::Hero(b)) => Self::Hero(b.into()),
            (SectionKind::WhoWeAre, ContentBlock::About(b)) => Self::WhoWeAre(b.into()),
            (SectionKind::Services, ContentBlock::Services(b)) => Self::Services(b.into()),
            (SectionKind::Contact, ContentBlock::Contact(b)) => Self::Contact(b.into()),
            (SectionKind::Intro, ContentBlock::Intro(b)) => Self::Intro(b.into()),
            (SectionKind::Story, ContentBlock::Story(b)) => Self::Story(b.into()),
            (SectionKind::Values, ContentBlock::Values(b)) => Self::Values(b.into()),
            (SectionKind::Team, ContentBlock::Team(b)) => Self::Team(b.into()),
            (SectionKind::Milestones, ContentBlock::Milestones(b)) => Self::Milestones(b.into()),
            (SectionKind::Process, ContentBlock::Process(b)) => Self::Process(b.into()),
            (SectionKind::Cta, ContentBlock::Cta(b)) => Self::Cta(b.into()),
            (SectionKind::Partners, ContentBlock::Partners(b)) => Self::Partners(b.into()),
            (SectionKind::Insights, ContentBlock::Insights(b)) => Self::Insights(b.into()),
            (SectionKind::Stats, ContentBlock::Stats(b)) => Self::Stats(b.into()),
            _ => return None,
        })
    }

    pub fn into_block(self) -> ContentBlock {
        match self {
            Self::Hero(form) => ContentBlock::Hero(form.into()),
            Self::WhoWeAre(form) => ContentBlock::About(form.into()),
            Self::Services(form) => ContentBlock::Services(form.into()),
            Self::Contact(form) => ContentBlock::Contact(form.into()),
            Self::Intro(form) => ContentBlock::Intro(form.into()),
            Self::Story(form) => ContentBlock::Story(form.into()),
            Self::Values(form) => ContentBlock::Values(form.into()),
            Self::Team(form) => ContentBlock::Team(form.into()),
            Self::Milestones(form) => ContentBlock::Milestones(form.into()),
            Self::Process(form) => ContentBlock::Process(form.into()),
            Self::Cta(form) => ContentBlock::Cta(form.into()),
            Self::Partners(form) => ContentBlock::Partners(form.into()),
            Self::Insights(form) => ContentBlock::Insights(form.into()),
            Self::Stats(form) => ContentBlock::Stats(form.into()),
        }
    }
}

// ============================================================================
// Page Sections
// ============================================================================

/// Section id -> form data for one page, plus the blocks no section claims.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSections {
    pub sections: BTreeMap<String, SectionData>,

    /// Blocks outside the page's known sections, in their original relative
    /// order. Written back after the section blocks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmanaged: Vec<Block>,
}

impl PageSections {
    pub fn get(&self, id: &str) -> Option<&SectionData> {
        self.sections.get(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, data: SectionData) -> Option<SectionData> {
        self.sections.insert(id.into(), data)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{HeroBlock, ParagraphBlock};
    use serde_json::json;

    #[test]
    fn test_empty_form_matches_kind() {
        for kind in SectionKind::ALL {
            let data = SectionData::empty(*kind);
            assert_eq!(data.kind(), *kind);
            assert_eq!(data.into_block().block_type(), kind.block_type());
        }
    }

    #[test]
    fn test_from_block_rejects_other_types() {
        let paragraph = ContentBlock::Paragraph(ParagraphBlock::default());
        assert!(SectionData::from_block(SectionKind::Hero, paragraph).is_none());

        let hero = ContentBlock::Hero(HeroBlock::default());
        assert!(SectionData::from_block(SectionKind::Hero, hero).is_some());
    }

    #[test]
    fn test_kind_names_match_serde() {
        for kind in SectionKind::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
            assert_eq!(SectionKind::from_name(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn test_well_known_ids() {
        assert_eq!(SectionKind::from_section_id("whoWeAre"), Some(SectionKind::WhoWeAre));
        assert_eq!(SectionKind::from_section_id("contactTeaser"), Some(SectionKind::Contact));
        assert_eq!(SectionKind::from_section_id("gallery"), None);
    }

    #[test]
    fn test_section_data_wire_format() {
        let data = SectionData::Hero(HeroSectionForm {
            tagline: "Welcome".into(),
            ..Default::default()
        });
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["kind"], json!("hero"));
        assert_eq!(value["data"]["tagline"], json!("Welcome"));

        let back: SectionData = serde_json::from_value(value).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_form_cannot_change_block_type() {
        let data: SectionData = serde_json::from_value(json!({
            "kind": "hero",
            "data": { "tagline": "Hi", "type": "cta", "headline": "Injected" }
        }))
        .unwrap();

        let block = data.into_block();
        assert_eq!(block.block_type(), BlockType::Hero);

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], json!("hero"));
        assert_eq!(value["headline"], json!("Injected"));
        let reloaded = Block::from_value(value);
        assert_eq!(reloaded.block_type(), Some(BlockType::Hero));
        assert!(reloaded.validated().is_ok());
    }
}
