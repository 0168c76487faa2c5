//! Form data edited by the guided section editor.
//!
//! Forms mirror their block but use plain `String`s and `Link`s where the
//! block has optional ones: an empty string (or an empty link) stands for an
//! absent field. Each form carries the block's unknown fields in `extra`.

use crate::block::*;
use serde::{Deserialize, Serialize};

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn optional(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn link(value: Option<Link>) -> Link {
    value.unwrap_or_default()
}

fn optional_link(value: Link) -> Option<Link> {
    (!value.is_empty()).then_some(value)
}

/// Unknown form fields carried onto the block. `type` is the block's tag and
/// cannot be set from a form.
fn block_extra(mut extra: Extra) -> Extra {
    extra.remove("type");
    extra
}

// ============================================================================
// Form Types
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroSectionForm {
    pub tagline: String,
    pub subtagline: String,
    pub cta_primary: Link,
    pub cta_secondary: Link,
    pub quick_links: Vec<Link>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WhoWeAreSectionForm {
    pub eyebrow: String,
    pub headline: String,
    pub headline_accent: String,
    pub mission: String,
    pub pillars: Vec<Pillar>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServicesSectionForm {
    pub eyebrow: String,
    pub headline: String,
    pub services: Vec<ServiceItem>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSectionForm {
    pub headline: String,
    pub description: String,
    pub show_form: bool,
    pub show_map: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntroSectionForm {
    pub eyebrow: String,
    pub headline: String,
    pub headline_accent: String,
    pub text: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorySectionForm {
    pub title: String,
    pub paragraphs: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValuesSectionForm {
    pub title: String,
    pub values: Vec<TitledText>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamSectionForm {
    pub title: String,
    pub subtitle: String,
    pub members: Vec<TeamMember>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MilestonesSectionForm {
    pub milestones: Vec<Milestone>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessSectionForm {
    pub title: String,
    pub steps: Vec<TitledText>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CtaSectionForm {
    pub headline: String,
    pub description: String,
    pub primary_button: Link,
    pub secondary_button: Link,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartnersSectionForm {
    pub eyebrow: String,
    pub headline: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsightsSectionForm {
    pub eyebrow: String,
    pub headline: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsSectionForm {
    pub items: Vec<StatItem>,
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Block <-> Form
// ============================================================================

impl From<HeroBlock> for HeroSectionForm {
    fn from(block: HeroBlock) -> Self {
        Self {
            tagline: block.tagline,
            subtagline: text(block.subtagline),
            cta_primary: link(block.cta_primary),
            cta_secondary: link(block.cta_secondary),
            quick_links: block.quick_links,
            extra: block.extra,
        }
    }
}

impl From<HeroSectionForm> for HeroBlock {
    fn from(form: HeroSectionForm) -> Self {
        Self {
            tagline: form.tagline,
            subtagline: optional(form.subtagline),
            cta_primary: optional_link(form.cta_primary),
            cta_secondary: optional_link(form.cta_secondary),
            quick_links: form.quick_links,
            extra: block_extra(form.extra),
        }
    }
}

impl From<AboutBlock> for WhoWeAreSectionForm {
    fn from(block: AboutBlock) -> Self {
        Self {
            eyebrow: text(block.eyebrow),
            headline: block.headline,
            headline_accent: text(block.headline_accent),
            mission: text(block.mission),
            pillars: block.pillars,
            extra: block.extra,
        }
    }
}

impl From<WhoWeAreSectionForm> for AboutBlock {
    fn from(form: WhoWeAreSectionForm) -> Self {
        Self {
            eyebrow: optional(form.eyebrow),
            headline: form.headline,
            headline_accent: optional(form.headline_accent),
            mission: optional(form.mission),
            pillars: form.pillars,
            extra: block_extra(form.extra),
        }
    }
}

impl From<ServicesBlock> for ServicesSectionForm {
    fn from(block: ServicesBlock) -> Self {
        Self {
            eyebrow: text(block.eyebrow),
            headline: block.headline,
            services: block.services,
            extra: block.extra,
        }
    }
}

impl From<ServicesSectionForm> for ServicesBlock {
    fn from(form: ServicesSectionForm) -> Self {
        Self {
            eyebrow: optional(form.eyebrow),
            headline: form.headline,
            services: form.services,
            extra: block_extra(form.extra),
        }
    }
}

impl From<ContactBlock> for ContactSectionForm {
    fn from(block: ContactBlock) -> Self {
        Self {
            headline: block.headline,
            description: text(block.description),
            show_form: block.show_form,
            show_map: block.show_map,
            extra: block.extra,
        }
    }
}

impl From<ContactSectionForm> for ContactBlock {
    fn from(form: ContactSectionForm) -> Self {
        Self {
            headline: form.headline,
            description: optional(form.description),
            show_form: form.show_form,
            show_map: form.show_map,
            extra: block_extra(form.extra),
        }
    }
}

impl From<IntroBlock> for IntroSectionForm {
    fn from(block: IntroBlock) -> Self {
        Self {
            eyebrow: text(block.eyebrow),
            headline: block.headline,
            headline_accent: text(block.headline_accent),
            text: text(block.text),
            extra: block.extra,
        }
    }
}

impl From<IntroSectionForm> for IntroBlock {
    fn from(form: IntroSectionForm) -> Self {
        Self {
            eyebrow: optional(form.eyebrow),
            headline: form.headline,
            headline_accent: optional(form.headline_accent),
            text: optional(form.text),
            extra: block_extra(form.extra),
        }
    }
}

impl IntroSectionForm {
    /// Build an intro from a `heading` block and the `paragraph` right after
    /// it, for pages written before the intro block existed.
    pub fn from_heading(heading: HeadingBlock, paragraph: Option<ParagraphBlock>) -> Self {
        let mut extra = heading.extra;
        let text = match paragraph {
            Some(paragraph) => {
                for (key, value) in paragraph.extra {
                    extra.entry(key).or_insert(value);
                }
                paragraph.text
            }
            None => String::new(),
        };
        Self {
            headline: heading.text,
            text,
            extra,
            ..Default::default()
        }
    }
}

impl From<StoryBlock> for StorySectionForm {
    fn from(block: StoryBlock) -> Self {
        Self {
            title: block.title,
            paragraphs: block.paragraphs,
            extra: block.extra,
        }
    }
}

impl From<StorySectionForm> for StoryBlock {
    fn from(form: StorySectionForm) -> Self {
        Self {
            title: form.title,
            paragraphs: form.paragraphs,
            extra: block_extra(form.extra),
        }
    }
}

impl From<ValuesBlock> for ValuesSectionForm {
    fn from(block: ValuesBlock) -> Self {
        Self {
            title: block.title,
            values: block.values,
            extra: block.extra,
        }
    }
}

impl From<ValuesSectionForm> for ValuesBlock {
    fn from(form: ValuesSectionForm) -> Self {
        Self {
            title: form.title,
            values: form.values,
            extra: block_extra(form.extra),
        }
    }
}

impl From<TeamBlock> for TeamSectionForm {
    fn from(block: TeamBlock) -> Self {
        Self {
            title: block.title,
            subtitle: text(block.subtitle),
            members: block.members,
            extra: block.extra,
        }
    }
}

impl From<TeamSectionForm> for TeamBlock {
    fn from(form: TeamSectionForm) -> Self {
        Self {
            title: form.title,
            subtitle: optional(form.subtitle),
            members: form.members,
            extra: block_extra(form.extra),
        }
    }
}

impl From<MilestonesBlock> for MilestonesSectionForm {
    fn from(block: MilestonesBlock) -> Self {
        Self {
            milestones: block.milestones,
            extra: block.extra,
        }
    }
}

impl From<MilestonesSectionForm> for MilestonesBlock {
    fn from(form: MilestonesSectionForm) -> Self {
        Self {
            milestones: form.milestones,
            extra: block_extra(form.extra),
        }
    }
}

impl From<ProcessBlock> for ProcessSectionForm {
    fn from(block: ProcessBlock) -> Self {
        Self {
            title: block.title,
            steps: block.steps,
            extra: block.extra,
        }
    }
}

impl From<ProcessSectionForm> for ProcessBlock {
    fn from(form: ProcessSectionForm) -> Self {
        Self {
            title: form.title,
            steps: form.steps,
            extra: block_extra(form.extra),
        }
    }
}

impl From<CtaBlock> for CtaSectionForm {
    fn from(block: CtaBlock) -> Self {
        Self {
            headline: block.headline,
            description: text(block.description),
            primary_button: link(block.primary_button),
            secondary_button: link(block.secondary_button),
            extra: block.extra,
        }
    }
}

impl From<CtaSectionForm> for CtaBlock {
    fn from(form: CtaSectionForm) -> Self {
        Self {
            headline: form.headline,
            description: optional(form.description),
            primary_button: optional_link(form.primary_button),
            secondary_button: optional_link(form.secondary_button),
            extra: block_extra(form.extra),
        }
    }
}

impl From<PartnersBlock> for PartnersSectionForm {
    fn from(block: PartnersBlock) -> Self {
        Self {
            eyebrow: text(block.eyebrow),
            headline: block.headline,
            description: text(block.description),
            extra: block.extra,
        }
    }
}

impl From<PartnersSectionForm> for PartnersBlock {
    fn from(form: PartnersSectionForm) -> Self {
        Self {
            eyebrow: optional(form.eyebrow),
            headline: form.headline,
            description: optional(form.description),
            extra: block_extra(form.extra),
        }
    }
}

impl From<InsightsBlock> for InsightsSectionForm {
    fn from(block: InsightsBlock) -> Self {
        Self {
            eyebrow: text(block.eyebrow),
            headline: block.headline,
            extra: block.extra,
        }
    }
}

impl From<InsightsSectionForm> for InsightsBlock {
    fn from(form: InsightsSectionForm) -> Self {
        Self {
            eyebrow: optional(form.eyebrow),
            headline: form.headline,
            extra: block_extra(form.extra),
        }
    }
}

impl From<StatsBlock> for StatsSectionForm {
    fn from(block: StatsBlock) -> Self {
        Self {
            items: block.items,
            extra: block.extra,
        }
    }
}

impl From<StatsSectionForm> for StatsBlock {
    fn from(form: StatsSectionForm) -> Self {
        Self {
            items: form.items,
            extra: block_extra(form.extra),
        }
    }
}
