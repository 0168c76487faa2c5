//! Content block model.
//!
//! A page's content is an ordered sequence of blocks. Each block is a tagged
//! JSON object whose `type` field selects one of the registered variants:
//!
//! ```json
//! [
//!   { "type": "hero", "tagline": "Welcome", "ctaPrimary": { "text": "Talk to us", "href": "/contact" } },
//!   { "type": "divider" },
//!   { "type": "paragraph", "text": "..." }
//! ]
//! ```
//!
//! # Unknown data
//!
//! - Fields a variant does not declare are kept in its `extra` map and written
//!   back unchanged, so edits never discard custom data.
//! - Objects whose `type` is not registered (or whose payload does not fit the
//!   variant) load as [`Block::Unknown`] and are serialized verbatim.

mod defaults;
pub mod validate;

pub use defaults::create_default;
pub use validate::{BlockError, ValidationError, validate, validate_blocks};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

/// Fields a block carries beyond the ones its type declares.
pub type Extra = Map<String, Value>;

// ============================================================================
// Block Types
// ============================================================================

macro_rules! block_types {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Discriminant of every registered block variant.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum BlockType {
            $($variant),*
        }

        impl BlockType {
            /// All registered block types, in declaration order.
            pub const ALL: &'static [BlockType] = &[$(BlockType::$variant),*];

            /// Wire name used in the `type` field.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(BlockType::$variant => $name),*
                }
            }
        }

        impl FromStr for BlockType {
            type Err = UnknownType;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(BlockType::$variant),)*
                    _ => Err(UnknownType(s.to_owned())),
                }
            }
        }
    };
}

block_types! {
    Heading => "heading",
    Paragraph => "paragraph",
    Hero => "hero",
    Intro => "intro",
    Bullets => "bullets",
    Quote => "quote",
    Callout => "callout",
    Stats => "stats",
    Services => "services",
    About => "about",
    Partners => "partners",
    Contact => "contact",
    Insights => "insights",
    Values => "values",
    Team => "team",
    Milestones => "milestones",
    Process => "process",
    Story => "story",
    Cta => "cta",
    Divider => "divider",
    Image => "image",
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `type` string that names no registered block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownType(pub String);

impl fmt::Display for UnknownType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown block type `{}`", self.0)
    }
}

impl std::error::Error for UnknownType {}

// ============================================================================
// Content Block
// ============================================================================

/// A registered, well-typed content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Heading(HeadingBlock),
    Paragraph(ParagraphBlock),
    Hero(HeroBlock),
    Intro(IntroBlock),
    Bullets(BulletsBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    Stats(StatsBlock),
    Services(ServicesBlock),
    About(AboutBlock),
    Partners(PartnersBlock),
    Contact(ContactBlock),
    Insights(InsightsBlock),
    Values(ValuesBlock),
    Team(TeamBlock),
    Milestones(MilestonesBlock),
    Process(ProcessBlock),
    Story(StoryBlock),
    Cta(CtaBlock),
    Divider(DividerBlock),
    Image(ImageBlock),
}

impl ContentBlock {
    pub const fn block_type(&self) -> BlockType {
        match self {
            Self::Heading(_) => BlockType::Heading,
            Self::Paragraph(_) => BlockType::Paragraph,
            Self::Hero(_) => BlockType::Hero,
            Self::Intro(_) => BlockType::Intro,
            Self::Bullets(_) => BlockType::Bullets,
            Self::Quote(_) => BlockType::Quote,
            Self::Callout(_) => BlockType::Callout,
            Self::Stats(_) => BlockType::Stats,
            Self::Services(_) => BlockType::Services,
            Self::About(_) => BlockType::About,
            Self::Partners(_) => BlockType::Partners,
            Self::Contact(_) => BlockType::Contact,
            Self::Insights(_) => BlockType::Insights,
            Self::Values(_) => BlockType::Values,
            Self::Team(_) => BlockType::Team,
            Self::Milestones(_) => BlockType::Milestones,
            Self::Process(_) => BlockType::Process,
            Self::Story(_) => BlockType::Story,
            Self::Cta(_) => BlockType::Cta,
            Self::Divider(_) => BlockType::Divider,
            Self::Image(_) => BlockType::Image,
        }
    }
}

// ============================================================================
// Block (persisted element)
// ============================================================================

/// One element of a stored or rendered block array.
///
/// Loading never fails for a JSON object: anything that is not a well-formed
/// registered block is kept as [`Block::Unknown`].
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Known(ContentBlock),
    Unknown(Value),
}

impl Block {
    /// Classify a raw JSON value.
    pub fn from_value(value: Value) -> Self {
        let registered = value
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|name| name.parse::<BlockType>().is_ok());
        if !registered {
            return Self::Unknown(value);
        }
        match serde_json::from_value(value.clone()) {
            Ok(block) => Self::Known(block),
            Err(_) => Self::Unknown(value),
        }
    }

    /// The `type` string, if the block has one.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Known(block) => Some(block.block_type().as_str()),
            Self::Unknown(value) => value.get("type").and_then(Value::as_str),
        }
    }

    pub fn block_type(&self) -> Option<BlockType> {
        match self {
            Self::Known(block) => Some(block.block_type()),
            Self::Unknown(_) => None,
        }
    }

    pub fn as_known(&self) -> Option<&ContentBlock> {
        match self {
            Self::Known(block) => Some(block),
            Self::Unknown(_) => None,
        }
    }

    /// Run the block through [`validate`], as every block must before it is
    /// persisted.
    pub fn validated(&self) -> Result<ContentBlock, ValidationError> {
        match self {
            Self::Known(block) => {
                let raw = serde_json::to_value(block).map_err(|err| ValidationError::Malformed {
                    block_type: block.block_type(),
                    message: err.to_string(),
                })?;
                validate(&raw)
            }
            Self::Unknown(raw) => validate(raw),
        }
    }
}

impl From<ContentBlock> for Block {
    fn from(block: ContentBlock) -> Self {
        Self::Known(block)
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(block) => block.serialize(serializer),
            Self::Unknown(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Deserialize an optional field, treating `null` like an absent value.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Shared Payload Types
// ============================================================================

/// Text + target pair used by buttons and quick links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Link {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
            extra: Extra::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.href.is_empty() && self.extra.is_empty()
    }
}

/// Heading level, restricted to 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(format!("heading level must be 1-4, got {level}"))
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

/// Title + description pair (values, process steps).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitledText {
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatItem {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub title: String,
    pub description: String,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<Link>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub alt: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub year: String,
    pub event: String,
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Block Payloads
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadingBlock {
    pub level: HeadingLevel,
    pub text: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphBlock {
    pub text: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroBlock {
    pub tagline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_primary: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_secondary: Option<Link>,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Vec::is_empty")]
    pub quick_links: Vec<Link>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntroBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyebrow: Option<String>,
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline_accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulletsBlock {
    pub items: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteBlock {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalloutBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsBlock {
    pub items: Vec<StatItem>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicesBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyebrow: Option<String>,
    pub headline: String,
    pub services: Vec<ServiceItem>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyebrow: Option<String>,
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline_accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Vec::is_empty")]
    pub pillars: Vec<Pillar>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnersBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyebrow: Option<String>,
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBlock {
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub show_form: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub show_map: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightsBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyebrow: Option<String>,
    pub headline: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuesBlock {
    pub title: String,
    pub values: Vec<TitledText>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamBlock {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub members: Vec<TeamMember>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MilestonesBlock {
    pub milestones: Vec<Milestone>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessBlock {
    pub title: String,
    pub steps: Vec<TitledText>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryBlock {
    pub title: String,
    pub paragraphs: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaBlock {
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_button: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_button: Option<Link>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividerBlock {
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}
