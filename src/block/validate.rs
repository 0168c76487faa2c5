//! Block validation.
//!
//! Every block coming from an admin form, the raw JSON editor, or storage is
//! checked against a per-type field table before it can join a page's block
//! sequence. Nested fields are reported with their full path, e.g.
//! `services[2].title` or `members[0].image.alt`.

use super::{BlockType, ContentBlock};
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a raw block was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("block must be a JSON object")]
    NotAnObject,

    #[error("block has no `type` field")]
    MissingType,

    #[error("unknown block type `{0}`")]
    UnknownBlockType(String),

    #[error("`{block_type}` block: required field `{field}` is missing or malformed")]
    MissingRequiredField { block_type: BlockType, field: String },

    #[error("`{block_type}` block is malformed: {message}")]
    Malformed { block_type: BlockType, message: String },
}

/// A validation failure inside a block array.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("block #{index}: {error}")]
pub struct BlockError {
    pub index: usize,
    #[source]
    pub error: ValidationError,
}

// ============================================================================
// Field Schema
// ============================================================================

/// Expected JSON shape of a field.
#[derive(Debug, Clone, Copy)]
enum Shape {
    Text,
    Flag,
    Level,
    TextList,
    Object(&'static [FieldSpec]),
    List(&'static [FieldSpec]),
}

#[derive(Debug, Clone, Copy)]
struct FieldSpec {
    name: &'static str,
    shape: Shape,
    required: bool,
}

// Struct literals (not const fn calls) so the tables below get promoted to
// `'static`.
macro_rules! req {
    ($name:literal, $shape:expr) => {
        FieldSpec { name: $name, shape: $shape, required: true }
    };
}

macro_rules! opt {
    ($name:literal, $shape:expr) => {
        FieldSpec { name: $name, shape: $shape, required: false }
    };
}

use Shape::{Flag, Level, List, Object, Text, TextList};

const LINK: &[FieldSpec] = &[req!("text", Text), req!("href", Text)];
const TITLED: &[FieldSpec] = &[req!("title", Text), req!("description", Text)];
const IMAGE_REF: &[FieldSpec] = &[req!("url", Text), req!("alt", Text)];

const STAT_ITEM: &[FieldSpec] = &[req!("label", Text), req!("value", Text), opt!("note", Text)];
const SERVICE_ITEM: &[FieldSpec] = &[
    req!("title", Text),
    req!("description", Text),
    opt!("features", TextList),
    opt!("cta", Object(LINK)),
];
const PILLAR: &[FieldSpec] = &[req!("title", Text), req!("description", Text), opt!("icon", Text)];
const TEAM_MEMBER: &[FieldSpec] = &[
    req!("name", Text),
    req!("role", Text),
    opt!("bio", Text),
    opt!("image", Object(IMAGE_REF)),
];
const MILESTONE: &[FieldSpec] = &[req!("year", Text), req!("event", Text)];

impl BlockType {
    /// Fields declared by this block type.
    fn schema(self) -> &'static [FieldSpec] {
        match self {
            Self::Heading => &[req!("level", Level), req!("text", Text)],
            Self::Paragraph => &[req!("text", Text)],
            Self::Hero => &[
                req!("tagline", Text),
                opt!("subtagline", Text),
                opt!("ctaPrimary", Object(LINK)),
                opt!("ctaSecondary", Object(LINK)),
                opt!("quickLinks", List(LINK)),
            ],
            Self::Intro => &[
                opt!("eyebrow", Text),
                req!("headline", Text),
                opt!("headlineAccent", Text),
                opt!("text", Text),
            ],
            Self::Bullets => &[req!("items", TextList)],
            Self::Quote => &[req!("text", Text), opt!("by", Text)],
            Self::Callout => &[opt!("title", Text), req!("text", Text)],
            Self::Stats => &[req!("items", List(STAT_ITEM))],
            Self::Services => &[
                opt!("eyebrow", Text),
                req!("headline", Text),
                req!("services", List(SERVICE_ITEM)),
            ],
            Self::About => &[
                opt!("eyebrow", Text),
                req!("headline", Text),
                opt!("headlineAccent", Text),
                opt!("mission", Text),
                opt!("pillars", List(PILLAR)),
            ],
            Self::Partners => &[
                opt!("eyebrow", Text),
                req!("headline", Text),
                opt!("description", Text),
            ],
            Self::Contact => &[
                req!("headline", Text),
                opt!("description", Text),
                opt!("showForm", Flag),
                opt!("showMap", Flag),
            ],
            Self::Insights => &[opt!("eyebrow", Text), req!("headline", Text)],
            Self::Values => &[req!("title", Text), req!("values", List(TITLED))],
            Self::Team => &[
                req!("title", Text),
                opt!("subtitle", Text),
                req!("members", List(TEAM_MEMBER)),
            ],
            Self::Milestones => &[req!("milestones", List(MILESTONE))],
            Self::Process => &[req!("title", Text), req!("steps", List(TITLED))],
            Self::Story => &[req!("title", Text), req!("paragraphs", TextList)],
            Self::Cta => &[
                req!("headline", Text),
                opt!("description", Text),
                opt!("primaryButton", Object(LINK)),
                opt!("secondaryButton", Object(LINK)),
            ],
            Self::Divider => &[],
            Self::Image => &[req!("src", Text), req!("alt", Text), opt!("caption", Text)],
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Validate one raw block and convert it to its typed form.
///
/// Optional fields come back defaulted: absent flags are `false`, absent
/// optional lists are empty.
pub fn validate(raw: &Value) -> Result<ContentBlock, ValidationError> {
    let object = raw.as_object().ok_or(ValidationError::NotAnObject)?;
    let type_name = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(ValidationError::MissingType)?;
    let block_type: BlockType = type_name
        .parse()
        .map_err(|_| ValidationError::UnknownBlockType(type_name.to_owned()))?;

    check_object(object, block_type.schema(), "")
        .map_err(|field| ValidationError::MissingRequiredField { block_type, field })?;

    serde_json::from_value(raw.clone()).map_err(|err| ValidationError::Malformed {
        block_type,
        message: err.to_string(),
    })
}

/// Validate a whole raw block array, stopping at the first bad block.
pub fn validate_blocks(raw: &[Value]) -> Result<Vec<ContentBlock>, BlockError> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| validate(value).map_err(|error| BlockError { index, error }))
        .collect()
}

// ============================================================================
// Shape Checking
// ============================================================================

/// Check an object against its field table. `Err` carries the failing path.
fn check_object(object: &Map<String, Value>, fields: &[FieldSpec], prefix: &str) -> Result<(), String> {
    for field in fields {
        let path = join_path(prefix, field.name);
        match object.get(field.name) {
            None | Some(Value::Null) if field.required => return Err(path),
            None | Some(Value::Null) => {}
            Some(value) => check_shape(value, field.shape, &path)?,
        }
    }
    Ok(())
}

fn check_shape(value: &Value, shape: Shape, path: &str) -> Result<(), String> {
    let fits = match shape {
        Text => value.is_string(),
        Flag => value.is_boolean(),
        Level => value
            .as_u64()
            .is_some_and(|level| (1..=4).contains(&level)),
        TextList => value
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string)),
        Object(fields) => {
            let object = value.as_object().ok_or_else(|| path.to_owned())?;
            return check_object(object, fields, path);
        }
        List(fields) => {
            let items = value.as_array().ok_or_else(|| path.to_owned())?;
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                let object = item.as_object().ok_or_else(|| item_path.clone())?;
                check_object(object, fields, &item_path)?;
            }
            return Ok(());
        }
    };

    if fits { Ok(()) } else { Err(path.to_owned()) }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::create_default;
    use serde_json::json;

    fn missing(block_type: BlockType, field: &str) -> ValidationError {
        ValidationError::MissingRequiredField {
            block_type,
            field: field.to_owned(),
        }
    }

    #[test]
    fn test_valid_heading() {
        let block = validate(&json!({ "type": "heading", "level": 3, "text": "Our approach" })).unwrap();
        assert_eq!(block.block_type(), BlockType::Heading);
    }

    #[test]
    fn test_not_an_object() {
        assert_eq!(validate(&json!("heading")), Err(ValidationError::NotAnObject));
        assert_eq!(validate(&json!([1])), Err(ValidationError::NotAnObject));
    }

    #[test]
    fn test_missing_type() {
        assert_eq!(validate(&json!({ "text": "x" })), Err(ValidationError::MissingType));
        assert_eq!(validate(&json!({ "type": 3 })), Err(ValidationError::MissingType));
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(
            validate(&json!({ "type": "totallyUnknown" })),
            Err(ValidationError::UnknownBlockType("totallyUnknown".into()))
        );
    }

    #[test]
    fn test_missing_heading_text() {
        assert_eq!(
            validate(&json!({ "type": "heading", "level": 1 })),
            Err(missing(BlockType::Heading, "text"))
        );
    }

    #[test]
    fn test_heading_level_out_of_range() {
        assert_eq!(
            validate(&json!({ "type": "heading", "level": 5, "text": "x" })),
            Err(missing(BlockType::Heading, "level"))
        );
    }

    #[test]
    fn test_nested_service_title() {
        let raw = json!({
            "type": "services",
            "headline": "Our Services",
            "services": [
                { "title": "Audit", "description": "..." },
                { "description": "no title" }
            ]
        });
        assert_eq!(validate(&raw), Err(missing(BlockType::Services, "services[1].title")));
    }

    #[test]
    fn test_wrong_shaped_optional_field() {
        let raw = json!({ "type": "hero", "tagline": "Hi", "ctaPrimary": { "text": "Go" } });
        assert_eq!(validate(&raw), Err(missing(BlockType::Hero, "ctaPrimary.href")));

        let raw = json!({ "type": "contact", "headline": "Hi", "showForm": "yes" });
        assert_eq!(validate(&raw), Err(missing(BlockType::Contact, "showForm")));
    }

    #[test]
    fn test_nested_image_in_team() {
        let raw = json!({
            "type": "team",
            "title": "Team",
            "members": [{ "name": "Ada", "role": "CEO", "image": { "url": "/ada.jpg" } }]
        });
        assert_eq!(validate(&raw), Err(missing(BlockType::Team, "members[0].image.alt")));
    }

    #[test]
    fn test_optional_fields_defaulted() {
        let block = validate(&json!({ "type": "contact", "headline": "Reach us" })).unwrap();
        let ContentBlock::Contact(contact) = block else {
            panic!("expected contact block");
        };
        assert!(!contact.show_form);
        assert!(!contact.show_map);
        assert_eq!(contact.description, None);

        let block = validate(&json!({
            "type": "services",
            "headline": "S",
            "services": [{ "title": "t", "description": "d" }]
        }))
        .unwrap();
        let ContentBlock::Services(services) = block else {
            panic!("expected services block");
        };
        assert!(services.services[0].features.is_empty());
    }

    #[test]
    fn test_null_optional_is_absent() {
        let block = validate(&json!({ "type": "quote", "text": "x", "by": null })).unwrap();
        let ContentBlock::Quote(quote) = block else {
            panic!("expected quote block");
        };
        assert_eq!(quote.by, None);
    }

    #[test]
    fn test_extra_fields_are_accepted() {
        let block = validate(&json!({ "type": "divider", "style": "dotted" })).unwrap();
        let ContentBlock::Divider(divider) = block else {
            panic!("expected divider block");
        };
        assert_eq!(divider.extra.get("style"), Some(&json!("dotted")));
    }

    #[test]
    fn test_every_default_block_validates() {
        for block_type in BlockType::ALL {
            let block = create_default(block_type.as_str()).unwrap();
            let raw = serde_json::to_value(&block).unwrap();
            assert_eq!(validate(&raw), Ok(block), "default `{block_type}` failed validation");
        }
    }

    #[test]
    fn test_validate_blocks_reports_index() {
        let raw = vec![
            json!({ "type": "paragraph", "text": "ok" }),
            json!({ "type": "divider" }),
            json!({ "type": "image", "src": "/a.png" }),
        ];
        let err = validate_blocks(&raw).unwrap_err();
        assert_eq!(err.index, 2);
        assert_eq!(err.error, missing(BlockType::Image, "alt"));
        assert!(err.to_string().starts_with("block #2:"));
    }
}
