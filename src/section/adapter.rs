//! Block array <-> guided-editor sections.
//!
//! # Claiming
//!
//! Sections are visited in registry order. Each takes the first block of its
//! type that no earlier section took:
//!
//! ```text
//! blocks:   [hero₀, divider, about₀, hero₁]
//! home:      hero ─► hero₀
//!            whoWeAre ─► about₀
//!            services ─► (none, empty form)
//!            contactTeaser ─► (none, empty form)
//! unmanaged: [divider, hero₁]
//! ```
//!
//! Writing back emits one block per registry section, in registry order,
//! followed by the unmanaged blocks. Converting the result again yields the
//! same sections.

use super::{PageSections, SectionData, SectionKind, SectionRegistry};
use crate::block::{Block, BlockType, ContentBlock};
use crate::log;

/// Split a page's blocks into its guided-editor sections.
///
/// Every registry section of `slug` is present in the result; sections
/// without a matching block get an empty form. Blocks no section claims are
/// kept in [`PageSections::unmanaged`].
pub fn blocks_to_sections(
    registry: &SectionRegistry,
    slug: &str,
    blocks: &[Block],
) -> PageSections {
    let mut claimed = vec![false; blocks.len()];
    let mut sections = PageSections::default();

    for meta in registry.sections_for(slug) {
        let data = claim(blocks, &mut claimed, meta.kind)
            .unwrap_or_else(|| SectionData::empty(meta.kind));
        sections.insert(meta.id.clone(), data);
    }

    sections.unmanaged = blocks
        .iter()
        .zip(&claimed)
        .filter(|(_, claimed)| !**claimed)
        .map(|(block, _)| block.clone())
        .collect();

    sections
}

/// Rebuild a page's block array from its sections.
///
/// Sections missing from `sections`, or stored with a kind that differs from
/// the registry, are written as empty blocks.
pub fn sections_to_blocks(
    registry: &SectionRegistry,
    slug: &str,
    sections: &PageSections,
) -> Vec<Block> {
    let metas = registry.sections_for(slug);
    let mut blocks = Vec::with_capacity(metas.len() + sections.unmanaged.len());

    for meta in metas {
        let data = match sections.get(&meta.id) {
            Some(data) if data.kind() == meta.kind => data.clone(),
            Some(data) => {
                log!(
                    "sections";
                    "`{slug}.{}` holds {} data, expected {}; writing an empty block",
                    meta.id,
                    data.kind().as_str(),
                    meta.kind.as_str()
                );
                SectionData::empty(meta.kind)
            }
            None => SectionData::empty(meta.kind),
        };
        blocks.push(Block::Known(data.into_block()));
    }

    for (id, data) in &sections.sections {
        if registry.section(slug, id).is_none() {
            log!("sections"; "`{slug}.{id}` is not a registered section; appending its block");
            blocks.push(Block::Known(data.clone().into_block()));
        }
    }

    blocks.extend(sections.unmanaged.iter().cloned());
    blocks
}

/// Take the first unclaimed block `kind` can load.
fn claim(blocks: &[Block], claimed: &mut [bool], kind: SectionKind) -> Option<SectionData> {
    let block_type = kind.block_type();
    if let Some(index) = first_unclaimed(blocks, claimed, block_type) {
        claimed[index] = true;
        let block = blocks[index].as_known()?.clone();
        return SectionData::from_block(kind, block);
    }

    if kind == SectionKind::Intro {
        return claim_heading_intro(blocks, claimed);
    }

    None
}

/// A `heading`, plus the `paragraph` right after it, standing in for an intro.
fn claim_heading_intro(blocks: &[Block], claimed: &mut [bool]) -> Option<SectionData> {
    let index = first_unclaimed(blocks, claimed, BlockType::Heading)?;
    let Some(ContentBlock::Heading(heading)) = blocks[index].as_known() else {
        return None;
    };
    claimed[index] = true;

    let next = index + 1;
    let paragraph = match blocks.get(next).and_then(Block::as_known) {
        Some(ContentBlock::Paragraph(paragraph)) if !claimed[next] => {
            claimed[next] = true;
            Some(paragraph.clone())
        }
        _ => None,
    };

    Some(SectionData::Intro(super::IntroSectionForm::from_heading(
        heading.clone(),
        paragraph,
    )))
}

fn first_unclaimed(blocks: &[Block], claimed: &[bool], block_type: BlockType) -> Option<usize> {
    (0..blocks.len()).find(|&i| !claimed[i] && blocks[i].block_type() == Some(block_type))
}
