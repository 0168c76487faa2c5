//! Starter blocks for "Add Block" actions.

use super::*;

/// Create a minimally-populated block of the named type.
///
/// Returns `None` for names that are not registered; callers check.
pub fn create_default(type_name: &str) -> Option<ContentBlock> {
    type_name.parse().ok().map(default_for)
}

fn default_for(block_type: BlockType) -> ContentBlock {
    match block_type {
        BlockType::Heading => ContentBlock::Heading(HeadingBlock {
            text: "New heading".into(),
            ..Default::default()
        }),
        BlockType::Paragraph => ContentBlock::Paragraph(ParagraphBlock {
            text: "New paragraph".into(),
            ..Default::default()
        }),
        BlockType::Hero => ContentBlock::Hero(HeroBlock {
            tagline: "Your tagline".into(),
            ..Default::default()
        }),
        BlockType::Intro => ContentBlock::Intro(IntroBlock {
            headline: "Introduction".into(),
            ..Default::default()
        }),
        BlockType::Bullets => ContentBlock::Bullets(BulletsBlock {
            items: vec!["First point".into()],
            ..Default::default()
        }),
        BlockType::Quote => ContentBlock::Quote(QuoteBlock {
            text: "Quote".into(),
            ..Default::default()
        }),
        BlockType::Callout => ContentBlock::Callout(CalloutBlock {
            text: "Callout".into(),
            ..Default::default()
        }),
        BlockType::Stats => ContentBlock::Stats(StatsBlock {
            items: vec![StatItem {
                label: "Clients".into(),
                value: "0".into(),
                ..Default::default()
            }],
            ..Default::default()
        }),
        BlockType::Services => ContentBlock::Services(ServicesBlock {
            headline: "Our services".into(),
            ..Default::default()
        }),
        BlockType::About => ContentBlock::About(AboutBlock {
            headline: "Who we are".into(),
            ..Default::default()
        }),
        BlockType::Partners => ContentBlock::Partners(PartnersBlock {
            headline: "Our partners".into(),
            ..Default::default()
        }),
        BlockType::Contact => ContentBlock::Contact(ContactBlock {
            headline: "Get in touch".into(),
            ..Default::default()
        }),
        BlockType::Insights => ContentBlock::Insights(InsightsBlock {
            headline: "Latest insights".into(),
            ..Default::default()
        }),
        BlockType::Values => ContentBlock::Values(ValuesBlock {
            title: "Our values".into(),
            ..Default::default()
        }),
        BlockType::Team => ContentBlock::Team(TeamBlock {
            title: "Our team".into(),
            ..Default::default()
        }),
        BlockType::Milestones => ContentBlock::Milestones(MilestonesBlock::default()),
        BlockType::Process => ContentBlock::Process(ProcessBlock {
            title: "How we work".into(),
            ..Default::default()
        }),
        BlockType::Story => ContentBlock::Story(StoryBlock {
            title: "Our story".into(),
            ..Default::default()
        }),
        BlockType::Cta => ContentBlock::Cta(CtaBlock {
            headline: "Ready to start?".into(),
            ..Default::default()
        }),
        BlockType::Divider => ContentBlock::Divider(DividerBlock::default()),
        BlockType::Image => ContentBlock::Image(ImageBlock::default()),
    }
}
