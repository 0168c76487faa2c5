//! Per-block HTML.

use super::{RenderContext, escape_html, safe_href};
use crate::block::{
    AboutBlock, Block, ContactBlock, ContentBlock, CtaBlock, HeroBlock, InsightsBlock,
    IntroBlock, Link, PartnersBlock, ServicesBlock, TeamBlock, TitledText,
};
use crate::store::SiteData;
use serde_json::Value;

pub(super) fn render_block(out: &mut String, block: &Block, ctx: &RenderContext<'_>) {
    match block {
        Block::Known(block) => render_content(out, block, ctx),
        Block::Unknown(raw) => render_unknown(out, raw),
    }
}

fn render_content(out: &mut String, block: &ContentBlock, ctx: &RenderContext<'_>) {
    match block {
        ContentBlock::Heading(b) => {
            let level = b.level.get();
            out.push_str(&format!("<h{level}>{}</h{level}>\n", escape_html(&b.text)));
        }
        ContentBlock::Paragraph(b) => {
            out.push_str(&format!("<p>{}</p>\n", escape_html(&b.text)));
        }
        ContentBlock::Hero(b) => render_hero(out, b),
        ContentBlock::Intro(b) => render_intro(out, b),
        ContentBlock::Bullets(b) => {
            out.push_str("<ul class=\"block-bullets\">\n");
            for item in &b.items {
                out.push_str(&format!("<li>{}</li>\n", escape_html(item)));
            }
            out.push_str("</ul>\n");
        }
        ContentBlock::Quote(b) => {
            out.push_str("<blockquote class=\"block-quote\">\n");
            out.push_str(&format!("<p>{}</p>\n", escape_html(&b.text)));
            if let Some(by) = non_empty(&b.by) {
                out.push_str(&format!("<cite>{}</cite>\n", escape_html(by)));
            }
            out.push_str("</blockquote>\n");
        }
        ContentBlock::Callout(b) => {
            out.push_str("<aside class=\"block-callout\">\n");
            if let Some(title) = non_empty(&b.title) {
                out.push_str(&format!("<strong>{}</strong>\n", escape_html(title)));
            }
            out.push_str(&format!("<p>{}</p>\n", escape_html(&b.text)));
            out.push_str("</aside>\n");
        }
        ContentBlock::Stats(b) => {
            out.push_str("<section class=\"block-stats\">\n<dl>\n");
            for item in &b.items {
                out.push_str("<div class=\"stat\">");
                out.push_str(&format!(
                    "<dt>{}</dt><dd>{}</dd>",
                    escape_html(&item.label),
                    escape_html(&item.value)
                ));
                if let Some(note) = non_empty(&item.note) {
                    out.push_str(&format!("<small>{}</small>", escape_html(note)));
                }
                out.push_str("</div>\n");
            }
            out.push_str("</dl>\n</section>\n");
        }
        ContentBlock::Services(b) => render_services(out, b),
        ContentBlock::About(b) => render_about(out, b),
        ContentBlock::Partners(b) => render_partners(out, b, ctx.data),
        ContentBlock::Contact(b) => render_contact(out, b),
        ContentBlock::Insights(b) => render_insights(out, b, ctx.data),
        ContentBlock::Values(b) => {
            out.push_str("<section class=\"block-values\">\n");
            out.push_str(&format!("<h2>{}</h2>\n", escape_html(&b.title)));
            titled_items(out, "value", &b.values);
            out.push_str("</section>\n");
        }
        ContentBlock::Team(b) => render_team(out, b),
        ContentBlock::Milestones(b) => {
            out.push_str("<ol class=\"block-milestones\">\n");
            for milestone in &b.milestones {
                out.push_str(&format!(
                    "<li><span class=\"year\">{}</span> {}</li>\n",
                    escape_html(&milestone.year),
                    escape_html(&milestone.event)
                ));
            }
            out.push_str("</ol>\n");
        }
        ContentBlock::Process(b) => {
            out.push_str("<section class=\"block-process\">\n");
            out.push_str(&format!("<h2>{}</h2>\n<ol>\n", escape_html(&b.title)));
            for step in &b.steps {
                out.push_str(&format!(
                    "<li><h3>{}</h3><p>{}</p></li>\n",
                    escape_html(&step.title),
                    escape_html(&step.description)
                ));
            }
            out.push_str("</ol>\n</section>\n");
        }
        ContentBlock::Story(b) => {
            out.push_str("<section class=\"block-story\">\n");
            out.push_str(&format!("<h2>{}</h2>\n", escape_html(&b.title)));
            for paragraph in &b.paragraphs {
                out.push_str(&format!("<p>{}</p>\n", escape_html(paragraph)));
            }
            out.push_str("</section>\n");
        }
        ContentBlock::Cta(b) => render_cta(out, b),
        ContentBlock::Divider(_) => out.push_str("<hr>\n"),
        ContentBlock::Image(b) => {
            out.push_str("<figure class=\"block-image\">\n");
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">\n",
                safe_href(&b.src),
                escape_html(&b.alt)
            ));
            if let Some(caption) = non_empty(&b.caption) {
                out.push_str(&format!("<figcaption>{}</figcaption>\n", escape_html(caption)));
            }
            out.push_str("</figure>\n");
        }
    }
}

fn render_unknown(out: &mut String, raw: &Value) {
    let name = raw.get("type").and_then(Value::as_str).unwrap_or("");
    if name.is_empty() {
        out.push_str("<div class=\"block-unknown\">Unsupported block</div>\n");
    } else {
        let name = escape_html(name);
        out.push_str(&format!(
            "<div class=\"block-unknown\" data-type=\"{name}\">Unsupported block: {name}</div>\n"
        ));
    }
}

fn render_hero(out: &mut String, b: &HeroBlock) {
    out.push_str("<section class=\"block-hero\">\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(&b.tagline)));
    if let Some(sub) = non_empty(&b.subtagline) {
        out.push_str(&format!("<p class=\"subtagline\">{}</p>\n", escape_html(sub)));
    }
    buttons(out, b.cta_primary.as_ref(), b.cta_secondary.as_ref());
    if !b.quick_links.is_empty() {
        out.push_str("<ul class=\"quick-links\">\n");
        for link in &b.quick_links {
            out.push_str("<li>");
            anchor(out, link, None);
            out.push_str("</li>\n");
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</section>\n");
}

fn render_intro(out: &mut String, b: &IntroBlock) {
    out.push_str("<section class=\"block-intro\">\n");
    eyebrow(out, &b.eyebrow);
    headline(out, "h1", &b.headline, &b.headline_accent);
    if let Some(text) = non_empty(&b.text) {
        out.push_str(&format!("<p>{}</p>\n", escape_html(text)));
    }
    out.push_str("</section>\n");
}

fn render_services(out: &mut String, b: &ServicesBlock) {
    out.push_str("<section class=\"block-services\">\n");
    eyebrow(out, &b.eyebrow);
    out.push_str(&format!("<h2>{}</h2>\n", escape_html(&b.headline)));
    for service in &b.services {
        out.push_str("<article class=\"service\">\n");
        out.push_str(&format!(
            "<h3>{}</h3>\n<p>{}</p>\n",
            escape_html(&service.title),
            escape_html(&service.description)
        ));
        if !service.features.is_empty() {
            out.push_str("<ul>\n");
            for feature in &service.features {
                out.push_str(&format!("<li>{}</li>\n", escape_html(feature)));
            }
            out.push_str("</ul>\n");
        }
        if let Some(cta) = service.cta.as_ref().filter(|l| !l.text.is_empty()) {
            anchor(out, cta, Some("link"));
            out.push('\n');
        }
        out.push_str("</article>\n");
    }
    out.push_str("</section>\n");
}

fn render_about(out: &mut String, b: &AboutBlock) {
    out.push_str("<section class=\"block-about\">\n");
    eyebrow(out, &b.eyebrow);
    headline(out, "h2", &b.headline, &b.headline_accent);
    if let Some(mission) = non_empty(&b.mission) {
        out.push_str(&format!("<p class=\"mission\">{}</p>\n", escape_html(mission)));
    }
    if !b.pillars.is_empty() {
        out.push_str("<div class=\"pillars\">\n");
        for pillar in &b.pillars {
            match non_empty(&pillar.icon) {
                Some(icon) => out.push_str(&format!(
                    "<div class=\"pillar\" data-icon=\"{}\">",
                    escape_html(icon)
                )),
                None => out.push_str("<div class=\"pillar\">"),
            }
            out.push_str(&format!(
                "<h3>{}</h3><p>{}</p></div>\n",
                escape_html(&pillar.title),
                escape_html(&pillar.description)
            ));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
}

fn render_partners(out: &mut String, b: &PartnersBlock, data: &SiteData) {
    out.push_str("<section class=\"block-partners\">\n");
    eyebrow(out, &b.eyebrow);
    out.push_str(&format!("<h2>{}</h2>\n", escape_html(&b.headline)));
    if let Some(description) = non_empty(&b.description) {
        out.push_str(&format!("<p>{}</p>\n", escape_html(description)));
    }
    if !data.partners.is_empty() {
        out.push_str("<ul class=\"partner-list\">\n");
        for partner in &data.partners {
            let name = escape_html(&partner.name);
            let label = match non_empty(&partner.logo) {
                Some(logo) => format!("<img src=\"{}\" alt=\"{name}\">", safe_href(logo)),
                None => name.into_owned(),
            };
            match non_empty(&partner.url) {
                Some(url) => out.push_str(&format!(
                    "<li><a href=\"{}\" rel=\"noopener\">{label}</a></li>\n",
                    safe_href(url)
                )),
                None => out.push_str(&format!("<li>{label}</li>\n")),
            }
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</section>\n");
}

fn render_contact(out: &mut String, b: &ContactBlock) {
    out.push_str("<section class=\"block-contact\">\n");
    out.push_str(&format!("<h2>{}</h2>\n", escape_html(&b.headline)));
    if let Some(description) = non_empty(&b.description) {
        out.push_str(&format!("<p>{}</p>\n", escape_html(description)));
    }
    if b.show_form {
        out.push_str(concat!(
            "<form class=\"contact-form\" method=\"post\">\n",
            "<label>Name <input name=\"name\" required></label>\n",
            "<label>Email <input name=\"email\" type=\"email\" required></label>\n",
            "<label>Message <textarea name=\"message\" required></textarea></label>\n",
            "<button type=\"submit\">Send</button>\n",
            "</form>\n",
        ));
    }
    if b.show_map {
        out.push_str("<div class=\"contact-map\"></div>\n");
    }
    out.push_str("</section>\n");
}

fn render_insights(out: &mut String, b: &InsightsBlock, data: &SiteData) {
    out.push_str("<section class=\"block-insights\">\n");
    eyebrow(out, &b.eyebrow);
    out.push_str(&format!("<h2>{}</h2>\n", escape_html(&b.headline)));
    for insight in data.latest_insights(SiteData::LATEST_INSIGHTS) {
        out.push_str("<article class=\"insight\">\n");
        out.push_str(&format!(
            "<time datetime=\"{0}\">{0}</time>\n",
            insight.date.format("%Y-%m-%d")
        ));
        let title = escape_html(&insight.title);
        match non_empty(&insight.url) {
            Some(url) => out.push_str(&format!(
                "<h3><a href=\"{}\">{title}</a></h3>\n",
                safe_href(url)
            )),
            None => out.push_str(&format!("<h3>{title}</h3>\n")),
        }
        if let Some(excerpt) = non_empty(&insight.excerpt) {
            out.push_str(&format!("<p>{}</p>\n", escape_html(excerpt)));
        }
        out.push_str("</article>\n");
    }
    out.push_str("</section>\n");
}

fn render_team(out: &mut String, b: &TeamBlock) {
    out.push_str("<section class=\"block-team\">\n");
    out.push_str(&format!("<h2>{}</h2>\n", escape_html(&b.title)));
    if let Some(subtitle) = non_empty(&b.subtitle) {
        out.push_str(&format!("<p>{}</p>\n", escape_html(subtitle)));
    }
    for member in &b.members {
        out.push_str("<figure class=\"member\">\n");
        if let Some(image) = member.image.as_ref().filter(|i| !i.url.is_empty()) {
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">\n",
                safe_href(&image.url),
                escape_html(&image.alt)
            ));
        }
        out.push_str(&format!(
            "<figcaption><h3>{}</h3><p class=\"role\">{}</p>",
            escape_html(&member.name),
            escape_html(&member.role)
        ));
        if let Some(bio) = non_empty(&member.bio) {
            out.push_str(&format!("<p>{}</p>", escape_html(bio)));
        }
        out.push_str("</figcaption>\n</figure>\n");
    }
    out.push_str("</section>\n");
}

fn render_cta(out: &mut String, b: &CtaBlock) {
    out.push_str("<section class=\"block-cta\">\n");
    out.push_str(&format!("<h2>{}</h2>\n", escape_html(&b.headline)));
    if let Some(description) = non_empty(&b.description) {
        out.push_str(&format!("<p>{}</p>\n", escape_html(description)));
    }
    buttons(out, b.primary_button.as_ref(), b.secondary_button.as_ref());
    out.push_str("</section>\n");
}

// ============================================================================
// Helpers
// ============================================================================

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn eyebrow(out: &mut String, value: &Option<String>) {
    if let Some(text) = non_empty(value) {
        out.push_str(&format!("<p class=\"eyebrow\">{}</p>\n", escape_html(text)));
    }
}

fn headline(out: &mut String, tag: &str, text: &str, accent: &Option<String>) {
    match non_empty(accent) {
        Some(accent) => out.push_str(&format!(
            "<{tag}>{} <span class=\"accent\">{}</span></{tag}>\n",
            escape_html(text),
            escape_html(accent)
        )),
        None => out.push_str(&format!("<{tag}>{}</{tag}>\n", escape_html(text))),
    }
}

fn anchor(out: &mut String, link: &Link, class: Option<&str>) {
    let class = class
        .map(|c| format!(" class=\"{c}\""))
        .unwrap_or_default();
    out.push_str(&format!(
        "<a href=\"{}\"{class}>{}</a>",
        safe_href(&link.href),
        escape_html(&link.text)
    ));
}

fn buttons(out: &mut String, primary: Option<&Link>, secondary: Option<&Link>) {
    let primary = primary.filter(|l| !l.text.is_empty());
    let secondary = secondary.filter(|l| !l.text.is_empty());
    if primary.is_none() && secondary.is_none() {
        return;
    }
    out.push_str("<div class=\"actions\">");
    if let Some(link) = primary {
        anchor(out, link, Some("button primary"));
    }
    if let Some(link) = secondary {
        anchor(out, link, Some("button secondary"));
    }
    out.push_str("</div>\n");
}

fn titled_items(out: &mut String, class: &str, items: &[TitledText]) {
    for item in items {
        out.push_str(&format!(
            "<div class=\"{class}\"><h3>{}</h3><p>{}</p></div>\n",
            escape_html(&item.title),
            escape_html(&item.description)
        ));
    }
}
