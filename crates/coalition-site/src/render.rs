//! Minimal HTML shell for server-rendered pages.
//!
//! Editor-authored HTML from the CMS is emitted as-is: block content and a
//! campaign's rich-text description. Everything else is escaped.

use std::fmt::Write;

use axum::http::StatusCode;
use coalition_content::client::campaign_page_path;
use coalition_content::{
    sorted_blocks, BlockType, Campaign, CampaignDetailView, CampaignsPageView, ContentBlock,
    ContentPageView, HomepageView, PageType, PageView, RenderState, SiteMetadata,
};

/// Render any page state. SSR never produces `Loading`, but client shells do.
pub fn page(state: &RenderState<PageView>) -> String {
    match state {
        RenderState::Loading => loading_shell(),
        RenderState::Loaded(PageView::Homepage(view)) => homepage(view),
        RenderState::Loaded(PageView::Content(view)) => content_page(view),
        RenderState::Loaded(PageView::Campaigns(view)) => campaigns_page(view),
    }
}

pub fn homepage(view: &HomepageView) -> String {
    let site = &view.site;
    let mut body = String::new();

    let _ = write!(
        body,
        "<section class=\"hero\"><h1>{}</h1><p>{}</p></section>",
        escape(&site.hero_title),
        escape(&site.hero_subtitle)
    );
    push_blocks(&mut body, &view.content_blocks, view.content_error.as_deref());

    if site.show_campaigns_section {
        let _ = write!(
            body,
            "<section class=\"campaigns\"><h2>{}</h2><p>{}</p>",
            escape(&site.campaigns_section_title),
            escape(&site.campaigns_section_subtitle)
        );
        push_campaign_list(&mut body, &view.campaigns, view.campaigns_error.as_deref());
        body.push_str("</section>");
    }

    if !site.cta_button_text.is_empty() {
        let _ = write!(
            body,
            "<section class=\"cta\"><h2>{}</h2><p>{}</p><a class=\"button\" href=\"{}\">{}</a></section>",
            escape(&site.cta_title),
            escape(&site.cta_content),
            escape(&site.cta_button_url),
            escape(&site.cta_button_text)
        );
    }

    layout(site, &site.organization_name, &body)
}

pub fn content_page(view: &ContentPageView) -> String {
    let title = match view.page_type {
        PageType::About => "About",
        PageType::Contact => "Contact",
        PageType::Campaigns => "Campaigns",
        PageType::Homepage => "Home",
    };

    let mut body = format!("<h1>{title}</h1>");
    push_blocks(&mut body, &view.content_blocks, view.content_error.as_deref());
    if view.page_type == PageType::Contact && !view.site.contact_email.is_empty() {
        let email = escape(&view.site.contact_email);
        let _ = write!(body, "<p class=\"contact\"><a href=\"mailto:{email}\">{email}</a></p>");
    }

    layout(&view.site, title, &body)
}

pub fn campaigns_page(view: &CampaignsPageView) -> String {
    let mut body = format!("<h1>{}</h1>", escape(&view.site.campaigns_section_title));
    push_blocks(&mut body, &view.content_blocks, view.content_error.as_deref());
    push_campaign_list(&mut body, &view.campaigns, view.campaigns_error.as_deref());
    layout(&view.site, "Campaigns", &body)
}

pub fn campaign_detail(view: &CampaignDetailView) -> String {
    let campaign = &view.campaign;
    let mut body = format!(
        "<article class=\"campaign\"><h1>{}</h1><p class=\"summary\">{}</p>",
        escape(&campaign.title),
        escape(&campaign.summary)
    );
    if let Some(description) = &campaign.description {
        let _ = write!(body, "<div class=\"description\">{description}</div>");
    }
    if campaign.accepts_endorsements() {
        if let Some(statement) = &campaign.endorsement_statement {
            let _ = write!(body, "<blockquote>{}</blockquote>", escape(statement));
        }
    }

    body.push_str("<section class=\"endorsements\"><h2>Endorsements</h2>");
    if let Some(error) = &view.endorsements_error {
        push_notice(&mut body, "endorsements", error);
    } else {
        push_endorsements(&mut body, view);
    }
    body.push_str("</section></article>");

    layout(&view.site, &campaign.title, &body)
}

fn push_endorsements(body: &mut String, view: &CampaignDetailView) {
    let public: Vec<_> = view
        .endorsements
        .iter()
        .filter(|e| e.public_display)
        .collect();
    if public.is_empty() {
        body.push_str("<p>No endorsements yet.</p>");
    } else {
        body.push_str("<ul>");
        for endorsement in public {
            let who = &endorsement.stakeholder;
            let _ = write!(
                body,
                "<li><strong>{}</strong>, {}</li>",
                escape(&who.display_name()),
                escape(&who.organization)
            );
        }
        body.push_str("</ul>");
    }
}

/// Bare page for 4xx/5xx responses. Does not depend on the content API.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = if status == StatusCode::NOT_FOUND {
        "Not found"
    } else {
        "Something went wrong"
    };
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{heading}</title></head>\
         <body><main><h1>{heading}</h1><p>{}</p><p><a href=\"/\">Back to home</a></p></main></body></html>",
        escape(message)
    )
}

fn loading_shell() -> String {
    "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>Loading</title></head>\
     <body><main aria-busy=\"true\"><p>Loading…</p></main></body></html>"
        .to_string()
}

fn layout(site: &SiteMetadata, title: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 1024);
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title><meta name=\"description\" content=\"{}\">",
        escape(title),
        escape(&site.tagline)
    );
    if let Some(theme) = &site.theme {
        let _ = write!(
            html,
            "<style>:root{{--primary:{};--secondary:{};--accent:{};--background:{};--heading-font:{};--body-font:{}}}</style>",
            escape(&theme.primary_color),
            escape(&theme.secondary_color),
            escape(&theme.accent_color),
            escape(&theme.background_color),
            escape(&theme.heading_font_family),
            escape(&theme.body_font_family)
        );
    }
    html.push_str("</head><body><header><nav>");
    let _ = write!(
        html,
        "<a class=\"brand\" href=\"/\">{}</a>",
        escape(&site.organization_name)
    );
    for (href, label) in [("/about", "About"), ("/campaigns", "Campaigns"), ("/contact", "Contact")] {
        let _ = write!(html, "<a href=\"{href}\">{label}</a>");
    }
    html.push_str("</nav></header><main>");
    html.push_str(body);
    let _ = write!(
        html,
        "</main><footer><p>{} · {}</p>",
        escape(&site.organization_name),
        escape(&site.tagline)
    );
    for (network, url) in site.social_links() {
        let _ = write!(html, "<a href=\"{}\" rel=\"noopener\">{network}</a>", escape(url));
    }
    html.push_str("</footer></body></html>");
    html
}

fn push_blocks(out: &mut String, blocks: &[ContentBlock], error: Option<&str>) {
    if let Some(error) = error {
        push_notice(out, "page content", error);
        return;
    }
    for block in sorted_blocks(blocks) {
        let _ = write!(
            out,
            "<section class=\"block block-{} {}\">",
            block_class(block.block_type),
            escape(&block.css_class)
        );
        if !block.title.is_empty() {
            let _ = write!(out, "<h2>{}</h2>", escape(&block.title));
        }
        match block.block_type {
            BlockType::Image | BlockType::TextImage if !block.image_url.is_empty() => {
                let _ = write!(
                    out,
                    "<img src=\"{}\" alt=\"{}\">",
                    escape(&block.image_url),
                    escape(&block.image_alt_text)
                );
                out.push_str(&block.content);
            }
            BlockType::Quote => {
                let _ = write!(out, "<blockquote>{}</blockquote>", block.content);
            }
            _ => out.push_str(&block.content),
        }
        out.push_str("</section>");
    }
}

fn push_campaign_list(out: &mut String, campaigns: &[Campaign], error: Option<&str>) {
    if let Some(error) = error {
        push_notice(out, "campaigns", error);
        return;
    }
    let active: Vec<_> = campaigns.iter().filter(|c| c.active).collect();
    if active.is_empty() {
        out.push_str("<p>No active campaigns right now.</p>");
        return;
    }
    out.push_str("<ul class=\"campaign-list\">");
    for campaign in active {
        let _ = write!(
            out,
            "<li><a href=\"{}\">{}</a><p>{}</p></li>",
            escape(&campaign_page_path(&campaign.name)),
            escape(&campaign.title),
            escape(&campaign.summary)
        );
    }
    out.push_str("</ul>");
}

/// Non-blocking inline notice for a resource that failed to load.
fn push_notice(out: &mut String, what: &str, error: &str) {
    let _ = write!(
        out,
        "<div class=\"notice\" role=\"status\">Unable to load {what}. {}</div>",
        escape(error)
    );
}

fn block_class(kind: BlockType) -> &'static str {
    match kind {
        BlockType::Text => "text",
        BlockType::Image => "image",
        BlockType::TextImage => "text-image",
        BlockType::Quote => "quote",
        BlockType::Stats => "stats",
        BlockType::CustomHtml => "custom-html",
        BlockType::Unknown => "unknown",
    }
}

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use coalition_content::{fallback_site_metadata_with, Endorsement, Stakeholder};

    fn site() -> SiteMetadata {
        fallback_site_metadata_with(|_| None)
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<a href=\"x\">Tom & Jerry's</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_homepage_shows_inline_campaign_notice() {
        let view = HomepageView {
            site: site(),
            campaigns: Vec::new(),
            content_blocks: Vec::new(),
            site_error: Some("Failed to fetch homepage: HTTP 503".into()),
            campaigns_error: Some("Failed to fetch campaigns: HTTP 500".into()),
            content_error: None,
        };
        let html = homepage(&view);

        assert!(html.contains("Welcome to Coalition Builder"));
        assert!(html.contains("Unable to load campaigns. Failed to fetch campaigns: HTTP 500"));
        assert!(!html.contains("Failed to fetch homepage"));
    }

    #[test]
    fn test_blocks_rendered_in_order() {
        let block = |id, order, title: &str| ContentBlock {
            id,
            order,
            title: title.to_string(),
            is_visible: true,
            ..Default::default()
        };
        let view = ContentPageView {
            page_type: PageType::About,
            site: site(),
            content_blocks: vec![block(1, 2, "Second"), block(2, 1, "First")],
            site_error: None,
            content_error: None,
        };
        let html = content_page(&view);
        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_hidden_endorsements_count_as_none() {
        let endorsement = |id, public_display| Endorsement {
            id,
            public_display,
            stakeholder: Stakeholder {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                organization: "Analytical Farms".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut view = CampaignDetailView {
            site: site(),
            campaign: Campaign {
                name: "clean-water".into(),
                title: "Clean Water".into(),
                ..Default::default()
            },
            endorsements: vec![endorsement(1, false), endorsement(2, false)],
            site_error: None,
            endorsements_error: None,
        };

        let html = campaign_detail(&view);
        assert!(html.contains("No endorsements yet."));
        assert!(!html.contains("<ul></ul>"));
        assert!(!html.contains("Ada Lovelace"));

        view.endorsements.push(endorsement(3, true));
        let html = campaign_detail(&view);
        assert!(!html.contains("No endorsements yet."));
        assert!(html.contains("<li><strong>Ada Lovelace</strong>, Analytical Farms</li>"));
    }

    #[test]
    fn test_loading_shell() {
        assert!(page(&RenderState::Loading).contains("aria-busy"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = error_page(StatusCode::NOT_FOUND, "No campaign found with name: <x>");
        assert!(html.contains("Not found"));
        assert!(html.contains("&lt;x&gt;"));
    }
}
