//! Content records served by the Coalition Builder API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Site-wide metadata backing the homepage and every page chrome.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMetadata {
    pub id: u64,
    pub organization_name: String,
    pub tagline: String,

    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_background_image_url: String,

    pub about_section_title: String,
    pub about_section_content: String,

    pub cta_title: String,
    pub cta_content: String,
    pub cta_button_text: String,
    pub cta_button_url: String,

    pub contact_email: String,
    pub contact_phone: String,

    pub facebook_url: String,
    pub twitter_url: String,
    pub instagram_url: String,
    pub linkedin_url: String,

    pub campaigns_section_title: String,
    pub campaigns_section_subtitle: String,
    pub show_campaigns_section: bool,

    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,

    pub theme: Option<Theme>,
}

impl SiteMetadata {
    /// Social links that are actually set, as `(network, url)` pairs.
    pub fn social_links(&self) -> Vec<(&'static str, &str)> {
        [
            ("facebook", self.facebook_url.as_str()),
            ("twitter", self.twitter_url.as_str()),
            ("instagram", self.instagram_url.as_str()),
            ("linkedin", self.linkedin_url.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.is_empty())
        .collect()
    }
}

/// Brand colors, fonts and logo attached to the site metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub id: u64,
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub section_background_color: String,
    pub card_background_color: String,
    pub heading_font_family: String,
    pub body_font_family: String,
    pub logo_url: Option<String>,
    pub logo_alt_text: Option<String>,
    pub favicon_url: Option<String>,
}

/// A policy campaign.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Campaign {
    pub id: u64,
    /// Unique slug used in URLs.
    pub name: String,
    pub title: String,
    pub summary: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: String,
    pub allow_endorsements: bool,
    pub endorsement_statement: Option<String>,
    pub endorsement_form_instructions: Option<String>,
}

impl Campaign {
    /// Whether the endorsement form should be offered for this campaign.
    pub fn accepts_endorsements(&self) -> bool {
        self.active && self.allow_endorsements
    }
}

/// Logical page a content block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    #[default]
    Homepage,
    About,
    Campaigns,
    Contact,
}

impl PageType {
    pub const ALL: [PageType; 4] = [
        PageType::Homepage,
        PageType::About,
        PageType::Campaigns,
        PageType::Contact,
    ];

    /// Wire value used in `?page_type=` filters.
    pub fn as_str(self) -> &'static str {
        match self {
            PageType::Homepage => "homepage",
            PageType::About => "about",
            PageType::Campaigns => "campaigns",
            PageType::Contact => "contact",
        }
    }

    /// Parse the wire value. Unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of content block. Unrecognized kinds decode as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    #[default]
    Text,
    Image,
    TextImage,
    Quote,
    Stats,
    CustomHtml,
    #[serde(other)]
    Unknown,
}

/// An ordered, typed chunk of page content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentBlock {
    pub id: u64,
    pub page_type: PageType,
    pub order: i32,
    pub block_type: BlockType,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub image_alt_text: String,
    pub css_class: String,
    pub background_color: String,
    pub is_visible: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl ContentBlock {
    pub fn is_displayable(&self) -> bool {
        self.is_visible && self.block_type != BlockType::Unknown
    }
}

/// Displayable blocks sorted by `order`, ties keeping API order.
pub fn sorted_blocks(blocks: &[ContentBlock]) -> Vec<&ContentBlock> {
    let mut visible: Vec<_> = blocks.iter().filter(|b| b.is_displayable()).collect();
    visible.sort_by_key(|b| b.order);
    visible
}

/// A person or organization endorsing a campaign.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stakeholder {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub organization: String,
    pub role: Option<String>,
    pub email: String,
    pub state: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Stakeholder {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Short campaign reference nested inside an endorsement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignRef {
    pub id: u64,
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Endorsement {
    pub id: u64,
    pub stakeholder: Stakeholder,
    pub campaign: CampaignRef,
    pub statement: String,
    pub public_display: bool,
    pub created_at: String,
}
