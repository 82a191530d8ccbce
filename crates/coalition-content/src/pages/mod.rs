//! Page loaders shared by the server-rendered and client-rendered entry points.
//!
//! A loader fans out every fetch a page needs, settles all of them, and
//! degrades per resource:
//!
//! - site metadata: live value, or the fallback object plus a diagnostic error
//! - collections: live value, or an empty list plus an inline error message
//!
//! No loader except [`PageLoader::load_campaign_detail`] can fail.

pub mod spa;
pub mod ssr;

use serde::Serialize;

use crate::aggregate::{settle, FetchOutcome};
use crate::client::{ContentClient, CAMPAIGNS, CONTENT_BLOCKS, ENDORSEMENTS, HOMEPAGE};
use crate::error::ContentResult;
use crate::fallback::fallback_site_metadata;
use crate::types::{Campaign, ContentBlock, Endorsement, PageType, SiteMetadata};

/// What an entry point shows at a given moment. There is no error state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum RenderState<V> {
    Loading,
    Loaded(V),
}

impl<V> RenderState<V> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RenderState::Loading)
    }

    pub fn loaded(&self) -> Option<&V> {
        match self {
            RenderState::Loading => None,
            RenderState::Loaded(view) => Some(view),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomepageView {
    pub site: SiteMetadata,
    pub campaigns: Vec<Campaign>,
    pub content_blocks: Vec<ContentBlock>,
    /// Diagnostic only; the page renders with fallback metadata.
    pub site_error: Option<String>,
    pub campaigns_error: Option<String>,
    pub content_error: Option<String>,
}

/// About and contact pages: site chrome plus that page's blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentPageView {
    pub page_type: PageType,
    pub site: SiteMetadata,
    pub content_blocks: Vec<ContentBlock>,
    pub site_error: Option<String>,
    pub content_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignsPageView {
    pub site: SiteMetadata,
    pub campaigns: Vec<Campaign>,
    pub content_blocks: Vec<ContentBlock>,
    pub site_error: Option<String>,
    pub campaigns_error: Option<String>,
    pub content_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignDetailView {
    pub site: SiteMetadata,
    pub campaign: Campaign,
    pub endorsements: Vec<Endorsement>,
    pub site_error: Option<String>,
    pub endorsements_error: Option<String>,
}

/// Any page view, for callers that dispatch on a page name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Homepage(HomepageView),
    Content(ContentPageView),
    Campaigns(CampaignsPageView),
}

impl PageView {
    pub fn site(&self) -> &SiteMetadata {
        match self {
            PageView::Homepage(v) => &v.site,
            PageView::Content(v) => &v.site,
            PageView::Campaigns(v) => &v.site,
        }
    }
}

/// Assembles page views from the content API.
#[derive(Clone, Debug)]
pub struct PageLoader {
    client: ContentClient,
}

impl PageLoader {
    pub fn new(client: ContentClient) -> Self {
        Self { client }
    }

    pub async fn load_homepage(&self) -> HomepageView {
        let (site, campaigns, blocks) = futures::join!(
            settle(HOMEPAGE, self.client.homepage()),
            settle(CAMPAIGNS, self.client.campaigns()),
            settle(CONTENT_BLOCKS, self.client.content_blocks(PageType::Homepage)),
        );

        let (site, site_error) = site_or_fallback(site);
        let (campaigns, campaigns_error) = collection_or_empty(CAMPAIGNS, campaigns);
        let (content_blocks, content_error) = collection_or_empty(CONTENT_BLOCKS, blocks);

        HomepageView {
            site,
            campaigns,
            content_blocks,
            site_error,
            campaigns_error,
            content_error,
        }
    }

    pub async fn load_content_page(&self, page_type: PageType) -> ContentPageView {
        let (site, blocks) = futures::join!(
            settle(HOMEPAGE, self.client.homepage()),
            settle(CONTENT_BLOCKS, self.client.content_blocks(page_type)),
        );

        let (site, site_error) = site_or_fallback(site);
        let (content_blocks, content_error) = collection_or_empty(CONTENT_BLOCKS, blocks);

        ContentPageView {
            page_type,
            site,
            content_blocks,
            site_error,
            content_error,
        }
    }

    pub async fn load_campaigns_page(&self) -> CampaignsPageView {
        let (site, campaigns, blocks) = futures::join!(
            settle(HOMEPAGE, self.client.homepage()),
            settle(CAMPAIGNS, self.client.campaigns()),
            settle(CONTENT_BLOCKS, self.client.content_blocks(PageType::Campaigns)),
        );

        let (site, site_error) = site_or_fallback(site);
        let (campaigns, campaigns_error) = collection_or_empty(CAMPAIGNS, campaigns);
        let (content_blocks, content_error) = collection_or_empty(CONTENT_BLOCKS, blocks);

        CampaignsPageView {
            site,
            campaigns,
            content_blocks,
            site_error,
            campaigns_error,
            content_error,
        }
    }

    /// Load a page by type. The campaigns page also lists campaigns.
    pub async fn load_page(&self, page_type: PageType) -> PageView {
        match page_type {
            PageType::Homepage => PageView::Homepage(self.load_homepage().await),
            PageType::Campaigns => PageView::Campaigns(self.load_campaigns_page().await),
            PageType::About | PageType::Contact => {
                PageView::Content(self.load_content_page(page_type).await)
            }
        }
    }

    /// Load one campaign's detail page.
    ///
    /// A missing campaign is a navigational outcome and is returned as
    /// [`crate::ContentError::NotFound`]. Endorsements degrade like any
    /// other collection.
    pub async fn load_campaign_detail(&self, name: &str) -> ContentResult<CampaignDetailView> {
        let (site, campaign) = futures::join!(
            settle(HOMEPAGE, self.client.homepage()),
            self.client.campaign_by_name(name),
        );
        let campaign = campaign?;

        let endorsements = settle(ENDORSEMENTS, self.client.endorsements(campaign.id)).await;

        let (site, site_error) = site_or_fallback(site);
        let (endorsements, endorsements_error) = collection_or_empty(ENDORSEMENTS, endorsements);

        Ok(CampaignDetailView {
            site,
            campaign,
            endorsements,
            site_error,
            endorsements_error,
        })
    }
}

fn site_or_fallback(outcome: FetchOutcome<SiteMetadata>) -> (SiteMetadata, Option<String>) {
    let (site, error) = outcome.unwrap_or_else_with_error(fallback_site_metadata);
    if let Some(error) = &error {
        tracing::warn!(%error, "homepage unavailable, rendering fallback site metadata");
    }
    (site, error)
}

fn collection_or_empty<T>(
    resource: &str,
    outcome: FetchOutcome<Vec<T>>,
) -> (Vec<T>, Option<String>) {
    let (items, error) = outcome.or_default_with_error();
    if let Some(error) = &error {
        tracing::warn!(resource, %error, "rendering empty collection");
    }
    (items, error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_state_serialization() {
        let loading: RenderState<u8> = RenderState::Loading;
        assert_eq!(
            serde_json::to_value(&loading).unwrap(),
            serde_json::json!({ "state": "loading" })
        );
        assert_eq!(
            serde_json::to_value(RenderState::Loaded(3)).unwrap(),
            serde_json::json!({ "state": "loaded", "data": 3 })
        );
    }

    #[test]
    fn test_collection_or_empty_keeps_message() {
        let outcome = FetchOutcome::Err("Failed to fetch campaigns: HTTP 500".into());
        let (items, error) = collection_or_empty::<Campaign>(CAMPAIGNS, outcome);
        assert!(items.is_empty());
        assert_eq!(error.as_deref(), Some("Failed to fetch campaigns: HTTP 500"));
    }

    #[test]
    fn test_site_or_fallback_uses_live_value() {
        let live = SiteMetadata {
            organization_name: "Live Org".into(),
            ..Default::default()
        };
        let (site, error) = site_or_fallback(FetchOutcome::Ok(live.clone()));
        assert_eq!(site, live);
        assert!(error.is_none());
    }
}
