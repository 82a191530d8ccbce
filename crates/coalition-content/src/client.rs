//! Typed access to the content API endpoints.

use url::form_urlencoded;

use crate::error::{ContentError, ContentResult};
use crate::fetcher::{RequestOptions, ResourceFetcher};
use crate::types::{Campaign, ContentBlock, Endorsement, PageType, SiteMetadata};

pub const HOMEPAGE: &str = "homepage";
pub const CAMPAIGNS: &str = "campaigns";
pub const CAMPAIGN: &str = "campaign";
pub const CONTENT_BLOCKS: &str = "content blocks";
pub const ENDORSEMENTS: &str = "endorsements";

/// Client for the Coalition Builder content API.
#[derive(Clone, Debug)]
pub struct ContentClient {
    fetcher: ResourceFetcher,
    options: RequestOptions,
}

impl ContentClient {
    pub fn new(base_url: &str) -> ContentResult<Self> {
        Ok(Self::from_fetcher(ResourceFetcher::new(base_url)?))
    }

    pub fn from_fetcher(fetcher: ResourceFetcher) -> Self {
        Self {
            fetcher,
            options: RequestOptions::default(),
        }
    }

    /// Use these options for every request made by this client.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn homepage(&self) -> ContentResult<SiteMetadata> {
        self.fetcher
            .fetch(HOMEPAGE, "/api/homepage/", &self.options)
            .await
    }

    pub async fn campaigns(&self) -> ContentResult<Vec<Campaign>> {
        self.fetcher
            .fetch(CAMPAIGNS, "/api/campaigns/", &self.options)
            .await
    }

    /// Look a campaign up by its unique name.
    ///
    /// The list endpoint answers 200 with an empty array when nothing
    /// matches. That case, and a list with no element carrying exactly this
    /// name, becomes [`ContentError::NotFound`].
    pub async fn campaign_by_name(&self, name: &str) -> ContentResult<Campaign> {
        let matches: Vec<Campaign> = self
            .fetcher
            .fetch(CAMPAIGN, &campaign_by_name_path(name), &self.options)
            .await?;

        pick_campaign(matches, name).ok_or_else(|| ContentError::NotFound {
            resource: CAMPAIGN.to_string(),
            name: name.to_string(),
        })
    }

    pub async fn content_blocks(&self, page_type: PageType) -> ContentResult<Vec<ContentBlock>> {
        self.fetcher
            .fetch(
                CONTENT_BLOCKS,
                &with_query("/api/content-blocks/", "page_type", page_type.as_str()),
                &self.options,
            )
            .await
    }

    pub async fn endorsements(&self, campaign_id: u64) -> ContentResult<Vec<Endorsement>> {
        self.fetcher
            .fetch(
                ENDORSEMENTS,
                &with_query("/api/endorsements/", "campaign", &campaign_id.to_string()),
                &self.options,
            )
            .await
    }
}

/// Query-filtered lookup path. Spaces encode as `+`.
pub fn campaign_by_name_path(name: &str) -> String {
    with_query("/api/campaigns/", "name", name)
}

/// Site path of a campaign's detail page. Spaces encode as `%20`.
pub fn campaign_page_path(name: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(name.as_bytes()).collect();
    format!("/campaigns/{}", encoded.replace('+', "%20"))
}

fn with_query(path: &str, key: &str, value: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    format!("{path}?{query}")
}

/// Only an exact name match counts; the API filter may be looser than equality.
fn pick_campaign(matches: Vec<Campaign>, name: &str) -> Option<Campaign> {
    matches.into_iter().find(|c| c.name == name)
}
