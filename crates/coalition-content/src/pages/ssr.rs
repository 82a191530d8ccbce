//! Server-rendered entry point.
//!
//! Every fetch completes before the response is produced, so the only
//! state ever returned is [`RenderState::Loaded`].

use std::time::Duration;

use crate::client::ContentClient;
use crate::error::ContentResult;
use crate::fetcher::{CacheDirective, RequestOptions};
use crate::types::PageType;

use super::{CampaignDetailView, PageLoader, PageView, RenderState};

/// Seconds a server render may reuse a cached API response.
pub const SERVER_REVALIDATE_SECS: u64 = 60;

/// Request options for server renders: revalidating cache, optional timeout.
pub fn server_options(timeout: Option<Duration>) -> RequestOptions {
    let options = RequestOptions {
        cache: CacheDirective::Revalidate(SERVER_REVALIDATE_SECS),
        ..Default::default()
    };
    match timeout {
        Some(timeout) => options.with_timeout(timeout),
        None => options,
    }
}

/// Loader for server renders against `api_base`.
pub fn server_loader(api_base: &str, timeout: Option<Duration>) -> ContentResult<PageLoader> {
    let client = ContentClient::new(api_base)?.with_options(server_options(timeout));
    Ok(PageLoader::new(client))
}

pub async fn render_page(loader: &PageLoader, page_type: PageType) -> RenderState<PageView> {
    RenderState::Loaded(loader.load_page(page_type).await)
}

/// Fails only when the campaign does not exist or its lookup failed.
pub async fn render_campaign_detail(
    loader: &PageLoader,
    name: &str,
) -> ContentResult<RenderState<CampaignDetailView>> {
    Ok(RenderState::Loaded(loader.load_campaign_detail(name).await?))
}
