//! Coalition Builder content layer: typed API client, settle-all aggregation,
//! fallback site metadata, and the page loaders shared by SSR and SPA rendering.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod fetcher;
pub mod pages;
pub mod types;

pub use aggregate::{settle, settle_all, FetchOutcome, NamedFetch, Settled};
pub use client::ContentClient;
pub use config::{resolve_api_base, RenderContext};
pub use error::{ContentError, ContentResult};
pub use fallback::{fallback_site_metadata, fallback_site_metadata_with};
pub use fetcher::{CacheDirective, RequestOptions, ResourceFetcher};
pub use pages::{
    CampaignDetailView, CampaignsPageView, ContentPageView, HomepageView, PageLoader, PageView,
    RenderState,
};
pub use types::*;
