//! Single-shot JSON GET against the content API.
//!
//! One request, one status check, one decode. No retries, no caching.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::error::{ContentError, ContentResult};

/// Cache directive forwarded as a `Cache-Control` request header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheDirective {
    /// Send no `Cache-Control` header.
    #[default]
    Default,
    /// Always go to the origin (`no-store`).
    NoStore,
    /// Accept a cached copy up to this many seconds old.
    Revalidate(u64),
}

impl CacheDirective {
    fn header_value(self) -> Option<String> {
        match self {
            CacheDirective::Default => None,
            CacheDirective::NoStore => Some("no-store".to_string()),
            CacheDirective::Revalidate(secs) => Some(format!("max-age={secs}")),
        }
    }
}

/// Per-request options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub cache: CacheDirective,
    /// Extra request headers as `(name, value)` pairs.
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn no_store() -> Self {
        Self {
            cache: CacheDirective::NoStore,
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn header_map(&self, resource: &str) -> ContentResult<HeaderMap> {
        let mut map = HeaderMap::new();
        map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(value) = self.cache.header_value() {
            let value = HeaderValue::from_str(&value)
                .map_err(|e| ContentError::Client(format!("{resource}: {e}")))?;
            map.insert(CACHE_CONTROL, value);
        }

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ContentError::Client(format!("{resource}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ContentError::Client(format!("{resource}: {e}")))?;
            map.insert(name, value);
        }

        Ok(map)
    }
}

/// Fetches typed JSON resources from one API base URL.
#[derive(Clone, Debug)]
pub struct ResourceFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl ResourceFetcher {
    /// Create a fetcher for the given base URL (trailing slashes are trimmed).
    pub fn new(base_url: &str) -> ContentResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("coalition-content/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ContentError::Client(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a fetcher that reuses an existing reqwest client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a server-relative path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `{base}{path}` and decode the body as `T`.
    ///
    /// `resource` is the human name used in error messages.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &str,
        path: &str,
        options: &RequestOptions,
    ) -> ContentResult<T> {
        if !path.starts_with('/') {
            return Err(ContentError::InvalidPath {
                resource: resource.to_string(),
                path: path.to_string(),
            });
        }

        let url = self.url_for(path);
        tracing::debug!(resource, %url, "fetching");

        let mut request = self.client.get(&url).headers(options.header_map(resource)?);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| ContentError::Network {
            resource: resource.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Http {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| ContentError::Network {
            resource: resource.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|e| ContentError::Parse {
            resource: resource.to_string(),
            message: e.to_string(),
        })
    }
}
