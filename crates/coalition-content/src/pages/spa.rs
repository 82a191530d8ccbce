//! Client-rendered entry point.
//!
//! A [`PageController`] starts in [`RenderState::Loading`] and publishes
//! [`RenderState::Loaded`] once its load settles. Subscribers observe the
//! transition through a `watch` channel.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::ContentClient;
use crate::error::ContentResult;
use crate::fetcher::RequestOptions;
use crate::types::PageType;

use super::{HomepageView, PageLoader, PageView, RenderState};

/// Holds the render state of one mounted page.
pub struct PageController<V> {
    state: Arc<watch::Sender<RenderState<V>>>,
}

impl<V> Default for PageController<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PageController<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(RenderState::Loading);
        Self {
            state: Arc::new(tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RenderState<V>> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> RenderState<V> {
        self.state.borrow().clone()
    }

    /// Run `load` in the background and publish its view when it settles.
    pub fn start<F>(&self, load: F) -> JoinHandle<()>
    where
        F: Future<Output = V> + Send + 'static,
    {
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let view = load.await;
            state.send_replace(RenderState::Loaded(view));
            tracing::debug!("page loaded");
        })
    }

    /// Wait until the page has loaded and return its view.
    pub async fn wait_loaded(&self) -> Option<V> {
        let mut rx = self.state.subscribe();
        let state = rx.wait_for(|s| !s.is_loading()).await.ok()?;
        state.loaded().cloned()
    }
}

/// Request options for client loads: always go to the origin.
pub fn client_options(timeout: Option<Duration>) -> RequestOptions {
    match timeout {
        Some(timeout) => RequestOptions::no_store().with_timeout(timeout),
        None => RequestOptions::no_store(),
    }
}

/// Loader for client-side loads against `api_base`.
pub fn client_loader(api_base: &str, timeout: Option<Duration>) -> ContentResult<PageLoader> {
    let client = ContentClient::new(api_base)?.with_options(client_options(timeout));
    Ok(PageLoader::new(client))
}

/// Mount the homepage: returns immediately in the loading state.
pub fn mount_homepage(loader: PageLoader) -> PageController<HomepageView> {
    let controller = PageController::new();
    controller.start(async move { loader.load_homepage().await });
    controller
}

/// Mount any page by type.
pub fn mount_page(loader: PageLoader, page_type: PageType) -> PageController<PageView> {
    let controller = PageController::new();
    controller.start(async move { loader.load_page(page_type).await });
    controller
}
