//! HTTP server: server-rendered pages, page JSON, and /health.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, Json};
use axum::routing::get;
use axum::{middleware, Router};
use coalition_content::pages::ssr;
use coalition_content::{PageLoader, PageType, PageView, RenderState};
use tower_http::cors::{Any, CorsLayer};

use crate::auth::preview_gate;
use crate::config::{PreviewAuth, SiteConfig};
use crate::error::{SiteError, SiteResult};
use crate::render;

/// Shared server state passed to all handlers via axum State.
pub struct AppState {
    pub loader: PageLoader,
}

impl AppState {
    pub fn new(loader: PageLoader) -> Self {
        Self { loader }
    }
}

/// Build the router. Every route except `/health` sits behind the preview
/// gate when `preview_auth` is set.
pub fn router(state: Arc<AppState>, preview_auth: Option<PreviewAuth>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut pages = Router::new()
        .route("/", get(homepage))
        .route("/about", get(about))
        .route("/contact", get(contact))
        .route("/campaigns", get(campaigns))
        .route("/campaigns/:name", get(campaign_detail))
        .route("/api/pages/:page", get(page_json));

    if let Some(auth) = preview_auth {
        pages = pages.layer(middleware::from_fn_with_state(Arc::new(auth), preview_gate));
    }

    pages
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// Site server bound to one address.
pub struct SiteServer {
    config: SiteConfig,
    state: Arc<AppState>,
}

impl SiteServer {
    pub fn new(config: SiteConfig) -> SiteResult<Self> {
        let loader = ssr::server_loader(&config.api_base, config.api_timeout)?;
        let state = Arc::new(AppState::new(loader));
        Ok(Self { config, state })
    }

    pub async fn run(&self) -> SiteResult<()> {
        let app = router(self.state.clone(), self.config.preview_auth.clone());
        let listener = tokio::net::TcpListener::bind(&self.config.addr).await?;

        tracing::info!("Site listening on http://{}", self.config.addr);
        tracing::info!("Content API: {}", self.config.api_base);
        if self.config.preview_auth.is_some() {
            tracing::info!("Preview gate: basic auth required");
        }

        axum::serve(listener, app).await?;
        Ok(())
    }
}

// ── Handlers ────────────────────────────────────────────────────

async fn homepage(State(state): State<Arc<AppState>>) -> Html<String> {
    render_page(&state, PageType::Homepage).await
}

async fn about(State(state): State<Arc<AppState>>) -> Html<String> {
    render_page(&state, PageType::About).await
}

async fn contact(State(state): State<Arc<AppState>>) -> Html<String> {
    render_page(&state, PageType::Contact).await
}

async fn campaigns(State(state): State<Arc<AppState>>) -> Html<String> {
    render_page(&state, PageType::Campaigns).await
}

async fn render_page(state: &AppState, page_type: PageType) -> Html<String> {
    tracing::debug!(page = %page_type, "rendering page");
    let rendered = ssr::render_page(&state.loader, page_type).await;
    Html(render::page(&rendered))
}

async fn campaign_detail(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> SiteResult<Html<String>> {
    tracing::debug!(campaign = %name, "rendering campaign");
    let view = state.loader.load_campaign_detail(&name).await?;
    Ok(Html(render::campaign_detail(&view)))
}

/// Page view as JSON for client-rendered consumers.
async fn page_json(
    State(state): State<Arc<AppState>>,
    Path(page): Path<String>,
) -> SiteResult<Json<RenderState<PageView>>> {
    let page_type = PageType::parse(&page).ok_or_else(|| SiteError::PageNotFound(page.clone()))?;
    Ok(Json(ssr::render_page(&state.loader, page_type).await))
}

/// Health check endpoint, outside the preview gate.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
