//! API base URL resolution.

pub const SERVER_API_URL_VAR: &str = "API_URL";
pub const CLIENT_API_URL_VAR: &str = "PUBLIC_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Where the caller is running, which decides the preferred variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderContext {
    /// Server-side rendering: prefers `API_URL`.
    Server,
    /// Client-side rendering: prefers `PUBLIC_API_URL`.
    Client,
}

impl RenderContext {
    fn variables(self) -> [&'static str; 2] {
        match self {
            RenderContext::Server => [SERVER_API_URL_VAR, CLIENT_API_URL_VAR],
            RenderContext::Client => [CLIENT_API_URL_VAR, SERVER_API_URL_VAR],
        }
    }
}

/// Resolve the API base URL from the process environment.
pub fn resolve_api_base(context: RenderContext, explicit: Option<&str>) -> String {
    resolve_api_base_with(context, explicit, |key| std::env::var(key).ok())
}

/// Resolve the API base URL: explicit value, then the context's preferred
/// variable, then the other context's variable, then localhost.
pub fn resolve_api_base_with<L>(context: RenderContext, explicit: Option<&str>, lookup: L) -> String
where
    L: Fn(&str) -> Option<String>,
{
    let candidate = explicit
        .map(str::to_string)
        .into_iter()
        .chain(context.variables().into_iter().filter_map(|key| lookup(key)))
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .find(|v| !v.is_empty());

    match candidate {
        Some(url) => url,
        None => {
            tracing::info!("No API URL configured, using default: {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        }
    }
}
