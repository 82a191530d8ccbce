//! Configuration loading and resolution.

use std::time::Duration;

use coalition_content::config::{resolve_api_base_with, RenderContext};

use crate::error::{SiteError, SiteResult};

pub const ADDR_VAR: &str = "SITE_ADDR";
pub const PROTECTION_ENABLED_VAR: &str = "SITE_PASSWORD_PROTECTION_ENABLED";
pub const USERNAME_VAR: &str = "SITE_USERNAME";
pub const PASSWORD_VAR: &str = "SITE_PASSWORD";

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_USERNAME: &str = "admin";

/// Credentials required by the preview gate.
#[derive(Clone, PartialEq, Eq)]
pub struct PreviewAuth {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for PreviewAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub addr: String,
    pub api_base: String,
    pub preview_auth: Option<PreviewAuth>,
    /// Per-request timeout for content API calls.
    pub api_timeout: Option<Duration>,
}

impl SiteConfig {
    /// Load from CLI overrides and the process environment.
    pub fn load(addr: Option<&str>, api_url: Option<&str>) -> SiteResult<Self> {
        Self::load_with(addr, api_url, |key| std::env::var(key).ok())
    }

    pub fn load_with<L>(addr: Option<&str>, api_url: Option<&str>, lookup: L) -> SiteResult<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let addr = addr
            .map(str::to_string)
            .or_else(|| lookup(ADDR_VAR))
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let api_base = resolve_api_base_with(RenderContext::Server, api_url, &lookup);
        let preview_auth = preview_auth_with(&lookup)?;

        Ok(Self {
            addr,
            api_base,
            preview_auth,
            api_timeout: None,
        })
    }

    pub fn with_api_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.api_timeout = timeout;
        self
    }
}

/// Read the preview gate settings.
///
/// Protection is off unless the enable flag is truthy. Turning it on without
/// a password is a configuration error.
pub fn preview_auth_with<L>(lookup: L) -> SiteResult<Option<PreviewAuth>>
where
    L: Fn(&str) -> Option<String>,
{
    let enabled = lookup(PROTECTION_ENABLED_VAR)
        .map(|v| is_truthy(&v))
        .unwrap_or(false);
    if !enabled {
        return Ok(None);
    }

    let username = lookup(USERNAME_VAR)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| {
            tracing::info!("{USERNAME_VAR} not set, using default: {DEFAULT_USERNAME}");
            DEFAULT_USERNAME.to_string()
        });
    let password = lookup(PASSWORD_VAR)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            SiteError::Config(format!(
                "{PROTECTION_ENABLED_VAR} is set but {PASSWORD_VAR} is missing"
            ))
        })?;

    Ok(Some(PreviewAuth { username, password }))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
