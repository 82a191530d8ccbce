//! Preview gate: HTTP Basic auth for non-production deployments.
//! `/health` is routed outside this layer.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::PreviewAuth;

pub const REALM: &str = "Coalition Builder";

impl PreviewAuth {
    /// Check a username/password pair without short-circuiting on the first
    /// differing byte.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = constant_time_eq(self.username.as_bytes(), username.as_bytes());
        let pass_ok = constant_time_eq(self.password.as_bytes(), password.as_bytes());
        user_ok & pass_ok
    }
}

/// Decode an `Authorization: Basic ...` header value into `(user, password)`.
pub fn decode_basic(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (user, password) = text.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

/// Auth middleware: rejects requests without matching Basic credentials.
pub async fn preview_gate(
    State(auth): State<Arc<PreviewAuth>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(decode_basic)
        .is_some_and(|(user, password)| auth.matches(&user, &password));

    if !authorized {
        tracing::debug!(path = %request.uri().path(), "preview gate rejected request");
        return (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, format!("Basic realm=\"{REALM}\""))],
            "Authentication required",
        )
            .into_response();
    }

    next.run(request).await
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
