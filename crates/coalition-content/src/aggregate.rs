//! Settle-all aggregation of independent resource fetches.
//!
//! Every requested resource yields exactly one [`FetchOutcome`]. A failing or
//! panicking fetch never cancels or contaminates the others.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Result of one aggregated fetch.
///
/// Serializes as `{"ok": true, "value": ..}` or `{"ok": false, "error": ".."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Ok(T),
    Err(String),
}

impl<T: Serialize> Serialize for FetchOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FetchOutcome", 2)?;
        match self {
            FetchOutcome::Ok(value) => {
                state.serialize_field("ok", &true)?;
                state.serialize_field("value", value)?;
            }
            FetchOutcome::Err(error) => {
                state.serialize_field("ok", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

impl<T> FetchOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, FetchOutcome::Ok(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchOutcome::Ok(_) => None,
            FetchOutcome::Err(e) => Some(e),
        }
    }

    /// Split into the value (or `fallback()`) plus the error message, if any.
    pub fn unwrap_or_else_with_error(self, fallback: impl FnOnce() -> T) -> (T, Option<String>) {
        match self {
            FetchOutcome::Ok(v) => (v, None),
            FetchOutcome::Err(e) => (fallback(), Some(e)),
        }
    }
}

impl<T: Default> FetchOutcome<T> {
    /// Value or `T::default()`, plus the error message, if any.
    pub fn or_default_with_error(self) -> (T, Option<String>) {
        self.unwrap_or_else_with_error(T::default)
    }
}

impl<T, E: Display> From<Result<T, E>> for FetchOutcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => FetchOutcome::Ok(v),
            Err(e) => FetchOutcome::Err(e.to_string()),
        }
    }
}

/// A named fetch operation waiting to be settled.
pub struct NamedFetch<'a, T, E> {
    pub resource: String,
    pub future: BoxFuture<'a, Result<T, E>>,
}

impl<'a, T, E> NamedFetch<'a, T, E> {
    pub fn new<F>(resource: impl Into<String>, future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'a,
    {
        Self {
            resource: resource.into(),
            future: future.boxed(),
        }
    }
}

/// Outcomes keyed by resource name.
pub type Settled<T> = BTreeMap<String, FetchOutcome<T>>;

/// Await one fetch and capture its result, error, or panic as an outcome.
pub async fn settle<T, E, F>(resource: &str, future: F) -> FetchOutcome<T>
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => {
            let outcome = FetchOutcome::from(result);
            if let FetchOutcome::Err(e) = &outcome {
                tracing::debug!(resource, error = %e, "fetch failed");
            }
            outcome
        }
        Err(payload) => {
            let message = format!("Failed to fetch {resource}: {}", panic_message(&*payload));
            tracing::error!(resource, error = %message, "fetch panicked");
            FetchOutcome::Err(message)
        }
    }
}

/// Issue every operation concurrently and wait for all of them to settle.
pub async fn settle_all<T, E: Display>(ops: Vec<NamedFetch<'_, T, E>>) -> Settled<T> {
    let pending = ops.into_iter().map(|op| async move {
        let outcome = settle(&op.resource, op.future).await;
        (op.resource, outcome)
    });

    join_all(pending).await.into_iter().collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error".to_string()
    }
}
