//! Coalition Builder site: server-rendered pages over the content layer,
//! with an optional basic-auth gate for preview deployments.

pub mod auth;
pub mod config;
pub mod error;
pub mod render;
pub mod server;

pub use config::{PreviewAuth, SiteConfig};
pub use error::{SiteError, SiteResult};
pub use server::{router, AppState, SiteServer};
