//! mnu-web library - Mkhonto National Union website service
//!
//! Serves the landing page and the two form submission endpoints:
//! validate → persist (affiliations only) → notify → respond.

use axum::Router;
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod notify;
pub mod storage;

pub use crate::error::{ApiError, ApiResult};

use notify::Notifier;
use storage::Storage;

/// Application state shared across HTTP handlers
///
/// Built once at startup and cloned into each handler; tests build their own
/// with a fresh store and a stub notifier.
#[derive(Clone)]
pub struct AppState {
    /// Affiliation and user records
    pub storage: Arc<dyn Storage>,
    /// Delivery strategy selected at startup
    pub notifier: Arc<dyn Notifier>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            storage,
            notifier,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        // Landing page and wizard script
        .merge(api::ui_routes())
        // Form submission and schema routes
        .merge(api::form_routes())
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listening socket
///
/// Returns the address actually bound, which differs from `address` when
/// port 0 was requested.
pub async fn bind(address: &str) -> std::io::Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind(address).await?;
    let bound = listener.local_addr()?;
    Ok((listener, bound))
}
