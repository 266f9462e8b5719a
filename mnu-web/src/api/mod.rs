//! HTTP API handlers for mnu-web

pub mod affiliations;
pub mod buildinfo;
pub mod contact;
pub mod health;
pub mod schema;
pub mod ui;

pub use affiliations::submit_affiliation;
pub use buildinfo::get_build_info;
pub use contact::submit_contact;
pub use health::health_routes;
pub use schema::get_form_schema;
pub use ui::ui_routes;

use axum::{
    routing::{get, post},
    Router,
};
use mnu_common::schema::{ErrorCode, FieldError};
use mnu_common::FieldErrors;
use serde_json::Value;

use crate::AppState;

/// Form submission and schema routes
pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/api/affiliations", post(submit_affiliation))
        .route("/api/contact", post(submit_contact))
        .route("/api/schema/:form", get(get_form_schema))
}

/// Decode a request body as JSON
///
/// Malformed JSON is reported like any other validation failure, against the
/// pseudo-field `body`, instead of as a framework rejection.
pub(crate) fn parse_body(body: &[u8]) -> Result<Value, FieldErrors> {
    serde_json::from_slice(body).map_err(|e| {
        FieldErrors::single(FieldError::new(
            "body",
            ErrorCode::InvalidType,
            format!("Malformed JSON: {}", e),
        ))
    })
}
