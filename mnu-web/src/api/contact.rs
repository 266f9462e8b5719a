//! Contact form submission
//!
//! POST /api/contact: validate, then forward by email. Nothing is stored, so
//! a delivery failure fails the request.

use axum::{body::Bytes, extract::State, Json};
use mnu_common::schema::validate_contact;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::parse_body;
use crate::notify::templates;
use crate::{ApiResult, AppState};

pub const SENT_MESSAGE: &str = "Message sent successfully";

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: &'static str,
}

/// POST /api/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ContactResponse>> {
    let form = parse_body(&body)
        .and_then(|raw| validate_contact(&raw))
        .map_err(|errors| {
            debug!(%errors, "Contact message rejected");
            errors
        })?;

    let message = templates::contact_notification(&form);
    state.notifier.send(&message).await.map_err(|e| {
        warn!(notifier = state.notifier.name(), "Failed to send contact message: {}", e);
        e
    })?;

    info!("Contact message forwarded");
    Ok(Json(ContactResponse {
        message: SENT_MESSAGE,
    }))
}
