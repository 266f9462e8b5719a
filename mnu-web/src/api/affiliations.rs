//! Affiliation submission
//!
//! POST /api/affiliations: validate, store, notify. A notification failure
//! never undoes the stored record; it only changes the response message.

use axum::{body::Bytes, extract::State, Json};
use mnu_common::schema::validate_affiliation;
use mnu_common::{AffiliationRecord, NewAffiliation};
use serde::Serialize;
use tracing::{debug, error, info};

use super::parse_body;
use crate::notify::templates;
use crate::{ApiResult, AppState};

pub const SUBMITTED_MESSAGE: &str = "Affiliation submitted successfully";
pub const NOT_NOTIFIED_MESSAGE: &str =
    "Affiliation stored successfully but email notification failed";

/// Response body for a stored affiliation
#[derive(Debug, Serialize)]
pub struct AffiliationResponse {
    pub message: &'static str,
    pub affiliation: AffiliationRecord,
    /// Notification diagnostic, present only when delivery failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/affiliations
pub async fn submit_affiliation(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<AffiliationResponse>> {
    let form = parse_body(&body)
        .and_then(|raw| validate_affiliation(&raw))
        .map_err(|errors| {
            debug!(%errors, "Affiliation rejected");
            errors
        })?;

    // Defaults for blank optional fields are applied here, once
    let record = state
        .storage
        .create_affiliation(NewAffiliation::from(form))
        .await?;
    info!(id = record.id, "Affiliation stored");

    let message = templates::affiliation_notification(&record);
    match state.notifier.send(&message).await {
        Ok(()) => Ok(Json(AffiliationResponse {
            message: SUBMITTED_MESSAGE,
            affiliation: record,
            error: None,
        })),
        Err(e) => {
            error!(
                id = record.id,
                notifier = state.notifier.name(),
                "Failed to send affiliation notification: {}",
                e
            );
            Ok(Json(AffiliationResponse {
                message: NOT_NOTIFIED_MESSAGE,
                affiliation: record,
                error: Some(e.to_string()),
            }))
        }
    }
}
