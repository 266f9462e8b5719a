//! Form schema endpoint
//!
//! Publishes the field descriptors so the browser wizard gates its steps with
//! the same rules the submission handlers enforce.

use axum::{extract::Path, Json};
use mnu_common::schema::{FieldSpec, FormKind};
use serde::Serialize;

use crate::{ApiError, ApiResult};

#[derive(Debug, Serialize)]
pub struct FormSchemaResponse {
    pub form: FormKind,
    pub fields: &'static [FieldSpec],
}

/// GET /api/schema/:form
pub async fn get_form_schema(Path(form): Path<String>) -> ApiResult<Json<FormSchemaResponse>> {
    let kind: FormKind = form
        .parse()
        .map_err(|_| ApiError::NotFound("Unknown form".to_string()))?;

    Ok(Json(FormSchemaResponse {
        form: kind,
        fields: kind.fields(),
    }))
}
