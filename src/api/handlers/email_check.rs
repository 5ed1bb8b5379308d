use super::{form_field, AppState};
use crate::api::error::{ApiError, ErrorBody};
use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
pub struct EmailCheck {
    #[serde(default, deserialize_with = "form_field")]
    email: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmailExists {
    pub email_exists: bool,
}

#[utoipa::path(
    post,
    path= "/verificar-email",
    request_body = EmailCheck,
    responses (
        (status = 200, description = "Whether the email is already registered", body = EmailExists, content_type = "application/json"),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    tag= "users"
)]
// No format check here: the client calls this while the address is still being typed.
#[instrument(skip_all)]
pub async fn verify_email(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<EmailCheck>>,
) -> Result<(StatusCode, Json<EmailExists>), ApiError> {
    let check = payload.map(|Json(payload)| payload).unwrap_or_default();

    let email_exists = state
        .bounded(state.store().email_exists(&check.email))
        .await
        .map_err(|e| {
            error!("Error checking if email exists: {e}");
            e
        })?;

    debug!(email = %check.email, email_exists, "email lookup");

    Ok((StatusCode::OK, Json(EmailExists { email_exists })))
}
