use super::{form_field, AppState, Message};
use crate::api::error::{ApiError, ErrorBody};
use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

pub const LOGIN_OK: &str = "Usuário autenticado com sucesso.";

#[derive(ToSchema, Serialize, Deserialize, Default)]
pub struct UserLogin {
    #[serde(default, deserialize_with = "form_field")]
    email: String,
    #[serde(default, deserialize_with = "form_field")]
    senha: String,
}

impl fmt::Debug for UserLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserLogin")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[utoipa::path(
    post,
    path= "/login",
    request_body = UserLogin,
    responses (
        (status = 200, description = "Login successful", body = Message, content_type = "application/json"),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    tag= "users"
)]
#[instrument(skip_all)]
pub async fn login(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<UserLogin>>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let user = payload.map(|Json(payload)| payload).unwrap_or_default();

    debug!("user: {:?}", user);

    match state
        .bounded(state.store().find_by_credentials(&user.email, &user.senha))
        .await
    {
        Ok(Some(found)) => {
            debug!(id = %found.id, "Login successful");
            Ok((StatusCode::OK, Json(Message::new(LOGIN_OK))))
        }
        // same answer for unknown email and wrong password
        Ok(None) => {
            debug!("Unauthorized");
            Err(ApiError::InvalidCredentials)
        }
        Err(e) => {
            error!("Error looking up credentials: {e}");
            Err(e.into())
        }
    }
}
