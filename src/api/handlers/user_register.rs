use super::{form_field, AppState, Message};
use crate::{
    api::{
        error::{ApiError, BadRequestBody, ErrorBody},
        validation::validate,
    },
    store::{NewUser, StoreError},
};
use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

pub const USER_CREATED: &str = "Usuário cadastrado com sucesso.";

#[derive(ToSchema, Serialize, Deserialize, Default)]
pub struct UserRegister {
    #[serde(default, deserialize_with = "form_field")]
    nome: String,
    #[serde(default, deserialize_with = "form_field")]
    email: String,
    #[serde(default, deserialize_with = "form_field")]
    senha: String,
}

impl fmt::Debug for UserRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRegister")
            .field("nome", &self.nome)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[utoipa::path(
    post,
    path= "/cadastro",
    request_body = UserRegister,
    responses (
        (status = 201, description = "Registration successful", body = Message, content_type = "application/json"),
        (status = 400, description = "`{errors}` for invalid fields, `{error}` when the email is already in use", body = BadRequestBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    tag= "users"
)]
#[instrument(skip_all)]
pub async fn register(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<UserRegister>>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    // a missing or non-JSON body is validated as an empty form
    let user = payload.map(|Json(payload)| payload).unwrap_or_default();

    debug!("user: {:?}", user);

    let violations = validate(&user.nome, &user.email, &user.senha);
    if !violations.is_empty() {
        debug!(count = violations.len(), "registration rejected by validation");
        return Err(ApiError::Validation(violations));
    }

    // check if user exists
    match state.bounded(state.store().email_exists(&user.email)).await {
        Ok(true) => {
            debug!("email already in use");
            return Err(ApiError::EmailInUse);
        }
        Ok(false) => (),
        Err(e) => {
            error!("Error checking if user exists: {e}");
            return Err(e.into());
        }
    }

    let new_user = NewUser {
        name: user.nome,
        email: user.email,
        password: user.senha,
    };

    // the unique index still catches a concurrent registration that passed the check above
    match state.bounded(state.store().insert(new_user)).await {
        Ok(created) => {
            info!(id = %created.id, "user registered");
            Ok((StatusCode::CREATED, Json(Message::new(USER_CREATED))))
        }
        Err(e @ StoreError::Duplicate { .. }) => {
            debug!("email taken by a concurrent registration");
            Err(e.into())
        }
        Err(e) => {
            error!("Error inserting user: {e}");
            Err(e.into())
        }
    }
}
