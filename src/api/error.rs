use super::validation::FieldViolation;
use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

pub const EMAIL_IN_USE: &str = "Este e-mail já está em uso.";
pub const INVALID_CREDENTIALS: &str = "Credenciais inválidas.";

#[derive(ToSchema, Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct ValidationErrors {
    pub errors: Vec<FieldViolation>,
}

/// Either 400 shape returned by registration.
#[derive(ToSchema, Serialize, Debug)]
#[serde(untagged)]
pub enum BadRequestBody {
    Validation(ValidationErrors),
    Conflict(ErrorBody),
}

/// Every failure a handler can return. Each maps to exactly one status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{} invalid field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("{}", EMAIL_IN_USE)]
    EmailInUse,

    #[error("{}", INVALID_CREDENTIALS)]
    InvalidCredentials,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { .. } => Self::EmailInUse,
            other => Self::Store(other),
        }
    }
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::EmailInUse => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            Self::Validation(errors) => (
                status,
                Json(BadRequestBody::Validation(ValidationErrors { errors })),
            )
                .into_response(),
            Self::EmailInUse => (
                status,
                Json(BadRequestBody::Conflict(ErrorBody {
                    error: EMAIL_IN_USE.to_string(),
                })),
            )
                .into_response(),
            Self::Store(err) => (status, Json(ErrorBody { error: err.to_string() })).into_response(),
            other => (
                status,
                Json(ErrorBody {
                    error: other.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
