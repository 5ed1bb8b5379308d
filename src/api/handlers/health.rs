use super::AppState;
use crate::GIT_COMMIT_HASH;
use axum::{
    extract::Extension,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};
use utoipa::ToSchema;

const X_APP: &str = "x-app";

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    database: String,
}

impl Health {
    fn new(store_ok: bool) -> Self {
        Self {
            commit: GIT_COMMIT_HASH.to_string(),
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: if store_ok { "ok" } else { "error" }.to_string(),
        }
    }

    /// `name:version:short-hash`, sent as `X-App`.
    fn app_header(&self) -> HeaderMap {
        let short_hash = self.commit.get(0..7).unwrap_or(&self.commit);
        let mut headers = HeaderMap::new();

        match HeaderValue::from_str(&format!("{}:{}:{short_hash}", self.name, self.version)) {
            Ok(value) => {
                headers.insert(X_APP, value);
            }
            Err(err) => error!("Failed to build X-App header: {err}"),
        }

        headers
    }
}

#[utoipa::path(
    get,
    path= "/health",
    responses (
        (status = 200, description = "Store is reachable", body = Health),
        (status = 503, description = "Store is unreachable", body = Health)
    ),
    tag= "health"
)]
// GET returns the report, OPTIONS only the status and X-App header
pub async fn health(method: Method, state: Extension<Arc<AppState>>) -> Response {
    let store_ok = match state.bounded(state.store().ping()).await {
        Ok(()) => true,
        Err(err) => {
            error!("Failed to ping store: {err}");
            false
        }
    };

    let status = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    debug!(%status, "health probe");

    let report = Health::new(store_ok);
    let headers = report.app_header();

    if method == Method::GET {
        (status, headers, Json(report)).into_response()
    } else {
        (status, headers).into_response()
    }
}
