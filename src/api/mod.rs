//! HTTP surface: routes, middleware and the server loop.

use crate::api::handlers::{
    email_check, email_check::__path_verify_email, health, health::__path_health, user_login,
    user_login::__path_login, user_register, user_register::__path_register, AppState,
};
use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{
        header::{ACCEPT, ACCESS_CONTROL_ALLOW_HEADERS, CONTENT_TYPE, ORIGIN},
        HeaderName, HeaderValue, Method, Request,
    },
    routing::{get, post},
    Extension, Router,
};
use std::{future::Future, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::{SetRequestHeaderLayer, SetResponseHeaderLayer},
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error;
pub mod handlers;
pub mod validation;

const X_REQUEST_ID: &str = "x-request-id";
const X_REQUESTED_WITH: &str = "x-requested-with";
const ALLOWED_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

#[derive(OpenApi)]
#[openapi(
    paths(health, verify_email, register, login),
    components(schemas(
        health::Health,
        email_check::EmailCheck,
        email_check::EmailExists,
        user_register::UserRegister,
        user_login::UserLogin,
        handlers::Message,
        error::ErrorBody,
        error::ValidationErrors,
        error::BadRequestBody,
        validation::FieldViolation,
    )),
    tags(
        (name = "users", description = "User registration and login"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Build the application router around `state`.
///
/// `/health` and the API docs sit outside the CORS and request-id layers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/verificar-email", post(handlers::verify_email))
        .route("/cadastro", post(handlers::register))
        .route("/login", post(handlers::login))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static(X_REQUEST_ID),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    X_REQUEST_ID,
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors())
                .layer(SetResponseHeaderLayer::if_not_present(
                    ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static(ALLOWED_HEADERS),
                ))
                .layer(Extension(state.clone())),
        )
        .route("/health", get(handlers::health).options(handlers::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi()))
        .layer(Extension(state))
}

/// Any origin, fixed header allow-list, no credentials.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_headers([
            ORIGIN,
            HeaderName::from_static(X_REQUESTED_WITH),
            CONTENT_TYPE,
            ACCEPT,
        ])
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
}

/// Serve `state` on `[::]:port` until `shutdown` resolves.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve<F>(port: u16, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
