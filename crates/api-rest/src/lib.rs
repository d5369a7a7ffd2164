//! # API REST
//!
//! REST API for the ODS gateway.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (API-key auth, CORS, security headers, request ids)
//!
//! Uses `api-shared` for response types and `ods-core` for the query handlers.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;
pub mod mapping;
pub mod middleware;

use api_shared::{
    AddressRes, ApiKeys, ErrorRes, HealthRes, OperationalPeriodRes, OrganisationMetadataRes,
    OrganisationRes, OrganisationRoleRes, OrganisationSearchRes,
};
use axum::http::{header, HeaderName, HeaderValue};
use axum::routing::get;
use axum::Router;
use ods_core::OdsGatewayApp;
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Shared state for every request handler.
#[derive(Clone)]
pub struct AppState {
    pub app: Arc<OdsGatewayApp>,
    pub api_keys: Arc<ApiKeys>,
}

impl AppState {
    pub fn new(app: OdsGatewayApp, api_keys: ApiKeys) -> Self {
        Self {
            app: Arc::new(app),
            api_keys: Arc::new(api_keys),
        }
    }
}

/// Transport-level limits and policies applied to every route.
#[derive(Clone, Debug)]
pub struct HttpSettings {
    /// Origin patterns; `*` is a wildcard.
    pub cors_allowed_origins: Vec<String>,
    pub request_timeout: Duration,
    /// Maximum request body, in bytes.
    pub body_limit: usize,
}

pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors_allowed_origins: vec!["http://localhost:*".into()],
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "ODS Gateway", description = "NHS ODS organisation directory over REST"),
    paths(
        handlers::liveness,
        handlers::readiness,
        handlers::search_organisations,
        handlers::get_organisation_by_ods_code,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        OrganisationRes,
        OrganisationMetadataRes,
        AddressRes,
        OperationalPeriodRes,
        OrganisationRoleRes,
        OrganisationSearchRes,
    )),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Key"))),
            );
        }
    }
}

/// Build the full application router.
///
/// `/organisations` routes require an API key; probes and API docs do not.
pub fn router(state: AppState, settings: &HttpSettings) -> Router {
    let protected = Router::new()
        .route("/organisations", get(handlers::search_organisations))
        .route(
            "/organisations/:code",
            get(handlers::get_organisation_by_ods_code),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_api_key,
        ));

    Router::new()
        .route("/liveness", get(handlers::liveness))
        .route("/readiness", get(handlers::readiness))
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(RequestBodyLimitLayer::new(settings.body_limit))
        .layer(middleware::cors_layer(&settings.cors_allowed_origins))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000"),
        ))
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
        .with_state(state)
}

const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
