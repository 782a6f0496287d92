use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::middleware;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::auth_handlers;
use super::health;
use super::transaction_handlers;
use super::AppState;

/// Maximum accepted request body size (1 MiB)
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Liveness route
async fn root() -> &'static str {
    "Hello World!"
}

/// Create application router
pub fn create_router(state: Arc<AppState>, allowed_origins: Vec<String>) -> Router {
    use crate::middleware_impls::request_id_middleware;

    // Configure CORS with specific origins. Credentialed requests cannot use
    // a wildcard origin, so "*" falls back to permissive mode without
    // credentials.
    let cors = if allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|s| s.parse::<HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    // Transaction route group
    let transaction_routes = Router::new()
        .route(
            "/transactions",
            get(transaction_handlers::list_transactions)
                .post(transaction_handlers::create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(transaction_handlers::get_transaction)
                .put(transaction_handlers::update_transaction)
                .delete(transaction_handlers::delete_transaction),
        );

    // User route group
    let user_routes = Router::new()
        .route("/register", axum::routing::post(auth_handlers::register))
        .route("/login", axum::routing::post(auth_handlers::login));

    Router::new()
        .route("/", get(root))
        .route("/_health", get(health::health_check))
        .nest("/api/v1", transaction_routes)
        .nest("/api/auth", user_routes)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        // Security headers; resources stay loadable cross-origin for the
        // frontend deployments
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("cross-origin-resource-policy"),
            HeaderValue::from_static("cross-origin"),
        ))
        .layer(cors)
        .with_state(state)
}
