use std::sync::Arc;
use std::time::Duration;

use auth::Argon2Hasher;
use auth::CredentialAuthenticator;
use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::greetings::admin;
use super::handlers::greetings::hello;
use super::handlers::login::login;
use super::handlers::validate_token::validate_token;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_admin;
use crate::outbound::repositories::UserRepository;

pub type Authenticator = CredentialAuthenticator<UserRepository, Argon2Hasher>;

#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub tokens: Arc<TokenService>,
}

pub fn create_router(authenticator: Arc<Authenticator>) -> Router {
    let state = AppState {
        tokens: Arc::clone(authenticator.token_service()),
        authenticator,
    };

    let public_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/validate", post(validate_token));

    let admin_routes = Router::new()
        .route("/api/admin", get(admin))
        .route_layer(middleware::from_fn(require_admin));

    let protected_routes = Router::new()
        .route("/api/hello", get(hello))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers stay out of the span: they carry bearer tokens
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
