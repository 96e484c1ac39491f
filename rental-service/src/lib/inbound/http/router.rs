use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_rental::create_rental;
use super::handlers::get_rental::get_rental;
use super::handlers::get_user::get_user;
use super::handlers::list_rentals::list_rentals;
use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::register::register;
use super::handlers::send_message::send_message;
use super::handlers::update_rental::update_rental;
use super::middleware::authenticate;
use super::middleware::require_authentication;
use crate::domain::message::ports::MessageServicePort;
use crate::domain::rental::ports::RentalServicePort;
use crate::domain::user::ports::UserServicePort;

/// Largest accepted rental form, picture included.
const MAX_RENTAL_FORM_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub rental_service: Arc<dyn RentalServicePort>,
    pub message_service: Arc<dyn MessageServicePort>,
    pub authenticator: Arc<Authenticator>,
}

/// Build the HTTP application.
///
/// # Arguments
/// * `state` - Services shared by every handler
/// * `upload_dir` - Directory served publicly under `/uploads`
pub fn create_router(state: AppState, upload_dir: impl AsRef<Path>) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/user/:user_id", get(get_user))
        .route(
            "/api/rentals",
            get(list_rentals)
                .post(create_rental)
                .layer(DefaultBodyLimit::max(MAX_RENTAL_FORM_BYTES)),
        )
        .route(
            "/api/rentals/:rental_id",
            get(get_rental)
                .put(update_rental)
                .layer(DefaultBodyLimit::max(MAX_RENTAL_FORM_BYTES)),
        )
        .route("/api/messages", post(send_message))
        .route_layer(middleware::from_fn(require_authentication));

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
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .nest_service("/uploads", ServeDir::new(upload_dir.as_ref()))
        .layer(CorsLayer::permissive())
        .layer(trace_layer)
        .with_state(state)
}
