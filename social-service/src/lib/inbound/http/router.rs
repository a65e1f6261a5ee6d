use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::edit_post::edit_form;
use super::handlers::edit_post::edit_post;
use super::handlers::like_post::toggle_like;
use super::handlers::login::login;
use super::handlers::login::login_form;
use super::handlers::logout::logout;
use super::handlers::posts::create_post;
use super::handlers::posts::list_posts;
use super::handlers::profile::profile;
use super::handlers::signup::signup;
use super::handlers::signup::signup_form;
use super::handlers::upload::upload_form;
use super::handlers::upload::upload_picture;
use super::middleware::authenticate as auth_middleware;
use super::views::UPLOADS_URL_PREFIX;
use crate::config::CookieConfig;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub jwt_expiration_hours: i64,
    pub cookie: CookieConfig,
}

/// Transport settings that are not owned by a domain service.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub jwt_expiration_hours: i64,
    pub cookie: CookieConfig,
    /// Directory served under `/images/uploads`.
    pub uploads_dir: PathBuf,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    post_service: Arc<dyn PostServicePort>,
    authenticator: Arc<Authenticator>,
    settings: HttpSettings,
) -> Router {
    let state = AppState {
        user_service,
        post_service,
        authenticator,
        jwt_expiration_hours: settings.jwt_expiration_hours,
        cookie: settings.cookie,
    };

    let public_routes = Router::new()
        .route("/", get(signup_form))
        .route("/signup", post(signup))
        .route("/login", get(login_form).post(login));

    let protected_routes = Router::new()
        .route("/profile", get(profile))
        .route("/post", get(list_posts).post(create_post))
        .route("/profile/upload", get(upload_form))
        .route("/upload", post(upload_picture))
        .route("/like/:post_id", get(toggle_like))
        .route("/edit/:post_id", get(edit_form).post(edit_post))
        .route("/logout", get(logout))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry the session cookie.
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
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(settings.uploads_dir))
        .layer(trace_layer)
        .with_state(state)
}
