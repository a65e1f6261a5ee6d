use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use super::cookies::SESSION_COOKIE;
use super::handlers::end_session;
use super::handlers::redirect;
use super::handlers::LOGIN_PATH;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Middleware that validates the session cookie and adds user info to request
/// extensions.
///
/// Without a token the browser is sent to the login page. A token that fails
/// verification is also cleared from the browser.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = match jar.get(SESSION_COOKIE) {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => return Err(redirect(LOGIN_PATH)),
    };

    // Validate token and extract claims (from auth library)
    let claims = state.authenticator.validate_token(&token).map_err(|e| {
        tracing::warn!(error = ?e, "Session token rejected");
        end_session(jar.clone())
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse user ID from token");
        end_session(jar.clone())
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        username: claims.username,
    });

    Ok(next.run(req).await)
}
