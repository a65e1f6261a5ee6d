use auth::AuthenticationError;
use auth::Claims;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Form;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::page;
use super::redirect;
use super::ApiError;
use super::PROFILE_PATH;
use crate::domain::user::models::Username;
use crate::inbound::http::cookies::session_cookie;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;
use crate::user::errors::UserError;

const MISSING_FIELDS: &str = "Username and password are required";
const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub async fn login_form() -> Html<String> {
    Html(views::login_page(None))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(body): Form<LoginRequest>,
) -> Result<Response, ApiError> {
    if body.username.is_empty() || body.password.is_empty() {
        return Ok(page(
            StatusCode::BAD_REQUEST,
            views::login_page(Some(MISSING_FIELDS)),
        ));
    }

    // A name that cannot be valid cannot belong to a stored user.
    let Ok(username) = Username::new(body.username) else {
        tracing::info!(reason = "unknown_user", "Login failed");
        return Ok(invalid_credentials());
    };

    let user = match state.user_service.get_user_by_username(&username).await {
        Ok(user) => user,
        Err(UserError::NotFoundByUsername(_)) => {
            tracing::info!(reason = "unknown_user", "Login failed");
            return Ok(invalid_credentials());
        }
        Err(err) => return Err(ApiError::from(err)),
    };

    let claims = Claims::for_user(
        user.id,
        user.username.as_str(),
        state.jwt_expiration_hours,
    );

    let result = match state
        .authenticator
        .authenticate(&body.password, &user.password_hash, &claims)
    {
        Ok(result) => result,
        Err(AuthenticationError::InvalidCredentials) => {
            tracing::info!(user_id = %user.id, reason = "wrong_password", "Login failed");
            return Ok(invalid_credentials());
        }
        Err(AuthenticationError::PasswordError(err)) => {
            return Err(ApiError::InternalServerError(format!(
                "Password verification failed: {}",
                err
            )))
        }
        Err(AuthenticationError::JwtError(err)) => {
            return Err(ApiError::InternalServerError(format!(
                "Token generation failed: {}",
                err
            )))
        }
    };

    tracing::info!(user_id = %user.id, "Login succeeded");

    let jar = jar.add(session_cookie(result.access_token, &state.cookie));
    Ok((jar, redirect(PROFILE_PATH)).into_response())
}

fn invalid_credentials() -> Response {
    page(
        StatusCode::UNAUTHORIZED,
        views::login_page(Some(INVALID_CREDENTIALS)),
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    username: String,
    password: String,
}
