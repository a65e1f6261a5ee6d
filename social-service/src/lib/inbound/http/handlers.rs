use axum::http::header;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use super::cookies::removal_cookie;
use super::views;
use crate::domain::post::errors::PostError;
use crate::user::errors::UserError;

pub mod edit_post;
pub mod like_post;
pub mod login;
pub mod logout;
pub mod posts;
pub mod profile;
pub mod signup;
pub mod upload;

pub const LOGIN_PATH: &str = "/login";
pub const PROFILE_PATH: &str = "/profile";
pub const POSTS_PATH: &str = "/post";

const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again.";

/// `302 Found` pointing the browser at `location`.
pub fn redirect(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Drop the session cookie and send the browser to the login page.
pub fn end_session(jar: CookieJar) -> Response {
    (jar.add(removal_cookie()), redirect(LOGIN_PATH)).into_response()
}

/// A rendered page with an explicit status.
pub fn page(status: StatusCode, html: String) -> Response {
    (status, Html(html)).into_response()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    /// The session refers to an account that no longer exists.
    SessionExpired,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::SessionExpired => {
                tracing::warn!("Session refers to a missing user, ending session");
                return end_session(CookieJar::new());
            }
        };

        let title = status.canonical_reason().unwrap_or("Error");
        page(status, views::message_page(title, &message))
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByUsername(_) => {
                ApiError::NotFound("User not found".to_string())
            }
            UserError::AlreadyExists => ApiError::BadRequest(err.to_string()),
            UserError::Password(_) | UserError::StorageError(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::InvalidPostId(_) | PostError::NotFound(_) => {
                ApiError::NotFound("Post not found".to_string())
            }
            PostError::NotAuthor { .. } => {
                ApiError::Forbidden("You can only edit your own posts".to_string())
            }
            PostError::UnknownUser(_) => ApiError::SessionExpired,
            PostError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Map a failure to load the signed-in user.
///
/// A valid token for an account that cannot be found ends the session rather
/// than surfacing a 404.
pub fn current_user_error(err: UserError) -> ApiError {
    match err {
        UserError::NotFound(_) => ApiError::SessionExpired,
        other => ApiError::from(other),
    }
}
