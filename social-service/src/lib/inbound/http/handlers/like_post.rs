use axum::extract::Extension;
use axum::extract::Path;
use axum::extract::State;
use axum::response::Response;

use super::redirect;
use super::ApiError;
use super::POSTS_PATH;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::PostId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
) -> Result<Response, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;

    let like_state = state
        .post_service
        .toggle_like(&post_id, &current.user_id)
        .await?;

    tracing::info!(
        post_id = %post_id,
        user_id = %current.user_id,
        state = ?like_state,
        "Like toggled"
    );

    Ok(redirect(POSTS_PATH))
}
