use axum::extract::Extension;
use axum::extract::Path;
use axum::extract::State;
use axum::response::Html;
use axum::response::Response;
use axum::Form;

use super::posts::PostContentRequest;
use super::redirect;
use super::ApiError;
use super::POSTS_PATH;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::EditPostCommand;
use crate::domain::post::models::PostId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;

pub async fn edit_form(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;

    let post = state
        .post_service
        .get_editable_post(&post_id, &current.user_id)
        .await?;

    Ok(Html(views::edit_page(&post)))
}

pub async fn edit_post(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
    Form(body): Form<PostContentRequest>,
) -> Result<Response, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;

    state
        .post_service
        .edit_post(EditPostCommand {
            post_id,
            editor: current.user_id,
            content: body.content,
        })
        .await
        .map_err(|e| {
            tracing::info!(
                post_id = %post_id,
                editor = %current.user_id,
                error = %e,
                "Edit refused"
            );
            ApiError::from(e)
        })?;

    tracing::info!(post_id = %post_id, "Post edited");

    Ok(redirect(POSTS_PATH))
}
