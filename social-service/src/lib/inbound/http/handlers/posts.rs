use axum::extract::Extension;
use axum::extract::State;
use axum::response::Html;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;

use super::current_user_error;
use super::redirect;
use super::ApiError;
use super::POSTS_PATH;
use crate::domain::post::models::CreatePostCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;

pub async fn list_posts(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<Html<String>, ApiError> {
    let user = state
        .user_service
        .get_user(&current.user_id)
        .await
        .map_err(current_user_error)?;

    let posts = state.post_service.list_posts_by_author(&user.id).await?;

    Ok(Html(views::posts_page(&user, &posts)))
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Form(body): Form<PostContentRequest>,
) -> Result<Response, ApiError> {
    let post = state
        .post_service
        .create_post(CreatePostCommand {
            author: current.user_id,
            content: body.content,
        })
        .await?;

    tracing::info!(post_id = %post.id, author = %current.user_id, "Post created");

    Ok(redirect(POSTS_PATH))
}

/// Body of the create and edit forms. Content is stored as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostContentRequest {
    pub content: String,
}
