use axum::extract::Extension;
use axum::extract::State;
use axum::response::Html;

use super::current_user_error;
use super::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;

pub async fn profile(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<Html<String>, ApiError> {
    let user = state
        .user_service
        .get_user(&current.user_id)
        .await
        .map_err(current_user_error)?;

    Ok(Html(views::profile_page(&user)))
}
