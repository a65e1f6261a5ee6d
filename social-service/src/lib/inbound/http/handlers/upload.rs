use axum::extract::multipart::MultipartError;
use axum::extract::Extension;
use axum::extract::Multipart;
use axum::extract::State;
use axum::response::Html;
use axum::response::Response;

use super::current_user_error;
use super::redirect;
use super::ApiError;
use super::POSTS_PATH;
use crate::domain::user::models::PictureUpload;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;

/// Multipart field carrying the picture.
pub const PICTURE_FIELD: &str = "profilePic";

pub async fn upload_form() -> Html<String> {
    Html(views::upload_page())
}

pub async fn upload_picture(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_picture(multipart)
        .await?
        .ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;

    let size = upload.bytes.len();
    let user = state
        .user_service
        .update_profile_picture(&current.user_id, upload)
        .await
        .map_err(current_user_error)?;

    tracing::info!(
        user_id = %user.id,
        file_name = %user.profile_picture,
        size,
        "Profile picture updated"
    );

    Ok(redirect(POSTS_PATH))
}

/// Pull the picture field out of the form, ignoring any other fields.
///
/// A browser submitting the form without choosing a file still sends the
/// field, with no file name and no content; that counts as missing.
async fn read_picture(mut multipart: Multipart) -> Result<Option<PictureUpload>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() != Some(PICTURE_FIELD) {
            continue;
        }

        let original_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let bytes = field.bytes().await.map_err(bad_multipart)?;

        if original_name.is_none() && bytes.is_empty() {
            return Ok(None);
        }

        return Ok(Some(PictureUpload {
            original_name,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}

fn bad_multipart(err: MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Invalid upload: {}", err.body_text()))
}
