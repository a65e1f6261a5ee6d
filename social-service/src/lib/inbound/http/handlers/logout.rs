use axum::extract::Extension;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use super::end_session;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn logout(Extension(current): Extension<AuthenticatedUser>, jar: CookieJar) -> Response {
    tracing::info!(
        user_id = %current.user_id,
        username = %current.username,
        "Logout"
    );
    end_session(jar)
}
