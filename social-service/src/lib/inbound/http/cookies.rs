use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use time::Duration;

use crate::config::CookieConfig;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Cookie holding a freshly issued session token.
pub fn session_cookie(token: String, config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(config.max_age_seconds))
        .build()
}

/// Cookie that makes the browser drop the session token.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = CookieConfig {
            http_only: true,
            secure: true,
            max_age_seconds: 3600,
        };

        let cookie = session_cookie("abc.def.ghi".to_string(), &config);

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc.def.ghi");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(3600)));
    }

    #[test]
    fn test_session_cookie_flags_follow_config() {
        let config = CookieConfig {
            http_only: false,
            secure: false,
            max_age_seconds: 60,
        };

        let rendered = session_cookie("t".to_string(), &config).to_string();

        assert!(!rendered.contains("HttpOnly"));
        assert!(!rendered.contains("Secure"));
        assert!(rendered.contains("Max-Age=60"));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie();

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
