mod common;

use auth::Claims;
use chrono::Duration;
use chrono::Utc;
use common::first_post_id;
use common::like_post_ids;
use common::location;
use common::set_cookies;
use common::TestApp;
use reqwest::multipart;
use reqwest::StatusCode;

fn is_session_removal(cookie: &str) -> bool {
    cookie.starts_with("token=") && cookie.contains("Max-Age=0")
}

/// Sign up and log in on a separate client sharing the same server
async fn second_session(app: &TestApp, username: &str, email: &str) -> reqwest::Client {
    let client = TestApp::client();

    let response = client
        .post(app.url("/signup"))
        .form(&[
            ("username", username),
            ("email", email),
            ("password", "secret1"),
            ("city", "Paris"),
            ("age", "41"),
        ])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FOUND);

    let response = client
        .post(app.url("/login"))
        .form(&[("username", username), ("password", "secret1")])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FOUND);

    client
}

#[tokio::test]
async fn test_public_pages_render() {
    let app = TestApp::spawn().await;

    for path in ["/", "/login"] {
        let response = app.get(path).send().await.expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK, "{}", path);
        let body = response.text().await.unwrap();
        assert!(body.contains("<form"), "{}", path);
    }
}

#[tokio::test]
async fn test_signup_then_login_flow() {
    let app = TestApp::spawn().await;

    let response = app.signup("alice123", "a@x.com", "secret1", "NYC", "30").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
    assert!(set_cookies(&response).is_empty());

    let response = app.login("alice123", "secret1").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/profile");
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("token="));
    assert!(cookies[0].contains("HttpOnly"));
    assert!(cookies[0].contains("Path=/"));

    let response = app
        .get("/profile")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("alice123"));
    assert!(body.contains("a@x.com"));
    assert!(body.contains("NYC"));
    assert!(body.contains("/images/uploads/default.svg"));

    let response = app.login("alice123", "wrong").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());
    let body = response.text().await.unwrap();
    assert!(body.contains("Invalid username or password"));
}

#[tokio::test]
async fn test_login_unknown_user_matches_wrong_password() {
    let app = TestApp::spawn().await;
    app.signup("alice123", "a@x.com", "secret1", "NYC", "30").await;

    let unknown = app.login("nobody", "secret1").await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&unknown).is_empty());
    let unknown_body = unknown.text().await.unwrap();

    let wrong = app.login("alice123", "wrong-password").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong_body = wrong.text().await.unwrap();

    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .form(&[("password", "secret1")])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("Username and password are required"));

    let response = app.login("alice123", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_login_blank_username_is_looked_up() {
    let app = TestApp::spawn().await;

    let response = app.login("   ", "secret1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("Invalid username or password"));
}

#[tokio::test]
async fn test_signup_duplicate_username_or_email() {
    let app = TestApp::spawn().await;

    let response = app.signup("alice123", "a@x.com", "secret1", "NYC", "30").await;
    assert_eq!(response.status(), StatusCode::FOUND);

    // Same username, different email
    let response = app.signup("alice123", "b@x.com", "secret1", "NYC", "30").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("Username or email already exists"));

    // Different username, same email
    let response = app.signup("bob456", "a@x.com", "secret1", "NYC", "30").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("Username or email already exists"));
}

#[tokio::test]
async fn test_signup_rejects_same_email_in_another_form() {
    let app = TestApp::spawn().await;

    let response = app.signup("alice123", "a@x.com", "secret1", "NYC", "30").await;
    assert_eq!(response.status(), StatusCode::FOUND);

    for email in ["Mallory <a@x.com>", "a@[127.0.0.1]", "a@x"] {
        let response = app.signup("bob456", email, "secret1", "NYC", "30").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", email);
    }

    let response = app.login("bob456", "secret1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_reports_every_invalid_field() {
    let app = TestApp::spawn().await;

    let response = app.signup("al", "not-an-email", "123", "", "zero").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.text().await.unwrap();
    assert!(body.contains("Username must be at least 3 characters"));
    assert!(body.contains("Email must be valid"));
    assert!(body.contains("Password must be at least 6 characters"));
    assert!(body.contains("City is required"));
    assert!(body.contains("Age must be a number"));

    // Nothing was stored
    let response = app.signup("alice123", "a@x.com", "secret1", "NYC", "0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = app.login("alice123", "secret1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_redirect_without_cookie() {
    let app = TestApp::spawn().await;

    for path in [
        "/profile",
        "/post",
        "/profile/upload",
        "/logout",
        "/like/3f2504e0-4f89-11d3-9a0c-0305e82c3301",
        "/edit/3f2504e0-4f89-11d3-9a0c-0305e82c3301",
    ] {
        let response = app.get(path).send().await.expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::FOUND, "{}", path);
        assert_eq!(location(&response), "/login", "{}", path);
    }

    let response = app.get_with_token("/profile", "").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_invalid_tokens_clear_cookie_and_redirect() {
    let app = TestApp::spawn().await;
    app.signup("alice123", "a@x.com", "secret1", "NYC", "30").await;

    let forged = auth::JwtHandler::new(b"some-other-secret")
        .encode(&Claims::for_user(uuid::Uuid::new_v4(), "alice123", 24))
        .unwrap();
    let expired = app
        .jwt_handler
        .encode(&Claims::for_user_at(
            uuid::Uuid::new_v4(),
            "alice123",
            24,
            Utc::now() - Duration::hours(25),
        ))
        .unwrap();

    for token in ["garbage", forged.as_str(), expired.as_str()] {
        let response = app.get_with_token("/profile", token).send().await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/login");
        assert!(set_cookies(&response).iter().any(|c| is_session_removal(c)));
    }
}

#[tokio::test]
async fn test_token_for_missing_user_ends_session() {
    let app = TestApp::spawn().await;

    let token = app
        .jwt_handler
        .encode(&Claims::for_user(uuid::Uuid::new_v4(), "ghost", 24))
        .unwrap();

    let response = app.get_with_token("/profile", &token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
    assert!(set_cookies(&response).iter().any(|c| is_session_removal(c)));
}

#[tokio::test]
async fn test_create_like_and_unlike_post() {
    let app = TestApp::spawn().await;
    app.signup_and_login("alice123", "a@x.com").await;

    let response = app.create_post("hello <world>").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/post");

    let page = app.posts_page().await;
    assert!(page.contains("hello &lt;world&gt;"));
    assert!(page.contains("0 like(s)"));
    let post_id = first_post_id(&page);

    let response = app.get(&format!("/like/{}", post_id)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/post");

    let page = app.posts_page().await;
    assert!(page.contains("1 like(s)"));
    assert!(page.contains(">Unlike<"));

    app.get(&format!("/like/{}", post_id)).send().await.unwrap();

    let page = app.posts_page().await;
    assert!(page.contains("0 like(s)"));
    assert!(page.contains(">Like<"));

    // Post count is reflected on the profile
    let profile = app.get("/profile").send().await.unwrap().text().await.unwrap();
    assert!(profile.contains("<dt>Posts</dt><dd>1</dd>"));
}

#[tokio::test]
async fn test_posts_are_listed_in_creation_order() {
    let app = TestApp::spawn().await;
    app.signup_and_login("alice123", "a@x.com").await;

    app.create_post("first").await;
    app.create_post("second").await;

    let page = app.posts_page().await;
    assert_eq!(like_post_ids(&page).len(), 2);
    assert!(page.find("first").unwrap() < page.find("second").unwrap());
}

#[tokio::test]
async fn test_like_unknown_post_is_not_found() {
    let app = TestApp::spawn().await;
    app.signup_and_login("alice123", "a@x.com").await;

    let response = app
        .get("/like/3f2504e0-4f89-11d3-9a0c-0305e82c3301")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/like/not-a-post-id").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_author_can_edit_post() {
    let app = TestApp::spawn().await;
    app.signup_and_login("alice123", "a@x.com").await;
    app.create_post("draft").await;
    let post_id = first_post_id(&app.posts_page().await);

    let response = app.get(&format!("/edit/{}", post_id)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("draft"));

    let response = app
        .post(&format!("/edit/{}", post_id))
        .form(&[("content", "final")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/post");

    let page = app.posts_page().await;
    assert!(page.contains("final"));
    assert!(!page.contains("draft"));
}

#[tokio::test]
async fn test_edit_by_non_author_is_forbidden() {
    let app = TestApp::spawn().await;
    app.signup_and_login("alice123", "a@x.com").await;
    app.create_post("mine").await;
    let post_id = first_post_id(&app.posts_page().await);

    let bob = second_session(&app, "bob456", "b@x.com").await;

    let response = bob
        .get(app.url(&format!("/edit/{}", post_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = bob
        .post(app.url(&format!("/edit/{}", post_id)))
        .form(&[("content", "hijacked")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let page = app.posts_page().await;
    assert!(page.contains("mine"));
    assert!(!page.contains("hijacked"));

    // Liking someone else's post is allowed
    let response = bob
        .get(app.url(&format!("/like/{}", post_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert!(app.posts_page().await.contains("1 like(s)"));
}

#[tokio::test]
async fn test_edit_unknown_post_is_not_found() {
    let app = TestApp::spawn().await;
    app.signup_and_login("alice123", "a@x.com").await;

    let response = app
        .post("/edit/3f2504e0-4f89-11d3-9a0c-0305e82c3301")
        .form(&[("content", "x")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/edit/not-a-post-id").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_profile_picture() {
    let app = TestApp::spawn().await;
    app.signup_and_login("alice123", "a@x.com").await;

    let response = app.get("/profile/upload").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("profilePic"));

    let part = multipart::Part::bytes(b"fake-png-bytes".to_vec())
        .file_name("me.PNG")
        .mime_str("image/png")
        .unwrap();
    let form = multipart::Form::new().part("profilePic", part);

    let response = app.post("/upload").multipart(form).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/post");

    let profile = app.get("/profile").send().await.unwrap().text().await.unwrap();
    let start = profile.find("/images/uploads/").unwrap();
    let end = start + profile[start..].find('"').unwrap();
    let picture_url = &profile[start..end];
    assert!(picture_url.ends_with(".png"));
    assert!(!picture_url.ends_with("default.svg"));

    let file_name = picture_url.trim_start_matches("/images/uploads/");
    let stored = std::fs::read(app.uploads_dir.join(file_name)).unwrap();
    assert_eq!(stored, b"fake-png-bytes");

    let response = app.get(picture_url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"fake-png-bytes");
}

#[tokio::test]
async fn test_upload_without_file_is_rejected() {
    let app = TestApp::spawn().await;
    app.signup_and_login("alice123", "a@x.com").await;

    let form = multipart::Form::new().text("caption", "no picture here");

    let response = app.post("/upload").multipart(form).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = TestApp::spawn().await;
    app.signup_and_login("alice123", "a@x.com").await;

    let response = app.get("/logout").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
    assert!(set_cookies(&response).iter().any(|c| is_session_removal(c)));

    let response = app.get("/profile").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
}
