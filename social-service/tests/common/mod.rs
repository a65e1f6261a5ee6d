use std::path::PathBuf;
use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use social_service::config::CookieConfig;
use social_service::domain::post::service::PostService;
use social_service::domain::user::service::UserService;
use social_service::inbound::http::router::create_router;
use social_service::inbound::http::router::HttpSettings;
use social_service::outbound::repositories::InMemoryRepository;
use social_service::outbound::storage::LocalPictureStorage;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over the in-process store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub uploads_dir: PathBuf,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let uploads_dir = std::env::temp_dir().join(format!(
            "social_service_uploads_{}",
            uuid::Uuid::new_v4().simple()
        ));

        // Cheapest cost argon2 accepts, to keep the suite fast
        let password_hasher =
            PasswordHasher::with_cost(256, 1, 1).expect("Failed to build password hasher");
        let authenticator = Arc::new(Authenticator::with_password_hasher(
            JWT_SECRET,
            password_hasher.clone(),
        ));

        let repository = Arc::new(InMemoryRepository::new());
        let picture_storage = Arc::new(LocalPictureStorage::new(&uploads_dir));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            picture_storage,
            password_hasher,
        ));
        let post_service = Arc::new(PostService::new(repository));

        let router = create_router(
            user_service,
            post_service,
            authenticator,
            HttpSettings {
                jwt_expiration_hours: 24,
                cookie: CookieConfig {
                    http_only: true,
                    secure: false,
                    max_age_seconds: 86_400,
                },
                uploads_dir: uploads_dir.clone(),
            },
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            uploads_dir,
            api_client: Self::client(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Cookie-keeping client that reports redirects instead of following them
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create reqwest client")
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request carrying an explicit session cookie
    pub fn get_with_token(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        Self::client()
            .get(self.url(path))
            .header(reqwest::header::COOKIE, format!("token={}", token))
    }

    /// Submit the signup form
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
        city: &str,
        age: &str,
    ) -> reqwest::Response {
        self.post("/signup")
            .form(&[
                ("username", username),
                ("email", email),
                ("password", password),
                ("city", city),
                ("age", age),
            ])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Submit the login form
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Create an account and log in; the client keeps the session cookie
    pub async fn signup_and_login(&self, username: &str, email: &str) {
        let response = self.signup(username, email, "secret1", "NYC", "30").await;
        assert_eq!(response.status(), StatusCode::FOUND);

        let response = self.login(username, "secret1").await;
        assert_eq!(response.status(), StatusCode::FOUND);
    }

    /// Publish a post as the logged-in user
    pub async fn create_post(&self, content: &str) -> reqwest::Response {
        self.post("/post")
            .form(&[("content", content)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Body of the posts page
    pub async fn posts_page(&self) -> String {
        let response = self
            .get("/post")
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
        response.text().await.expect("Failed to read body")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.uploads_dir);
    }
}

/// Value of the `Location` header
pub fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .expect("Missing Location header")
        .to_str()
        .unwrap()
}

/// Every `Set-Cookie` header on the response
pub fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Extract the first `/edit/<id>` post id from a rendered posts page
pub fn first_post_id(html: &str) -> String {
    let start = html.find("/edit/").expect("No editable post on page") + "/edit/".len();
    html[start..start + 36].to_string()
}

/// Extract every `/like/<id>` post id from a rendered posts page
pub fn like_post_ids(html: &str) -> Vec<String> {
    html.match_indices("/like/")
        .map(|(i, m)| html[i + m.len()..i + m.len() + 36].to_string())
        .collect()
}
