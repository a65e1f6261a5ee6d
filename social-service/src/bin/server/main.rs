use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use social_service::config::Config;
use social_service::domain::post::ports::PostServicePort;
use social_service::domain::post::service::PostService;
use social_service::domain::user::ports::UserServicePort;
use social_service::domain::user::service::UserService;
use social_service::inbound::http::router::create_router;
use social_service::inbound::http::router::HttpSettings;
use social_service::outbound::repositories::InMemoryRepository;
use social_service::outbound::repositories::PostgresPostRepository;
use social_service::outbound::repositories::PostgresUserRepository;
use social_service::outbound::storage::LocalPictureStorage;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "social-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        in_memory = config.database.is_in_memory(),
        uploads_dir = %config.uploads.dir,
        cookie_secure = config.cookie.secure,
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_cost(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let authenticator = Arc::new(Authenticator::with_password_hasher(
        config.jwt.secret.as_bytes(),
        password_hasher.clone(),
    ));
    let picture_storage = Arc::new(LocalPictureStorage::new(&config.uploads.dir));

    let (user_service, post_service): (Arc<dyn UserServicePort>, Arc<dyn PostServicePort>) =
        if config.database.is_in_memory() {
            let repository = Arc::new(InMemoryRepository::new());
            tracing::info!(database = "memory", "Using in-process store");

            (
                Arc::new(UserService::new(
                    Arc::clone(&repository),
                    picture_storage,
                    password_hasher,
                )),
                Arc::new(PostService::new(repository)),
            )
        } else {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            (
                Arc::new(UserService::new(
                    Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                    picture_storage,
                    password_hasher,
                )),
                Arc::new(PostService::new(Arc::new(PostgresPostRepository::new(
                    pg_pool,
                )))),
            )
        };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        post_service,
        authenticator,
        HttpSettings {
            jwt_expiration_hours: config.jwt.expiration_hours,
            cookie: config.cookie.clone(),
            uploads_dir: config.uploads.dir.clone().into(),
        },
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
