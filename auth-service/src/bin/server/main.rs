use std::sync::Arc;

use auth::Argon2Hasher;
use auth::CredentialAuthenticator;
use auth::TokenService;
use auth_service::config::Config;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::PostgresUserRepository;
use auth_service::outbound::repositories::UserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_seconds = config.jwt.ttl_seconds,
        seed_users = config.users.len(),
        "Configuration loaded"
    );

    // Fail fast on an unusable signing secret or token TTL
    let token_settings = config.jwt.token_settings()?;
    let tokens = Arc::new(TokenService::with_system_clock(token_settings));

    let hasher = Argon2Hasher::new();

    let user_repository = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let repository = PostgresUserRepository::new(pg_pool);
            let inserted =
                UserRepository::seed_postgres(&repository, &config.users, &hasher).await?;
            tracing::info!(inserted, "Seed users applied");

            UserRepository::Postgres(repository)
        }
        None => UserRepository::in_memory(&config.users, &hasher)?,
    };
    tracing::info!(backend = user_repository.backend(), "User store ready");

    let authenticator = Arc::new(CredentialAuthenticator::new(
        Arc::new(user_repository),
        hasher,
        tokens,
    )?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
