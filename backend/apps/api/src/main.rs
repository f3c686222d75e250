//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are
//! `auth::AuthError` rendered as problem JSON.

mod config;

use anyhow::Context;
use auth::{
    AuthConfig, AuthWorkflow, Es384TokenService, InMemoryCredentialStore, InMemoryProfileStore,
    PgCredentialStore, PgProfileStore, auth_router,
};
use axum::Router;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ServerConfig, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Key pair is loaded once; a bad key aborts startup
    let tokens = Es384TokenService::from_pem_files(&config.jwt_private_key, &config.jwt_public_key)
        .context("Failed to load JWT key pair")?;
    let tokens = Arc::new(tokens);

    tracing::info!(
        private_key = %config.jwt_private_key.display(),
        public_key = %config.jwt_public_key.display(),
        "Loaded ES384 key pair"
    );

    let auth_config = AuthConfig {
        cookie_secure: config.cookie_secure,
        ..AuthConfig::default()
    };

    if !auth_config.cookie_secure {
        tracing::warn!("Session cookie is not marked Secure; set COOKIE_SECURE=true behind TLS");
    }

    let app = match config.store_backend {
        StoreBackend::Postgres => postgres_app(&config, tokens, auth_config).await?,
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory stores; all users are lost on restart");
            auth_router(AuthWorkflow::new(
                Arc::new(InMemoryCredentialStore::new()),
                Arc::new(InMemoryProfileStore::new()),
                tokens,
                auth_config,
            ))
        }
    };

    let app = app.layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn postgres_app(
    config: &ServerConfig,
    tokens: Arc<Es384TokenService>,
    auth_config: AuthConfig,
) -> anyhow::Result<Router> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set when STORE_BACKEND=postgres")?;

    let credential_pool = connect(database_url, config.db_max_connections).await?;
    tracing::info!("Connected to credential database");

    let profile_pool = match config.profile_database_url.as_deref() {
        Some(url) => {
            let pool = connect(url, config.db_max_connections).await?;
            tracing::info!("Connected to profile database");
            pool
        }
        None => credential_pool.clone(),
    };

    // Both sets may share one database, so each ignores the other's versions
    let mut credential_migrations = sqlx::migrate!("../../../database/migrations/credentials");
    credential_migrations
        .set_ignore_missing(true)
        .run(&credential_pool)
        .await
        .context("Credential store migrations failed")?;

    let mut profile_migrations = sqlx::migrate!("../../../database/migrations/profiles");
    profile_migrations
        .set_ignore_missing(true)
        .run(&profile_pool)
        .await
        .context("Profile store migrations failed")?;

    tracing::info!("Migrations completed");

    Ok(auth_router(AuthWorkflow::new(
        Arc::new(PgCredentialStore::new(credential_pool)),
        Arc::new(PgProfileStore::new(profile_pool)),
        tokens,
        auth_config,
    )))
}

async fn connect(url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
        .context("Failed to connect to database")
}
