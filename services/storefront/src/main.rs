use std::sync::Arc;

use anyhow::Result;
use common::{
    database::{self, DatabaseConfig},
    store::{InMemoryUserStore, PgUserStore, UserStore},
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use storefront::{
    AppState,
    config::{Settings, StoreBackend},
    create_router,
    jwt::JwtConfig,
    password::PasswordHasher,
    rate_limiter::RateLimiterConfig,
};

async fn init_store(backend: StoreBackend) -> Result<Arc<dyn UserStore>> {
    match backend {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = database::init_pool(&db_config).await?;

            // Check database connectivity
            if database::health_check(&pool).await? {
                info!("Database connection successful");
            } else {
                anyhow::bail!("Failed to connect to database");
            }

            database::run_migrations(&pool).await?;
            Ok(Arc::new(PgUserStore::new(pool)))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory user store; accounts are lost on restart");
            Ok(Arc::new(InMemoryUserStore::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down storefront service");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting storefront service");

    let settings = Settings::load()?;
    let store = init_store(settings.store_backend).await?;

    let jwt_config = JwtConfig {
        secret: settings.jwt_secret.clone(),
        expiry_seconds: settings.jwt_expiry_seconds,
    };
    let hasher = PasswordHasher::new(
        settings.password_memory_kib,
        settings.password_iterations,
        settings.password_parallelism,
    )?;
    let login_limits = RateLimiterConfig {
        max_attempts: settings.login_max_attempts,
        window_seconds: settings.login_window_seconds,
        ban_duration_seconds: settings.login_ban_seconds,
    };

    let app_state = AppState::new(store, &jwt_config, hasher, login_limits);
    let app = create_router(app_state);

    let listener = TcpListener::bind(&settings.bind_address).await?;
    info!("Storefront service listening on {}", settings.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
