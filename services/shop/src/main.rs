use anyhow::Result;
use tokio::{net::TcpListener, signal::ctrl_c};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use auth::{
    AuthService,
    bootstrap::{AdminConfig, bootstrap_admin},
    jwt::JwtConfig,
};
use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use shop::{AppState, config::ServerConfig, routes, server::serve_until};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting shop service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool).await?;

    let auth_service = AuthService::new(pool.clone(), JwtConfig::from_env()?);
    bootstrap_admin(&auth_service, AdminConfig::from_env()).await?;

    let app = routes::create_router(AppState::new(pool.clone(), auth_service));

    let server_config = ServerConfig::from_env()?;
    let address = server_config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Shop service listening on {}", address);

    serve_until(listener, app, pool, shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }
}
