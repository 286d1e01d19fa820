use anyhow::Context as _;
use sea_orm::Database;
use tokio::signal;
use tracing::{info, warn};

use betengine_affiliates::config::AffiliatesConfig;
use betengine_affiliates::router::build_router;
use betengine_affiliates::state::AppState;
use betengine_affiliates_migration::{Migrator, MigratorTrait};
use betengine_auth_types::token::JwtSecret;
use betengine_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = AffiliatesConfig::from_env();
    if config.jwt_secret.is_none() {
        warn!("JWT_SECRET is not set; signing credentials with the insecure built-in fallback");
    }
    if config.bootstrap_admin_email.is_none() {
        info!("BOOTSTRAP_ADMIN_EMAIL is not set; no account is auto-approved");
    }

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("failed to apply migrations")?;

    let state = AppState {
        db: db.clone(),
        jwt_secret: JwtSecret::new(config.jwt_secret_or_fallback()),
        bootstrap_admin_email: config.bootstrap_admin_email.clone(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.affiliates_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("affiliates service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await.context("failed to close database")?;
    info!("affiliates service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
