//! Blood Donation Service
//!
//! REST API for donor registration and blood request coordination.
//! Reads configuration from TOML (~/.config/blood-donation/config.toml).

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use blood_donation::config::{CONFIG_PATH_ENV, LogFormat, LoggingConfig, StorageBackend};
use blood_donation::domain::RepositoryProvider;
use blood_donation::shared::ShutdownCoordinator;
use blood_donation::{
    create_api_router, default_config_path, init_database, run_migrations, ApiState, AppConfig,
    InMemoryStorage, SeaOrmRepositoryProvider,
};

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var(CONFIG_PATH_ENV)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let loaded = AppConfig::load(&config_path);
    let mut app_cfg = loaded.as_ref().cloned().unwrap_or_default();
    app_cfg.apply_env()?;

    init_tracing(&app_cfg.logging);
    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    info!("Starting Blood Donation Service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = if app_cfg.metrics.enabled {
        let handle = PrometheusBuilder::new().install_recorder()?;
        info!("Prometheus metrics recorder installed");
        Some(handle)
    } else {
        None
    };

    // ── Storage ────────────────────────────────────────────────
    let mut db: Option<DatabaseConnection> = None;
    let repos: Arc<dyn RepositoryProvider> = match app_cfg.database.backend {
        StorageBackend::Sqlite => {
            let conn = init_database(&app_cfg.database.connection()).await?;
            run_migrations(&conn).await?;
            db = Some(conn.clone());
            Arc::new(SeaOrmRepositoryProvider::new(conn))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on exit");
            Arc::new(InMemoryStorage::new())
        }
    };

    let settings = app_cfg.donations.settings();
    info!(
        policy = ?settings.policy,
        recent_limit = settings.recent_limit,
        "Donation request settings"
    );

    // ── Shutdown coordination ──────────────────────────────────
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    shutdown.start_signal_listener();
    let shutdown_signal = shutdown.signal();

    // ── HTTP server ────────────────────────────────────────────
    let api_router = create_api_router(ApiState::new(repos, settings), prometheus_handle);

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let served = axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await;

    if let Err(e) = served {
        error!("REST API server error: {}", e);
    }

    // ── Release the store ──────────────────────────────────────
    if let Some(db) = db {
        let closed = shutdown
            .cleanup_within_timeout(|| async move {
                match db.close().await {
                    Ok(()) => info!("Database connection closed"),
                    Err(e) => warn!("Error closing database connection: {}", e),
                }
            })
            .await;
        if !closed {
            warn!("Database connection was not closed cleanly");
        }
    }

    info!("Blood Donation Service shutdown complete");
    Ok(())
}
