//! Forum server: real-time presence and private messaging.
//!
//! Main entry point that wires all crates together and starts the server.

use std::future::IntoFuture;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing_subscriber::{EnvFilter, fmt};

use forum_core::config::AppConfig;
use forum_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load layered configuration for `FORUM_ENV` (default `development`).
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("FORUM_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting forum server v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db = forum_database::DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    forum_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Repositories, authenticator, realtime engine ─────
    let state = forum_api::AppState::new(config.clone(), db.clone());
    let realtime = state.realtime.clone();
    tracing::info!(
        queue_capacity = config.realtime.outbound_queue_capacity,
        eviction_grace_ms = config.realtime.eviction_grace_ms,
        "Realtime hub ready"
    );

    // ── Step 3: Build and start HTTP server ──────────────────────
    let app = forum_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Forum server listening on {}", addr);

    // ── Step 4: Graceful shutdown ────────────────────────────────
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let hub = realtime.clone();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            // Fire every client close signal so upgraded sockets wind down too.
            hub.shutdown();
            let _ = signalled_tx.send(());
        })
        .into_future();

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let deadline = async move {
        match signalled_rx.await {
            Ok(()) => tokio::time::sleep(grace).await,
            Err(_) => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = deadline => {
            tracing::warn!("Connections still open after shutdown grace, exiting anyway");
        }
    }

    // ── Step 5: Release resources ────────────────────────────────
    if !realtime.is_shutting_down() {
        realtime.shutdown();
    }
    db.close().await;

    tracing::info!("Forum server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
