//! Booking Server - reserve drones by date and time window

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_server::{api, config::Config, persistence, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("booking_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting Booking Server...");

    let config = Config::from_env();
    let db = persistence::init_database(
        &config.database_path,
        config.database_max_connections,
        config.database_busy_timeout(),
    )
    .await?;

    if config.reset_on_start {
        persistence::clear_all(db.pool()).await?;
    }
    if config.seed_demo {
        persistence::seed::seed_demo_data(db.pool()).await?;
    }

    let state = Arc::new(AppState::new(db.clone()));

    let app = api::routes()
        .with_state(state)
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Booking Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
}
