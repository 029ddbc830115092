//! Duskhaven server entry point.

use std::error::Error;
use std::sync::Arc;

use duskhaven_character::application::persistence::PersistenceGateway;
use duskhaven_content::application::pack::ContentPack;
use duskhaven_core::clock::{Clock, SystemClock};
use duskhaven_core::rng::{DeterministicRng, StdRngSource};
use duskhaven_core::store::StateStore;
use duskhaven_engine::application::world::GameWorld;
use duskhaven_server::bridge;
use duskhaven_server::config::ServerConfig;
use duskhaven_server::routes;
use duskhaven_server::runtime::EngineRuntime;
use duskhaven_server::state::AppState;
use duskhaven_store::memory::MemoryStateStore;
use duskhaven_store::pg_state_store::PgStateStore;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Duskhaven server");

    let config = ServerConfig::from_env()?;
    let loaded = ContentPack::load_file(&config.content_path)?;

    // Choose a backing store.
    let store: Arc<dyn StateStore> = match &config.database_url {
        Some(url) => {
            let store = PgStateStore::connect(url).await?;
            store.ensure_schema().await?;
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, actor records will not survive a restart");
            Arc::new(MemoryStateStore::new())
        }
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let (gateway, writer) = PersistenceGateway::new(store, clock.clone());
    tokio::spawn(writer.run());

    let rng: Box<dyn DeterministicRng> = match config.rng_seed {
        Some(seed) => Box::new(StdRngSource::seeded(seed)),
        None => Box::new(StdRngSource::from_os()),
    };
    let world = GameWorld::new(
        config.engine.clone(),
        Arc::new(loaded.pack),
        gateway,
        clock,
        rng,
    )?;

    // Start the engine loop.
    let (status_tx, status_rx) = watch::channel(world.status());
    let (events_tx, events_rx) = mpsc::channel(1024);
    tokio::spawn(EngineRuntime::new(world, status_tx, config.tick_ms).run(events_rx));

    // Start the line listener.
    let line_addr = config.line_addr()?;
    let line_listener = TcpListener::bind(line_addr).await?;
    tracing::info!("Line listener on {}", line_addr);
    tokio::spawn(async move {
        if let Err(e) = bridge::serve_lines(line_listener, events_tx).await {
            tracing::error!(error = %e, "line listener stopped");
        }
    });

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::router(AppState::new(status_rx))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let http_addr = config.http_addr()?;
    tracing::info!("Listening on {}", http_addr);
    let listener = TcpListener::bind(http_addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
