use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use hanyang::broadcast::BroadcastFabric;
use hanyang::config::Config;
use hanyang::identity::{JwtConfig, JwtVerifier};
use hanyang::logging;
use hanyang::persistence::{GameStore, SqliteGameStore};
use hanyang::runtime::GameRuntime;
use hanyang::server::{self, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    logging::setup_logging(&config.log_dir);

    let store: Arc<dyn GameStore> = Arc::new(SqliteGameStore::open(&config.database_path)?);
    let fabric = BroadcastFabric::new();
    let runtime = GameRuntime::new(store, fabric).with_max_ai_turns(config.max_ai_turns);
    let identity = JwtVerifier::new(JwtConfig::from_env());

    let state = Arc::new(AppState {
        runtime,
        identity,
        action_deadline: Duration::from_millis(config.action_deadline_ms),
    });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    log::info!("listening on {addr}");

    axum::serve(listener, server::router(state)).await?;
    Ok(())
}
