//! Timesheet - multi-timer stopwatch with hourly billing
//! 
//! This is the main entry point: `serve` runs the storage server, `run`
//! runs a terminal timer session against it.

use std::{path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use timesheet::{
    api::{create_router, StorageState},
    config::{session_config, Config, Mode},
    state::AppState,
    store::HttpStore,
    ui::{run_session, SessionConfig},
    utils::shutdown_signal,
};

async fn serve(address: String, public_dir: PathBuf) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&public_dir).await?;
    let state = Arc::new(StorageState::new(public_dir));

    let app = create_router(Arc::clone(&state));
    let listener = TcpListener::bind(&address).await?;

    info!("Timer server listening on http://{}", address);
    info!("Endpoints:");
    info!("  POST /timers      - Overwrite {}", state.document_path.display());
    info!("  GET  /timers.json - Read the saved timers");
    info!("  GET  /*           - Static files from {}", state.public_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn run(server: String, session: SessionConfig) -> anyhow::Result<()> {
    info!(
        "Starting timer session against {} (autosave every {:?})",
        server, session.autosave_period
    );

    let state = Arc::new(AppState::with_system_clock());
    let store = Arc::new(HttpStore::new(server)?);
    run_session(state, store, session).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("timesheet={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting timesheet v{}", env!("CARGO_PKG_VERSION"));

    match config.command {
        Mode::Serve {
            port,
            host,
            public_dir,
        } => serve(format!("{}:{}", host, port), public_dir).await,
        Mode::Run {
            server,
            autosave_secs,
            tick_ms,
        } => run(server, session_config(autosave_secs, tick_ms)).await,
    }
}
