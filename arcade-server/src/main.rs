use arcade_core::game_library::scan_game_ids;
use arcade_core::player::PlayerConfig;
use arcade_core::routes::{create_router, AppState};
use arcade_core::runtime_assets::RuntimeAssets;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// arcade server — lists SWF games and plays them in the browser with Ruffle.
#[derive(Parser)]
#[command(name = "arcade-server")]
struct Args {
    /// Directory holding the playable `.swf` files.
    #[arg(long, default_value = "public/swf", env = "ARCADE_GAMES_DIR")]
    games_dir: PathBuf,

    /// Directory of the Ruffle web distribution (ruffle.js and its wasm).
    #[arg(
        long,
        default_value = "node_modules/@ruffle-rs/ruffle",
        env = "ARCADE_RUFFLE_DIR"
    )]
    ruffle_dir: PathBuf,

    /// Port for the launcher server.
    #[arg(long, default_value = "4540", env = "ARCADE_PORT")]
    port: u16,

    /// Address to bind the server to.
    #[arg(long, default_value = "0.0.0.0", env = "ARCADE_BIND")]
    bind: String,

    /// Seconds the browser waits for the Ruffle runtime before giving up.
    #[arg(long, default_value = "10", env = "ARCADE_PLAYER_TIMEOUT_SECS")]
    player_timeout_secs: u64,
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() {
    configure_logging();
    let args = Args::parse();

    info!("arcade-server starting");

    let runtime_assets = RuntimeAssets::new(&args.ruffle_dir).unwrap_or_else(|e| {
        error!(
            "Failed to resolve Ruffle directory {}: {e}",
            args.ruffle_dir.display()
        );
        std::process::exit(1);
    });

    if !runtime_assets.base_dir().is_dir() {
        error!(
            "Ruffle directory not found at {}",
            runtime_assets.base_dir().display()
        );
        error!("Install @ruffle-rs/ruffle or pass --ruffle-dir");
        std::process::exit(1);
    }
    info!("Serving Ruffle from {}", runtime_assets.base_dir().display());

    // An empty or missing games directory is fine, the page shows an empty state.
    match scan_game_ids(&args.games_dir).await {
        Ok(ids) => info!(
            "Found {} games in {}",
            ids.len(),
            args.games_dir.display()
        ),
        Err(e) => warn!("{e}; the launcher will show no games"),
    }

    let state = Arc::new(AppState {
        runtime_assets,
        games_dir: args.games_dir.clone(),
        player: PlayerConfig {
            ready_timeout: Duration::from_secs(args.player_timeout_secs),
            ..PlayerConfig::default()
        },
    });

    let app = create_router(state);
    let addr = format!("{}:{}", args.bind, args.port);

    info!("Binding to {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            error!("Failed to bind to {addr}: {e}");
            std::process::exit(1);
        });

    info!("arcade-server listening on http://{addr}/game_launcher");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
