use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::game_library::list_game_ids;
use crate::page::{render_launcher_page, LauncherView, LAUNCHER_PATH};
use crate::player::PlayerConfig;
use crate::runtime_assets::{Asset, AssetError, RuntimeAssets};
use crate::selection::{resolve_selection, SWF_ROUTE};

/// Shared, read-only server state. Built once at startup.
pub struct AppState {
    pub runtime_assets: RuntimeAssets,
    pub games_dir: PathBuf,
    pub player: PlayerConfig,
}

#[derive(Deserialize)]
struct LauncherQuery {
    id: Option<String>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let swf_files = ServeDir::new(&state.games_dir);

    Router::new()
        .route("/", get(|| async { Redirect::permanent(LAUNCHER_PATH) }))
        .route(LAUNCHER_PATH, get(launcher_page))
        .route("/ruffle/:asset", get(runtime_asset))
        .route("/health", get(health))
        .nest_service(SWF_ROUTE, swf_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn launcher_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LauncherQuery>,
) -> Response {
    // An empty choice from the form means "no preference".
    if query.id.as_deref().is_some_and(|id| id.trim().is_empty()) {
        return Redirect::to(LAUNCHER_PATH).into_response();
    }

    let game_ids = list_game_ids(&state.games_dir).await;
    let selection = resolve_selection(&game_ids, query.id.as_deref());
    let games_dir_label = state.games_dir.display().to_string();

    debug!(
        "Launcher: {} games, selected {:?}",
        game_ids.len(),
        selection.game_id
    );

    Html(render_launcher_page(&LauncherView {
        game_ids: &game_ids,
        selection: &selection,
        player: &state.player,
        games_dir_label: &games_dir_label,
    }))
    .into_response()
}

async fn runtime_asset(
    State(state): State<Arc<AppState>>,
    Path(asset): Path<String>,
) -> Result<Asset, AssetError> {
    state.runtime_assets.serve(&asset).await
}

async fn health(State(state): State<Arc<AppState>>) -> Response {
    let games = list_game_ids(&state.games_dir).await.len();

    let body = serde_json::json!({
        "status": "ok",
        "games": games,
    });

    (
        StatusCode::OK,
        [("content-type", "application/json")],
        body.to_string(),
    )
        .into_response()
}
