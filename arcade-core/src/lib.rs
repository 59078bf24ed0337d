pub mod content_type;
pub mod game_library;
pub mod page;
pub mod player;
pub mod routes;
pub mod runtime_assets;
pub mod selection;
