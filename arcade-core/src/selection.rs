/// URL prefix the games directory is served under.
pub const SWF_ROUTE: &str = "/swf";

/// Which game the launcher shows, after applying fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub game_id: Option<String>,
}

impl Selection {
    /// Browser path of the selected SWF file, if any game is selected.
    pub fn swf_path(&self) -> Option<String> {
        self.game_id.as_deref().map(swf_path)
    }
}

/// Pick the requested id when it names a known game, else the first game.
///
/// The request comes straight from the query string, so it is trimmed and
/// unknown values are ignored without complaint.
pub fn resolve_selection(game_ids: &[String], requested: Option<&str>) -> Selection {
    let requested = requested.map(str::trim).unwrap_or_default();

    let game_id = game_ids
        .iter()
        .find(|id| !requested.is_empty() && id.as_str() == requested)
        .or_else(|| game_ids.first())
        .cloned();

    Selection { game_id }
}

pub fn swf_path(game_id: &str) -> String {
    format!("{SWF_ROUTE}/{}.swf", urlencoding::encode(game_id))
}
