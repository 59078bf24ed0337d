//! Server-rendered launcher page.

use crate::player::{PlayerConfig, PlayerMount, RUFFLE_SCRIPT_PATH};
use crate::selection::Selection;
use std::fmt::Write;

/// Path the launcher page is mounted at.
pub const LAUNCHER_PATH: &str = "/game_launcher";

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#fafafa;color:#111}\
main{max-width:960px;margin:0 auto;padding:48px 24px;display:flex;flex-direction:column;gap:24px}\
h1{margin:0;font-size:2rem}\
form{display:flex;gap:12px;align-items:flex-end;flex-wrap:wrap}\
label{display:flex;flex-direction:column;gap:6px;font-weight:600}\
select,button{font:inherit;padding:8px 12px;border-radius:8px;border:1px solid #0002}\
button{background:#111;color:#fff;cursor:pointer}\
button:disabled,select:disabled{opacity:.5;cursor:not-allowed}\
.player-frame{width:100%;overflow-x:auto}\
.player-container{margin:0 auto;min-width:320px;min-height:240px;max-width:100%;resize:both;overflow:auto;border:1px solid #0002;border-radius:8px}\
.empty-state{color:#555}";

pub struct LauncherView<'a> {
    pub game_ids: &'a [String],
    pub selection: &'a Selection,
    pub player: &'a PlayerConfig,
    /// Shown in the empty state, e.g. the games directory.
    pub games_dir_label: &'a str,
}

pub fn render_launcher_page(view: &LauncherView<'_>) -> String {
    let swf_path = view.selection.swf_path();
    let selected = view.selection.game_id.as_deref();
    let disabled = if view.game_ids.is_empty() { " disabled" } else { "" };

    let mut options = String::new();
    if view.game_ids.is_empty() {
        options.push_str("<option value=\"\">No SWF files found</option>");
    }
    for id in view.game_ids {
        let marker = if Some(id.as_str()) == selected { " selected" } else { "" };
        let id = escape_html(id);
        let _ = write!(options, "<option value=\"{id}\"{marker}>{id}</option>");
    }

    let (head_script, body) = match swf_path {
        Some(ref path) => (
            format!("<script src=\"{RUFFLE_SCRIPT_PATH}\"></script>"),
            PlayerMount::new(path, view.player).render(),
        ),
        None => (
            String::new(),
            format!(
                "<p class=\"empty-state\">No SWF files found in {}.</p>",
                escape_html(view.games_dir_label)
            ),
        ),
    };

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>Game Launcher</title><style>{STYLE}</style>{head_script}</head>\n\
         <body><main><h1>Game Launcher</h1>\n\
         <form method=\"get\" action=\"{LAUNCHER_PATH}\">\
         <label for=\"game-id\">Game ID\
         <select id=\"game-id\" name=\"id\"{disabled}>{options}</select></label>\
         <button type=\"submit\"{disabled}>Launch</button></form>\n\
         {body}\n\
         </main></body></html>\n"
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
