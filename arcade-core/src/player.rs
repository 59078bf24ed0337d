//! Browser-side Ruffle player mount.
//!
//! The page loads `/ruffle/ruffle.js` once from its head. The mount script
//! waits for `window.RufflePlayer` with a bounded poll, creates a player,
//! loads the SWF, then sizes its container to the rendered player. If the
//! runtime never shows up the container reports that the player is
//! unavailable instead of spinning forever. The player is torn down when the
//! page is discarded, but survives a trip through the back/forward cache.

use std::time::Duration;

/// Path the Ruffle bootstrap script is served from.
pub const RUFFLE_SCRIPT_PATH: &str = "/ruffle/ruffle.js";

/// Size used when the player reports no size of its own.
pub const DEFAULT_WIDTH: u32 = 550;
pub const DEFAULT_HEIGHT: u32 = 400;

pub const PLAYER_CONTAINER_ID: &str = "player-container";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// How long to wait for the runtime before giving up.
    pub ready_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            ready_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(50),
        }
    }
}

/// A player mount for one SWF path.
#[derive(Debug, Clone)]
pub struct PlayerMount<'a> {
    swf_path: &'a str,
    config: &'a PlayerConfig,
}

const MOUNT_SCRIPT: &str = r#"(() => {
  const container = document.getElementById(__CONTAINER_ID__);
  const swfPath = __SWF_PATH__;
  const pollMs = __POLL_MS__;
  const timeoutMs = __TIMEOUT_MS__;
  let cancelled = false;
  let activePlayer = null;

  const ruffleReady = new Promise((resolve, reject) => {
    const startedAt = Date.now();
    const poll = () => {
      if (cancelled) {
        reject(new Error("cancelled"));
        return;
      }
      const ruffle = window.RufflePlayer && window.RufflePlayer.newest && window.RufflePlayer.newest();
      if (ruffle) {
        resolve(ruffle);
        return;
      }
      if (Date.now() - startedAt >= timeoutMs) {
        reject(new Error("PlayerUnavailable"));
        return;
      }
      window.setTimeout(poll, pollMs);
    };
    poll();
  });

  ruffleReady
    .then(async (ruffle) => {
      if (cancelled || !container) {
        return;
      }
      const player = ruffle.createPlayer();
      container.replaceChildren(player);
      activePlayer = player;
      await player.ruffle().load(swfPath);
      requestAnimationFrame(() => {
        if (cancelled) {
          return;
        }
        const rect = player.getBoundingClientRect();
        const width = Math.round(rect.width) > 0 ? Math.round(rect.width) : __DEFAULT_WIDTH__;
        const height = Math.round(rect.height) > 0 ? Math.round(rect.height) : __DEFAULT_HEIGHT__;
        container.style.width = `${width}px`;
        container.style.height = `${height}px`;
        player.style.width = "100%";
        player.style.height = "100%";
      });
    })
    .catch((err) => {
      if (cancelled || !container) {
        return;
      }
      console.error("Ruffle player failed to start:", err);
      container.textContent = "Player unavailable.";
    });

  window.addEventListener("pagehide", (event) => {
    // Pages kept in the back/forward cache come back with the player intact.
    if (event.persisted) {
      return;
    }
    cancelled = true;
    if (activePlayer) {
      activePlayer.remove();
    }
  });
})();"#;

impl<'a> PlayerMount<'a> {
    pub fn new(swf_path: &'a str, config: &'a PlayerConfig) -> Self {
        Self { swf_path, config }
    }

    /// Container element plus mount script, ready to embed in the page body.
    pub fn render(&self) -> String {
        format!(
            "<div class=\"player-frame\"><div id=\"{PLAYER_CONTAINER_ID}\" class=\"player-container\" \
             style=\"width: {DEFAULT_WIDTH}px; height: {DEFAULT_HEIGHT}px\"></div></div>\n\
             <script>{}</script>",
            self.script()
        )
    }

    pub fn script(&self) -> String {
        MOUNT_SCRIPT
            .replace("__CONTAINER_ID__", &script_string(PLAYER_CONTAINER_ID))
            .replace("__SWF_PATH__", &script_string(self.swf_path))
            .replace("__POLL_MS__", &self.config.poll_interval.as_millis().to_string())
            .replace("__TIMEOUT_MS__", &self.config.ready_timeout.as_millis().to_string())
            .replace("__DEFAULT_WIDTH__", &DEFAULT_WIDTH.to_string())
            .replace("__DEFAULT_HEIGHT__", &DEFAULT_HEIGHT.to_string())
    }
}

/// A JS string literal that is also safe inside a `<script>` element.
fn script_string(value: &str) -> String {
    serde_json::Value::from(value)
        .to_string()
        .replace('<', "\\u003c")
}
