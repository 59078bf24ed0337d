//! Scanning the games directory for playable SWF files.
//!
//! Every `*.swf` file (any case) in the directory becomes a game id: the
//! file name with the suffix stripped. Ids are recomputed on every call.

use icu_collator::{Collator, CollatorOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const SWF_SUFFIX: &str = ".swf";

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Games directory {path} is unreadable: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// List game ids in `directory`, sorted for display.
///
/// A missing or unreadable directory yields an empty list: having no games
/// is a valid deployment state, not an error.
pub async fn list_game_ids(directory: &Path) -> Vec<String> {
    match scan_game_ids(directory).await {
        Ok(ids) => ids,
        Err(LibraryError::DirectoryUnreadable { path, source })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            debug!("Games directory {} does not exist", path.display());
            Vec::new()
        }
        Err(e) => {
            warn!("{e}");
            Vec::new()
        }
    }
}

/// Like [`list_game_ids`], but surfaces the directory read error.
pub async fn scan_game_ids(directory: &Path) -> Result<Vec<String>, LibraryError> {
    let unreadable = |source: std::io::Error| LibraryError::DirectoryUnreadable {
        path: directory.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(directory).await.map_err(unreadable)?;
    let mut ids = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(unreadable)? {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            debug!("Skipping non UTF-8 file name {:?}", file_name);
            continue;
        };
        let Some(id) = strip_swf_suffix(name) else {
            continue;
        };

        // Follows symlinks, so a link to a SWF elsewhere still counts.
        match tokio::fs::metadata(entry.path()).await {
            Ok(meta) if meta.is_file() => ids.push(id.to_string()),
            Ok(_) => debug!("Skipping {name}: not a regular file"),
            Err(e) => debug!("Skipping {name}: {e}"),
        }
    }

    sort_game_ids(&mut ids);
    Ok(ids)
}

/// Strip a trailing `.swf` (any case), returning the non-empty stem.
fn strip_swf_suffix(name: &str) -> Option<&str> {
    let split = name.len().checked_sub(SWF_SUFFIX.len())?;
    let (stem, suffix) = (name.get(..split)?, name.get(split..)?);
    if !suffix.eq_ignore_ascii_case(SWF_SUFFIX) || stem.is_empty() {
        return None;
    }
    Some(stem)
}

/// Sort ids with the root-locale collator, the order browsers use for
/// `localeCompare`: accents sit next to their base letter, punctuation
/// before digits, lowercase before uppercase on ties.
pub fn sort_game_ids(ids: &mut [String]) {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => ids.sort_by(|a, b| collator.compare(a, b).then_with(|| a.cmp(b))),
        Err(e) => {
            warn!("Collator unavailable ({e}), sorting game ids by code point");
            ids.sort();
        }
    }
}
