//! Serving the Ruffle player's runtime files from one fixed directory.
//!
//! A request names a single file. The name is checked against an allow-list,
//! resolved inside the base directory, and read whole. Nothing is cached
//! server side; browsers may cache forever since the files are versioned.

use crate::content_type::ContentType;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

pub const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Invalid asset name.")]
    InvalidAssetName,
    #[error("Invalid asset path.")]
    InvalidAssetPath,
    #[error("Asset not found.")]
    AssetNotFound(#[source] std::io::Error),
}

impl AssetError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidAssetName | Self::InvalidAssetPath => StatusCode::BAD_REQUEST,
            Self::AssetNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AssetError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// A runtime file ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub bytes: Vec<u8>,
    pub content_type: ContentType,
    pub cache_control: &'static str,
}

impl IntoResponse for Asset {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, self.content_type.as_str()),
                (header::CACHE_CONTROL, self.cache_control),
            ],
            self.bytes,
        )
            .into_response()
    }
}

fn asset_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9._-]+$").unwrap())
}

/// Read-only view of the Ruffle distribution directory.
#[derive(Clone, Debug)]
pub struct RuntimeAssets {
    base_dir: PathBuf,
}

impl RuntimeAssets {
    /// Relative directories are anchored at the current working directory.
    pub fn new(base_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let base_dir = base_dir.as_ref();
        let absolute = if base_dir.is_absolute() {
            base_dir.to_path_buf()
        } else {
            std::env::current_dir()?.join(base_dir)
        };
        Ok(Self {
            base_dir: normalize(&absolute),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Validate `asset_name` and map it to a path under the base directory.
    /// Does not touch the filesystem.
    pub fn resolve(&self, asset_name: &str) -> Result<PathBuf, AssetError> {
        if !asset_name_pattern().is_match(asset_name) {
            return Err(AssetError::InvalidAssetName);
        }

        let resolved = normalize(&self.base_dir.join(asset_name));

        if !resolved.starts_with(&self.base_dir) {
            warn!("Rejected runtime asset {asset_name:?}: resolves outside base directory");
            return Err(AssetError::InvalidAssetPath);
        }

        Ok(resolved)
    }

    pub async fn serve(&self, asset_name: &str) -> Result<Asset, AssetError> {
        let path = self.resolve(asset_name)?;

        debug!("Serving runtime asset {}", path.display());

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            debug!("Runtime asset {} unreadable: {e}", path.display());
            AssetError::AssetNotFound(e)
        })?;

        Ok(Asset {
            bytes,
            content_type: ContentType::from_path(asset_name),
            cache_control: CACHE_CONTROL,
        })
    }
}

/// Lexically normalize a path: drop `.`, let `..` pop the previous
/// component. Never climbs above the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, RuntimeAssets) {
        let temp_dir = tempfile::tempdir().unwrap();
        let base = temp_dir.path().join("ruffle");
        std::fs::create_dir(&base).unwrap();
        std::fs::write(base.join("ruffle.js"), b"window.RufflePlayer = {};").unwrap();
        std::fs::write(base.join("core.wasm"), [0x00, 0x61, 0x73, 0x6d]).unwrap();
        std::fs::write(base.join("blob.bin2"), b"opaque").unwrap();
        let assets = RuntimeAssets::new(&base).unwrap();
        (temp_dir, assets)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/a/./b/")), PathBuf::from("/a/b"));
        assert_eq!(normalize(Path::new("/a/b/..")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("/a/...")), PathBuf::from("/a/..."));
    }

    #[test]
    fn test_relative_base_dir_is_made_absolute() {
        let assets = RuntimeAssets::new("node_modules/./@ruffle-rs/ruffle").unwrap();
        assert!(assets.base_dir().is_absolute());
        assert!(assets.base_dir().ends_with("node_modules/@ruffle-rs/ruffle"));
    }

    #[tokio::test]
    async fn test_rejects_names_outside_allow_list() {
        // The base directory does not exist, so any filesystem access would
        // surface as AssetNotFound instead.
        let assets = RuntimeAssets::new("/definitely/not/here").unwrap();
        for name in [
            "",
            "../secret",
            "a/b.js",
            "a\\b.js",
            "ruffle.js\0",
            "ruffle js",
            "rüffle.js",
            "%2e%2e",
            "ruffle.js?x=1",
        ] {
            let err = assets.serve(name).await.unwrap_err();
            assert!(
                matches!(err, AssetError::InvalidAssetName),
                "{name:?} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_rejects_names_resolving_outside_base() {
        let (_tmp, assets) = fixture();
        let err = assets.serve("..").await.unwrap_err();
        assert!(matches!(err, AssetError::InvalidAssetPath), "gave {err:?}");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid asset path.");
    }

    #[tokio::test]
    async fn test_base_directory_itself_is_not_found() {
        let (_tmp, assets) = fixture();
        assert_eq!(assets.resolve(".").unwrap(), assets.base_dir());

        let err = assets.serve(".").await.unwrap_err();
        assert!(matches!(err, AssetError::AssetNotFound(_)), "gave {err:?}");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sibling_directory_sharing_prefix_is_unreachable() {
        let (tmp, assets) = fixture();
        let sibling = tmp.path().join("ruffle-evil");
        std::fs::create_dir(&sibling).unwrap();
        std::fs::write(sibling.join("x.js"), b"stolen").unwrap();

        for name in ["x.js", "ruffle-evil", "..", "-evil", "...x.js"] {
            if let Ok(path) = assets.resolve(name) {
                assert!(!path.starts_with(&sibling), "{name:?} reached {path:?}");
            }
            match assets.serve(name).await {
                Ok(asset) => panic!("{name:?} served {} bytes", asset.bytes.len()),
                Err(AssetError::InvalidAssetPath | AssetError::AssetNotFound(_)) => {}
                Err(e) => panic!("{name:?} gave {e:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_serves_exact_bytes_with_content_type() {
        let (_tmp, assets) = fixture();

        let wasm = assets.serve("core.wasm").await.unwrap();
        assert_eq!(wasm.bytes, vec![0x00, 0x61, 0x73, 0x6d]);
        assert_eq!(wasm.content_type.as_str(), "application/wasm");
        assert_eq!(wasm.cache_control, CACHE_CONTROL);

        let js = assets.serve("ruffle.js").await.unwrap();
        assert_eq!(js.bytes, b"window.RufflePlayer = {};");
        assert_eq!(js.content_type, ContentType::JavaScript);

        let other = assets.serve("blob.bin2").await.unwrap();
        assert_eq!(other.content_type.as_str(), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let (_tmp, assets) = fixture();
        let err = assets.serve("missing.js").await.unwrap_err();
        assert!(matches!(err, AssetError::AssetNotFound(_)));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Asset not found.");
    }

    #[tokio::test]
    async fn test_directory_is_not_found() {
        let (_tmp, assets) = fixture();
        std::fs::create_dir(assets.base_dir().join("sub")).unwrap();
        let err = assets.serve("sub").await.unwrap_err();
        assert!(matches!(err, AssetError::AssetNotFound(_)));
    }

    #[tokio::test]
    async fn test_serving_is_idempotent() {
        let (_tmp, assets) = fixture();
        let first = assets.serve("ruffle.js").await.unwrap();
        let second = assets.serve("ruffle.js").await.unwrap();
        assert_eq!(first, second);
    }
}
