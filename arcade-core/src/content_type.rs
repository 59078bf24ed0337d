use std::path::Path;

/// Content type for files shipped in the Ruffle distribution.
///
/// Anything not in the table is served as `application/octet-stream`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentType {
    JavaScript,
    SourceMap,
    Wasm,
    Markdown,
    PlainText,
    OctetStream,
}

impl ContentType {
    /// MIME type string sent in the `Content-Type` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JavaScript => "application/javascript; charset=utf-8",
            Self::SourceMap => "application/json; charset=utf-8",
            Self::Wasm => "application/wasm",
            Self::Markdown => "text/markdown; charset=utf-8",
            Self::PlainText => "text/plain; charset=utf-8",
            Self::OctetStream => "application/octet-stream",
        }
    }

    /// Map a file extension (without the dot) to its content type.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "js" => Self::JavaScript,
            "map" => Self::SourceMap,
            "wasm" => Self::Wasm,
            "md" => Self::Markdown,
            "txt" => Self::PlainText,
            _ => Self::OctetStream,
        }
    }

    /// Content type of a file name, judged by its last extension.
    ///
    /// Dotfiles like `.wasm` have no extension and fall back to binary.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::OctetStream)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_extension_runtime_files() {
        assert_eq!(ContentType::from_extension("js"), ContentType::JavaScript);
        assert_eq!(ContentType::from_extension("wasm"), ContentType::Wasm);
        assert_eq!(ContentType::from_extension("map"), ContentType::SourceMap);
    }

    #[test]
    fn from_extension_is_case_insensitive() {
        assert_eq!(ContentType::from_extension("WASM"), ContentType::Wasm);
        assert_eq!(ContentType::from_extension("Js"), ContentType::JavaScript);
        assert_eq!(ContentType::from_extension("TXT"), ContentType::PlainText);
    }

    #[test]
    fn from_extension_unknown_is_binary() {
        assert_eq!(ContentType::from_extension("swf"), ContentType::OctetStream);
        assert_eq!(ContentType::from_extension(""), ContentType::OctetStream);
    }

    #[test]
    fn from_path_uses_last_extension() {
        assert_eq!(ContentType::from_path("ruffle.js"), ContentType::JavaScript);
        assert_eq!(ContentType::from_path("core.ruffle.abc123.wasm"), ContentType::Wasm);
        assert_eq!(ContentType::from_path("ruffle.js.map"), ContentType::SourceMap);
        assert_eq!(ContentType::from_path("LICENSE"), ContentType::OctetStream);
        assert_eq!(ContentType::from_path(".wasm"), ContentType::OctetStream);
    }

    #[test]
    fn mime_strings() {
        assert_eq!(ContentType::Wasm.as_str(), "application/wasm");
        assert_eq!(
            ContentType::JavaScript.to_string(),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(ContentType::OctetStream.as_str(), "application/octet-stream");
    }
}
