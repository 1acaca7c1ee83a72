// src/save/src/format.rs
use crate::{CONTENT_TAGS, WorldDocument};
use error::GameError;
use std::path::Path;

/// 存档格式，由文件扩展名决定
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Ron,
}

impl DocumentFormat {
    /// `.json` and `.ron` are supported. `.yaml`/`.yml` are recognised but
    /// have no codec in this build.
    pub fn from_path(path: &Path) -> Result<Self, GameError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(DocumentFormat::Json),
            "ron" if cfg!(feature = "ron") => Ok(DocumentFormat::Ron),
            "ron" => Err(GameError::CodecUnavailable("RON".into())),
            "yaml" | "yml" => Err(GameError::CodecUnavailable("YAML".into())),
            other => Err(GameError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn encode(self, document: &WorldDocument) -> Result<String, GameError> {
        match self {
            DocumentFormat::Json => serde_json::to_string_pretty(document)
                .map_err(|e| GameError::SerializationError(e.to_string())),
            #[cfg(feature = "ron")]
            DocumentFormat::Ron => {
                ron::ser::to_string_pretty(document, ron::ser::PrettyConfig::default())
                    .map_err(|e| GameError::SerializationError(e.to_string()))
            }
            #[cfg(not(feature = "ron"))]
            DocumentFormat::Ron => Err(GameError::CodecUnavailable("RON".into())),
        }
    }

    pub fn decode(self, text: &str) -> Result<WorldDocument, GameError> {
        match self {
            DocumentFormat::Json => serde_json::from_str(text)
                .map_err(|e| decode_failure(e.to_string())),
            #[cfg(feature = "ron")]
            DocumentFormat::Ron => {
                ron::from_str(text).map_err(|e| decode_failure(e.to_string()))
            }
            #[cfg(not(feature = "ron"))]
            DocumentFormat::Ron => Err(GameError::CodecUnavailable("RON".into())),
        }
    }
}

fn decode_failure(message: String) -> GameError {
    GameError::from_decode_message(message, "ContentRecord", &CONTENT_TAGS)
}
