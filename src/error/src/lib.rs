//! 游戏错误处理模块
//!
//! Errors raised while generating a dungeon, resolving references between its
//! rooms, and reading or writing a saved world.

use thiserror::Error;

/// 游戏运行过程中可能出现的错误类型
#[derive(Debug, Error)]
pub enum GameError {
    /// IO操作错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 反序列化错误
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// Document carries a content tag outside the closed schema.
    #[error("Unknown content discriminator: {0}")]
    UnknownContent(String),

    /// File extension does not name a known document format.
    #[error("Unsupported save format: {0}")]
    UnsupportedFormat(String),

    /// Format is known but no codec for it is compiled in.
    #[error("No codec available for {0} documents")]
    CodecUnavailable(String),

    /// 存档数据损坏
    #[error("Corrupted save data: {0}")]
    CorruptedSave(String),

    /// 游戏版本不兼容
    #[error("Incompatible save version: {0}")]
    VersionMismatch(String),

    #[error("Invalid map dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Room count must be positive")]
    InvalidRoomCount,

    #[error("Explorer hit points must be positive")]
    InvalidHp,

    /// 地图数据无效
    #[error("Map has no entry room")]
    MissingEntry,

    #[error("No room at ({0}, {1})")]
    UnknownRoom(i32, i32),

    #[error("Content has already been distributed")]
    AlreadyDistributed,

    /// A handle points at a different graph instance than the one in use.
    #[error("Stale reference: {0}")]
    StaleReference(String),
}

impl GameError {
    /// Classifies a decoder message. serde reports an unrecognised enum tag
    /// as "unknown variant `X`"; it only counts as unknown content when the
    /// message is about the content enum, named by `enum_name` or by one of
    /// its `tags`. Bad tags of any other enum stay a plain decode error.
    pub fn from_decode_message(message: impl Into<String>, enum_name: &str, tags: &[&str]) -> Self {
        // serde_json and ron word an unrecognised tag differently
        const MARKERS: [&str; 2] = ["unknown variant `", "variant named `"];
        let message = message.into();
        let about_content = message.contains(&format!("`{}`", enum_name))
            || tags.iter().any(|t| message.contains(&format!("`{}`", t)));
        let found = MARKERS
            .iter()
            .find_map(|m| message.find(m).map(|start| start + m.len()));
        match found {
            Some(start) if about_content => {
                let tag = message[start..].split('`').next().unwrap_or_default();
                GameError::UnknownContent(tag.to_string())
            }
            _ => GameError::DeserializationError(message),
        }
    }
}

/// 处理游戏错误并转换为用户友好的消息
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::CorruptedSave(_) => "Save data is corrupted and cannot be loaded".to_string(),
        GameError::VersionMismatch(v) => format!("Save version is not compatible: {}", v),
        GameError::UnsupportedFormat(ext) => {
            format!("Unsupported save format '{}' (use .json or .ron)", ext)
        }
        GameError::CodecUnavailable(format) => {
            format!("This build cannot read or write {} saves", format)
        }
        GameError::IoError(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "Save file does not exist".to_string(),
            std::io::ErrorKind::PermissionDenied => {
                "No permission to access the save file".to_string()
            }
            _ => format!("IO error: {}", e),
        },
        _ => error.to_string(),
    }
}
