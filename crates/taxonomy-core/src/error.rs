use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Remote source '{source_name}' failed: {message}")]
    RemoteUnavailable {
        source_name: String,
        message: String,
    },

    #[error("Remote source '{source_name}' returned no documents")]
    RemoteEmpty { source_name: String },

    #[error("Malformed source document: {message}")]
    MalformedSource { message: String },

    #[error("Failed to parse config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Config key not found: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid config value for {key}: {message}")]
    InvalidConfigValue { key: String, message: String },

    #[error("No item matches '{name}'")]
    ItemNotFound { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Home directory not found")]
    HomeNotFound,
}

pub type Result<T> = std::result::Result<T, TaxonomyError>;

impl TaxonomyError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SourceNotFound { .. } => 2,
            Self::RemoteUnavailable { .. } | Self::RemoteEmpty { .. } => 3,
            Self::MalformedSource { .. } | Self::Json(_) => 4,
            Self::ConfigParse { .. }
            | Self::ConfigKeyNotFound { .. }
            | Self::InvalidConfigValue { .. } => 5,
            Self::ItemNotFound { .. } => 6,
            _ => 1,
        }
    }
}
