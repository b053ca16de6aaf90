use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FavThingsError {
    #[error("This Category already contains a FavoriteThing named '{name}'.")]
    DuplicateItem { category: String, name: String },

    #[error("Adding '{name}' would overflow the total score of category '{category}'")]
    ScoreOverflow { category: String, name: String },

    #[error("Categories file not found: {path}")]
    WhitelistNotFound { path: PathBuf },

    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Failed to process the provided favorite things source: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, FavThingsError>;

impl FavThingsError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InputNotFound { .. } => 2,
            Self::WhitelistNotFound { .. } => 3,
            Self::ConfigParse { .. } | Self::ConfigKeyNotFound { .. } => 4,
            _ => 1,
        }
    }
}
