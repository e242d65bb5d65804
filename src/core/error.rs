use thiserror::Error;

use crate::core::types::PlayerId;

#[derive(Error, Debug)]
pub enum HeavenError {
    #[error("Player already registered: {0}")]
    PlayerAlreadyRegistered(PlayerId),

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDeError(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HeavenError>;
