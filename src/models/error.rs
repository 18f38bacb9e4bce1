use thiserror::Error;

#[derive(Error, Debug)]
pub enum TierError {
    #[error("Invalid tier configuration: {0}")]
    Configuration(String),

    #[error("Duplicate profile identifier: {0}")]
    DuplicateProfile(String),

    #[error("Unknown tier: {0}")]
    UnknownTier(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, TierError>;
