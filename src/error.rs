//! Error types for configuration and startup failures.
//!
//! Gameplay outcomes (hazard contact, portal eligibility, exhausted spawn
//! cells) are ordinary state changes and never travel through this type.

use thiserror::Error;

/// Fatal conditions: each one is a build or configuration defect.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown level: {0}")]
    UnknownLevel(u32),

    #[error("missing asset: {0}")]
    MissingAsset(String),

    #[error("malformed map for level {level}: {reason}")]
    MapParse { level: u32, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("config TOML error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
