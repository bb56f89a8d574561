use thiserror::Error;

use crate::domain::GameId;

/// Main error type for the rankings engine
#[derive(Error, Debug)]
pub enum RankError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid weight table: {0}")]
    InvalidWeights(String),

    // Input/payload errors
    #[error("Malformed box score for game {game_id}: {reason}")]
    MalformedInput { game_id: GameId, reason: String },

    #[error("No box score payload available for game {0}")]
    MissingBoxscore(GameId),

    // Pipeline errors
    #[error("No games in ranking window")]
    EmptyWindow,

    #[error("No team produced a valid ranking row")]
    NoValidTeams,

    // Boundary errors
    #[error("Stats provider failure: {0}")]
    Provider(String),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for RankError
pub type Result<T> = std::result::Result<T, RankError>;
