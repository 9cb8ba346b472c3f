//! Error types for the rating registry
//!
//! Registry operations return the typed [`LadderError`] so callers can branch
//! on the failure kind. Application code (config loading, ladder files, the
//! CLI) uses the anyhow-based [`Result`] alias.

/// Result type alias for application-level code
pub type Result<T> = anyhow::Result<T>;

/// Result type for registry operations
pub type LadderResult<T> = std::result::Result<T, LadderError>;

/// Custom error types for specific rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LadderError {
    #[error("Player not found: {name}")]
    PlayerNotFound { name: String },

    #[error("Player already exists: {name}")]
    DuplicatePlayer { name: String },

    #[error("Rankings are turned off")]
    RankingDisabled,

    #[error("Invalid match: {reason}")]
    InvalidMatch { reason: String },

    #[error("Unknown rank: {label}")]
    InvalidRank { label: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl LadderError {
    pub(crate) fn not_found(name: &str) -> Self {
        Self::PlayerNotFound {
            name: name.to_string(),
        }
    }
}
