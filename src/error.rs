//! Error types for highlighting

use thiserror::Error;

/// Result type alias for highlighting operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighting error types
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] fancy_regex::Error),

    #[error("Unknown pattern type: {0}")]
    UnknownPatternType(String),

    #[error("No such definition: {0}")]
    UnknownDefinition(String),

    #[error("Duplicate pattern `{pattern}` in definition `{definition}`")]
    DuplicatePattern { definition: String, pattern: String },

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error("Invalid pattern name `{0}`: must be alphanumeric and start with a letter")]
    InvalidPatternName(String),

    #[error("Unknown color: {0}")]
    UnknownColor(String),

    #[error("Unknown font style: {0}")]
    UnknownFontStyle(String),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl HighlightError {
    /// True for errors caused by the configuration rather than the input
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            HighlightError::Toml(_)
                | HighlightError::UnknownPatternType(_)
                | HighlightError::UnknownDefinition(_)
                | HighlightError::DuplicatePattern { .. }
                | HighlightError::DuplicateDefinition(_)
                | HighlightError::InvalidPatternName(_)
                | HighlightError::UnknownColor(_)
                | HighlightError::UnknownFontStyle(_)
                | HighlightError::UnknownFormat(_)
                | HighlightError::Config(_)
        )
    }
}
