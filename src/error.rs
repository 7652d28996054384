//! Error types for Mailroom.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Item error: {0}")]
    Item(#[from] ItemError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Rejected item construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("Sender must not be empty")]
    EmptySender,

    #[error("Recipient must not be empty")]
    EmptyRecipient,
}

/// Content policy violation found by the auditor.
///
/// These are reported and swallowed inside the auditor; they never
/// propagate out of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentFault {
    #[error("Prohibited content: {label}")]
    Prohibited { label: String },

    #[error("Substituted content: {label}")]
    Substituted { label: String },
}

impl ContentFault {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Prohibited { .. } => "prohibited",
            Self::Substituted { .. } => "substituted",
        }
    }
}

/// Result type alias for Mailroom.
pub type Result<T> = std::result::Result<T, Error>;
