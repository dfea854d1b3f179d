//! Error types for the empathy engine.

/// Top-level error type for the emotion analysis service.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Model download or loading error.
    #[error("model error: {0}")]
    Model(String),

    /// Emotion classification (tokenization or inference) error.
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP server error (bind, serve).
    #[error("server error: {0}")]
    Server(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, EngineError>;
