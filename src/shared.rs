use thiserror::Error;

/// Errors raised by the driver layer around a lobby.
///
/// Game rule violations never show up here: the core ignores those
/// and reports them as `GameError` in the logs only.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
