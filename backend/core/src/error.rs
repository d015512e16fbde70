use thiserror::Error;

/// Top-level error type for the deploybot runtime.
#[derive(Debug, Error)]
pub enum DeployBotError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("chat input closed: {0}")]
    InputClosed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
