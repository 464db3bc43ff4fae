#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message intended for API clients, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            CoreError::NotFound(msg)
            | CoreError::Validation(msg)
            | CoreError::Unauthorized(msg)
            | CoreError::Internal(msg) => msg,
        }
    }
}
