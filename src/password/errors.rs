use thiserror::Error;

/// Error type for password and opaque-secret operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
