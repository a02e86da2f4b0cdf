use thiserror::Error;

/// Errors that can occur while preparing a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to create the temporary directory or write a seed file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failed to encode or decode a seeded document.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
