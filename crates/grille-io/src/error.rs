use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON workbook error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{backend} backend error: {message}")]
    Backend { backend: String, message: String },

    #[error("sheet `{0}` not found")]
    SheetNotFound(String),
}

impl IoError {
    pub fn from_backend(backend: impl Into<String>, err: impl std::error::Error) -> Self {
        IoError::Backend {
            backend: backend.into(),
            message: err.to_string(),
        }
    }
}
