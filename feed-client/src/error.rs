use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedClientError {
    // HTTP ошибки
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Бизнес-логика ошибки
    #[error("Resource not found")]
    NotFound,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Server error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // Нарушение контракта данных в записи поста
    #[error("Invalid post record {id}: {reason}")]
    InvalidRecord { id: i64, reason: String },
}

impl FeedClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FeedClientError::NotFound)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FeedClientError::Unauthorized(_))
    }
}
