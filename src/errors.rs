use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("VALIDATION: {0}")]
    Validation(String),
    #[error("DUPLICATE_NAME: {0}")]
    DuplicateName(String),
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
}

pub type AppResult<T> = Result<T, AppError>;
