use std::fmt;

#[derive(Debug)]
pub enum AppError {
    InvalidCredentials,
    DuplicateUser(String),
    InvalidRequest(String),
    StorageError(String),
    ExternalServiceError(String),
    BadPayload(String),
    ConfigError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidCredentials => write!(f, "Invalid email or password"),
            AppError::DuplicateUser(email) => {
                write!(f, "User with this email already exists: {}", email)
            }
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            AppError::ExternalServiceError(msg) => write!(f, "External service error: {}", msg),
            AppError::BadPayload(msg) => write!(f, "Unexpected response payload: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
