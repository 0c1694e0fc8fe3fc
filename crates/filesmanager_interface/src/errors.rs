use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    ConnectionError { msg: String },
    NotReadyError { msg: String },
    QueryError { msg: String },
    ConfigError { msg: String },
}

pub type Result<T> = std::result::Result<T, AppError>;

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ConnectionError { msg } => write!(f, "Database Connection Error: '{}'", msg),
            AppError::NotReadyError { msg } => write!(f, "Database Not Ready: '{}'", msg),
            AppError::QueryError { msg } => write!(f, "Database Query Error: '{}'", msg),
            AppError::ConfigError { msg } => write!(f, "Configuration Error: '{}'", msg),
        }
    }
}
