//! Error types for doorkeep.

use thiserror::Error;

/// Common error type for doorkeep.
#[derive(Error, Debug)]
pub enum DoorkeepError {
    /// Database error.
    ///
    /// Generic database error wrapping failures from the store backend.
    /// Errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// A store-level uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for DoorkeepError {
    fn from(e: sqlx::Error) -> Self {
        DoorkeepError::Database(e.to_string())
    }
}

/// Result type alias for doorkeep operations.
pub type Result<T> = std::result::Result<T, DoorkeepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_display() {
        let err = DoorkeepError::Database("connection lost".to_string());
        assert_eq!(err.to_string(), "database error: connection lost");
    }

    #[test]
    fn test_conflict_error_display() {
        let err = DoorkeepError::Conflict("email already registered".to_string());
        assert_eq!(err.to_string(), "conflict: email already registered");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = DoorkeepError::NotFound("user".to_string());
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_config_error_display() {
        let err = DoorkeepError::Config("bad url".to_string());
        assert_eq!(err.to_string(), "configuration error: bad url");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DoorkeepError = io_err.into();
        assert!(matches!(err, DoorkeepError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(DoorkeepError::NotFound("user".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
