//! Error types for repository operations.

use thiserror::Error;

/// Main error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database operation error from diesel
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    /// Connection pool error
    #[error("Pool error: {0}")]
    Pool(String),

    /// Entity not found error
    #[error("Not found: {entity}")]
    NotFound {
        /// The type of entity that was not found
        entity: String,
    },

    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RepositoryError {
    /// Create a new NotFound error for the given entity type.
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    /// Create a new InvalidInput error with the given message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Check if this error represents a not found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is due to a database constraint violation.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Database(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation
                    | diesel::result::DatabaseErrorKind::ForeignKeyViolation,
                _
            ))
        )
    }
}

/// Type alias for Results that may fail with RepositoryError
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = RepositoryError::not_found("User");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: User");

        let err = RepositoryError::invalid_input("Invalid amount");
        assert_eq!(err.to_string(), "Invalid input: Invalid amount");

        let err = RepositoryError::Pool("Connection failed".to_string());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_constraint_violation_detection() {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let err = RepositoryError::Database(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_string()),
        ));
        assert!(err.is_constraint_violation());

        let err = RepositoryError::Database(DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("foreign key violation".to_string()),
        ));
        assert!(err.is_constraint_violation());

        let err = RepositoryError::Database(DieselError::NotFound);
        assert!(!err.is_constraint_violation());
    }
}
