use thiserror::Error;

/// Main error type of the users context
#[derive(Debug, Error)]
pub enum UserError {
  #[error("Email already registered")]
  EmailAlreadyExists,

  #[error("User not found")]
  UserNotFound,

  #[error("Invalid credentials provided")]
  InvalidCredentials,

  #[error("Invalid or expired access token")]
  InvalidToken,

  #[error("Token error: {0}")]
  Token(String),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Transaction failed: {0}")]
  TransactionFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Errors raised while delivering notification emails
#[derive(Debug, Error)]
pub enum NotificationError {
  #[error("Invalid email address: {0}")]
  InvalidAddress(String),

  #[error("Failed to build email: {0}")]
  BuildFailed(String),

  #[error("Failed to deliver email: {0}")]
  DeliveryFailed(String),
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(
            db_err
              .constraint()
              .unwrap_or_else(|| db_err.message())
              .to_string(),
          )
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<sqlx::Error> for UserError {
  fn from(error: sqlx::Error) -> Self {
    UserError::Repository(RepositoryError::from(error))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_row_not_found_maps_to_not_found() {
    let error = RepositoryError::from(sqlx::Error::RowNotFound);
    assert!(matches!(error, RepositoryError::NotFound));
  }

  #[test]
  fn test_pool_timeout_maps_to_connection_failure() {
    let error = UserError::from(sqlx::Error::PoolTimedOut);
    assert!(matches!(
      error,
      UserError::Repository(RepositoryError::ConnectionFailed(_))
    ));
  }
}
