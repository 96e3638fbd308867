use thiserror::Error;

use super::value_objects::ValueObjectError;

/// Authentication error type
#[derive(Debug, Error)]
pub enum AuthError {
  /// Submitted credentials were rejected. Rendered to the user, never fatal.
  #[error("CredentialsSignin")]
  CredentialsSignin,

  #[error("Unknown sign-in provider: {0}")]
  UnknownProvider(String),

  #[error("Invalid or expired session")]
  InvalidSession,

  #[error("User not found")]
  UserNotFound,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Value object error: {0}")]
  ValueObject(#[from] ValueObjectError),
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
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

impl From<sqlx::Error> for AuthError {
  fn from(error: sqlx::Error) -> Self {
    AuthError::Repository(RepositoryError::from(error))
  }
}
