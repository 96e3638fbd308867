use super::validation::FieldErrors;
use super::value_objects::ValueObjectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(FieldErrors),

  #[error("Invalid value: {0}")]
  ValueObject(#[from] ValueObjectError),

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(String),

  #[error("Repository error: {0}")]
  Repository(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
