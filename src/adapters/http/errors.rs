use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::value_objects::ValueObjectError as AuthValueError;
use crate::domain::invoice::{FieldErrors, InvoiceError};

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Rejected form fields (400 Bad Request)
  InvalidForm(FieldErrors),

  /// Authentication error (401 Unauthorized)
  Auth(AuthErrorKind),

  /// Missing resource (404 Not Found)
  NotFound(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

#[derive(Debug, Serialize)]
pub enum AuthErrorKind {
  InvalidCredentials,
  InvalidSession,
  InvalidToken,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::InvalidForm(errors) => write!(f, "Invalid form: {}", errors),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::NotFound(what) => write!(f, "Not found: {}", what),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) | ApiError::InvalidForm(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let (error_type, message, details) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone(), None),
      ApiError::InvalidForm(errors) => (
        "validation_error",
        "Missing Fields. Failed to Update Invoice.".to_string(),
        serde_json::to_value(errors).ok(),
      ),
      ApiError::Auth(kind) => {
        let (err_type, msg) = match kind {
          AuthErrorKind::InvalidCredentials => ("invalid_credentials", "Invalid credentials."),
          AuthErrorKind::InvalidSession => ("invalid_session", "Invalid or expired session"),
          AuthErrorKind::InvalidToken => ("invalid_token", "Invalid or missing session token"),
        };
        (err_type, msg.to_string(), None)
      }
      ApiError::NotFound(what) => ("not_found", format!("{} not found", what), None),
      ApiError::Internal(msg) => {
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
          None,
        )
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::json())
      .json(ErrorResponse {
        error: error_type.to_string(),
        message,
        details,
      })
  }
}

impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::CredentialsSignin => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      AuthError::InvalidSession | AuthError::UserNotFound => {
        ApiError::Auth(AuthErrorKind::InvalidSession)
      }
      AuthError::ValueObject(AuthValueError::InvalidToken) => {
        ApiError::Auth(AuthErrorKind::InvalidToken)
      }
      AuthError::ValueObject(AuthValueError::InvalidPasswordHash) => {
        ApiError::Internal("Stored password hash is unreadable".to_string())
      }
      AuthError::ValueObject(err) => ApiError::Validation(err.to_string()),
      AuthError::UnknownProvider(_) | AuthError::Repository(_) | AuthError::Hash(_) => {
        ApiError::Internal(error.to_string())
      }
    }
  }
}

impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match error {
      InvoiceError::Validation(errors) => ApiError::InvalidForm(errors),
      InvoiceError::ValueObject(err) => ApiError::Validation(err.to_string()),
      InvoiceError::InvoiceNotFound(_) => ApiError::NotFound("Invoice".to_string()),
      InvoiceError::Repository(_) | InvoiceError::Database(_) => {
        ApiError::Internal(error.to_string())
      }
    }
  }
}

impl From<tera::Error> for ApiError {
  fn from(error: tera::Error) -> Self {
    ApiError::Internal(format!("Template error: {}", error))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::RepositoryError;
  use actix_web::body::to_bytes;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::InvalidSession).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::NotFound("Invoice".to_string()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_auth_error_conversion() {
    let api_error: ApiError = AuthError::CredentialsSignin.into();
    assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);

    let api_error: ApiError =
      AuthError::Repository(RepositoryError::ConnectionFailed("down".to_string())).into();
    assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let api_error: ApiError = AuthError::UnknownProvider("github".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn test_invoice_error_conversion() {
    let api_error: ApiError = InvoiceError::InvoiceNotFound("i1".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError = InvoiceError::Repository("down".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[actix_web::test]
  async fn test_invalid_form_body_lists_fields() {
    let mut errors = FieldErrors::new();
    errors.add("amount", "Please enter an amount greater than $0.");

    let response = ApiError::InvalidForm(errors).error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = to_bytes(response.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
      json["details"]["amount"][0],
      "Please enter an amount greater than $0."
    );
  }

  #[actix_web::test]
  async fn test_internal_details_are_hidden() {
    let response = ApiError::Internal("password=hunter2".to_string()).error_response();
    let body = to_bytes(response.into_body()).await.unwrap();
    assert!(!String::from_utf8_lossy(&body).contains("hunter2"));
  }
}
