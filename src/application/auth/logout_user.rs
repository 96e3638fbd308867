use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// Use case for ending a browser session
pub struct LogoutUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LogoutUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// # Errors
  /// Returns `AuthError` if the token is malformed or names no session
  pub async fn execute(&self, session_token: String) -> Result<(), AuthError> {
    let token = SessionToken::from_string(session_token)?;
    self.auth_service.sign_out(token).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::ports::SignInProvider;
  use crate::domain::auth::services::CREDENTIALS_PROVIDER;
  use crate::domain::form::FormData;
  use crate::test_support::{InMemorySessionRepository, InMemoryUserRepository, auth_service};

  #[tokio::test]
  async fn test_logout_removes_session() {
    let sessions = Arc::new(InMemorySessionRepository::default());
    let service = Arc::new(auth_service(
      Arc::new(InMemoryUserRepository::default()),
      sessions.clone(),
    ));
    service
      .ensure_user("User", "user@nextmail.com", "123456")
      .await
      .unwrap();
    let form = FormData::new()
      .with_text("email", "user@nextmail.com")
      .with_text("password", "123456");
    let signed_in = service.sign_in(CREDENTIALS_PROVIDER, &form).await.unwrap();

    LogoutUserUseCase::new(service)
      .execute(signed_in.session_token.into_inner())
      .await
      .unwrap();

    assert_eq!(sessions.len(), 0);
  }

  #[tokio::test]
  async fn test_logout_with_malformed_token() {
    let service = Arc::new(auth_service(
      Arc::new(InMemoryUserRepository::default()),
      Arc::new(InMemorySessionRepository::default()),
    ));

    assert!(matches!(
      LogoutUserUseCase::new(service)
        .execute("garbage".to_string())
        .await,
      Err(AuthError::ValueObject(_))
    ));
  }
}
