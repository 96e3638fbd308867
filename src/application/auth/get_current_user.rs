use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// Signed-in user as seen by the web layer
#[derive(Debug, Clone)]
pub struct GetCurrentUserResponse {
  pub user_id: Uuid,
  pub name: String,
  pub email: String,
}

/// Use case for resolving the session cookie to a user
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// # Errors
  /// Returns `AuthError` for malformed, unknown or expired tokens
  pub async fn execute(&self, session_token: String) -> Result<GetCurrentUserResponse, AuthError> {
    let token = SessionToken::from_string(session_token)?;
    let user = self.auth_service.validate_session(token).await?;

    Ok(GetCurrentUserResponse {
      user_id: user.id,
      name: user.name,
      email: user.email,
    })
  }
}
