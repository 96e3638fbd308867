use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::form::FormData;

use super::entities::{Session, User};
use super::errors::AuthError;
use super::value_objects::{Email, Password, PasswordHash, SessionToken};

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Inserts the user unless the email is already taken; returns whether a row was added
  async fn create_if_absent(&self, user: User) -> Result<bool, AuthError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;
}

/// Repository trait for session persistence operations
#[async_trait]
pub trait SessionRepository: Send + Sync {
  async fn create(&self, session: Session) -> Result<Session, AuthError>;

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError>;

  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}

/// Established session handed back by a sign-in provider
#[derive(Debug, Clone)]
pub struct SignedIn {
  pub user_id: Uuid,
  pub session_token: SessionToken,
  pub expires_at: DateTime<Utc>,
}

/// External sign-in mechanism keyed by provider id.
///
/// Rejected credentials must surface as [`AuthError::CredentialsSignin`];
/// any other error is a system failure.
#[async_trait]
pub trait SignInProvider: Send + Sync {
  async fn sign_in(&self, provider: &str, fields: &FormData) -> Result<SignedIn, AuthError>;
}
