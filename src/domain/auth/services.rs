use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;

use crate::domain::form::FormData;

use super::entities::{Session, User};
use super::errors::AuthError;
use super::ports::{PasswordHasher, SessionRepository, SignInProvider, SignedIn, UserRepository};
use super::value_objects::{Email, Password, PasswordHash, SessionToken};

/// Provider id for email/password sign-in
pub const CREDENTIALS_PROVIDER: &str = "credentials";

#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
  pub session_ttl_seconds: i64,
  pub password_min_length: usize,
}

impl Default for AuthServiceConfig {
  fn default() -> Self {
    Self {
      session_ttl_seconds: 24 * 60 * 60,
      password_min_length: Password::DEFAULT_MIN_LENGTH,
    }
  }
}

/// Credential verification and session bookkeeping
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  config: AuthServiceConfig,
}

impl AuthService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      password_hasher,
      config,
    }
  }

  /// Creates the user unless the email is already registered
  ///
  /// # Returns
  /// `true` if a new user was inserted
  pub async fn ensure_user(
    &self,
    name: &str,
    email: &str,
    password: &str,
  ) -> Result<bool, AuthError> {
    let email = Email::new(email)?;
    let password = Password::with_min_length(password, self.config.password_min_length)?;
    let password_hash = self.password_hasher.hash(&password).await?;

    let user = User::new(
      name.to_string(),
      email.into_inner(),
      password_hash.into_inner(),
    );
    self.user_repo.create_if_absent(user).await
  }

  /// Checks an email/password pair from a submitted form.
  ///
  /// Malformed fields, unknown emails and wrong passwords are all reported as
  /// [`AuthError::CredentialsSignin`] so callers cannot tell them apart.
  async fn sign_in_with_credentials(&self, fields: &FormData) -> Result<SignedIn, AuthError> {
    let email = fields.get_text("email").and_then(|e| Email::new(e).ok());
    let password = fields
      .get_text("password")
      .and_then(|p| Password::with_min_length(p, self.config.password_min_length).ok());

    let (Some(email), Some(password)) = (email, password) else {
      tracing::debug!("Credentials failed shape validation");
      return Err(AuthError::CredentialsSignin);
    };

    let user = self
      .user_repo
      .find_by_email(&email)
      .await?
      .ok_or(AuthError::CredentialsSignin)?;

    let password_hash = PasswordHash::from_hash(user.password_hash.as_str())?;
    if !self.password_hasher.verify(&password, &password_hash).await? {
      return Err(AuthError::CredentialsSignin);
    }

    let session_token = SessionToken::generate();
    let session = Session::with_duration(
      user.id,
      session_token.hash().into_inner(),
      Duration::seconds(self.config.session_ttl_seconds),
    );
    let session = self.session_repo.create(session).await?;

    tracing::info!(user_id = %user.id, "User signed in");

    Ok(SignedIn {
      user_id: user.id,
      session_token,
      expires_at: session.expires_at,
    })
  }

  /// Resolves a session token to its user, dropping expired sessions
  pub async fn validate_session(&self, token: SessionToken) -> Result<User, AuthError> {
    let token_hash = token.hash();

    let session = self
      .session_repo
      .find_by_token_hash(token_hash.as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    if session.is_expired() {
      self.session_repo.delete(session.id).await?;
      return Err(AuthError::InvalidSession);
    }

    self
      .user_repo
      .find_by_id(session.user_id)
      .await?
      .ok_or(AuthError::UserNotFound)
  }

  /// Ends the session identified by `token`
  pub async fn sign_out(&self, token: SessionToken) -> Result<(), AuthError> {
    let token_hash = token.hash();

    let session = self
      .session_repo
      .find_by_token_hash(token_hash.as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    self.session_repo.delete(session.id).await?;
    tracing::info!(user_id = %session.user_id, "User signed out");
    Ok(())
  }
}

#[async_trait]
impl SignInProvider for AuthService {
  async fn sign_in(&self, provider: &str, fields: &FormData) -> Result<SignedIn, AuthError> {
    match provider {
      CREDENTIALS_PROVIDER => self.sign_in_with_credentials(fields).await,
      other => Err(AuthError::UnknownProvider(other.to_string())),
    }
  }
}
