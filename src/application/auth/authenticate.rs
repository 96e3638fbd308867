use std::sync::Arc;

use crate::application::outcome::Redirect;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::{SignInProvider, SignedIn};
use crate::domain::auth::services::CREDENTIALS_PROVIDER;
use crate::domain::form::FormData;

/// Signal returned to the login form when credentials are rejected
pub const CREDENTIAL_SIGNIN: &str = "CredentialSignin";

/// Where a fresh session lands
const SIGNED_IN_REDIRECT: &str = "/dashboard";

#[derive(Debug)]
pub enum AuthenticateOutcome {
  /// Session established; the caller attaches the token and navigates
  SignedIn { session: SignedIn, redirect: Redirect },
  /// Credentials rejected; the signal is shown on the form
  Rejected(&'static str),
}

/// Forwards a login form to the credentials provider
pub struct AuthenticateUseCase {
  provider: Arc<dyn SignInProvider>,
}

impl AuthenticateUseCase {
  pub fn new(provider: Arc<dyn SignInProvider>) -> Self {
    Self { provider }
  }

  /// # Errors
  /// Any provider failure other than rejected credentials is returned as-is
  /// and must be treated as fatal by the caller.
  pub async fn execute(&self, form: &FormData) -> Result<AuthenticateOutcome, AuthError> {
    match self.provider.sign_in(CREDENTIALS_PROVIDER, form).await {
      Ok(session) => Ok(AuthenticateOutcome::SignedIn {
        session,
        redirect: Redirect::to(SIGNED_IN_REDIRECT),
      }),
      Err(AuthError::CredentialsSignin) => {
        tracing::info!("Sign-in rejected");
        Ok(AuthenticateOutcome::Rejected(CREDENTIAL_SIGNIN))
      }
      Err(e) => {
        tracing::error!("Sign-in provider failed: {}", e);
        Err(e)
      }
    }
  }
}
