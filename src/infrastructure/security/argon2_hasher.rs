use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::errors::{AuthError, HashError};
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};

/// Argon2id hasher (19 MiB memory, 2 iterations, 1 lane)
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  const MEMORY_COST_KIB: u32 = 19456;
  const TIME_COST: u32 = 2;
  const PARALLELISM: u32 = 1;

  pub fn new() -> Result<Self, AuthError> {
    let params = Params::new(
      Self::MEMORY_COST_KIB,
      Self::TIME_COST,
      Self::PARALLELISM,
      Some(32),
    )
    .map_err(|e| HashError::HashingFailed(format!("Failed to create Argon2 params: {}", e)))?;

    Ok(Self {
      argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
    })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    let hash = self
      .argon2
      .hash_password(password.as_str().as_bytes(), &salt)
      .map_err(|e| HashError::HashingFailed(e.to_string()))?;

    PasswordHash::from_hash(hash.to_string())
      .map_err(|e| HashError::HashingFailed(format!("Invalid hash format: {}", e)).into())
  }

  /// Returns `Ok(false)` on mismatch; errors only for unusable hashes
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError> {
    let parsed_hash = Argon2PasswordHash::new(hashed_password.as_str())
      .map_err(|e| HashError::VerificationFailed(format!("Invalid hash format: {}", e)))?;

    match self
      .argon2
      .verify_password(password.as_str().as_bytes(), &parsed_hash)
    {
      Ok(_) => Ok(true),
      Err(argon2::password_hash::Error::Password) => Ok(false),
      Err(e) => Err(HashError::VerificationFailed(e.to_string()).into()),
    }
  }
}
