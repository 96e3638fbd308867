use argon2::PasswordHash as Argon2PasswordHash;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Password is too short (minimum {min} characters)")]
  PasswordTooShort { min: usize },

  #[error("Password is too long (maximum {max} characters)")]
  PasswordTooLong { max: usize },

  #[error("Invalid password hash format")]
  InvalidPasswordHash,

  #[error("Invalid token format")]
  InvalidToken,
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into().trim().to_string();

    if !email.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email));
    }

    // Normalize to lowercase
    Ok(Self(email.to_lowercase()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// Plain-text password, wiped from memory on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  pub const DEFAULT_MIN_LENGTH: usize = 6;
  const MAX_LENGTH: usize = 128;

  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    Self::with_min_length(password, Self::DEFAULT_MIN_LENGTH)
  }

  pub fn with_min_length(
    password: impl Into<String>,
    min_length: usize,
  ) -> Result<Self, ValueObjectError> {
    let password = password.into();
    let length = password.chars().count();

    if length < min_length {
      return Err(ValueObjectError::PasswordTooShort { min: min_length });
    }

    if length > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// ============================================================================
// PasswordHash Value Object (Argon2 PHC string)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Wraps an existing hash after checking it parses as a PHC string
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();
    Argon2PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;
    Ok(Self(hash))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// SessionToken Value Object (Random Secure Token)
// ============================================================================

#[derive(Clone)]
pub struct SessionToken(String);

impl SessionToken {
  const TOKEN_LENGTH: usize = 32; // 32 bytes = 256 bits

  /// Generates a new random session token
  pub fn generate() -> Self {
    use rand::Rng;

    let token: [u8; Self::TOKEN_LENGTH] = rand::rngs::OsRng.sample(rand::distributions::Standard);
    Self(hex::encode(token))
  }

  /// Parses a token received from a client
  pub fn from_string(token: impl Into<String>) -> Result<Self, ValueObjectError> {
    let token = token.into();

    if token.len() != Self::TOKEN_LENGTH * 2 || !token.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ValueObjectError::InvalidToken);
    }

    Ok(Self(token))
  }

  /// SHA-256 of the token, the only form that is persisted
  pub fn hash(&self) -> TokenHash {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(self.0.as_bytes());
    TokenHash(hex::encode(hasher.finalize()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// Implement Debug without exposing the token
impl fmt::Debug for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("SessionToken(***)")
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHash(String);

impl TokenHash {
  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}
