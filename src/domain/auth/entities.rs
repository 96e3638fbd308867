use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dashboard user allowed to sign in with credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  pub name: String,
  /// Lower-cased, unique
  pub email: String,
  /// Argon2 PHC string
  #[serde(skip_serializing)]
  pub password_hash: String,
}

impl User {
  pub fn new(name: String, email: String, password_hash: String) -> Self {
    Self {
      id: Uuid::new_v4(),
      name,
      email,
      password_hash,
    }
  }
}

/// Signed-in browser session. Only the SHA-256 hash of the token is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  pub id: Uuid,
  pub user_id: Uuid,
  pub token_hash: String,
  pub expires_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}

impl Session {
  /// Creates a session expiring `duration` from now
  pub fn with_duration(user_id: Uuid, token_hash: String, duration: Duration) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      token_hash,
      expires_at: now + duration,
      created_at: now,
    }
  }

  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_session_expiry() {
    let live = Session::with_duration(Uuid::new_v4(), "h".into(), Duration::hours(1));
    assert!(!live.is_expired());

    let dead = Session::with_duration(Uuid::new_v4(), "h".into(), Duration::seconds(-1));
    assert!(dead.is_expired());
  }

  #[test]
  fn test_password_hash_is_not_serialized() {
    let user = User::new(
      "User".to_string(),
      "user@nextmail.com".to_string(),
      "$argon2id$secret".to_string(),
    );
    let json = serde_json::to_string(&user).unwrap();
    assert!(!json.contains("argon2id"));
  }
}
