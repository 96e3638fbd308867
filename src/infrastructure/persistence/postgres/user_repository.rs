use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{entities::User, errors::AuthError, ports::UserRepository, value_objects::Email};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  name: String,
  email: String,
  password_hash: String,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User {
      id: row.id,
      name: row.name,
      email: row.email,
      password_hash: row.password_hash,
    }
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create_if_absent(&self, user: User) -> Result<bool, AuthError> {
    let result = sqlx::query(
      r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .execute(&self.pool)
    .await?;

    Ok(result.rows_affected() == 1)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(User::from))
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(User::from))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::persistence::postgres::test_db::setup_test_db;

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_create_if_absent_and_find() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let user = User::new(
      "User".to_string(),
      "user@nextmail.com".to_string(),
      "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
    );

    assert!(repo.create_if_absent(user.clone()).await.unwrap());

    let duplicate = User::new(
      "Other".to_string(),
      "user@nextmail.com".to_string(),
      user.password_hash.clone(),
    );
    assert!(!repo.create_if_absent(duplicate).await.unwrap());

    let email = Email::new("user@nextmail.com").unwrap();
    let found = repo.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(found.name, "User");

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
  }
}
