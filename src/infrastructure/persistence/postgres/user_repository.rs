use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::users::{
  entities::User,
  errors::{RepositoryError, UserError},
  ports::UserRepository,
  value_objects::UserId,
};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  /// Creates a new instance of PostgresUserRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn fetch_one_where(&self, query: &str, value: &str) -> Result<Option<User>, UserError> {
    let row = sqlx::query_as::<_, UserRow>(query)
      .bind(value)
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.map(Into::into))
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  name: String,
  email: String,
  password: String,
  signup_verify_token: String,
  status: i32,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::reconstitute(
      UserId::from_uuid(row.id),
      row.name,
      row.email,
      row.password,
      row.signup_verify_token,
      row.status,
    )
  }
}

const SELECT_USER: &str = r#"
            SELECT
                id,
                name,
                email,
                password,
                signup_verify_token,
                status
            FROM users
"#;

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
    let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = $1"))
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
    self
      .fetch_one_where(&format!("{SELECT_USER} WHERE email = $1"), email)
      .await
  }

  async fn find_by_signup_verify_token(&self, token: &str) -> Result<Option<User>, UserError> {
    self
      .fetch_one_where(&format!("{SELECT_USER} WHERE signup_verify_token = $1"), token)
      .await
  }

  async fn find_by_email_and_password(
    &self,
    email: &str,
    password: &str,
  ) -> Result<Option<User>, UserError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
      "{SELECT_USER} WHERE email = $1 AND password = $2"
    ))
    .bind(email)
    .bind(password)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn save(
    &self,
    id: &UserId,
    name: &str,
    email: &str,
    password: &str,
    signup_verify_token: &str,
    status: i32,
  ) -> Result<(), UserError> {
    let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

    let inserted = sqlx::query(
      r#"
            INSERT INTO users (
                id,
                name,
                email,
                password,
                signup_verify_token,
                status
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
    )
    .bind(id.as_uuid())
    .bind(name)
    .bind(email)
    .bind(password)
    .bind(signup_verify_token)
    .bind(status)
    .execute(&mut *tx)
    .await;

    match inserted {
      Ok(_) => {
        tx.commit()
          .await
          .map_err(|e| RepositoryError::TransactionFailed(e.to_string()))?;
        Ok(())
      }
      Err(e) => {
        tracing::error!(user_id = %id, error = %e, "Failed to insert user, rolling back");
        if let Err(rollback_err) = tx.rollback().await {
          tracing::warn!(user_id = %id, error = %rollback_err, "Rollback failed");
        }
        Err(RepositoryError::from(e).into())
      }
    }
  }

  async fn update_status(&self, id: &UserId, status: i32) -> Result<(), UserError> {
    let result = sqlx::query(
      r#"
            UPDATE users
            SET status = $2
            WHERE id = $1
            "#,
    )
    .bind(id.as_uuid())
    .bind(status)
    .execute(&self.pool)
    .await?;

    if result.rows_affected() == 0 {
      Err(UserError::UserNotFound)
    } else {
      Ok(())
    }
  }
}
