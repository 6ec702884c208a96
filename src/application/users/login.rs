use std::sync::Arc;

use crate::domain::users::entities::AuthenticatedUser;
use crate::domain::users::errors::UserError;
use crate::domain::users::ports::{AuthService, UserRepository};

/// Command for logging in with email and password
#[derive(Debug, Clone)]
pub struct LoginCommand {
  pub email: String,
  pub password: String,
}

/// Response after a successful login
#[derive(Debug, Clone)]
pub struct LoginResponse {
  pub access_token: String,
}

/// Use case for logging a user in
pub struct LoginUseCase {
  user_repo: Arc<dyn UserRepository>,
  auth_service: Arc<dyn AuthService>,
}

impl LoginUseCase {
  /// Creates a new instance of LoginUseCase
  pub fn new(user_repo: Arc<dyn UserRepository>, auth_service: Arc<dyn AuthService>) -> Self {
    Self {
      user_repo,
      auth_service,
    }
  }

  /// Executes the login use case
  ///
  /// # Errors
  /// Returns `UserError::InvalidCredentials` when no user matches both fields
  pub async fn execute(&self, command: LoginCommand) -> Result<LoginResponse, UserError> {
    let user = self
      .user_repo
      .find_by_email_and_password(&command.email, &command.password)
      .await?
      .ok_or_else(|| {
        tracing::debug!(email = %command.email, "Login rejected");
        UserError::InvalidCredentials
      })?;

    let access_token = self
      .auth_service
      .login(&AuthenticatedUser::from(&user))
      .await?;

    tracing::info!(user_id = %user.id(), "User logged in");

    Ok(LoginResponse { access_token })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::users::entities::User;
  use crate::domain::users::ports::{MockAuthService, MockUserRepository};
  use crate::domain::users::value_objects::{UserId, status};
  use uuid::Uuid;

  #[tokio::test]
  async fn test_matching_credentials_return_token() {
    let mut repo = MockUserRepository::new();
    repo
      .expect_find_by_email_and_password()
      .withf(|email, password| email == "usupool94@gmail.com" && password == "ehvkpfqhajwgofiv")
      .returning(|email, password| {
        Ok(Some(User::reconstitute(
          UserId::from_uuid(Uuid::now_v7()),
          "minhyeong".to_string(),
          email.to_string(),
          password.to_string(),
          "tok-123".to_string(),
          status::ACTIVE,
        )))
      });

    let mut auth = MockAuthService::new();
    auth
      .expect_login()
      .withf(|user| user.email == "usupool94@gmail.com" && user.name == "minhyeong")
      .returning(|_| Ok("jwt-abc".to_string()));

    let response = LoginUseCase::new(Arc::new(repo), Arc::new(auth))
      .execute(LoginCommand {
        email: "usupool94@gmail.com".to_string(),
        password: "ehvkpfqhajwgofiv".to_string(),
      })
      .await
      .unwrap();

    assert_eq!(response.access_token, "jwt-abc");
  }

  #[tokio::test]
  async fn test_wrong_password_is_invalid_credentials() {
    let mut repo = MockUserRepository::new();
    repo
      .expect_find_by_email_and_password()
      .returning(|_, _| Ok(None));

    let mut auth = MockAuthService::new();
    auth.expect_login().never();

    let result = LoginUseCase::new(Arc::new(repo), Arc::new(auth))
      .execute(LoginCommand {
        email: "usupool94@gmail.com".to_string(),
        password: "wrong".to_string(),
      })
      .await;

    assert!(matches!(result, Err(UserError::InvalidCredentials)));
  }
}
