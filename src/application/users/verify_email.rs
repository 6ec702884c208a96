use std::sync::Arc;

use crate::domain::users::entities::AuthenticatedUser;
use crate::domain::users::errors::UserError;
use crate::domain::users::ports::{AuthService, UserRepository};
use crate::domain::users::value_objects::status;

/// Command for confirming a signup through its emailed token
#[derive(Debug, Clone)]
pub struct VerifyEmailCommand {
  pub signup_verify_token: String,
}

/// Response after a successful verification
#[derive(Debug, Clone)]
pub struct VerifyEmailResponse {
  /// Access token for the verified user
  pub access_token: String,
}

/// Use case for verifying a signup email
pub struct VerifyEmailUseCase {
  user_repo: Arc<dyn UserRepository>,
  auth_service: Arc<dyn AuthService>,
}

impl VerifyEmailUseCase {
  /// Creates a new instance of VerifyEmailUseCase
  pub fn new(user_repo: Arc<dyn UserRepository>, auth_service: Arc<dyn AuthService>) -> Self {
    Self {
      user_repo,
      auth_service,
    }
  }

  /// Executes the verification use case
  ///
  /// A pending user is activated on the way. The token stays valid, so
  /// following the same link again just logs the user in once more.
  ///
  /// # Errors
  /// Returns `UserError::UserNotFound` when no user holds the token
  pub async fn execute(&self, command: VerifyEmailCommand) -> Result<VerifyEmailResponse, UserError> {
    let mut user = self
      .user_repo
      .find_by_signup_verify_token(&command.signup_verify_token)
      .await?
      .ok_or(UserError::UserNotFound)?;

    if user.is_pending() {
      self
        .user_repo
        .update_status(&user.id(), status::ACTIVE)
        .await?;
      user = user.with_status(status::ACTIVE);
      tracing::info!(user_id = %user.id(), "Signup email verified");
    }

    let access_token = self
      .auth_service
      .login(&AuthenticatedUser::from(&user))
      .await?;

    Ok(VerifyEmailResponse { access_token })
  }
}
