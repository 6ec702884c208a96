use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::users::entities::UserInfo;

/// Request for user signup
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
  /// Display name
  #[validate(length(min = 2, max = 30, message = "Name must be between 2 and 30 characters"))]
  pub name: String,

  /// Email address
  #[validate(
    email(message = "Invalid email format"),
    length(max = 60, message = "Email must be at most 60 characters")
  )]
  pub email: String,

  /// Password
  #[validate(length(
    min = 8,
    max = 30,
    message = "Password must be between 8 and 30 characters"
  ))]
  pub password: String,
}

/// Query string of the email verification link
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyEmailQuery {
  #[serde(rename = "signupVerifyToken")]
  #[validate(length(min = 1, message = "signupVerifyToken is required"))]
  pub signup_verify_token: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Access token issued by verification and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
  pub access_token: String,
}

/// Public profile of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoResponse {
  pub id: Uuid,
  pub name: String,
  pub email: String,
}

impl From<UserInfo> for UserInfoResponse {
  fn from(info: UserInfo) -> Self {
    Self {
      id: info.id.into_inner(),
      name: info.name,
      email: info.email,
    }
  }
}

/// Standard error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,
}
