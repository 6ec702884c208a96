use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::users::errors::UserError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Domain rejection with a client-facing status
  User(UserErrorKind),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Client-facing user error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UserErrorKind {
  /// Email already registered (422)
  EmailAlreadyExists,

  /// User or signup token unknown (404)
  UserNotFound,

  /// Email and password do not match (401)
  InvalidCredentials,

  /// Missing, malformed, expired or foreign access token (401)
  Unauthorized,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::User(kind) => write!(f, "User error: {:?}", kind),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::User(kind) => match kind {
        UserErrorKind::EmailAlreadyExists => StatusCode::UNPROCESSABLE_ENTITY,
        UserErrorKind::UserNotFound => StatusCode::NOT_FOUND,
        UserErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        UserErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
      },
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::User(kind) => match kind {
        UserErrorKind::EmailAlreadyExists => (
          "email_already_exists",
          "An account with this email already exists".to_string(),
        ),
        UserErrorKind::UserNotFound => ("user_not_found", "User not found".to_string()),
        UserErrorKind::InvalidCredentials => (
          "invalid_credentials",
          "Invalid email or password".to_string(),
        ),
        UserErrorKind::Unauthorized => (
          "unauthorized",
          "Invalid or missing authorization token".to_string(),
        ),
      },
      ApiError::Internal(msg) => {
        // Details stay in the log
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(ErrorResponse {
        error: error_type.to_string(),
        message,
      })
  }
}

impl From<UserError> for ApiError {
  fn from(error: UserError) -> Self {
    match error {
      UserError::EmailAlreadyExists => ApiError::User(UserErrorKind::EmailAlreadyExists),
      UserError::UserNotFound => ApiError::User(UserErrorKind::UserNotFound),
      UserError::InvalidCredentials => ApiError::User(UserErrorKind::InvalidCredentials),
      UserError::InvalidToken => ApiError::User(UserErrorKind::Unauthorized),
      UserError::Token(msg) => ApiError::Internal(format!("Token error: {}", msg)),
      UserError::Repository(err) => ApiError::Internal(err.to_string()),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();
    messages.sort();

    ApiError::Validation(messages.join(", "))
  }
}
