use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{AccessTokenResponse, CreateUserRequest, LoginRequest, UserInfoResponse, VerifyEmailQuery},
  errors::{ApiError, UserErrorKind},
  middleware::{CurrentUser, RequestIdExt},
};
use crate::application::users::{
  CreateUserCommand, CreateUserUseCase, GetUserInfoQuery, GetUserInfoUseCase, LoginCommand,
  LoginUseCase, VerifyEmailCommand, VerifyEmailUseCase,
};
use crate::domain::users::value_objects::UserId;

/// Handler for user signup
///
/// POST /users
/// Body: CreateUserRequest (JSON)
/// Response: empty with status 201
pub async fn create_user_handler(
  request: web::Json<CreateUserRequest>,
  use_case: web::Data<Arc<CreateUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  use_case
    .execute(CreateUserCommand {
      name: request.name,
      email: request.email,
      password: request.password,
    })
    .await?;

  Ok(HttpResponse::Created().finish())
}

/// Handler for the signup verification link
///
/// POST /users/email-verify?signupVerifyToken=...
/// Response: AccessTokenResponse (JSON) with status 200
pub async fn verify_email_handler(
  query: web::Query<VerifyEmailQuery>,
  use_case: web::Data<Arc<VerifyEmailUseCase>>,
) -> Result<HttpResponse, ApiError> {
  query.validate()?;

  let response = use_case
    .execute(VerifyEmailCommand {
      signup_verify_token: query.into_inner().signup_verify_token,
    })
    .await?;

  Ok(HttpResponse::Ok().json(AccessTokenResponse {
    access_token: response.access_token,
  }))
}

/// Handler for user login
///
/// POST /users/login
/// Body: LoginRequest (JSON)
/// Response: AccessTokenResponse (JSON) with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let response = use_case
    .execute(LoginCommand {
      email: request.email,
      password: request.password,
    })
    .await?;

  Ok(HttpResponse::Ok().json(AccessTokenResponse {
    access_token: response.access_token,
  }))
}

/// Handler for reading a user's profile
///
/// GET /users/{id} (requires bearer token of the same user)
/// Response: UserInfoResponse (JSON) with status 200
pub async fn get_user_info_handler(
  req: HttpRequest,
  path: web::Path<String>,
  current_user: CurrentUser,
  use_case: web::Data<Arc<GetUserInfoUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user_id = Uuid::parse_str(&path)
    .map(UserId::from_uuid)
    .map_err(|_| ApiError::Validation("Invalid user id".to_string()))?;

  if current_user.0.id != user_id {
    let request_id = req.request_id().map(|id| id.to_string()).unwrap_or_default();
    tracing::warn!(
      request_id = %request_id,
      requested = %user_id,
      authenticated = %current_user.0.id,
      "Access token does not belong to requested user"
    );
    return Err(ApiError::User(UserErrorKind::Unauthorized));
  }

  let info = use_case.execute(GetUserInfoQuery { user_id }).await?;

  Ok(HttpResponse::Ok().json(UserInfoResponse::from(info)))
}
