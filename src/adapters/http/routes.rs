use actix_web::{HttpRequest, ResponseError, error, web};
use std::sync::Arc;

use super::errors::ApiError;
use super::handlers::users::{
  create_user_handler, get_user_info_handler, login_handler, verify_email_handler,
};
use super::middleware::AuthMiddleware;
use crate::application::users::{
  CreateUserUseCase, GetUserInfoUseCase, LoginUseCase, VerifyEmailUseCase,
};
use crate::domain::users::ports::AuthService;

/// Everything the `/users` routes need
#[derive(Clone)]
pub struct UserRouteDependencies {
  pub create_user_use_case: Arc<CreateUserUseCase>,
  pub verify_email_use_case: Arc<VerifyEmailUseCase>,
  pub login_use_case: Arc<LoginUseCase>,
  pub get_user_info_use_case: Arc<GetUserInfoUseCase>,
  pub auth_service: Arc<dyn AuthService>,
}

/// Configure user routes, meant to be mounted under `/users`
pub fn configure_user_routes(cfg: &mut web::ServiceConfig, deps: UserRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.create_user_use_case))
    .app_data(web::Data::new(deps.verify_email_use_case))
    .app_data(web::Data::new(deps.login_use_case))
    .app_data(web::Data::new(deps.get_user_info_use_case))
    // Malformed bodies and query strings get the same JSON error shape
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .route("", web::post().to(create_user_handler))
    .route("/email-verify", web::post().to(verify_email_handler))
    .route("/login", web::post().to(login_handler))
    .service(
      web::resource("/{id}")
        .wrap(AuthMiddleware::new(deps.auth_service))
        .route(web::get().to(get_user_info_handler)),
    );
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  let api_error = ApiError::Validation(format!("Invalid request body: {}", err));
  error::InternalError::from_response(err, api_error.error_response()).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
  let api_error = ApiError::Validation(format!("Invalid query string: {}", err));
  error::InternalError::from_response(err, api_error.error_response()).into()
}
