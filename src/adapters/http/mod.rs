pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  AccessTokenResponse, CreateUserRequest, ErrorResponse, LoginRequest, UserInfoResponse,
  VerifyEmailQuery,
};
pub use errors::{ApiError, UserErrorKind};
pub use handlers::health_check;
pub use middleware::{AuthMiddleware, CurrentUser, RequestId, RequestIdExt, RequestIdMiddleware};
pub use routes::{UserRouteDependencies, configure_user_routes};
