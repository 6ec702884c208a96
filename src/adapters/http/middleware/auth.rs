use actix_web::{
  Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
  body::EitherBody,
  dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::{ApiError, UserErrorKind},
  domain::users::{entities::AuthenticatedUser, ports::AuthService},
};

/// Bearer-token guard
///
/// Verifies the `Authorization: Bearer <token>` header through the
/// [`AuthService`] and stores the resulting [`AuthenticatedUser`] in the
/// request extensions. Requests without a valid token are answered with
/// 401 before reaching the wrapped service.
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use memberly::domain::users::ports::AuthService;
/// # use memberly::adapters::http::middleware::auth::AuthMiddleware;
///
/// # fn example(auth_service: Arc<dyn AuthService>) {
/// let app = App::new().service(
///   web::resource("/protected")
///     .wrap(AuthMiddleware::new(auth_service))
///     .route(web::get().to(|| async { "Protected endpoint" })),
/// );
/// # }
/// ```
pub struct AuthMiddleware {
  auth_service: Arc<dyn AuthService>,
}

impl AuthMiddleware {
  pub fn new(auth_service: Arc<dyn AuthService>) -> Self {
    Self { auth_service }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      auth_service: self.auth_service.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  auth_service: Arc<dyn AuthService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let auth_service = self.auth_service.clone();

    Box::pin(async move {
      let verified = match extract_bearer_token(&req) {
        Ok(token) => auth_service.verify(&token).await.map_err(ApiError::from),
        Err(e) => Err(e),
      };

      let user = match verified {
        Ok(user) => user,
        Err(e) => {
          let (request, _) = req.into_parts();
          let response = e.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(user);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|s| s.to_string())
    .ok_or(ApiError::User(UserErrorKind::Unauthorized))
}

/// Extractor for the identity attached by [`AuthMiddleware`]
///
/// Fails with 401 when used on a route the middleware does not guard.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedUser);

impl FromRequest for CurrentUser {
  type Error = ApiError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(
      req
        .extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .map(CurrentUser)
        .ok_or(ApiError::User(UserErrorKind::Unauthorized)),
    )
  }
}
