use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::users::entities::AuthenticatedUser;
use crate::domain::users::errors::UserError;
use crate::domain::users::ports::AuthService;
use crate::domain::users::value_objects::UserId;

/// Claims carried by every access token
#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
  sub: Uuid,
  name: String,
  email: String,
  iss: String,
  iat: i64,
  exp: i64,
}

/// HS256 access tokens
pub struct JwtAuthService {
  issuer: String,
  ttl_seconds: i64,
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
}

impl fmt::Debug for JwtAuthService {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("JwtAuthService")
      .field("issuer", &self.issuer)
      .field("ttl_seconds", &self.ttl_seconds)
      .finish()
  }
}

impl JwtAuthService {
  pub fn new(secret: &str, issuer: impl Into<String>, ttl_seconds: u64) -> Self {
    Self {
      issuer: issuer.into(),
      ttl_seconds: i64::try_from(ttl_seconds).unwrap_or(i64::MAX),
      encoding_key: EncodingKey::from_secret(secret.as_bytes()),
      decoding_key: DecodingKey::from_secret(secret.as_bytes()),
    }
  }

  fn sign(&self, claims: &AccessClaims) -> Result<String, UserError> {
    encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
      .map_err(|e| UserError::Token(e.to_string()))
  }
}

#[async_trait]
impl AuthService for JwtAuthService {
  async fn login(&self, user: &AuthenticatedUser) -> Result<String, UserError> {
    let now = Utc::now();
    let expires_at = Duration::try_seconds(self.ttl_seconds)
      .and_then(|ttl| now.checked_add_signed(ttl))
      .ok_or_else(|| {
        tracing::error!(ttl_seconds = self.ttl_seconds, "Access token lifetime out of range");
        UserError::Token("access token lifetime out of range".to_string())
      })?;

    let claims = AccessClaims {
      sub: user.id.into_inner(),
      name: user.name.clone(),
      email: user.email.clone(),
      iss: self.issuer.clone(),
      iat: now.timestamp(),
      exp: expires_at.timestamp(),
    };

    self.sign(&claims)
  }

  async fn verify(&self, token: &str) -> Result<AuthenticatedUser, UserError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[self.issuer.as_str()]);

    let decoded = decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(|e| {
      use jsonwebtoken::errors::ErrorKind;

      match e.kind() {
        ErrorKind::ExpiredSignature => tracing::debug!("Access token expired"),
        ErrorKind::InvalidSignature => tracing::warn!("Access token with invalid signature"),
        _ => tracing::debug!(error = %e, "Malformed access token"),
      }
      UserError::InvalidToken
    })?;

    let claims = decoded.claims;
    Ok(AuthenticatedUser {
      id: UserId::from_uuid(claims.sub),
      name: claims.name,
      email: claims.email,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn user() -> AuthenticatedUser {
    AuthenticatedUser {
      id: UserId::from_uuid(Uuid::now_v7()),
      name: "minhyeong".to_string(),
      email: "usupool94@gmail.com".to_string(),
    }
  }

  #[tokio::test]
  async fn test_login_token_verifies_back_to_same_user() {
    let service = JwtAuthService::new("test-secret", "memberly", 3600);
    let user = user();

    let token = service.login(&user).await.unwrap();
    let verified = service.verify(&token).await.unwrap();

    assert_eq!(verified, user);
  }

  #[tokio::test]
  async fn test_token_signed_with_other_secret_is_rejected() {
    let issuer = JwtAuthService::new("secret-a", "memberly", 3600);
    let checker = JwtAuthService::new("secret-b", "memberly", 3600);

    let token = issuer.login(&user()).await.unwrap();

    assert!(matches!(
      checker.verify(&token).await,
      Err(UserError::InvalidToken)
    ));
  }

  #[tokio::test]
  async fn test_token_from_other_issuer_is_rejected() {
    let foreign = JwtAuthService::new("shared", "someone-else", 3600);
    let ours = JwtAuthService::new("shared", "memberly", 3600);

    let token = foreign.login(&user()).await.unwrap();

    assert!(matches!(
      ours.verify(&token).await,
      Err(UserError::InvalidToken)
    ));
  }

  #[tokio::test]
  async fn test_expired_token_is_rejected() {
    let service = JwtAuthService::new("test-secret", "memberly", 3600);
    let user = user();
    let issued = Utc::now() - Duration::hours(2);

    let token = service
      .sign(&AccessClaims {
        sub: user.id.into_inner(),
        name: user.name,
        email: user.email,
        iss: "memberly".to_string(),
        iat: issued.timestamp(),
        exp: (issued + Duration::minutes(5)).timestamp(),
      })
      .unwrap();

    assert!(matches!(
      service.verify(&token).await,
      Err(UserError::InvalidToken)
    ));
  }

  #[tokio::test]
  async fn test_oversized_lifetime_fails_without_panicking() {
    let service = JwtAuthService::new("test-secret", "memberly", u64::MAX);

    assert!(matches!(
      service.login(&user()).await,
      Err(UserError::Token(_))
    ));
  }

  #[tokio::test]
  async fn test_lifetime_past_calendar_range_fails() {
    // fits TimeDelta but overflows the representable date range
    let service = JwtAuthService::new("test-secret", "memberly", (i64::MAX / 1000) as u64);

    assert!(matches!(
      service.login(&user()).await,
      Err(UserError::Token(_))
    ));
  }

  #[tokio::test]
  async fn test_garbage_is_rejected() {
    let service = JwtAuthService::new("test-secret", "memberly", 3600);

    assert!(matches!(
      service.verify("not-a-jwt").await,
      Err(UserError::InvalidToken)
    ));
  }
}
