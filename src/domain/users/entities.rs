use serde::{Deserialize, Serialize};

use super::events::UserCreatedEvent;
use super::value_objects::{UserId, status};

/// A registered account
///
/// Values are never mutated in place. A changed user is a new value built
/// through [`User::reconstitute`] or one of the `with_*` helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  id: UserId,
  name: String,
  email: String,
  password: String,
  signup_verify_token: String,
  status: i32,
}

impl User {
  /// Builds a brand-new user together with the event announcing it
  ///
  /// The entity itself publishes nothing; the caller decides where the
  /// returned event goes.
  pub fn create(
    id: UserId,
    name: String,
    email: String,
    password: String,
    signup_verify_token: String,
    status: i32,
  ) -> (Self, UserCreatedEvent) {
    let event = UserCreatedEvent {
      email: email.clone(),
      signup_verify_token: signup_verify_token.clone(),
    };
    let user = Self::reconstitute(id, name, email, password, signup_verify_token, status);
    (user, event)
  }

  /// Rebuilds a user from stored fields without side effects
  pub fn reconstitute(
    id: UserId,
    name: String,
    email: String,
    password: String,
    signup_verify_token: String,
    status: i32,
  ) -> Self {
    Self {
      id,
      name,
      email,
      password,
      signup_verify_token,
      status,
    }
  }

  /// Returns a copy of this user carrying a different status
  pub fn with_status(&self, status: i32) -> Self {
    Self {
      status,
      ..self.clone()
    }
  }

  pub fn id(&self) -> UserId {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn email(&self) -> &str {
    &self.email
  }

  pub fn password(&self) -> &str {
    &self.password
  }

  pub fn signup_verify_token(&self) -> &str {
    &self.signup_verify_token
  }

  pub fn status(&self) -> i32 {
    self.status
  }

  /// Whether the signup email has not been verified yet
  pub fn is_pending(&self) -> bool {
    self.status == status::PENDING
  }
}

/// Identity handed to the authentication collaborator and carried by
/// verified access tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
  pub id: UserId,
  pub name: String,
  pub email: String,
}

impl From<&User> for AuthenticatedUser {
  fn from(user: &User) -> Self {
    Self {
      id: user.id(),
      name: user.name().to_string(),
      email: user.email().to_string(),
    }
  }
}

/// Public view of a user, never carrying credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
  pub id: UserId,
  pub name: String,
  pub email: String,
}

impl From<&User> for UserInfo {
  fn from(user: &User) -> Self {
    Self {
      id: user.id(),
      name: user.name().to_string(),
      email: user.email().to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use uuid::Uuid;

  fn fields() -> (UserId, String, String, String, String, i32) {
    (
      UserId::from_uuid(Uuid::now_v7()),
      "minhyeong".to_string(),
      "usupool94@gmail.com".to_string(),
      "ehvkpfqhajwgofiv".to_string(),
      "tok-123".to_string(),
      status::PENDING,
    )
  }

  #[test]
  fn test_reconstitute_is_deterministic() {
    let (id, name, email, password, token, user_status) = fields();

    let first = User::reconstitute(
      id,
      name.clone(),
      email.clone(),
      password.clone(),
      token.clone(),
      user_status,
    );
    let second = User::reconstitute(id, name, email, password, token, user_status);

    assert_eq!(first, second);
  }

  #[test]
  fn test_create_returns_matching_event() {
    let (id, name, email, password, token, user_status) = fields();

    let (user, event) = User::create(id, name, email, password, token, user_status);

    assert_eq!(event.email, user.email());
    assert_eq!(event.signup_verify_token, user.signup_verify_token());
  }

  #[test]
  fn test_create_and_reconstitute_build_equal_values() {
    let (id, name, email, password, token, user_status) = fields();

    let (created, _) = User::create(
      id,
      name.clone(),
      email.clone(),
      password.clone(),
      token.clone(),
      user_status,
    );
    let rebuilt = User::reconstitute(id, name, email, password, token, user_status);

    assert_eq!(created, rebuilt);
  }

  #[test]
  fn test_with_status_leaves_original_untouched() {
    let (id, name, email, password, token, user_status) = fields();
    let user = User::reconstitute(id, name, email, password, token, user_status);

    let active = user.with_status(status::ACTIVE);

    assert!(user.is_pending());
    assert!(!active.is_pending());
    assert_eq!(active.id(), user.id());
    assert_eq!(active.signup_verify_token(), user.signup_verify_token());
  }

  #[test]
  fn test_user_info_omits_credentials() {
    let (id, name, email, password, token, user_status) = fields();
    let user = User::reconstitute(id, name, email, password, token, user_status);

    let json = serde_json::to_value(UserInfo::from(&user)).unwrap();

    assert_eq!(json["name"], "minhyeong");
    assert!(json.get("password").is_none());
    assert!(json.get("signup_verify_token").is_none());
  }
}
