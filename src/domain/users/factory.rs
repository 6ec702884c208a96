use std::sync::Arc;

use super::entities::User;
use super::ports::EventPublisher;
use super::value_objects::UserId;

/// Builds users along the two construction paths
///
/// `create` is for accounts that did not exist before and announces them on
/// the event bus. `reconstitute` rebuilds stored accounts silently.
pub struct UserFactory {
  publisher: Arc<dyn EventPublisher>,
}

impl UserFactory {
  pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
    Self { publisher }
  }

  /// Builds a new user and publishes exactly one `UserCreated` event
  pub fn create(
    &self,
    id: UserId,
    name: String,
    email: String,
    password: String,
    signup_verify_token: String,
    status: i32,
  ) -> User {
    let (user, event) = User::create(id, name, email, password, signup_verify_token, status);
    self.publisher.publish(event.into());
    user
  }

  /// Rebuilds a user without publishing anything
  pub fn reconstitute(
    &self,
    id: UserId,
    name: String,
    email: String,
    password: String,
    signup_verify_token: String,
    status: i32,
  ) -> User {
    User::reconstitute(id, name, email, password, signup_verify_token, status)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::users::events::{DomainEvent, UserCreatedEvent};
  use crate::domain::users::ports::MockEventPublisher;
  use crate::domain::users::value_objects::status;
  use uuid::Uuid;

  fn id() -> UserId {
    UserId::from_uuid(Uuid::now_v7())
  }

  #[test]
  fn test_create_publishes_one_matching_event() {
    let mut publisher = MockEventPublisher::new();
    publisher
      .expect_publish()
      .withf(|event| {
        *event
          == DomainEvent::UserCreated(UserCreatedEvent {
            email: "usupool94@gmail.com".to_string(),
            signup_verify_token: "tok-123".to_string(),
          })
      })
      .times(1)
      .return_const(());

    let factory = UserFactory::new(Arc::new(publisher));
    let user = factory.create(
      id(),
      "minhyeong".to_string(),
      "usupool94@gmail.com".to_string(),
      "ehvkpfqhajwgofiv".to_string(),
      "tok-123".to_string(),
      status::PENDING,
    );

    assert_eq!(user.email(), "usupool94@gmail.com");
    assert_eq!(user.status(), status::PENDING);
  }

  #[test]
  fn test_reconstitute_publishes_nothing() {
    let mut publisher = MockEventPublisher::new();
    publisher.expect_publish().never();

    let factory = UserFactory::new(Arc::new(publisher));
    let user_id = id();
    let build = || {
      factory.reconstitute(
        user_id,
        "minhyeong".to_string(),
        "usupool94@gmail.com".to_string(),
        "ehvkpfqhajwgofiv".to_string(),
        "tok-123".to_string(),
        status::ACTIVE,
      )
    };

    assert_eq!(build(), build());
  }
}
