use serde::{Deserialize, Serialize};

/// Raised exactly once when a brand-new account has been built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreatedEvent {
  pub email: String,
  pub signup_verify_token: String,
}

/// Every event that travels over the in-process bus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DomainEvent {
  UserCreated(UserCreatedEvent),
}

impl DomainEvent {
  /// Stable name used in logs
  pub fn name(&self) -> &'static str {
    match self {
      DomainEvent::UserCreated(_) => "UserCreated",
    }
  }
}

impl From<UserCreatedEvent> for DomainEvent {
  fn from(event: UserCreatedEvent) -> Self {
    DomainEvent::UserCreated(event)
  }
}
