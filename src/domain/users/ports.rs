use async_trait::async_trait;

use super::entities::{AuthenticatedUser, User};
use super::errors::{NotificationError, UserError};
use super::events::DomainEvent;
use super::value_objects::UserId;

/// Repository trait for user persistence operations
///
/// Every lookup hands back a rehydrated [`User`]; only implementations know
/// the storage schema.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

  /// Finds a user by their email address
  async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

  /// Finds the user that was issued the given signup token
  async fn find_by_signup_verify_token(&self, token: &str) -> Result<Option<User>, UserError>;

  /// Finds a user matching both email and password
  async fn find_by_email_and_password(
    &self,
    email: &str,
    password: &str,
  ) -> Result<Option<User>, UserError>;

  /// Inserts a new user inside a single transaction
  ///
  /// Nothing is persisted when this returns an error.
  async fn save(
    &self,
    id: &UserId,
    name: &str,
    email: &str,
    password: &str,
    signup_verify_token: &str,
    status: i32,
  ) -> Result<(), UserError>;

  /// Changes the lifecycle status of an existing user
  async fn update_status(&self, id: &UserId, status: i32) -> Result<(), UserError>;
}

/// Hands domain events to whoever subscribed at startup
///
/// Publishing never waits for subscribers.
#[cfg_attr(test, mockall::automock)]
pub trait EventPublisher: Send + Sync {
  fn publish(&self, event: DomainEvent);
}

/// A subscriber on the in-process event bus
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventHandler: Send + Sync {
  /// Short name used in logs
  fn name(&self) -> &'static str;

  async fn handle(&self, event: &DomainEvent) -> Result<(), NotificationError>;
}

/// Outbound mail collaborator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailService: Send + Sync {
  /// Sends the "confirm your membership" email carrying the signup token
  async fn send_member_join_verification(
    &self,
    email: &str,
    signup_verify_token: &str,
  ) -> Result<(), NotificationError>;
}

/// Issues and checks access tokens
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
  /// Issues an access token for the given identity
  async fn login(&self, user: &AuthenticatedUser) -> Result<String, UserError>;

  /// Resolves an access token back to the identity it was issued for
  async fn verify(&self, token: &str) -> Result<AuthenticatedUser, UserError>;
}

/// Service trait for secure token generation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenGenerator: Send + Sync {
  /// Generates a cryptographically secure random token
  async fn generate(&self) -> Result<String, UserError>;
}

/// Produces time-ordered user identifiers
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
  fn generate(&self) -> UserId;
}
