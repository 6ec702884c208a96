use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::users::errors::NotificationError;
use crate::domain::users::events::{DomainEvent, UserCreatedEvent};
use crate::domain::users::ports::{EmailService, EventHandler};

/// Upper bound for a single backoff sleep
const MAX_BACKOFF: Duration = Duration::from_secs(300);

/// Retry policy for outbound notification emails
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
  /// Total attempts including the first one
  pub max_attempts: u32,
  /// Delay before the second attempt, doubled after each failure
  pub base_delay: Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_attempts: 3,
      base_delay: Duration::from_millis(500),
    }
  }
}

impl RetryPolicy {
  /// Sleep after the given failed attempt (1-based), capped at five minutes
  pub fn backoff(&self, attempt: u32) -> Duration {
    let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
    self.base_delay.saturating_mul(factor).min(MAX_BACKOFF)
  }
}

/// Sends the membership verification email for every new user
pub struct UserEventsHandler {
  email_service: Arc<dyn EmailService>,
  retry: RetryPolicy,
}

impl UserEventsHandler {
  pub fn new(email_service: Arc<dyn EmailService>, retry: RetryPolicy) -> Self {
    Self {
      email_service,
      retry,
    }
  }

  async fn on_user_created(&self, event: &UserCreatedEvent) -> Result<(), NotificationError> {
    let max_attempts = self.retry.max_attempts.max(1);
    let mut attempt = 1;
    loop {
      match self
        .email_service
        .send_member_join_verification(&event.email, &event.signup_verify_token)
        .await
      {
        Ok(()) => {
          tracing::debug!(email = %event.email, attempt, "Verification email sent");
          return Ok(());
        }
        Err(e) if attempt < max_attempts => {
          tracing::warn!(
            email = %event.email,
            "Verification email attempt {}/{} failed: {}. Retrying...",
            attempt,
            max_attempts,
            e
          );
          tokio::time::sleep(self.retry.backoff(attempt)).await;
          attempt += 1;
        }
        Err(e) => return Err(e),
      }
    }
  }
}

#[async_trait]
impl EventHandler for UserEventsHandler {
  fn name(&self) -> &'static str {
    "UserEventsHandler"
  }

  async fn handle(&self, event: &DomainEvent) -> Result<(), NotificationError> {
    match event {
      DomainEvent::UserCreated(created) => self.on_user_created(created).await,
    }
  }
}
