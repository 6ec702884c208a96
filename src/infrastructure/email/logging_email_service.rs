use async_trait::async_trait;

use super::verification_link;
use crate::domain::users::errors::NotificationError;
use crate::domain::users::ports::EmailService;

/// Writes verification links to the log instead of sending mail
///
/// Used whenever SMTP is disabled, e.g. in local development.
pub struct LoggingEmailService {
  base_url: String,
}

impl LoggingEmailService {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
    }
  }
}

#[async_trait]
impl EmailService for LoggingEmailService {
  async fn send_member_join_verification(
    &self,
    email: &str,
    signup_verify_token: &str,
  ) -> Result<(), NotificationError> {
    tracing::info!(
      to = %email,
      link = %verification_link(&self.base_url, signup_verify_token),
      "Email delivery disabled, verification link logged"
    );
    Ok(())
  }
}
