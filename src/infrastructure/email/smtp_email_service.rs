use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{VERIFICATION_SUBJECT, verification_body, verification_link};
use crate::domain::users::errors::NotificationError;
use crate::domain::users::ports::EmailService;
use crate::infrastructure::config::EmailConfig;

/// Seam over the SMTP transport so message building can be tested offline
#[async_trait]
pub trait Mailer: Send + Sync {
  async fn send(&self, message: Message) -> Result<(), NotificationError>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
  async fn send(&self, message: Message) -> Result<(), NotificationError> {
    AsyncTransport::send(self, message)
      .await
      .map(|_response| ())
      .map_err(|e| NotificationError::DeliveryFailed(e.to_string()))
  }
}

/// Sends verification emails over SMTP
pub struct SmtpEmailService {
  mailer: Box<dyn Mailer>,
  from: Mailbox,
  base_url: String,
}

impl SmtpEmailService {
  /// Builds the service around an SMTP transport described by `config`
  ///
  /// Without TLS the connection is unencrypted, which is only meant for
  /// local catch-all servers.
  pub fn from_config(config: &EmailConfig, base_url: &str) -> Result<Self, NotificationError> {
    let builder = if config.use_tls {
      AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        .map_err(|e| NotificationError::BuildFailed(format!("SMTP relay: {}", e)))?
    } else {
      AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
    };

    let builder = match (&config.username, &config.password) {
      (Some(username), Some(password)) => {
        builder.credentials(Credentials::new(username.clone(), password.clone()))
      }
      _ => builder,
    };

    let transport = builder.port(config.smtp_port).build();

    Self::new_with_mailer(Box::new(transport), &config.from_address, base_url)
  }

  pub fn new_with_mailer(
    mailer: Box<dyn Mailer>,
    from_address: &str,
    base_url: &str,
  ) -> Result<Self, NotificationError> {
    let from = from_address
      .parse::<Mailbox>()
      .map_err(|e| NotificationError::InvalidAddress(format!("{}: {}", from_address, e)))?;

    Ok(Self {
      mailer,
      from,
      base_url: base_url.to_string(),
    })
  }

  fn build_verification(&self, email: &str, token: &str) -> Result<Message, NotificationError> {
    let to = email
      .parse::<Mailbox>()
      .map_err(|e| NotificationError::InvalidAddress(format!("{}: {}", email, e)))?;

    let link = verification_link(&self.base_url, token);

    Message::builder()
      .from(self.from.clone())
      .to(to)
      .subject(VERIFICATION_SUBJECT)
      .header(ContentType::TEXT_HTML)
      .body(verification_body(&link))
      .map_err(|e| NotificationError::BuildFailed(e.to_string()))
  }
}

#[async_trait]
impl EmailService for SmtpEmailService {
  async fn send_member_join_verification(
    &self,
    email: &str,
    signup_verify_token: &str,
  ) -> Result<(), NotificationError> {
    let message = self.build_verification(email, signup_verify_token)?;
    self.mailer.send(message).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::{Arc, Mutex};

  #[derive(Clone, Default)]
  struct RecordingMailer {
    sent: Arc<Mutex<Vec<Message>>>,
  }

  #[async_trait]
  impl Mailer for RecordingMailer {
    async fn send(&self, message: Message) -> Result<(), NotificationError> {
      self.sent.lock().unwrap().push(message);
      Ok(())
    }
  }

  struct UnreachableMailer;

  #[async_trait]
  impl Mailer for UnreachableMailer {
    async fn send(&self, _: Message) -> Result<(), NotificationError> {
      panic!("mailer must not be reached");
    }
  }

  #[tokio::test]
  async fn test_verification_email_carries_link() {
    let mailer = RecordingMailer::default();
    let service = SmtpEmailService::new_with_mailer(
      Box::new(mailer.clone()),
      "no-reply@memberly.local",
      "http://localhost:8080",
    )
    .unwrap();

    service
      .send_member_join_verification("usupool94@gmail.com", "tok123abc")
      .await
      .unwrap();

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);

    let envelope = sent[0].envelope();
    assert_eq!(envelope.to()[0].to_string(), "usupool94@gmail.com");

    let raw = String::from_utf8(sent[0].formatted()).unwrap();
    assert!(raw.contains(VERIFICATION_SUBJECT));
    assert!(raw.contains("/users/email-verify?signupVerifyToken"));
    assert!(raw.contains("tok123abc"));
  }

  #[tokio::test]
  async fn test_invalid_recipient_fails_before_sending() {
    let service = SmtpEmailService::new_with_mailer(
      Box::new(UnreachableMailer),
      "no-reply@memberly.local",
      "http://localhost:8080",
    )
    .unwrap();

    let result = service
      .send_member_join_verification("not-an-address", "tok")
      .await;

    assert!(matches!(result, Err(NotificationError::InvalidAddress(_))));
  }

  #[test]
  fn test_invalid_from_address_is_rejected() {
    let result = SmtpEmailService::new_with_mailer(
      Box::new(UnreachableMailer),
      "invalid-from-email",
      "http://localhost:8080",
    );

    assert!(matches!(result, Err(NotificationError::InvalidAddress(_))));
  }
}
