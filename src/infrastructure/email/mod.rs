mod logging_email_service;
mod smtp_email_service;

pub use logging_email_service::LoggingEmailService;
pub use smtp_email_service::{Mailer, SmtpEmailService};

pub(crate) const VERIFICATION_SUBJECT: &str = "Confirm your membership";

/// Link that confirms a signup when submitted
pub(crate) fn verification_link(base_url: &str, signup_verify_token: &str) -> String {
  format!(
    "{}/users/email-verify?signupVerifyToken={}",
    base_url.trim_end_matches('/'),
    signup_verify_token
  )
}

/// Verification endpoint is POST-only, so the email carries a form
pub(crate) fn verification_body(link: &str) -> String {
  format!(
    "<p>Thanks for signing up. Press the button below to confirm your email address.</p>\n\
     <form action=\"{}\" method=\"POST\">\n\
     <button type=\"submit\">Confirm membership</button>\n\
     </form>\n",
    link
  )
}
