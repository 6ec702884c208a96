use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

use crate::domain::users::errors::UserError;
use crate::domain::users::ports::TokenGenerator;

const TOKEN_BYTES: usize = 32;

/// Signup token generator backed by the operating system RNG
///
/// Tokens are 32 random bytes in unpadded base64url, so they can be pasted
/// into a query string as-is.
#[derive(Debug, Default)]
pub struct SecureTokenGenerator;

impl SecureTokenGenerator {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl TokenGenerator for SecureTokenGenerator {
  async fn generate(&self) -> Result<String, UserError> {
    let mut token_bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng
      .try_fill_bytes(&mut token_bytes)
      .map_err(|e| UserError::Token(format!("random source unavailable: {}", e)))?;

    Ok(URL_SAFE_NO_PAD.encode(token_bytes))
  }
}
