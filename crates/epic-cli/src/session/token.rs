//! HS256 JSON Web Tokens.
//!
//! Only HS256 tokens are produced or accepted.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
  #[error("token has expired")]
  Expired,
  #[error("token is malformed or badly signed")]
  Invalid,
}

/// Token payload. Times are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  pub user_id: Uuid,
  pub email:   String,
  pub iat:     i64,
  pub exp:     i64,
}

impl Claims {
  pub fn new(user_id: Uuid, email: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
    let iat = now.timestamp();
    Self { user_id, email: email.into(), iat, exp: iat + ttl.num_seconds() }
  }
}

/// Signs and verifies tokens with one shared secret.
#[derive(Clone)]
pub struct Signer {
  encoding:   EncodingKey,
  decoding:   DecodingKey,
  validation: Validation,
}

impl Signer {
  pub fn new(secret: &[u8]) -> Result<Self> {
    if secret.is_empty() {
      return Err(Error::SecretKey("empty".into()));
    }
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    Ok(Self {
      encoding: EncodingKey::from_secret(secret),
      decoding: DecodingKey::from_secret(secret),
      validation,
    })
  }

  pub fn encode(&self, claims: &Claims) -> Result<String> {
    Ok(jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)?)
  }

  /// Signature first, then expiry: a token is expired once `now >= exp`.
  pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
    let claims = jsonwebtoken::decode::<Claims>(token.trim(), &self.decoding, &self.validation)
      .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
      })?
      .claims;

    if now.timestamp() >= claims.exp {
      return Err(TokenError::Expired);
    }
    Ok(claims)
  }
}
