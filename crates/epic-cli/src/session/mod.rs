//! The session gate: who is at the keyboard.
//!
//! A signed token in a [`TokenSlot`] proves a past login. Every command asks
//! the gate for the current [`Principal`]; an absent, expired or forged
//! token sends the operator through the login prompt first.

mod slot;
mod token;

use chrono::{Duration, Utc};
use epic_core::{account::Principal, store::EpicStore};
use uuid::Uuid;

pub use self::{
  slot::TokenSlot,
  token::{Claims, Signer, TokenError},
};
use crate::{
  Result,
  error::store_error,
  input,
  term::{Notice, Terminal},
};

pub struct SessionGate {
  slot:   TokenSlot,
  signer: Signer,
  ttl:    Duration,
  token:  Option<String>,
  claims: Option<Claims>,
}

impl SessionGate {
  /// Build a gate around `slot`, reading whatever token it holds.
  pub fn load(slot: TokenSlot, signer: Signer, ttl: Duration) -> Result<Self> {
    let token = slot.load()?;
    tracing::debug!(path = ?slot.path(), present = token.is_some(), "token slot loaded");
    Ok(Self { slot, signer, ttl, token, claims: None })
  }

  /// Claims of the last successful verification or login.
  pub fn claims(&self) -> Option<&Claims> { self.claims.as_ref() }

  pub fn has_token(&self) -> bool { self.token.is_some() }

  /// Sign a fresh token for `user_id` and overwrite the slot with it.
  pub fn issue(&mut self, user_id: Uuid, email: &str) -> Result<Claims> {
    let claims = Claims::new(user_id, email, Utc::now(), self.ttl);
    let token = self.signer.encode(&claims)?;
    self.slot.store(&token)?;
    tracing::info!(%user_id, exp = claims.exp, "token issued");

    self.token = Some(token);
    self.claims = Some(claims.clone());
    Ok(claims)
  }

  /// Verify the held token without any prompting. A missing token is
  /// [`TokenError::Invalid`].
  pub fn check(&self) -> Result<Claims, TokenError> {
    let token = self.token.as_deref().ok_or(TokenError::Invalid)?;
    self.signer.verify(token, Utc::now())
  }

  /// The claims of a valid token, logging in first if there is none.
  pub async fn verify<S: EpicStore>(
    &mut self,
    store: &S,
    term: &mut dyn Terminal,
  ) -> Result<Claims> {
    match self.check() {
      Ok(claims) => {
        self.claims = Some(claims.clone());
        Ok(claims)
      }
      Err(e) => {
        self.claims = None;
        match (e, self.token.is_some()) {
          (_, false) => term.notify(Notice::Info, "Please log in."),
          (TokenError::Expired, true) => {
            tracing::info!("token expired");
            term.notify(Notice::Info, "Your session has expired. Please log in again.");
          }
          (TokenError::Invalid, true) => {
            tracing::warn!("token rejected");
            term.notify(Notice::Error, "Invalid session token. Please log in again.");
          }
        }
        self.login(store, term).await
      }
    }
  }

  /// The employee behind the current token. `None` when the token's
  /// subject has no employee (e.g. it was deleted since the login).
  pub async fn resolve_principal<S: EpicStore>(
    &mut self,
    store: &S,
    term: &mut dyn Terminal,
  ) -> Result<Option<Principal>> {
    let claims = self.verify(store, term).await?;
    store.get_principal(claims.user_id).await.map_err(store_error)
  }

  /// Prompt for credentials until they authenticate.
  pub async fn login<S: EpicStore>(
    &mut self,
    store: &S,
    term: &mut dyn Terminal,
  ) -> Result<Claims> {
    loop {
      term.notify(Notice::Title, "Enter email and password to login:");
      let email = input::email(term, "Email address")?;
      let password = input::ask(term, "Password")?;

      match store.authenticate(email, password).await.map_err(store_error)? {
        Some(principal) => {
          let claims = self.issue(principal.user_id, &principal.email)?;
          term.notify(Notice::Success, "Employee successfully logged in!");
          tracing::info!(email = %principal.email, role = %principal.role, "logged in");
          return Ok(claims);
        }
        None => {
          tracing::warn!("login failed");
          term.notify(Notice::Error, "Invalid email or password!");
        }
      }
    }
  }

  /// Empty the slot and forget the token.
  pub fn logout(&mut self) -> Result<()> {
    self.slot.clear()?;
    self.token = None;
    self.claims = None;
    tracing::info!("logged out");
    Ok(())
  }
}
