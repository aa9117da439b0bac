//! Error type for `epic-cli`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The operator left a required prompt empty.
  #[error("cancelled by the operator")]
  Cancelled,

  /// The credential names a subject with no employee behind it.
  #[error("no employee is attached to the current login")]
  UnknownPrincipal,

  #[error("missing field: {0}")]
  MissingField(&'static str),

  #[error("store error: {0}")]
  Core(#[from] epic_core::Error),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("token encoding error: {0}")]
  Token(#[from] jsonwebtoken::errors::Error),

  #[error("invalid secret key: {0}")]
  SecretKey(String),

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Lift any store backend error into [`Error::Core`].
pub fn store_error<E: Into<epic_core::Error>>(e: E) -> Error { Error::Core(e.into()) }
