//! Error types for `epic-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A unique field (email, client contract, event name) is already taken.
  #[error("{entity} already exists: {key}")]
  AlreadyExists { entity: &'static str, key: String },

  /// A referenced record could not be found.
  #[error("{entity} does not exist: {key}")]
  DoesNotExist { entity: &'static str, key: String },

  #[error("unknown role code: {0:?}")]
  UnknownRole(String),

  #[error("unknown contract state: {0:?}")]
  UnknownState(String),

  #[error("invalid amount: {0:?}")]
  InvalidAmount(String),

  #[error("invalid {field}: {reason}")]
  Invalid { field: &'static str, reason: String },

  /// Anything the storage backend could not classify.
  #[error("storage backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// `true` for the integrity failures an operator can fix by re-entering
  /// the data.
  pub fn is_integrity(&self) -> bool {
    matches!(self, Self::AlreadyExists { .. } | Self::DoesNotExist { .. })
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
