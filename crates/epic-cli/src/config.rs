//! Runtime settings, layered: built-in defaults, then an optional TOML
//! file, then `EPIC_*` environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Signing key used when none is configured. Only fit for development.
pub const DEFAULT_SECRET: &str = "epic-events-development-secret-change-me";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  pub store_path:          PathBuf,
  pub token_path:          PathBuf,
  pub secret_key:          String,
  pub token_ttl_secs:      i64,
  pub password_min_length: usize,
}

impl Settings {
  pub fn load(path: &Path) -> Result<Self> {
    let raw = config::Config::builder()
      .set_default("store_path", "epic-events.db")?
      .set_default("token_path", "token.txt")?
      .set_default("secret_key", DEFAULT_SECRET)?
      .set_default("token_ttl_secs", 3600_i64)?
      .set_default("password_min_length", 8_i64)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("EPIC"))
      .build()?;

    let mut settings: Settings = raw.try_deserialize()?;
    settings.store_path = expand_tilde(&settings.store_path);
    settings.token_path = expand_tilde(&settings.token_path);
    settings.validate()?;

    if settings.secret_key == DEFAULT_SECRET {
      tracing::warn!("using the built-in signing key; set EPIC_SECRET_KEY");
    }
    Ok(settings)
  }

  fn validate(&self) -> Result<()> {
    if self.token_ttl_secs <= 0 {
      return Err(invalid(format!("token_ttl_secs must be positive, got {}", self.token_ttl_secs)));
    }
    if self.password_min_length == 0 {
      return Err(invalid("password_min_length must be at least 1".to_owned()));
    }
    Ok(())
  }

  pub fn token_ttl(&self) -> chrono::Duration { chrono::Duration::seconds(self.token_ttl_secs) }
}

fn invalid(reason: String) -> Error { Error::Config(config::ConfigError::Message(reason)) }

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  #[test]
  fn defaults_apply_without_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let s = Settings::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(s.token_ttl_secs, 3600);
    assert_eq!(s.password_min_length, 8);
    assert_eq!(s.token_path, PathBuf::from("token.txt"));
  }

  #[test]
  fn file_values_override_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "token_ttl_secs = 60\nsecret_key = \"abc\"").unwrap();

    let s = Settings::load(file.path()).unwrap();
    assert_eq!(s.token_ttl_secs, 60);
    assert_eq!(s.secret_key, "abc");
    assert_eq!(s.token_ttl(), chrono::Duration::seconds(60));
  }

  #[test]
  fn non_positive_ttl_is_rejected() {
    for ttl in ["0", "-60"] {
      let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
      writeln!(file, "token_ttl_secs = {ttl}").unwrap();
      let err = Settings::load(file.path()).unwrap_err();
      assert!(err.to_string().contains("token_ttl_secs"), "{ttl}: {err}");
    }
  }

  #[test]
  fn zero_password_length_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "password_min_length = 0").unwrap();
    let err = Settings::load(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("password_min_length"));
  }

  #[test]
  fn tilde_is_expanded_against_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/x.db")), PathBuf::from(home).join("x.db"));
    assert_eq!(expand_tilde(Path::new("/abs/x.db")), PathBuf::from("/abs/x.db"));
  }
}
