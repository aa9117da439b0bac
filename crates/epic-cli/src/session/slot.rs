//! Single-slot token file.

use std::{
  fs, io,
  path::{Path, PathBuf},
};

/// Holds at most one token. Issuing overwrites it, logout empties it.
#[derive(Debug, Clone)]
pub struct TokenSlot {
  path: PathBuf,
}

impl TokenSlot {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  /// The stored token; `None` if the file is missing or blank.
  pub fn load(&self) -> io::Result<Option<String>> {
    match fs::read_to_string(&self.path) {
      Ok(content) => {
        let token = content.trim();
        Ok((!token.is_empty()).then(|| token.to_owned()))
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e),
    }
  }

  pub fn store(&self, token: &str) -> io::Result<()> { fs::write(&self.path, token) }

  pub fn clear(&self) -> io::Result<()> { fs::write(&self.path, "") }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let slot = TokenSlot::new(dir.path().join("token.txt"));
    assert_eq!(slot.load().unwrap(), None);
  }

  #[test]
  fn store_overwrites_and_clear_empties() {
    let dir = tempfile::tempdir().unwrap();
    let slot = TokenSlot::new(dir.path().join("token.txt"));

    slot.store("first").unwrap();
    slot.store("second").unwrap();
    assert_eq!(slot.load().unwrap().as_deref(), Some("second"));

    slot.clear().unwrap();
    assert_eq!(slot.load().unwrap(), None);
    assert!(slot.path().exists());
  }

  #[test]
  fn unwritable_slot_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let slot = TokenSlot::new(dir.path().join("missing-dir").join("token.txt"));
    assert!(slot.store("t").is_err());
  }
}
