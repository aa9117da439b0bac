//! Argon2 password hashing for login identities.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use rand_core::OsRng;

use crate::{Error, Result};

/// Hash `password` into a PHC string with a fresh random salt.
pub fn hash(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| Error::PasswordHash(e.to_string()))
}

/// `false` for a wrong password and for an unparsable stored hash alike.
pub fn verify(password: &str, phc: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(phc) else {
    tracing::warn!("stored password hash is not a PHC string");
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn verifies_only_the_hashed_password() {
    let phc = hash("s3cret-pass").unwrap();
    assert!(phc.starts_with("$argon2"));
    assert!(verify("s3cret-pass", &phc));
    assert!(!verify("wrong", &phc));
  }

  #[test]
  fn salts_differ_between_hashes() {
    assert_ne!(hash("same").unwrap(), hash("same").unwrap());
  }

  #[test]
  fn garbage_hash_never_verifies() {
    assert!(!verify("anything", "not-a-phc-string"));
  }
}
