//! Login identities, the employees attached to them, and their roles.
//!
//! Every employee owns exactly one login identity (the email + password pair
//! used to authenticate). The identity and the employee row are always
//! written together.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

// ─── Role ────────────────────────────────────────────────────────────────────

/// The permission level of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
  Sales,
  Support,
  Management,
}

impl Role {
  pub const ALL: [Role; 3] = [Role::Sales, Role::Support, Role::Management];

  /// Two-letter storage code.
  pub fn code(self) -> &'static str {
    match self {
      Role::Sales => "SA",
      Role::Support => "SU",
      Role::Management => "MA",
    }
  }

  /// Human-readable label.
  pub fn label(self) -> &'static str {
    match self {
      Role::Sales => "Sales",
      Role::Support => "Support",
      Role::Management => "Management",
    }
  }

  pub fn codes() -> [&'static str; 3] { Self::ALL.map(Role::code) }
}

impl FromStr for Role {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Role::ALL
      .into_iter()
      .find(|r| r.code() == s)
      .ok_or_else(|| Error::UnknownRole(s.to_owned()))
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

// ─── Employee ────────────────────────────────────────────────────────────────

/// An employee joined with the email of its login identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
  pub employee_id: Uuid,
  pub user_id:     Uuid,
  pub email:       String,
  pub first_name:  String,
  pub last_name:   String,
  pub role:        Role,
}

impl Employee {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

/// Input for creating an employee together with its login identity.
#[derive(Debug, Clone)]
pub struct NewEmployee {
  pub email:      String,
  /// Plaintext; the store hashes it before anything is written.
  pub password:   String,
  pub first_name: String,
  pub last_name:  String,
  pub role:       Role,
}

/// A partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct EmployeePatch {
  /// Changes the login identity, not the employee row.
  pub email:      Option<String>,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub role:       Option<Role>,
}

impl EmployeePatch {
  pub fn is_empty(&self) -> bool {
    self.email.is_none()
      && self.first_name.is_none()
      && self.last_name.is_none()
      && self.role.is_none()
  }
}

// ─── Principal ───────────────────────────────────────────────────────────────

/// The authenticated actor behind the current command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
  pub user_id:     Uuid,
  pub employee_id: Uuid,
  pub email:       String,
  pub full_name:   String,
  pub role:        Role,
}

impl Principal {
  pub fn has_role(&self, allowed: &[Role]) -> bool { allowed.contains(&self.role) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn role_codes_round_trip() {
    for role in Role::ALL {
      assert_eq!(role.code().parse::<Role>().unwrap(), role);
    }
    assert_eq!(Role::codes(), ["SA", "SU", "MA"]);
  }

  #[test]
  fn role_rejects_labels_and_lowercase() {
    assert!(matches!("Sales".parse::<Role>(), Err(Error::UnknownRole(_))));
    assert!(matches!("sa".parse::<Role>(), Err(Error::UnknownRole(_))));
  }

  #[test]
  fn role_displays_its_label() {
    assert_eq!(Role::Sales.to_string(), "Sales");
    assert_eq!(Role::Management.to_string(), "Management");
  }

  #[test]
  fn empty_patch() {
    assert!(EmployeePatch::default().is_empty());
    let patch = EmployeePatch { role: Some(Role::Support), ..Default::default() };
    assert!(!patch.is_empty());
  }
}
