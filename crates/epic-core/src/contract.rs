//! Contracts and the money amounts they carry.

use std::{fmt, ops::Sub, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

// ─── Amount ──────────────────────────────────────────────────────────────────

/// A euro amount with cent precision, stored as integer cents.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
  pub const ZERO: Amount = Amount(0);

  pub fn from_cents(cents: i64) -> Self { Self(cents) }

  pub fn cents(self) -> i64 { self.0 }

  /// `"1200.50 €"`
  pub fn euros(self) -> String { format!("{self} €") }
}

impl FromStr for Amount {
  type Err = Error;

  /// Accepts `"1200"`, `"1200.5"` and `"1200.50"`. Signs, separators and
  /// sub-cent precision are rejected.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || Error::InvalidAmount(s.to_owned());
    let trimmed = s.trim();

    let (whole, frac) = match trimmed.split_once('.') {
      Some((w, f)) if !f.is_empty() => (w, f),
      Some(_) => return Err(invalid()),
      None => (trimmed, ""),
    };

    let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !digits(whole) || !digits(frac) || frac.len() > 2 {
      return Err(invalid());
    }

    let whole: i64 = whole.parse().map_err(|_| invalid())?;
    let frac: i64 = match frac.len() {
      0 => 0,
      1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
      _ => frac.parse().map_err(|_| invalid())?,
    };

    whole
      .checked_mul(100)
      .and_then(|c| c.checked_add(frac))
      .map(Amount)
      .ok_or_else(invalid)
  }
}

impl fmt::Display for Amount {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let sign = if self.0 < 0 { "-" } else { "" };
    let abs = self.0.unsigned_abs();
    write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
  }
}

impl Sub for Amount {
  type Output = Amount;

  fn sub(self, rhs: Amount) -> Amount { Amount(self.0.saturating_sub(rhs.0)) }
}

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractState {
  Signed,
  #[default]
  Draft,
}

impl ContractState {
  pub fn code(self) -> &'static str {
    match self {
      ContractState::Signed => "S",
      ContractState::Draft => "D",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      ContractState::Signed => "Signed",
      ContractState::Draft => "Draft",
    }
  }
}

impl FromStr for ContractState {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "S" => Ok(ContractState::Signed),
      "D" => Ok(ContractState::Draft),
      other => Err(Error::UnknownState(other.to_owned())),
    }
  }
}

// ─── Contract ────────────────────────────────────────────────────────────────

/// A contract joined with its client's and employee's emails.
/// Each client has at most one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
  pub contract_id:    Uuid,
  pub client_id:      Uuid,
  pub client_email:   String,
  pub employee_id:    Uuid,
  pub employee_email: String,
  pub total_costs:    Amount,
  pub amount_paid:    Amount,
  pub state:          ContractState,
  pub created_on:     DateTime<Utc>,
}

impl Contract {
  pub fn rest_amount(&self) -> Amount { self.total_costs - self.amount_paid }
}

/// Input for a new contract; client and employee are referenced by email.
#[derive(Debug, Clone)]
pub struct NewContract {
  pub client_email:   String,
  pub employee_email: String,
  pub total_costs:    Amount,
  pub amount_paid:    Amount,
  pub state:          ContractState,
}

#[derive(Debug, Clone, Default)]
pub struct ContractPatch {
  /// Reassigns the contract to the employee with this login email.
  pub employee_email: Option<String>,
  pub total_costs:    Option<Amount>,
  pub amount_paid:    Option<Amount>,
  pub state:          Option<ContractState>,
}

impl ContractPatch {
  pub fn is_empty(&self) -> bool {
    self.employee_email.is_none()
      && self.total_costs.is_none()
      && self.amount_paid.is_none()
      && self.state.is_none()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn amount_parses_whole_and_fractional_euros() {
    assert_eq!("1200".parse::<Amount>().unwrap().cents(), 120_000);
    assert_eq!("1200.5".parse::<Amount>().unwrap().cents(), 120_050);
    assert_eq!("1200.05".parse::<Amount>().unwrap().cents(), 120_005);
    assert_eq!(" 0.99 ".parse::<Amount>().unwrap().cents(), 99);
  }

  #[test]
  fn amount_rejects_malformed_input() {
    for bad in ["", ".", "12.", ".5", "1.234", "-3", "+3", "1,50", "12a", "1.2.3"] {
      assert!(bad.parse::<Amount>().is_err(), "{bad:?} should be rejected");
    }
  }

  #[test]
  fn amount_rejects_overflow() {
    assert!("92233720368547758.08".parse::<Amount>().is_err());
  }

  #[test]
  fn amount_display() {
    assert_eq!(Amount::from_cents(120_050).to_string(), "1200.50");
    assert_eq!(Amount::from_cents(7).euros(), "0.07 €");
    assert_eq!(Amount::from_cents(-150).to_string(), "-1.50");
  }

  #[test]
  fn rest_amount_is_total_minus_paid() {
    let contract = Contract {
      contract_id:    Uuid::new_v4(),
      client_id:      Uuid::new_v4(),
      client_email:   "c@example.com".into(),
      employee_id:    Uuid::new_v4(),
      employee_email: "e@example.com".into(),
      total_costs:    Amount::from_cents(100_000),
      amount_paid:    Amount::from_cents(25_000),
      state:          ContractState::Signed,
      created_on:     Utc::now(),
    };
    assert_eq!(contract.rest_amount(), Amount::from_cents(75_000));
  }

  #[test]
  fn state_codes() {
    assert_eq!("S".parse::<ContractState>().unwrap(), ContractState::Signed);
    assert_eq!("D".parse::<ContractState>().unwrap(), ContractState::Draft);
    assert!("X".parse::<ContractState>().is_err());
    assert_eq!(ContractState::default(), ContractState::Draft);
  }
}
