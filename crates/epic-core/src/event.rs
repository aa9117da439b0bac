//! Events organised under a signed (or draft) contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An event joined with its client's email and its support contact's email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub event_id:       Uuid,
  pub contract_id:    Uuid,
  pub client_email:   String,
  pub employee_id:    Uuid,
  pub employee_email: String,
  pub date:           DateTime<Utc>,
  pub name:           String,
  pub location:       String,
  /// Always at least 1.
  pub max_guests:     u32,
  pub notes:          String,
}

/// Input for a new event. The contract is found through the client's email;
/// the contract's employee becomes the event's initial contact.
#[derive(Debug, Clone)]
pub struct NewEvent {
  pub client_email: String,
  pub date:         DateTime<Utc>,
  pub name:         String,
  pub location:     String,
  pub max_guests:   u32,
  pub notes:        String,
}

#[derive(Debug, Clone, Default)]
pub struct EventPatch {
  /// Reassigns the event to the employee with this login email.
  pub employee_email: Option<String>,
  pub date:           Option<DateTime<Utc>>,
  pub name:           Option<String>,
  pub location:       Option<String>,
  pub max_guests:     Option<u32>,
  pub notes:          Option<String>,
}

impl EventPatch {
  pub fn is_empty(&self) -> bool {
    self.employee_email.is_none()
      && self.date.is_none()
      && self.name.is_none()
      && self.location.is_none()
      && self.max_guests.is_none()
      && self.notes.is_none()
  }
}
