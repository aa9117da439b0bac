//! Clients: the companies' contact persons Epic Events sells to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client joined with the email of its sales contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
  pub client_id:      Uuid,
  pub email:          String,
  pub first_name:     String,
  pub last_name:      String,
  pub phone:          String,
  pub company_name:   String,
  /// `None` once the sales contact has been deleted.
  pub employee_id:    Option<Uuid>,
  pub employee_email: Option<String>,
  pub created_on:     DateTime<Utc>,
  pub last_update:    DateTime<Utc>,
}

impl Client {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

#[derive(Debug, Clone)]
pub struct NewClient {
  pub email:        String,
  pub first_name:   String,
  pub last_name:    String,
  pub phone:        String,
  pub company_name: String,
  pub employee_id:  Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
  pub email:        Option<String>,
  pub first_name:   Option<String>,
  pub last_name:    Option<String>,
  pub phone:        Option<String>,
  pub company_name: Option<String>,
}

impl ClientPatch {
  pub fn is_empty(&self) -> bool {
    self.email.is_none()
      && self.first_name.is_none()
      && self.last_name.is_none()
      && self.phone.is_none()
      && self.company_name.is_none()
  }
}
