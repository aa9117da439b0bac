//! Field-level access to entity records, used for outcome reporting.
//!
//! Commands refer to fields by name (`"first_name"`, `"role"`, …). A record
//! exposes the raw value of each field it knows and, for some fields, a
//! human-readable rendering (role code → label, amount → euros, …).

use chrono::{DateTime, Utc};

use crate::{account::Employee, client::Client, contract::Contract, event::Event};

/// Field access by name.
pub trait Record {
  /// Raw value of `name`, or `None` if this record does not expose it.
  fn field(&self, name: &str) -> Option<String>;

  /// Display rendering registered for `name`, if any.
  fn display(&self, _name: &str) -> Option<String> { None }

  /// The display rendering when one is registered, the raw value otherwise.
  fn display_value(&self, name: &str) -> Option<String> {
    let raw = self.field(name)?;
    Some(self.display(name).unwrap_or(raw))
  }
}

/// `DD/MM/YYYY`, the format dates are entered in.
pub fn format_date(dt: &DateTime<Utc>) -> String { dt.format("%d/%m/%Y").to_string() }

impl Record for Employee {
  fn field(&self, name: &str) -> Option<String> {
    match name {
      "email" => Some(self.email.clone()),
      "first_name" => Some(self.first_name.clone()),
      "last_name" => Some(self.last_name.clone()),
      "full_name" => Some(self.full_name()),
      "role" => Some(self.role.code().to_owned()),
      _ => None,
    }
  }

  fn display(&self, name: &str) -> Option<String> {
    match name {
      "role" => Some(self.role.label().to_owned()),
      _ => None,
    }
  }
}

impl Record for Client {
  fn field(&self, name: &str) -> Option<String> {
    match name {
      "email" => Some(self.email.clone()),
      "first_name" => Some(self.first_name.clone()),
      "last_name" => Some(self.last_name.clone()),
      "phone" => Some(self.phone.clone()),
      "company_name" => Some(self.company_name.clone()),
      "employee_email" => Some(self.employee_email.clone().unwrap_or_default()),
      "created_on" => Some(self.created_on.to_rfc3339()),
      "last_update" => Some(self.last_update.to_rfc3339()),
      _ => None,
    }
  }

  fn display(&self, name: &str) -> Option<String> {
    match name {
      "created_on" => Some(format_date(&self.created_on)),
      "last_update" => Some(format_date(&self.last_update)),
      _ => None,
    }
  }
}

impl Record for Contract {
  fn field(&self, name: &str) -> Option<String> {
    match name {
      "client_email" => Some(self.client_email.clone()),
      "employee_email" => Some(self.employee_email.clone()),
      "total_costs" => Some(self.total_costs.to_string()),
      "amount_paid" => Some(self.amount_paid.to_string()),
      "rest_amount" => Some(self.rest_amount().to_string()),
      "state" => Some(self.state.code().to_owned()),
      "created_on" => Some(self.created_on.to_rfc3339()),
      _ => None,
    }
  }

  fn display(&self, name: &str) -> Option<String> {
    match name {
      "total_costs" => Some(self.total_costs.euros()),
      "amount_paid" => Some(self.amount_paid.euros()),
      "rest_amount" => Some(self.rest_amount().euros()),
      "state" => Some(self.state.label().to_owned()),
      "created_on" => Some(format_date(&self.created_on)),
      _ => None,
    }
  }
}

impl Record for Event {
  fn field(&self, name: &str) -> Option<String> {
    match name {
      "client_email" => Some(self.client_email.clone()),
      "employee_email" => Some(self.employee_email.clone()),
      "date" => Some(self.date.to_rfc3339()),
      "name" => Some(self.name.clone()),
      "location" => Some(self.location.clone()),
      "max_guests" => Some(self.max_guests.to_string()),
      "notes" => Some(self.notes.clone()),
      _ => None,
    }
  }

  fn display(&self, name: &str) -> Option<String> {
    match name {
      "date" => Some(format_date(&self.date)),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use uuid::Uuid;

  use super::*;
  use crate::{
    account::Role,
    contract::{Amount, ContractState},
  };

  fn employee() -> Employee {
    Employee {
      employee_id: Uuid::new_v4(),
      user_id:     Uuid::new_v4(),
      email:       "sam@epic.test".into(),
      first_name:  "Sam".into(),
      last_name:   "Seller".into(),
      role:        Role::Sales,
    }
  }

  #[test]
  fn role_is_displayed_by_label() {
    let e = employee();
    assert_eq!(e.field("role").as_deref(), Some("SA"));
    assert_eq!(e.display_value("role").as_deref(), Some("Sales"));
  }

  #[test]
  fn unexposed_fields_have_no_value() {
    let e = employee();
    assert_eq!(e.field("password"), None);
    assert_eq!(e.display_value("password"), None);
  }

  #[test]
  fn fields_without_display_fall_back_to_raw() {
    let e = employee();
    assert_eq!(e.display_value("first_name").as_deref(), Some("Sam"));
  }

  #[test]
  fn contract_amounts_and_state() {
    let c = Contract {
      contract_id:    Uuid::new_v4(),
      client_id:      Uuid::new_v4(),
      client_email:   "client@corp.test".into(),
      employee_id:    Uuid::new_v4(),
      employee_email: "sam@epic.test".into(),
      total_costs:    Amount::from_cents(150_000),
      amount_paid:    Amount::from_cents(50_000),
      state:          ContractState::Signed,
      created_on:     Utc::now(),
    };
    assert_eq!(c.display_value("total_costs").as_deref(), Some("1500.00 €"));
    assert_eq!(c.display_value("rest_amount").as_deref(), Some("1000.00 €"));
    assert_eq!(c.display_value("state").as_deref(), Some("Signed"));
  }

  #[test]
  fn event_dates_render_day_first() {
    let e = Event {
      event_id:       Uuid::new_v4(),
      contract_id:    Uuid::new_v4(),
      client_email:   "client@corp.test".into(),
      employee_id:    Uuid::new_v4(),
      employee_email: "sue@epic.test".into(),
      date:           Utc.with_ymd_and_hms(2025, 12, 15, 0, 0, 0).unwrap(),
      name:           "Launch".into(),
      location:       "Paris".into(),
      max_guests:     80,
      notes:          String::new(),
    };
    assert_eq!(e.display_value("date").as_deref(), Some("15/12/2025"));
    assert_eq!(e.display_value("max_guests").as_deref(), Some("80"));
  }
}
