//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, UUIDs hyphenated lowercase strings,
//! amounts integer cents, roles and contract states their one- or two-letter
//! codes.

use chrono::{DateTime, Utc};
use epic_core::{
  account::{Employee, Principal, Role},
  client::Client,
  contract::{Amount, Contract, ContractState},
  event::Event,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

fn decode_role(s: &str) -> Result<Role> {
  s.parse().map_err(|_| Error::Corrupt { column: "role", value: s.to_owned() })
}

fn decode_state(s: &str) -> Result<ContractState> {
  s.parse().map_err(|_| Error::Corrupt { column: "state", value: s.to_owned() })
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Every employee joined with its login email. Callers append `WHERE`.
pub const EMPLOYEE_SELECT: &str = "
  SELECT e.employee_id, e.user_id, u.email, e.first_name, e.last_name, e.role
  FROM employees e
  JOIN users u ON u.user_id = e.user_id";

pub const CLIENT_SELECT: &str = "
  SELECT c.client_id, c.email, c.first_name, c.last_name, c.phone,
         c.company_name, c.employee_id, u.email, c.created_on, c.last_update
  FROM clients c
  LEFT JOIN employees e ON e.employee_id = c.employee_id
  LEFT JOIN users     u ON u.user_id     = e.user_id";

pub const CONTRACT_SELECT: &str = "
  SELECT k.contract_id, k.client_id, c.email, k.employee_id, u.email,
         k.total_costs, k.amount_paid, k.state, k.created_on
  FROM contracts k
  JOIN clients   c ON c.client_id   = k.client_id
  JOIN employees e ON e.employee_id = k.employee_id
  JOIN users     u ON u.user_id     = e.user_id";

pub const EVENT_SELECT: &str = "
  SELECT v.event_id, v.contract_id, c.email, v.employee_id, u.email,
         v.date, v.name, v.location, v.max_guests, v.notes
  FROM events v
  JOIN contracts k ON k.contract_id = v.contract_id
  JOIN clients   c ON c.client_id   = k.client_id
  JOIN employees e ON e.employee_id = v.employee_id
  JOIN users     u ON u.user_id     = e.user_id";

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw columns of an [`EMPLOYEE_SELECT`] row.
pub struct RawEmployee {
  pub employee_id: String,
  pub user_id:     String,
  pub email:       String,
  pub first_name:  String,
  pub last_name:   String,
  pub role:        String,
}

impl RawEmployee {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      employee_id: row.get(0)?,
      user_id:     row.get(1)?,
      email:       row.get(2)?,
      first_name:  row.get(3)?,
      last_name:   row.get(4)?,
      role:        row.get(5)?,
    })
  }

  pub fn into_employee(self) -> Result<Employee> {
    Ok(Employee {
      employee_id: decode_uuid(&self.employee_id)?,
      user_id:     decode_uuid(&self.user_id)?,
      email:       self.email,
      first_name:  self.first_name,
      last_name:   self.last_name,
      role:        decode_role(&self.role)?,
    })
  }

  pub fn into_principal(self) -> Result<Principal> {
    let employee = self.into_employee()?;
    Ok(Principal {
      user_id:     employee.user_id,
      employee_id: employee.employee_id,
      full_name:   employee.full_name(),
      email:       employee.email,
      role:        employee.role,
    })
  }
}

pub struct RawClient {
  pub client_id:      String,
  pub email:          String,
  pub first_name:     String,
  pub last_name:      String,
  pub phone:          String,
  pub company_name:   String,
  pub employee_id:    Option<String>,
  pub employee_email: Option<String>,
  pub created_on:     String,
  pub last_update:    String,
}

impl RawClient {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      client_id:      row.get(0)?,
      email:          row.get(1)?,
      first_name:     row.get(2)?,
      last_name:      row.get(3)?,
      phone:          row.get(4)?,
      company_name:   row.get(5)?,
      employee_id:    row.get(6)?,
      employee_email: row.get(7)?,
      created_on:     row.get(8)?,
      last_update:    row.get(9)?,
    })
  }

  pub fn into_client(self) -> Result<Client> {
    Ok(Client {
      client_id:      decode_uuid(&self.client_id)?,
      email:          self.email,
      first_name:     self.first_name,
      last_name:      self.last_name,
      phone:          self.phone,
      company_name:   self.company_name,
      employee_id:    self.employee_id.as_deref().map(decode_uuid).transpose()?,
      employee_email: self.employee_email,
      created_on:     decode_dt(&self.created_on)?,
      last_update:    decode_dt(&self.last_update)?,
    })
  }
}

pub struct RawContract {
  pub contract_id:    String,
  pub client_id:      String,
  pub client_email:   String,
  pub employee_id:    String,
  pub employee_email: String,
  pub total_costs:    i64,
  pub amount_paid:    i64,
  pub state:          String,
  pub created_on:     String,
}

impl RawContract {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      contract_id:    row.get(0)?,
      client_id:      row.get(1)?,
      client_email:   row.get(2)?,
      employee_id:    row.get(3)?,
      employee_email: row.get(4)?,
      total_costs:    row.get(5)?,
      amount_paid:    row.get(6)?,
      state:          row.get(7)?,
      created_on:     row.get(8)?,
    })
  }

  pub fn into_contract(self) -> Result<Contract> {
    Ok(Contract {
      contract_id:    decode_uuid(&self.contract_id)?,
      client_id:      decode_uuid(&self.client_id)?,
      client_email:   self.client_email,
      employee_id:    decode_uuid(&self.employee_id)?,
      employee_email: self.employee_email,
      total_costs:    Amount::from_cents(self.total_costs),
      amount_paid:    Amount::from_cents(self.amount_paid),
      state:          decode_state(&self.state)?,
      created_on:     decode_dt(&self.created_on)?,
    })
  }
}

pub struct RawEvent {
  pub event_id:       String,
  pub contract_id:    String,
  pub client_email:   String,
  pub employee_id:    String,
  pub employee_email: String,
  pub date:           String,
  pub name:           String,
  pub location:       String,
  pub max_guests:     i64,
  pub notes:          String,
}

impl RawEvent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      event_id:       row.get(0)?,
      contract_id:    row.get(1)?,
      client_email:   row.get(2)?,
      employee_id:    row.get(3)?,
      employee_email: row.get(4)?,
      date:           row.get(5)?,
      name:           row.get(6)?,
      location:       row.get(7)?,
      max_guests:     row.get(8)?,
      notes:          row.get(9)?,
    })
  }

  pub fn into_event(self) -> Result<Event> {
    let max_guests = u32::try_from(self.max_guests).map_err(|_| Error::Corrupt {
      column: "max_guests",
      value:  self.max_guests.to_string(),
    })?;
    Ok(Event {
      event_id: decode_uuid(&self.event_id)?,
      contract_id: decode_uuid(&self.contract_id)?,
      client_email: self.client_email,
      employee_id: decode_uuid(&self.employee_id)?,
      employee_email: self.employee_email,
      date: decode_dt(&self.date)?,
      name: self.name,
      location: self.location,
      max_guests,
      notes: self.notes,
    })
  }
}
