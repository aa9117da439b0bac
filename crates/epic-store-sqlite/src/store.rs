//! [`SqliteStore`], the SQLite implementation of [`EpicStore`].
//!
//! Writes that check a reference or a unique field run the check and the
//! write inside one transaction. Integrity failures travel out of the
//! connection thread as the inner `Err` of a nested result so they arrive
//! as [`epic_core::Error`] rather than as a database error.

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension as _, params};
use uuid::Uuid;

use epic_core::{
  account::{Employee, EmployeePatch, NewEmployee, Principal, Role},
  client::{Client, ClientPatch, NewClient},
  contract::{Contract, ContractPatch, NewContract},
  event::{Event, EventPatch, NewEvent},
  store::EpicStore,
};

use crate::{
  Result,
  encode::{
    CLIENT_SELECT, CONTRACT_SELECT, EMPLOYEE_SELECT, EVENT_SELECT, RawClient, RawContract,
    RawEmployee, RawEvent, encode_dt, encode_uuid,
  },
  password,
  schema::SCHEMA,
};

fn already(entity: &'static str, key: impl Into<String>) -> epic_core::Error {
  epic_core::Error::AlreadyExists { entity, key: key.into() }
}

fn missing(entity: &'static str, key: impl Into<String>) -> epic_core::Error {
  epic_core::Error::DoesNotExist { entity, key: key.into() }
}

// ─── Lookups shared by the write paths ───────────────────────────────────────

fn user_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Option<String>> {
  conn
    .query_row("SELECT user_id FROM users WHERE email = ?1", params![email], |r| r.get(0))
    .optional()
}

fn employee_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Option<String>> {
  conn
    .query_row(
      "SELECT e.employee_id FROM employees e
       JOIN users u ON u.user_id = e.user_id
       WHERE u.email = ?1",
      params![email],
      |r| r.get(0),
    )
    .optional()
}

fn client_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Option<String>> {
  conn
    .query_row("SELECT client_id FROM clients WHERE email = ?1", params![email], |r| r.get(0))
    .optional()
}

fn select_employee(conn: &Connection, employee_id: &str) -> rusqlite::Result<RawEmployee> {
  conn.query_row(
    &format!("{EMPLOYEE_SELECT} WHERE e.employee_id = ?1"),
    params![employee_id],
    RawEmployee::from_row,
  )
}

fn select_client(conn: &Connection, client_id: &str) -> rusqlite::Result<RawClient> {
  conn.query_row(
    &format!("{CLIENT_SELECT} WHERE c.client_id = ?1"),
    params![client_id],
    RawClient::from_row,
  )
}

fn select_contract(conn: &Connection, contract_id: &str) -> rusqlite::Result<RawContract> {
  conn.query_row(
    &format!("{CONTRACT_SELECT} WHERE k.contract_id = ?1"),
    params![contract_id],
    RawContract::from_row,
  )
}

fn select_event(conn: &Connection, event_id: &str) -> rusqlite::Result<RawEvent> {
  conn.query_row(
    &format!("{EVENT_SELECT} WHERE v.event_id = ?1"),
    params![event_id],
    RawEvent::from_row,
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Epic Events store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Delete one row by primary key; zero affected rows is `DoesNotExist`.
  async fn delete_row(&self, sql: &'static str, entity: &'static str, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        let affected = conn.execute(sql, params![id_str])?;
        if affected == 0 {
          return Ok(Err(missing(entity, id_str)));
        }
        Ok(Ok(()))
      })
      .await??;
    tracing::info!(%id, entity, "deleted");
    Ok(())
  }
}

// ─── EpicStore impl ──────────────────────────────────────────────────────────

impl EpicStore for SqliteStore {
  type Error = crate::Error;

  // ── Identity ──────────────────────────────────────────────────────────────

  async fn authenticate(&self, email: String, password: String) -> Result<Option<Principal>> {
    let found: Option<(String, Option<RawEmployee>)> = self
      .conn
      .call(move |conn| {
        let hash: Option<String> = conn
          .query_row(
            "SELECT password_hash FROM users WHERE email = ?1",
            params![email],
            |r| r.get(0),
          )
          .optional()?;
        let Some(hash) = hash else { return Ok(None) };
        let employee = conn
          .query_row(
            &format!("{EMPLOYEE_SELECT} WHERE u.email = ?1"),
            params![email],
            RawEmployee::from_row,
          )
          .optional()?;
        Ok(Some((hash, employee)))
      })
      .await?;

    let Some((hash, employee)) = found else {
      tracing::debug!("authentication failed: unknown email");
      return Ok(None);
    };
    if !password::verify(&password, &hash) {
      tracing::debug!("authentication failed: wrong password");
      return Ok(None);
    }
    employee.map(RawEmployee::into_principal).transpose()
  }

  async fn get_principal(&self, user_id: Uuid) -> Result<Option<Principal>> {
    let id_str = encode_uuid(user_id);
    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{EMPLOYEE_SELECT} WHERE e.user_id = ?1"),
              params![id_str],
              RawEmployee::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawEmployee::into_principal).transpose()
  }

  // ── Employees ─────────────────────────────────────────────────────────────

  async fn list_employees(&self) -> Result<Vec<Employee>> {
    let raws: Vec<RawEmployee> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("{EMPLOYEE_SELECT} ORDER BY e.last_name, e.first_name"))?;
        let rows = stmt
          .query_map([], RawEmployee::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawEmployee::into_employee).collect()
  }

  async fn find_employee(&self, email: String) -> Result<Option<Employee>> {
    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{EMPLOYEE_SELECT} WHERE u.email = ?1"),
              params![email],
              RawEmployee::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawEmployee::into_employee).transpose()
  }

  async fn create_employee(&self, input: NewEmployee) -> Result<Employee> {
    let password_hash = password::hash(&input.password)?;
    let user_id = encode_uuid(Uuid::new_v4());
    let employee_id = encode_uuid(Uuid::new_v4());
    let now = encode_dt(Utc::now());
    let role = input.role.code();

    let raw: RawEmployee = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if user_by_email(&tx, &input.email)?.is_some() {
          return Ok(Err(already("employee", input.email)));
        }
        tx.execute(
          "INSERT INTO users (user_id, email, password_hash, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          params![user_id, input.email, password_hash, now],
        )?;
        tx.execute(
          "INSERT INTO employees (employee_id, user_id, first_name, last_name, role)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          params![employee_id, user_id, input.first_name, input.last_name, role],
        )?;
        let raw = select_employee(&tx, &employee_id)?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await??;

    tracing::info!(email = %raw.email, role = %raw.role, "employee created");
    raw.into_employee()
  }

  async fn update_employee(&self, employee_id: Uuid, patch: EmployeePatch) -> Result<Employee> {
    let id_str = encode_uuid(employee_id);
    let role = patch.role.map(Role::code);

    let raw: RawEmployee = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let user_id: Option<String> = tx
          .query_row(
            "SELECT user_id FROM employees WHERE employee_id = ?1",
            params![id_str],
            |r| r.get(0),
          )
          .optional()?;
        let Some(user_id) = user_id else {
          return Ok(Err(missing("employee", id_str)));
        };

        if let Some(email) = &patch.email {
          let holder = user_by_email(&tx, email)?;
          if holder.is_some_and(|h| h != user_id) {
            return Ok(Err(already("employee", email.clone())));
          }
          tx.execute(
            "UPDATE users SET email = ?2 WHERE user_id = ?1",
            params![user_id, email],
          )?;
        }

        tx.execute(
          "UPDATE employees SET
             first_name = COALESCE(?2, first_name),
             last_name  = COALESCE(?3, last_name),
             role       = COALESCE(?4, role)
           WHERE employee_id = ?1",
          params![id_str, patch.first_name, patch.last_name, role],
        )?;
        let raw = select_employee(&tx, &id_str)?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await??;

    tracing::info!(email = %raw.email, "employee updated");
    raw.into_employee()
  }

  async fn delete_employee(&self, employee_id: Uuid) -> Result<()> {
    // Removing the login identity cascades to the employee row.
    self
      .delete_row(
        "DELETE FROM users
         WHERE user_id = (SELECT user_id FROM employees WHERE employee_id = ?1)",
        "employee",
        employee_id,
      )
      .await
  }

  // ── Clients ───────────────────────────────────────────────────────────────

  async fn list_clients(&self) -> Result<Vec<Client>> {
    let raws: Vec<RawClient> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{CLIENT_SELECT} ORDER BY c.created_on"))?;
        let rows = stmt
          .query_map([], RawClient::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawClient::into_client).collect()
  }

  async fn list_clients_of(&self, employee_id: Uuid) -> Result<Vec<Client>> {
    let id_str = encode_uuid(employee_id);
    let raws: Vec<RawClient> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "{CLIENT_SELECT} WHERE c.employee_id = ?1 ORDER BY c.created_on"
        ))?;
        let rows = stmt
          .query_map(params![id_str], RawClient::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawClient::into_client).collect()
  }

  async fn find_client(&self, email: String) -> Result<Option<Client>> {
    let raw: Option<RawClient> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{CLIENT_SELECT} WHERE c.email = ?1"),
              params![email],
              RawClient::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawClient::into_client).transpose()
  }

  async fn create_client(&self, input: NewClient) -> Result<Client> {
    let client_id = encode_uuid(Uuid::new_v4());
    let employee_id = input.employee_id.map(encode_uuid);
    let now = encode_dt(Utc::now());

    let raw: RawClient = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if client_by_email(&tx, &input.email)?.is_some() {
          return Ok(Err(already("client", input.email)));
        }
        if let Some(id) = &employee_id {
          let known: Option<bool> = tx
            .query_row(
              "SELECT 1 FROM employees WHERE employee_id = ?1",
              params![id],
              |_| Ok(true),
            )
            .optional()?;
          if known.is_none() {
            return Ok(Err(missing("employee", id.clone())));
          }
        }
        tx.execute(
          "INSERT INTO clients (
             client_id, email, first_name, last_name, phone, company_name,
             employee_id, created_on, last_update
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
          params![
            client_id,
            input.email,
            input.first_name,
            input.last_name,
            input.phone,
            input.company_name,
            employee_id,
            now,
          ],
        )?;
        let raw = select_client(&tx, &client_id)?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await??;

    tracing::info!(email = %raw.email, "client created");
    raw.into_client()
  }

  async fn update_client(&self, client_id: Uuid, patch: ClientPatch) -> Result<Client> {
    let id_str = encode_uuid(client_id);
    let now = encode_dt(Utc::now());

    let raw: RawClient = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if let Some(email) = &patch.email {
          let holder = client_by_email(&tx, email)?;
          if holder.is_some_and(|h| h != id_str) {
            return Ok(Err(already("client", email.clone())));
          }
        }
        let affected = tx.execute(
          "UPDATE clients SET
             email        = COALESCE(?2, email),
             first_name   = COALESCE(?3, first_name),
             last_name    = COALESCE(?4, last_name),
             phone        = COALESCE(?5, phone),
             company_name = COALESCE(?6, company_name),
             last_update  = ?7
           WHERE client_id = ?1",
          params![
            id_str,
            patch.email,
            patch.first_name,
            patch.last_name,
            patch.phone,
            patch.company_name,
            now,
          ],
        )?;
        if affected == 0 {
          return Ok(Err(missing("client", id_str)));
        }
        let raw = select_client(&tx, &id_str)?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await??;

    tracing::info!(email = %raw.email, "client updated");
    raw.into_client()
  }

  async fn delete_client(&self, client_id: Uuid) -> Result<()> {
    self
      .delete_row("DELETE FROM clients WHERE client_id = ?1", "client", client_id)
      .await
  }

  // ── Contracts ─────────────────────────────────────────────────────────────

  async fn list_contracts(&self) -> Result<Vec<Contract>> {
    let raws: Vec<RawContract> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{CONTRACT_SELECT} ORDER BY k.created_on"))?;
        let rows = stmt
          .query_map([], RawContract::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawContract::into_contract).collect()
  }

  async fn list_contracts_of(&self, employee_id: Uuid) -> Result<Vec<Contract>> {
    let id_str = encode_uuid(employee_id);
    let raws: Vec<RawContract> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "{CONTRACT_SELECT} WHERE k.employee_id = ?1 ORDER BY k.created_on"
        ))?;
        let rows = stmt
          .query_map(params![id_str], RawContract::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawContract::into_contract).collect()
  }

  async fn find_contract(&self, client_email: String) -> Result<Option<Contract>> {
    let raw: Option<RawContract> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{CONTRACT_SELECT} WHERE c.email = ?1"),
              params![client_email],
              RawContract::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawContract::into_contract).transpose()
  }

  async fn create_contract(&self, input: NewContract) -> Result<Contract> {
    let contract_id = encode_uuid(Uuid::new_v4());
    let now = encode_dt(Utc::now());

    let raw: RawContract = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(client_id) = client_by_email(&tx, &input.client_email)? else {
          return Ok(Err(missing("client", input.client_email)));
        };
        let Some(employee_id) = employee_by_email(&tx, &input.employee_email)? else {
          return Ok(Err(missing("employee", input.employee_email)));
        };
        let taken: Option<bool> = tx
          .query_row(
            "SELECT 1 FROM contracts WHERE client_id = ?1",
            params![client_id],
            |_| Ok(true),
          )
          .optional()?;
        if taken.is_some() {
          return Ok(Err(already("contract", input.client_email)));
        }
        tx.execute(
          "INSERT INTO contracts (
             contract_id, client_id, employee_id, total_costs, amount_paid,
             state, created_on
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          params![
            contract_id,
            client_id,
            employee_id,
            input.total_costs.cents(),
            input.amount_paid.cents(),
            input.state.code(),
            now,
          ],
        )?;
        let raw = select_contract(&tx, &contract_id)?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await??;

    tracing::info!(client = %raw.client_email, "contract created");
    raw.into_contract()
  }

  async fn update_contract(&self, contract_id: Uuid, patch: ContractPatch) -> Result<Contract> {
    let id_str = encode_uuid(contract_id);

    let raw: RawContract = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let employee_id = match &patch.employee_email {
          Some(email) => match employee_by_email(&tx, email)? {
            Some(id) => Some(id),
            None => return Ok(Err(missing("employee", email.clone()))),
          },
          None => None,
        };
        let affected = tx.execute(
          "UPDATE contracts SET
             employee_id = COALESCE(?2, employee_id),
             total_costs = COALESCE(?3, total_costs),
             amount_paid = COALESCE(?4, amount_paid),
             state       = COALESCE(?5, state)
           WHERE contract_id = ?1",
          params![
            id_str,
            employee_id,
            patch.total_costs.map(|a| a.cents()),
            patch.amount_paid.map(|a| a.cents()),
            patch.state.map(|s| s.code()),
          ],
        )?;
        if affected == 0 {
          return Ok(Err(missing("contract", id_str)));
        }
        let raw = select_contract(&tx, &id_str)?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await??;

    tracing::info!(client = %raw.client_email, "contract updated");
    raw.into_contract()
  }

  async fn delete_contract(&self, contract_id: Uuid) -> Result<()> {
    self
      .delete_row("DELETE FROM contracts WHERE contract_id = ?1", "contract", contract_id)
      .await
  }

  // ── Events ────────────────────────────────────────────────────────────────

  async fn list_events(&self) -> Result<Vec<Event>> {
    let raws: Vec<RawEvent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{EVENT_SELECT} ORDER BY v.date, v.created_on"))?;
        let rows = stmt
          .query_map([], RawEvent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawEvent::into_event).collect()
  }

  async fn list_events_of(&self, employee_id: Uuid) -> Result<Vec<Event>> {
    let id_str = encode_uuid(employee_id);
    let raws: Vec<RawEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "{EVENT_SELECT} WHERE v.employee_id = ?1 ORDER BY v.date, v.created_on"
        ))?;
        let rows = stmt
          .query_map(params![id_str], RawEvent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawEvent::into_event).collect()
  }

  async fn find_event(&self, client_email: String) -> Result<Option<Event>> {
    let raw: Option<RawEvent> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{EVENT_SELECT} WHERE c.email = ?1 ORDER BY v.date, v.created_on LIMIT 1"),
              params![client_email],
              RawEvent::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawEvent::into_event).transpose()
  }

  async fn create_event(&self, input: NewEvent) -> Result<Event> {
    let event_id = encode_uuid(Uuid::new_v4());
    let date = encode_dt(input.date);
    let now = encode_dt(Utc::now());

    let raw: RawEvent = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let contract: Option<(String, Option<String>)> = tx
          .query_row(
            "SELECT k.contract_id, c.employee_id FROM contracts k
             JOIN clients c ON c.client_id = k.client_id
             WHERE c.email = ?1",
            params![input.client_email],
            |r| Ok((r.get(0)?, r.get(1)?)),
          )
          .optional()?;
        let Some((contract_id, employee_id)) = contract else {
          return Ok(Err(missing("contract", input.client_email)));
        };
        // the event goes to the client's sales contact
        let Some(employee_id) = employee_id else {
          return Ok(Err(missing("employee", input.client_email)));
        };
        let taken: Option<bool> = tx
          .query_row(
            "SELECT 1 FROM events WHERE contract_id = ?1 AND name = ?2",
            params![contract_id, input.name],
            |_| Ok(true),
          )
          .optional()?;
        if taken.is_some() {
          return Ok(Err(already("event", input.name)));
        }
        tx.execute(
          "INSERT INTO events (
             event_id, contract_id, employee_id, date, name, location,
             max_guests, notes, created_on
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          params![
            event_id,
            contract_id,
            employee_id,
            date,
            input.name,
            input.location,
            input.max_guests,
            input.notes,
            now,
          ],
        )?;
        let raw = select_event(&tx, &event_id)?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await??;

    tracing::info!(name = %raw.name, client = %raw.client_email, "event created");
    raw.into_event()
  }

  async fn update_event(&self, event_id: Uuid, patch: EventPatch) -> Result<Event> {
    let id_str = encode_uuid(event_id);
    let date = patch.date.map(encode_dt);

    let raw: RawEvent = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let contract_id: Option<String> = tx
          .query_row(
            "SELECT contract_id FROM events WHERE event_id = ?1",
            params![id_str],
            |r| r.get(0),
          )
          .optional()?;
        let Some(contract_id) = contract_id else {
          return Ok(Err(missing("event", id_str)));
        };

        let employee_id = match &patch.employee_email {
          Some(email) => match employee_by_email(&tx, email)? {
            Some(id) => Some(id),
            None => return Ok(Err(missing("employee", email.clone()))),
          },
          None => None,
        };

        if let Some(name) = &patch.name {
          let holder: Option<String> = tx
            .query_row(
              "SELECT event_id FROM events WHERE contract_id = ?1 AND name = ?2",
              params![contract_id, name],
              |r| r.get(0),
            )
            .optional()?;
          if holder.is_some_and(|h| h != id_str) {
            return Ok(Err(already("event", name.clone())));
          }
        }

        tx.execute(
          "UPDATE events SET
             employee_id = COALESCE(?2, employee_id),
             date        = COALESCE(?3, date),
             name        = COALESCE(?4, name),
             location    = COALESCE(?5, location),
             max_guests  = COALESCE(?6, max_guests),
             notes       = COALESCE(?7, notes)
           WHERE event_id = ?1",
          params![
            id_str,
            employee_id,
            date,
            patch.name,
            patch.location,
            patch.max_guests,
            patch.notes,
          ],
        )?;
        let raw = select_event(&tx, &id_str)?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await??;

    tracing::info!(name = %raw.name, "event updated");
    raw.into_event()
  }

  async fn delete_event(&self, event_id: Uuid) -> Result<()> {
    self
      .delete_row("DELETE FROM events WHERE event_id = ?1", "event", event_id)
      .await
  }
}
