//! The `EpicStore` trait, the persistence contract the CLI is written
//! against.
//!
//! Implemented by storage backends (e.g. `epic-store-sqlite`). Records are
//! addressed by their unique emails on the way in and by UUID once fetched.
//! Every write that touches more than one table must be atomic.

use std::future::Future;

use uuid::Uuid;

use crate::{
  account::{Employee, EmployeePatch, NewEmployee, Principal},
  client::{Client, ClientPatch, NewClient},
  contract::{Contract, ContractPatch, NewContract},
  event::{Event, EventPatch, NewEvent},
};

/// Abstraction over an Epic Events store backend.
///
/// Integrity failures (a duplicate unique field, a missing referenced
/// record) must convert into [`Error::AlreadyExists`](crate::Error) and
/// [`Error::DoesNotExist`](crate::Error) so callers can tell them apart from
/// backend failures.
pub trait EpicStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + Into<crate::Error> + 'static;

  // ── Identity ──────────────────────────────────────────────────────────

  /// Check an email/password pair. `None` if the email is unknown, the
  /// password is wrong, or no employee is attached to the identity.
  fn authenticate(
    &self,
    email: String,
    password: String,
  ) -> impl Future<Output = Result<Option<Principal>, Self::Error>> + Send + '_;

  /// Resolve a login identity to the employee acting through it.
  fn get_principal(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Option<Principal>, Self::Error>> + Send + '_;

  // ── Employees ─────────────────────────────────────────────────────────

  fn list_employees(
    &self,
  ) -> impl Future<Output = Result<Vec<Employee>, Self::Error>> + Send + '_;

  /// Find an employee by its login email.
  fn find_employee(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// Create the login identity and the employee in one transaction.
  fn create_employee(
    &self,
    input: NewEmployee,
  ) -> impl Future<Output = Result<Employee, Self::Error>> + Send + '_;

  /// Apply `patch`; an email change rewrites the login identity in the same
  /// transaction as the employee row.
  fn update_employee(
    &self,
    employee_id: Uuid,
    patch: EmployeePatch,
  ) -> impl Future<Output = Result<Employee, Self::Error>> + Send + '_;

  /// Delete the employee together with its login identity.
  fn delete_employee(
    &self,
    employee_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Clients ───────────────────────────────────────────────────────────

  fn list_clients(&self)
  -> impl Future<Output = Result<Vec<Client>, Self::Error>> + Send + '_;

  /// Clients whose sales contact is `employee_id`.
  fn list_clients_of(
    &self,
    employee_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Client>, Self::Error>> + Send + '_;

  fn find_client(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<Client>, Self::Error>> + Send + '_;

  fn create_client(
    &self,
    input: NewClient,
  ) -> impl Future<Output = Result<Client, Self::Error>> + Send + '_;

  fn update_client(
    &self,
    client_id: Uuid,
    patch: ClientPatch,
  ) -> impl Future<Output = Result<Client, Self::Error>> + Send + '_;

  /// Delete a client along with its contract and events.
  fn delete_client(
    &self,
    client_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Contracts ─────────────────────────────────────────────────────────

  fn list_contracts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contract>, Self::Error>> + Send + '_;

  /// Contracts handled by `employee_id`.
  fn list_contracts_of(
    &self,
    employee_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Contract>, Self::Error>> + Send + '_;

  /// Find the contract of the client with this email.
  fn find_contract(
    &self,
    client_email: String,
  ) -> impl Future<Output = Result<Option<Contract>, Self::Error>> + Send + '_;

  fn create_contract(
    &self,
    input: NewContract,
  ) -> impl Future<Output = Result<Contract, Self::Error>> + Send + '_;

  fn update_contract(
    &self,
    contract_id: Uuid,
    patch: ContractPatch,
  ) -> impl Future<Output = Result<Contract, Self::Error>> + Send + '_;

  /// Delete a contract along with its events.
  fn delete_contract(
    &self,
    contract_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Events ────────────────────────────────────────────────────────────

  fn list_events(&self) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + '_;

  /// Events assigned to `employee_id`.
  fn list_events_of(
    &self,
    employee_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + '_;

  /// Find the earliest event of the client with this email.
  fn find_event(
    &self,
    client_email: String,
  ) -> impl Future<Output = Result<Option<Event>, Self::Error>> + Send + '_;

  fn create_event(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  fn update_event(
    &self,
    event_id: Uuid,
    patch: EventPatch,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  fn delete_event(
    &self,
    event_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
