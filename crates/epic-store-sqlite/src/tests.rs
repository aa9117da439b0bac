//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use epic_core::{
  account::{Employee, EmployeePatch, NewEmployee, Role},
  client::{Client, ClientPatch, NewClient},
  contract::{Amount, Contract, ContractPatch, ContractState, NewContract},
  event::{EventPatch, NewEvent},
  store::EpicStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_employee(email: &str, role: Role) -> NewEmployee {
  NewEmployee {
    email:      email.into(),
    password:   "correct-horse".into(),
    first_name: "Ada".into(),
    last_name:  "Lovelace".into(),
    role,
  }
}

fn new_client(email: &str, employee_id: Uuid) -> NewClient {
  NewClient {
    email:        email.into(),
    first_name:   "Cli".into(),
    last_name:    "Ent".into(),
    phone:        "0601020304".into(),
    company_name: "Corp".into(),
    employee_id:  Some(employee_id),
  }
}

fn new_contract(client_email: &str, employee_email: &str) -> NewContract {
  NewContract {
    client_email:   client_email.into(),
    employee_email: employee_email.into(),
    total_costs:    Amount::from_cents(150_000),
    amount_paid:    Amount::from_cents(50_000),
    state:          ContractState::Signed,
  }
}

fn new_event(client_email: &str, name: &str, day: u32) -> NewEvent {
  NewEvent {
    client_email: client_email.into(),
    date:         Utc.with_ymd_and_hms(2025, 12, day, 0, 0, 0).unwrap(),
    name:         name.into(),
    location:     "Paris".into(),
    max_guests:   50,
    notes:        String::new(),
  }
}

/// A sales employee, their client, and a signed contract.
async fn seeded() -> (SqliteStore, Employee, Client, Contract) {
  let s = store().await;
  let sales = s
    .create_employee(new_employee("sam@epic.test", Role::Sales))
    .await
    .unwrap();
  let client = s
    .create_client(new_client("client@corp.test", sales.employee_id))
    .await
    .unwrap();
  let contract = s
    .create_contract(new_contract("client@corp.test", "sam@epic.test"))
    .await
    .unwrap();
  (s, sales, client, contract)
}

fn is_already_exists(e: &Error) -> bool {
  matches!(e, Error::Core(epic_core::Error::AlreadyExists { .. }))
}

fn is_missing(e: &Error) -> bool {
  matches!(e, Error::Core(epic_core::Error::DoesNotExist { .. }))
}

// ─── Identity ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn authenticate_checks_the_password() {
  let s = store().await;
  let emp = s
    .create_employee(new_employee("ma@epic.test", Role::Management))
    .await
    .unwrap();

  let ok = s
    .authenticate("ma@epic.test".into(), "correct-horse".into())
    .await
    .unwrap()
    .expect("valid credentials");
  assert_eq!(ok.employee_id, emp.employee_id);
  assert_eq!(ok.role, Role::Management);
  assert_eq!(ok.full_name, "Ada Lovelace");

  let wrong = s
    .authenticate("ma@epic.test".into(), "battery-staple".into())
    .await
    .unwrap();
  assert!(wrong.is_none());

  let unknown = s
    .authenticate("nobody@epic.test".into(), "correct-horse".into())
    .await
    .unwrap();
  assert!(unknown.is_none());
}

#[tokio::test]
async fn get_principal_by_user_id() {
  let s = store().await;
  let emp = s
    .create_employee(new_employee("su@epic.test", Role::Support))
    .await
    .unwrap();

  let principal = s.get_principal(emp.user_id).await.unwrap().unwrap();
  assert_eq!(principal.email, "su@epic.test");
  assert_eq!(principal.role, Role::Support);

  assert!(s.get_principal(Uuid::new_v4()).await.unwrap().is_none());
}

// ─── Employees ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_employee_email_is_rejected() {
  let s = store().await;
  s.create_employee(new_employee("dup@epic.test", Role::Sales))
    .await
    .unwrap();
  let err = s
    .create_employee(new_employee("dup@epic.test", Role::Support))
    .await
    .unwrap_err();
  assert!(is_already_exists(&err));
  assert_eq!(s.list_employees().await.unwrap().len(), 1);
}

#[tokio::test]
async fn employee_email_change_moves_the_login() {
  let s = store().await;
  let emp = s
    .create_employee(new_employee("old@epic.test", Role::Sales))
    .await
    .unwrap();

  let patch = EmployeePatch {
    email: Some("new@epic.test".into()),
    role: Some(Role::Management),
    ..Default::default()
  };
  let updated = s.update_employee(emp.employee_id, patch).await.unwrap();
  assert_eq!(updated.email, "new@epic.test");
  assert_eq!(updated.role, Role::Management);
  assert_eq!(updated.first_name, "Ada");

  assert!(
    s.authenticate("new@epic.test".into(), "correct-horse".into())
      .await
      .unwrap()
      .is_some()
  );
  assert!(s.find_employee("old@epic.test".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn employee_email_change_to_taken_email_fails_atomically() {
  let s = store().await;
  let a = s
    .create_employee(new_employee("a@epic.test", Role::Sales))
    .await
    .unwrap();
  s.create_employee(new_employee("b@epic.test", Role::Sales))
    .await
    .unwrap();

  let patch = EmployeePatch {
    email: Some("b@epic.test".into()),
    first_name: Some("Changed".into()),
    ..Default::default()
  };
  let err = s.update_employee(a.employee_id, patch).await.unwrap_err();
  assert!(is_already_exists(&err));

  let a = s.find_employee("a@epic.test".into()).await.unwrap().unwrap();
  assert_eq!(a.first_name, "Ada");
}

#[tokio::test]
async fn deleting_an_employee_cascades() {
  let (s, sales, _client, _contract) = seeded().await;
  s.create_event(new_event("client@corp.test", "Launch", 15))
    .await
    .unwrap();

  s.delete_employee(sales.employee_id).await.unwrap();

  assert!(s.list_employees().await.unwrap().is_empty());
  assert!(s.list_contracts().await.unwrap().is_empty());
  assert!(s.list_events().await.unwrap().is_empty());
  assert!(
    s.authenticate("sam@epic.test".into(), "correct-horse".into())
      .await
      .unwrap()
      .is_none()
  );

  let client = s.find_client("client@corp.test".into()).await.unwrap().unwrap();
  assert_eq!(client.employee_id, None);
  assert_eq!(client.employee_email, None);
}

#[tokio::test]
async fn deleting_a_missing_employee_fails() {
  let s = store().await;
  let err = s.delete_employee(Uuid::new_v4()).await.unwrap_err();
  assert!(is_missing(&err));
}

// ─── Clients ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn client_carries_its_sales_contact() {
  let (s, sales, client, _) = seeded().await;
  assert_eq!(client.employee_id, Some(sales.employee_id));
  assert_eq!(client.employee_email.as_deref(), Some("sam@epic.test"));

  let err = s
    .create_client(new_client("client@corp.test", sales.employee_id))
    .await
    .unwrap_err();
  assert!(is_already_exists(&err));
}

#[tokio::test]
async fn client_update_bumps_last_update() {
  let (s, _, client, _) = seeded().await;
  let patch = ClientPatch { phone: Some("0700000000".into()), ..Default::default() };
  let updated = s.update_client(client.client_id, patch).await.unwrap();
  assert_eq!(updated.phone, "0700000000");
  assert_eq!(updated.email, client.email);
  assert!(updated.last_update >= client.last_update);
  assert_eq!(updated.created_on, client.created_on);
}

#[tokio::test]
async fn deleting_a_client_removes_its_contract_and_events() {
  let (s, _, client, _) = seeded().await;
  s.create_event(new_event("client@corp.test", "Launch", 15))
    .await
    .unwrap();

  s.delete_client(client.client_id).await.unwrap();
  assert!(s.list_contracts().await.unwrap().is_empty());
  assert!(s.list_events().await.unwrap().is_empty());
  assert_eq!(s.list_employees().await.unwrap().len(), 1);
}

// ─── Contracts ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn contract_is_unique_per_client() {
  let (s, _, _, contract) = seeded().await;
  assert_eq!(contract.client_email, "client@corp.test");
  assert_eq!(contract.rest_amount(), Amount::from_cents(100_000));

  let err = s
    .create_contract(new_contract("client@corp.test", "sam@epic.test"))
    .await
    .unwrap_err();
  assert!(is_already_exists(&err));
}

#[tokio::test]
async fn contract_references_must_exist() {
  let (s, ..) = seeded().await;
  let err = s
    .create_contract(new_contract("ghost@corp.test", "sam@epic.test"))
    .await
    .unwrap_err();
  assert!(is_missing(&err));

  s.create_client(NewClient { employee_id: None, ..new_client("other@corp.test", Uuid::nil()) })
    .await
    .unwrap();
  let err = s
    .create_contract(new_contract("other@corp.test", "ghost@epic.test"))
    .await
    .unwrap_err();
  assert!(is_missing(&err));
}

#[tokio::test]
async fn contract_reassignment_and_amounts() {
  let (s, _, _, contract) = seeded().await;
  s.create_employee(new_employee("boss@epic.test", Role::Management))
    .await
    .unwrap();

  let patch = ContractPatch {
    employee_email: Some("boss@epic.test".into()),
    amount_paid: Some(Amount::from_cents(150_000)),
    state: Some(ContractState::Draft),
    ..Default::default()
  };
  let updated = s.update_contract(contract.contract_id, patch).await.unwrap();
  assert_eq!(updated.employee_email, "boss@epic.test");
  assert_eq!(updated.rest_amount(), Amount::ZERO);
  assert_eq!(updated.state, ContractState::Draft);
  assert_eq!(updated.total_costs, contract.total_costs);

  let found = s.find_contract("client@corp.test".into()).await.unwrap().unwrap();
  assert_eq!(found, updated);
}

// ─── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn event_goes_to_the_client_sales_contact() {
  let (s, sales, _, contract) = seeded().await;
  let other = s
    .create_employee(new_employee("sol@epic.test", Role::Sales))
    .await
    .unwrap();
  // the contract is handled by someone other than the client's contact
  let contract = s
    .update_contract(
      contract.contract_id,
      ContractPatch { employee_email: Some("sol@epic.test".into()), ..Default::default() },
    )
    .await
    .unwrap();
  assert_eq!(contract.employee_id, other.employee_id);

  let event = s
    .create_event(new_event("client@corp.test", "Launch", 15))
    .await
    .unwrap();
  assert_eq!(event.contract_id, contract.contract_id);
  assert_eq!(event.employee_id, sales.employee_id);
  assert_eq!(event.client_email, "client@corp.test");
}

#[tokio::test]
async fn event_for_a_client_without_contact_fails() {
  let (s, sales, _, contract) = seeded().await;
  s.create_employee(new_employee("sol@epic.test", Role::Sales))
    .await
    .unwrap();
  s.update_contract(
    contract.contract_id,
    ContractPatch { employee_email: Some("sol@epic.test".into()), ..Default::default() },
  )
  .await
  .unwrap();
  // the client keeps its contract but loses its contact
  s.delete_employee(sales.employee_id).await.unwrap();

  let err = s
    .create_event(new_event("client@corp.test", "Launch", 15))
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Core(epic_core::Error::DoesNotExist { entity: "employee", .. })
  ));
  assert!(s.list_events().await.unwrap().is_empty());
}

#[tokio::test]
async fn event_names_are_unique_per_contract() {
  let (s, ..) = seeded().await;
  s.create_event(new_event("client@corp.test", "Launch", 15))
    .await
    .unwrap();
  let err = s
    .create_event(new_event("client@corp.test", "Launch", 20))
    .await
    .unwrap_err();
  assert!(is_already_exists(&err));
  assert_eq!(s.list_events().await.unwrap().len(), 1);
}

#[tokio::test]
async fn event_without_contract_fails() {
  let s = store().await;
  let err = s
    .create_event(new_event("nobody@corp.test", "Launch", 15))
    .await
    .unwrap_err();
  assert!(is_missing(&err));
}

#[tokio::test]
async fn find_event_returns_the_earliest() {
  let (s, ..) = seeded().await;
  s.create_event(new_event("client@corp.test", "Gala", 20))
    .await
    .unwrap();
  s.create_event(new_event("client@corp.test", "Launch", 5))
    .await
    .unwrap();

  let found = s.find_event("client@corp.test".into()).await.unwrap().unwrap();
  assert_eq!(found.name, "Launch");
}

#[tokio::test]
async fn event_support_reassignment() {
  let (s, ..) = seeded().await;
  let support = s
    .create_employee(new_employee("sue@epic.test", Role::Support))
    .await
    .unwrap();
  let event = s
    .create_event(new_event("client@corp.test", "Launch", 15))
    .await
    .unwrap();

  let patch = EventPatch {
    employee_email: Some("sue@epic.test".into()),
    max_guests: Some(120),
    ..Default::default()
  };
  let updated = s.update_event(event.event_id, patch).await.unwrap();
  assert_eq!(updated.employee_id, support.employee_id);
  assert_eq!(updated.max_guests, 120);
  assert_eq!(updated.name, "Launch");

  let err = s
    .update_event(
      event.event_id,
      EventPatch { employee_email: Some("ghost@epic.test".into()), ..Default::default() },
    )
    .await
    .unwrap_err();
  assert!(is_missing(&err));
}

#[tokio::test]
async fn deleting_a_contract_removes_its_events() {
  let (s, _, _, contract) = seeded().await;
  s.create_event(new_event("client@corp.test", "Launch", 15))
    .await
    .unwrap();
  s.delete_contract(contract.contract_id).await.unwrap();
  assert!(s.list_events().await.unwrap().is_empty());
  assert_eq!(s.list_clients().await.unwrap().len(), 1);

  let err = s.delete_contract(contract.contract_id).await.unwrap_err();
  assert!(is_missing(&err));
}

// ─── Own records ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn own_listings_follow_the_assignee() {
  let (s, sales, ..) = seeded().await;
  let support = s
    .create_employee(new_employee("sue@epic.test", Role::Support))
    .await
    .unwrap();
  s.create_client(new_client("second@corp.test", support.employee_id))
    .await
    .unwrap();
  s.create_contract(new_contract("second@corp.test", "sue@epic.test"))
    .await
    .unwrap();
  s.create_event(new_event("client@corp.test", "Launch", 15))
    .await
    .unwrap();
  let gala = s
    .create_event(new_event("second@corp.test", "Gala", 20))
    .await
    .unwrap();
  assert_eq!(gala.employee_id, support.employee_id);

  let clients = s.list_clients_of(sales.employee_id).await.unwrap();
  assert_eq!(clients.len(), 1);
  assert_eq!(clients[0].email, "client@corp.test");

  let contracts = s.list_contracts_of(support.employee_id).await.unwrap();
  assert_eq!(contracts.len(), 1);
  assert_eq!(contracts[0].client_email, "second@corp.test");

  let events = s.list_events_of(sales.employee_id).await.unwrap();
  assert_eq!(events.len(), 1);
  assert_eq!(events[0].name, "Launch");

  assert!(s.list_clients_of(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn integrity_errors_convert_into_core_errors() {
  let s = store().await;
  let err: epic_core::Error = s.delete_event(Uuid::new_v4()).await.unwrap_err().into();
  assert!(err.is_integrity());
}
