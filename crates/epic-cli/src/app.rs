//! The navigation loop.

use epic_core::store::EpicStore;

use crate::{
  Error, Result,
  command::{Action, Entity, Nav, handle},
  commands::{ClientCommand, ContractCommand, EmployeeCommand, EventCommand, stage},
  input::PasswordPolicy,
  menu,
  session::SessionGate,
  term::{Notice, Terminal},
};

// ─── App ──────────────────────────────────────────────────────────────────────

pub struct App<S> {
  store:  S,
  gate:   SessionGate,
  policy: PasswordPolicy,
}

impl<S: EpicStore> App<S> {
  pub fn new(store: S, gate: SessionGate, policy: PasswordPolicy) -> Self {
    Self { store, gate, policy }
  }

  pub fn gate(&self) -> &SessionGate { &self.gate }

  /// Log in if needed, then follow menus and commands until the operator
  /// quits.
  pub async fn run(&mut self, term: &mut dyn Terminal) -> Result<()> {
    let mut nav = self.sign_in(term).await?;
    loop {
      tracing::debug!(?nav, "navigating");
      nav = match nav {
        Nav::Start => menu::start_menu(term)?,
        Nav::Menu(entity) => menu::entity_menu(term, entity)?,
        Nav::Run(entity, action) => match self.dispatch(entity, action, term).await {
          Ok(next) => next,
          Err(Error::Cancelled) => Nav::Quit,
          Err(Error::UnknownPrincipal) => {
            term.notify(Notice::Error, "No employee is attached to this login.");
            self.gate.logout()?;
            Nav::Start
          }
          Err(e) => return Err(e),
        },
        Nav::Logout => {
          self.gate.logout()?;
          term.notify(Notice::Success, "Employee successfully logged out!");
          self.sign_in(term).await?
        }
        Nav::Quit => {
          term.notify(Notice::Info, "Goodbye!");
          return Ok(());
        }
      };
    }
  }

  /// Resolve the operator before the first menu. Cancelling the login
  /// quits.
  async fn sign_in(&mut self, term: &mut dyn Terminal) -> Result<Nav> {
    match self.gate.resolve_principal(&self.store, term).await {
      Ok(Some(principal)) => {
        term.notify(
          Notice::Title,
          &format!("Welcome {} ({})", principal.full_name, principal.role),
        );
        Ok(Nav::Start)
      }
      Ok(None) => {
        term.notify(Notice::Error, "No employee is attached to this login.");
        self.gate.logout()?;
        Ok(Nav::Quit)
      }
      Err(Error::Cancelled) => Ok(Nav::Quit),
      Err(e) => Err(e),
    }
  }

  /// Run the command for one (entity, action) pair.
  pub async fn dispatch(
    &mut self,
    entity: Entity,
    action: Action,
    term: &mut dyn Terminal,
  ) -> Result<Nav> {
    let Self { store, gate, policy } = self;
    macro_rules! run {
      ($cmd:ident, $stage:ident) => {
        handle(&$cmd::<stage::$stage>::new(), gate, &*store, term, &*policy).await
      };
    }

    match (entity, action) {
      (Entity::Employee, Action::List) => run!(EmployeeCommand, List),
      (Entity::Employee, Action::Create) => run!(EmployeeCommand, Create),
      (Entity::Employee, Action::Update) => run!(EmployeeCommand, Update),
      (Entity::Employee, Action::Delete) => run!(EmployeeCommand, Delete),
      (Entity::Client, Action::List) => run!(ClientCommand, List),
      (Entity::Client, Action::Create) => run!(ClientCommand, Create),
      (Entity::Client, Action::Update) => run!(ClientCommand, Update),
      (Entity::Client, Action::Delete) => run!(ClientCommand, Delete),
      (Entity::Contract, Action::List) => run!(ContractCommand, List),
      (Entity::Contract, Action::Create) => run!(ContractCommand, Create),
      (Entity::Contract, Action::Update) => run!(ContractCommand, Update),
      (Entity::Contract, Action::Delete) => run!(ContractCommand, Delete),
      (Entity::Event, Action::List) => run!(EventCommand, List),
      (Entity::Event, Action::Create) => run!(EventCommand, Create),
      (Entity::Event, Action::Update) => run!(EventCommand, Update),
      (Entity::Event, Action::Delete) => run!(EventCommand, Delete),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Duration;
  use epic_core::account::{NewEmployee, Role};
  use epic_store_sqlite::SqliteStore;

  use super::*;
  use crate::{
    session::{Signer, TokenSlot},
    term::ScriptedTerminal,
  };

  const PASSWORD: &str = "correct-horse";

  async fn app(dir: &tempfile::TempDir) -> App<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store
      .create_employee(NewEmployee {
        email:      "mia@epic.test".into(),
        password:   PASSWORD.into(),
        first_name: "Mia".into(),
        last_name:  "Manager".into(),
        role:       Role::Management,
      })
      .await
      .unwrap();
    let gate = SessionGate::load(
      TokenSlot::new(dir.path().join("token.txt")),
      Signer::new(b"app-test-secret").unwrap(),
      Duration::hours(1),
    )
    .unwrap();
    App::new(store, gate, PasswordPolicy::default())
  }

  #[tokio::test]
  async fn login_browse_and_quit() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir).await;
    let mut term = ScriptedTerminal::new(["mia@epic.test", PASSWORD, "2", "1", "N", "5", "5"]);

    app.run(&mut term).await.unwrap();
    assert!(term.saw(Notice::Title, "Welcome Mia Manager (Management)"));
    assert!(term.saw(Notice::Info, "No clients to show."));
    assert!(term.saw(Notice::Info, "Goodbye!"));
    assert_eq!(term.remaining(), 0);
  }

  #[tokio::test]
  async fn integrity_error_reruns_the_command() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir).await;
    let mut term = ScriptedTerminal::new([
      "mia@epic.test",
      PASSWORD,
      "3",
      "2",
      "ghost@corp.test",
      "mia@epic.test",
      "100",
      "0",
      "D",
      // the create runs again; blank cancels to the start menu
      "",
      "5",
    ]);

    app.run(&mut term).await.unwrap();
    assert!(term.saw(Notice::Error, "Client does not exist!"));
    let creates = term.notices.iter().filter(|(_, m)| m == "Create a new contract:").count();
    assert_eq!(creates, 2);
  }

  #[tokio::test]
  async fn logout_clears_the_slot_and_asks_again() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir).await;
    let mut term = ScriptedTerminal::new(["mia@epic.test", PASSWORD, "6", ""]);

    app.run(&mut term).await.unwrap();
    assert!(term.saw(Notice::Success, "logged out"));
    assert!(!app.gate().has_token());
    assert_eq!(TokenSlot::new(dir.path().join("token.txt")).load().unwrap(), None);
    assert_eq!(term.prompts.iter().filter(|p| *p == "Email address").count(), 2);
  }

  #[tokio::test]
  async fn cancelled_login_quits() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir).await;
    let mut term = ScriptedTerminal::new([""]);
    app.run(&mut term).await.unwrap();
    assert!(term.saw(Notice::Info, "Goodbye!"));
  }
}
