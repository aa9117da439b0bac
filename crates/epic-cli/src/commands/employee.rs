//! Employee management. Everything but listing is reserved to management.

use std::marker::PhantomData;

use epic_core::{
  account::{Employee, EmployeePatch, NewEmployee, Role},
  store::EpicStore,
};

use crate::{
  Error, Result,
  command::{
    Action, Command, Context, FieldMapper, FieldSpec, Fields, Fetcher, InputKind, Lister,
    Mutator, Reporter,
  },
  error::store_error,
  term::{Notice, Terminal},
};

pub struct EmployeeCommand<A>(PhantomData<A>);

impl<A> EmployeeCommand<A> {
  pub const fn new() -> Self { Self(PhantomData) }
}

impl<A> Default for EmployeeCommand<A> {
  fn default() -> Self { Self::new() }
}

permissions!(EmployeeCommand, Employee, Employee {
  List   => [Sales, Support, Management],
  Create => [Management],
  Update => [Management],
  Delete => [Management],
});

const ROLE_CODES: &[&str] = &["SA", "SU", "MA"];

const EMAIL: FieldSpec = FieldSpec::new('E', "email", "Email", InputKind::Email);
const FIRST_NAME: FieldSpec = FieldSpec::new('F', "first_name", "First name", InputKind::Text);
const LAST_NAME: FieldSpec = FieldSpec::new('L', "last_name", "Last name", InputKind::Text);
const ROLE: FieldSpec =
  FieldSpec::new('R', "role", "Role [SA, SU, MA]", InputKind::Choice(ROLE_CODES));

impl<A, S> Lister<S> for EmployeeCommand<A>
where
  S: EpicStore,
  Self: Command<Record = Employee>,
{
  async fn render_listing(&self, cx: &mut Context<'_, S, Employee>) -> Result<()> {
    let employees = cx.store.list_employees().await.map_err(store_error)?;
    if employees.is_empty() {
      cx.term.notify(Notice::Info, "No employees to show.");
      return Ok(());
    }

    let rows: Vec<Vec<String>> = employees
      .iter()
      .map(|e| {
        vec![e.email.clone(), e.first_name.clone(), e.last_name.clone(), e.role.to_string()]
      })
      .collect();
    cx.term.render_table(Some("Employees"), &["Email", "First name", "Last name", "Role"], &rows);
    Ok(())
  }
}

impl<A, S> Fetcher<S> for EmployeeCommand<A>
where
  S: EpicStore,
  Self: Command<Record = Employee>,
{
  async fn lookup(&self, store: &S, key: String) -> Result<Option<Employee>> {
    store.find_employee(key).await.map_err(store_error)
  }

  fn render_record(&self, term: &mut dyn Terminal, e: &Employee) {
    let rows = vec![
      vec!["[E]mail:".to_owned(), e.email.clone()],
      vec!["[F]irst name:".to_owned(), e.first_name.clone()],
      vec!["[L]ast name:".to_owned(), e.last_name.clone()],
      vec!["[R]ole:".to_owned(), e.role.code().to_owned()],
    ];
    term.render_table(Some("Details of the employee:"), &[], &rows);
  }
}

impl<A> FieldMapper for EmployeeCommand<A>
where
  Self: Command<Record = Employee>,
{
  fn map_field_input_methods(action: Action) -> Vec<FieldSpec> {
    match action {
      Action::Create => vec![
        EMAIL,
        FieldSpec::new('P', "password", "Password", InputKind::Password),
        FIRST_NAME,
        LAST_NAME,
        ROLE,
      ],
      _ => vec![EMAIL, FIRST_NAME, LAST_NAME, ROLE],
    }
  }
}

impl<A, S> Mutator<S> for EmployeeCommand<A>
where
  S: EpicStore,
  Self: Command<Record = Employee>,
{
  async fn persist_create(&self, cx: &mut Context<'_, S, Employee>, fields: Fields) -> Result<()> {
    let input = NewEmployee {
      email:      fields.required_text("email")?,
      password:   fields.required_text("password")?,
      first_name: fields.required_text("first_name")?,
      last_name:  fields.required_text("last_name")?,
      role:       fields.parsed::<Role>("role")?.ok_or(Error::MissingField("role"))?,
    };
    let employee = cx.store.create_employee(input).await.map_err(store_error)?;
    cx.object = Some(employee);
    Ok(())
  }

  async fn persist_update(&self, cx: &mut Context<'_, S, Employee>, fields: Fields) -> Result<()> {
    let employee_id = cx.target()?.employee_id;
    let patch = EmployeePatch {
      email:      fields.text("email"),
      first_name: fields.text("first_name"),
      last_name:  fields.text("last_name"),
      role:       fields.parsed("role")?,
    };
    let employee = cx.store.update_employee(employee_id, patch).await.map_err(store_error)?;
    cx.object = Some(employee);
    Ok(())
  }

  async fn persist_delete(&self, cx: &mut Context<'_, S, Employee>) -> Result<()> {
    let employee_id = cx.target()?.employee_id;
    cx.store.delete_employee(employee_id).await.map_err(store_error)
  }
}

impl<A> Reporter for EmployeeCommand<A> where Self: Command<Record = Employee> {}
