//! Contract management. Only management writes contracts.

use std::{cmp::Ordering, marker::PhantomData};

use epic_core::{
  account::Role,
  contract::{Contract, ContractPatch, ContractState, NewContract},
  store::EpicStore,
};

use super::day;
use crate::{
  Error, Result,
  command::{
    Action, Command, Context, FieldMapper, FieldSpec, Fields, Fetcher, InputKind, Lister,
    Mutator, Order, Reporter, SortKey, filter::sort_by_keys,
  },
  error::store_error,
  term::{Notice, Terminal},
};

pub struct ContractCommand<A>(PhantomData<A>);

impl<A> ContractCommand<A> {
  pub const fn new() -> Self { Self(PhantomData) }
}

impl<A> Default for ContractCommand<A> {
  fn default() -> Self { Self::new() }
}

permissions!(ContractCommand, Contract, Contract {
  List   => [Sales, Support, Management],
  Create => [Management],
  Update => [Management],
  Delete => [Management],
});

const STATE_CODES: &[&str] = &["S", "D"];

const EMPLOYEE_EMAIL: FieldSpec =
  FieldSpec::new('E', "employee_email", "Employee email", InputKind::Email);
const TOTAL_COSTS: FieldSpec =
  FieldSpec::new('T', "total_costs", "Total costs", InputKind::Decimal);
const AMOUNT_PAID: FieldSpec =
  FieldSpec::new('A', "amount_paid", "Amount paid", InputKind::Decimal);
const STATE: FieldSpec =
  FieldSpec::new('S', "state", "State [S, D]", InputKind::Choice(STATE_CODES));

const HEADERS: [&str; 7] = ["Client", "Contact", "Total", "Paid", "Rest", "State", "Created"];

fn rows(contracts: &[Contract]) -> Vec<Vec<String>> {
  contracts
    .iter()
    .map(|c| {
      vec![
        c.client_email.clone(),
        c.employee_email.clone(),
        c.total_costs.euros(),
        c.amount_paid.euros(),
        c.rest_amount().euros(),
        c.state.label().to_owned(),
        day(&c.created_on),
      ]
    })
    .collect()
}

impl<A, S> Lister<S> for ContractCommand<A>
where
  S: EpicStore,
  Self: Command<Record = Contract>,
{
  const SORT_KEYS: &'static [SortKey] = &[
    SortKey::new('C', "[C]lient"),
    SortKey::new('T', "[T]otal costs"),
    SortKey::new('A', "[A]mount paid"),
    SortKey::new('S', "[S]tate"),
  ];
  const FILTER_ROLES: &'static [Role] = &[Role::Sales, Role::Management];

  async fn render_listing(&self, cx: &mut Context<'_, S, Contract>) -> Result<()> {
    let contracts = cx.store.list_contracts().await.map_err(store_error)?;
    if contracts.is_empty() {
      cx.term.notify(Notice::Info, "No contracts to show.");
      return Ok(());
    }
    cx.term.render_table(Some("Contracts"), &HEADERS, &rows(&contracts));
    Ok(())
  }

  async fn render_own_listing(
    &self,
    cx: &mut Context<'_, S, Contract>,
    keys: &[char],
    order: Order,
  ) -> Result<()> {
    let mut contracts =
      cx.store.list_contracts_of(cx.principal.employee_id).await.map_err(store_error)?;
    if contracts.is_empty() {
      cx.term.notify(Notice::Info, "You have no contracts.");
      return Ok(());
    }
    sort_by_keys(&mut contracts, keys, order, |key, a, b| match key {
      'C' => a.client_email.cmp(&b.client_email),
      'T' => a.total_costs.cmp(&b.total_costs),
      'A' => a.amount_paid.cmp(&b.amount_paid),
      'S' => a.state.code().cmp(b.state.code()),
      _ => Ordering::Equal,
    });
    cx.term.render_table(Some("My contracts"), &HEADERS, &rows(&contracts));
    Ok(())
  }
}

impl<A, S> Fetcher<S> for ContractCommand<A>
where
  S: EpicStore,
  Self: Command<Record = Contract>,
{
  fn lookup_label(&self) -> &'static str { "Client email address" }

  async fn lookup(&self, store: &S, key: String) -> Result<Option<Contract>> {
    store.find_contract(key).await.map_err(store_error)
  }

  fn render_record(&self, term: &mut dyn Terminal, c: &Contract) {
    let rows = vec![
      vec!["Client email:".to_owned(), c.client_email.clone()],
      vec!["[E]mployee email:".to_owned(), c.employee_email.clone()],
      vec!["[T]otal costs:".to_owned(), c.total_costs.euros()],
      vec!["[A]mount paid:".to_owned(), c.amount_paid.euros()],
      vec!["Rest amount:".to_owned(), c.rest_amount().euros()],
      vec!["[S]tate:".to_owned(), c.state.code().to_owned()],
    ];
    term.render_table(Some("Details of the contract:"), &[], &rows);
  }
}

impl<A> FieldMapper for ContractCommand<A>
where
  Self: Command<Record = Contract>,
{
  fn map_field_input_methods(action: Action) -> Vec<FieldSpec> {
    match action {
      Action::Create => vec![
        FieldSpec::new('C', "client_email", "Client email", InputKind::Email),
        EMPLOYEE_EMAIL,
        TOTAL_COSTS,
        AMOUNT_PAID,
        STATE,
      ],
      _ => vec![EMPLOYEE_EMAIL, TOTAL_COSTS, AMOUNT_PAID, STATE],
    }
  }
}

impl<A, S> Mutator<S> for ContractCommand<A>
where
  S: EpicStore,
  Self: Command<Record = Contract>,
{
  async fn persist_create(&self, cx: &mut Context<'_, S, Contract>, fields: Fields) -> Result<()> {
    let input = NewContract {
      client_email:   fields.required_text("client_email")?,
      employee_email: fields.required_text("employee_email")?,
      total_costs:    fields.required_amount("total_costs")?,
      amount_paid:    fields.required_amount("amount_paid")?,
      state:          fields
        .parsed::<ContractState>("state")?
        .ok_or(Error::MissingField("state"))?,
    };
    let contract = cx.store.create_contract(input).await.map_err(store_error)?;
    cx.object = Some(contract);
    Ok(())
  }

  async fn persist_update(&self, cx: &mut Context<'_, S, Contract>, fields: Fields) -> Result<()> {
    let contract_id = cx.target()?.contract_id;
    let patch = ContractPatch {
      employee_email: fields.text("employee_email"),
      total_costs:    fields.amount("total_costs"),
      amount_paid:    fields.amount("amount_paid"),
      state:          fields.parsed("state")?,
    };
    let contract = cx.store.update_contract(contract_id, patch).await.map_err(store_error)?;
    cx.object = Some(contract);
    Ok(())
  }

  async fn persist_delete(&self, cx: &mut Context<'_, S, Contract>) -> Result<()> {
    let contract_id = cx.target()?.contract_id;
    cx.store.delete_contract(contract_id).await.map_err(store_error)
  }
}

impl<A> Reporter for ContractCommand<A>
where
  Self: Command<Record = Contract>,
{
  /// Updates and deletions name the client, which is not itself editable.
  fn outcome_prefix(&self, record: &Contract) -> Vec<(String, String)> {
    match Self::ACTION {
      Action::Create => Vec::new(),
      _ => vec![("Client email:".to_owned(), record.client_email.clone())],
    }
  }
}
