//! Client management. Sales create clients and become their contact.

use std::{cmp::Ordering, marker::PhantomData};

use epic_core::{
  account::Role,
  client::{Client, ClientPatch, NewClient},
  store::EpicStore,
};

use super::day;
use crate::{
  Result,
  command::{
    Action, Command, Context, FieldMapper, FieldSpec, Fields, Fetcher, InputKind, Lister,
    Mutator, Order, Reporter, SortKey, filter::sort_by_keys,
  },
  error::store_error,
  term::{Notice, Terminal},
};

pub struct ClientCommand<A>(PhantomData<A>);

impl<A> ClientCommand<A> {
  pub const fn new() -> Self { Self(PhantomData) }
}

impl<A> Default for ClientCommand<A> {
  fn default() -> Self { Self::new() }
}

permissions!(ClientCommand, Client, Client {
  List   => [Sales, Support, Management],
  Create => [Sales],
  Update => [Sales, Management],
  Delete => [Management],
});

const SPECS: [FieldSpec; 5] = [
  FieldSpec::new('E', "email", "Email", InputKind::Email),
  FieldSpec::new('F', "first_name", "First name", InputKind::Text),
  FieldSpec::new('L', "last_name", "Last name", InputKind::Text),
  FieldSpec::new('P', "phone", "Phone", InputKind::Text),
  FieldSpec::new('C', "company_name", "Company name", InputKind::Text),
];

const HEADERS: [&str; 7] = ["Email", "Name", "Phone", "Company", "Contact", "Created", "Updated"];

fn rows(clients: &[Client]) -> Vec<Vec<String>> {
  clients
    .iter()
    .map(|c| {
      vec![
        c.email.clone(),
        c.full_name(),
        c.phone.clone(),
        c.company_name.clone(),
        c.employee_email.clone().unwrap_or_else(|| "-".to_owned()),
        day(&c.created_on),
        day(&c.last_update),
      ]
    })
    .collect()
}

impl<A, S> Lister<S> for ClientCommand<A>
where
  S: EpicStore,
  Self: Command<Record = Client>,
{
  const SORT_KEYS: &'static [SortKey] = &[
    SortKey::new('E', "[E]mail"),
    SortKey::new('F', "[F]irst name"),
    SortKey::new('L', "[L]ast name"),
    SortKey::new('C', "[C]ompany name"),
  ];
  const FILTER_ROLES: &'static [Role] = &[Role::Sales];

  async fn render_listing(&self, cx: &mut Context<'_, S, Client>) -> Result<()> {
    let clients = cx.store.list_clients().await.map_err(store_error)?;
    if clients.is_empty() {
      cx.term.notify(Notice::Info, "No clients to show.");
      return Ok(());
    }
    cx.term.render_table(Some("Clients"), &HEADERS, &rows(&clients));
    Ok(())
  }

  async fn render_own_listing(
    &self,
    cx: &mut Context<'_, S, Client>,
    keys: &[char],
    order: Order,
  ) -> Result<()> {
    let mut clients =
      cx.store.list_clients_of(cx.principal.employee_id).await.map_err(store_error)?;
    if clients.is_empty() {
      cx.term.notify(Notice::Info, "You have no clients.");
      return Ok(());
    }
    sort_by_keys(&mut clients, keys, order, |key, a, b| match key {
      'E' => a.email.cmp(&b.email),
      'F' => a.first_name.cmp(&b.first_name),
      'L' => a.last_name.cmp(&b.last_name),
      'C' => a.company_name.cmp(&b.company_name),
      _ => Ordering::Equal,
    });
    cx.term.render_table(Some("My clients"), &HEADERS, &rows(&clients));
    Ok(())
  }
}

impl<A, S> Fetcher<S> for ClientCommand<A>
where
  S: EpicStore,
  Self: Command<Record = Client>,
{
  async fn lookup(&self, store: &S, key: String) -> Result<Option<Client>> {
    store.find_client(key).await.map_err(store_error)
  }

  fn render_record(&self, term: &mut dyn Terminal, c: &Client) {
    let rows = vec![
      vec!["[E]mail:".to_owned(), c.email.clone()],
      vec!["[F]irst name:".to_owned(), c.first_name.clone()],
      vec!["[L]ast name:".to_owned(), c.last_name.clone()],
      vec!["[P]hone:".to_owned(), c.phone.clone()],
      vec!["[C]ompany name:".to_owned(), c.company_name.clone()],
    ];
    term.render_table(Some("Details of the client:"), &[], &rows);
  }
}

impl<A> FieldMapper for ClientCommand<A>
where
  Self: Command<Record = Client>,
{
  fn map_field_input_methods(_action: Action) -> Vec<FieldSpec> { SPECS.to_vec() }
}

impl<A, S> Mutator<S> for ClientCommand<A>
where
  S: EpicStore,
  Self: Command<Record = Client>,
{
  async fn persist_create(&self, cx: &mut Context<'_, S, Client>, fields: Fields) -> Result<()> {
    let input = NewClient {
      email:        fields.required_text("email")?,
      first_name:   fields.required_text("first_name")?,
      last_name:    fields.required_text("last_name")?,
      phone:        fields.required_text("phone")?,
      company_name: fields.required_text("company_name")?,
      employee_id:  Some(cx.principal.employee_id),
    };
    let client = cx.store.create_client(input).await.map_err(store_error)?;
    cx.object = Some(client);
    Ok(())
  }

  async fn persist_update(&self, cx: &mut Context<'_, S, Client>, fields: Fields) -> Result<()> {
    let client_id = cx.target()?.client_id;
    let patch = ClientPatch {
      email:        fields.text("email"),
      first_name:   fields.text("first_name"),
      last_name:    fields.text("last_name"),
      phone:        fields.text("phone"),
      company_name: fields.text("company_name"),
    };
    let client = cx.store.update_client(client_id, patch).await.map_err(store_error)?;
    cx.object = Some(client);
    Ok(())
  }

  async fn persist_delete(&self, cx: &mut Context<'_, S, Client>) -> Result<()> {
    let client_id = cx.target()?.client_id;
    cx.store.delete_client(client_id).await.map_err(store_error)
  }
}

impl<A> Reporter for ClientCommand<A> where Self: Command<Record = Client> {}
