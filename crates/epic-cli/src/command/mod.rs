//! The CRUD command template.
//!
//! A concrete command is one (entity, action) pair. It states its record
//! type and who may run it through [`Command`], and supplies the entity's
//! behaviour through the hook traits: [`Lister`], [`Fetcher`],
//! [`FieldMapper`], [`Mutator`] and [`Reporter`]. [`handle`] drives the
//! stages of the action and owns the error boundary.

pub mod fields;
pub mod filter;

use epic_core::{
  account::{Principal, Role},
  record::Record,
  store::EpicStore,
};

pub use self::{
  fields::{FieldSpec, FieldValue, Fields, InputKind},
  filter::{Order, SortKey},
};
use crate::{
  Error, Result, input,
  input::PasswordPolicy,
  session::SessionGate,
  term::{Notice, Terminal},
};

// ─── Navigation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
  Employee,
  Client,
  Contract,
  Event,
}

impl Entity {
  pub fn label(self) -> &'static str {
    match self {
      Entity::Employee => "Employee",
      Entity::Client => "Client",
      Entity::Contract => "Contract",
      Entity::Event => "Event",
    }
  }

  pub fn plural(self) -> &'static str {
    match self {
      Entity::Employee => "Employees",
      Entity::Client => "Clients",
      Entity::Contract => "Contracts",
      Entity::Event => "Events",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
  List,
  Create,
  Update,
  Delete,
}

impl Action {
  pub const ALL: [Action; 4] = [Action::List, Action::Create, Action::Update, Action::Delete];

  pub fn label(self) -> &'static str {
    match self {
      Action::List => "List",
      Action::Create => "Create",
      Action::Update => "Update",
      Action::Delete => "Delete",
    }
  }

  pub fn past_tense(self) -> &'static str {
    match self {
      Action::List => "listed",
      Action::Create => "created",
      Action::Update => "updated",
      Action::Delete => "deleted",
    }
  }
}

/// Where the application goes after a command or menu returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
  Start,
  Menu(Entity),
  Run(Entity, Action),
  Logout,
  Quit,
}

// ─── Context ─────────────────────────────────────────────────────────────────

/// State of one command invocation. Created by [`handle`], dropped with it.
pub struct Context<'a, S, R> {
  pub store:         &'a S,
  pub term:          &'a mut dyn Terminal,
  pub principal:     &'a Principal,
  pub policy:        &'a PasswordPolicy,
  /// The record being updated or deleted, then the record as persisted.
  pub object:        Option<R>,
  /// Keys picked in the update field selection.
  pub selected:      Vec<char>,
  /// Names of the fields that were prompted, in prompt order.
  pub update_fields: Vec<&'static str>,
  /// `(label, value)` rows reporting the outcome.
  pub update_table:  Vec<(String, String)>,
}

impl<'a, S, R> Context<'a, S, R> {
  pub fn new(
    store: &'a S,
    term: &'a mut dyn Terminal,
    principal: &'a Principal,
    policy: &'a PasswordPolicy,
  ) -> Self {
    Self {
      store,
      term,
      principal,
      policy,
      object: None,
      selected: Vec::new(),
      update_fields: Vec::new(),
      update_table: Vec::new(),
    }
  }

  /// The target record; only absent if a stage ran out of order.
  pub fn target(&self) -> Result<&R> { self.object.as_ref().ok_or(Error::MissingField("record")) }
}

// ─── Command and hooks ───────────────────────────────────────────────────────

pub trait Command {
  type Record: Record;

  const ENTITY: Entity;
  const ACTION: Action;
  /// Roles permitted to run the command.
  const ALLOWED: &'static [Role];

  fn navigate_back(&self) -> Nav { Nav::Menu(Self::ENTITY) }
}

pub trait Lister<S: EpicStore>: Command {
  /// Fields the list filter orders by. No filter is offered when empty.
  const SORT_KEYS: &'static [SortKey] = &[];
  /// Roles that may filter the listing down to their own records.
  const FILTER_ROLES: &'static [Role] = &[];

  /// Show the existing records, or a notice when there are none.
  async fn render_listing(&self, cx: &mut Context<'_, S, Self::Record>) -> Result<()>;

  /// Show the principal's own records ordered by `keys`.
  async fn render_own_listing(
    &self,
    _cx: &mut Context<'_, S, Self::Record>,
    _keys: &[char],
    _order: Order,
  ) -> Result<()> {
    Ok(())
  }

  /// After a listing, offer to narrow it to the principal's own records in
  /// a chosen order.
  async fn offer_filter(&self, cx: &mut Context<'_, S, Self::Record>) -> Result<()> {
    if Self::SORT_KEYS.is_empty() {
      return Ok(());
    }
    if input::choice(cx.term, &["Y", "N"], "Do you want to filter? [Y/N]")? == "N" {
      return Ok(());
    }
    if !cx.principal.has_role(Self::FILTER_ROLES) {
      tracing::info!(email = %cx.principal.email, entity = ?Self::ENTITY, "filter denied");
      cx.term.notify(Notice::Error, "Permission denied");
      return Ok(());
    }

    let rows: Vec<Vec<String>> =
      Self::SORT_KEYS.iter().map(|k| vec![k.label.to_owned()]).collect();
    cx.term.render_table(Some("Which fields do you want to order by?"), &[], &rows);
    let keys: Vec<char> = Self::SORT_KEYS.iter().map(|k| k.key).collect();
    let listed: Vec<String> = keys.iter().map(char::to_string).collect();
    let label = format!("Your choice? [{}]", listed.join(", "));
    let picked = loop {
      let picked = input::multi_choice(cx.term, &keys, &label)?;
      if !picked.is_empty() {
        break picked;
      }
      cx.term.notify(Notice::Error, "Invalid choice!");
    };
    let order = input::choice(cx.term, Order::CODES, "Your choice? [A]scending or [D]escending")?;

    tracing::debug!(?picked, %order, "filtering listing");
    self.render_own_listing(cx, &picked, Order::from_code(&order)).await
  }
}

pub trait Fetcher<S: EpicStore>: Command {
  fn lookup_label(&self) -> &'static str { "Email address" }

  async fn lookup(&self, store: &S, key: String) -> Result<Option<Self::Record>>;

  fn render_record(&self, term: &mut dyn Terminal, record: &Self::Record);

  /// Ask for a lookup key until it finds a record, then show it.
  async fn resolve_target_record(&self, cx: &mut Context<'_, S, Self::Record>) -> Result<()> {
    loop {
      let key = input::email(cx.term, self.lookup_label())?;
      if let Some(record) = self.lookup(cx.store, key).await? {
        self.render_record(cx.term, &record);
        cx.object = Some(record);
        return Ok(());
      }
      cx.term.notify(Notice::Error, "Invalid email!");
    }
  }

  fn confirm_deletion(&self, cx: &mut Context<'_, S, Self::Record>) -> Result<bool> {
    let label = format!("Delete this {}? [Y/N]", Self::ENTITY.label().to_lowercase());
    Ok(input::choice(cx.term, &["Y", "N"], &label)? == "Y")
  }
}

pub trait FieldMapper: Command {
  /// Prompts for `action`: every field on create, the selectable ones on
  /// update.
  fn map_field_input_methods(action: Action) -> Vec<FieldSpec>;

  /// Ask which fields to change until at least one known key is typed.
  fn select_fields_to_update<S>(&self, cx: &mut Context<'_, S, Self::Record>) -> Result<()> {
    let keys: Vec<char> =
      Self::map_field_input_methods(Action::Update).iter().map(|s| s.key).collect();
    let listed: Vec<String> = keys.iter().map(char::to_string).collect();
    let label = format!("Your choice? [{}]", listed.join(", "));
    loop {
      let picked = input::multi_choice(cx.term, &keys, &label)?;
      if !picked.is_empty() {
        cx.selected = picked;
        return Ok(());
      }
      cx.term.notify(Notice::Error, "Invalid choice!");
    }
  }

  /// Prompt each field once and note its name in `update_fields`.
  fn collect_input_fields<S>(
    &self,
    cx: &mut Context<'_, S, Self::Record>,
    specs: &[FieldSpec],
  ) -> Result<Fields> {
    let mut fields = Fields::default();
    for spec in specs {
      if fields.contains(spec.name) {
        continue;
      }
      let value = spec.kind.read(cx.term, spec.label, cx.policy)?;
      fields.insert(spec.name, value);
      cx.update_fields.push(spec.name);
    }
    Ok(fields)
  }
}

/// Each method leaves the affected record in `cx.object`.
pub trait Mutator<S: EpicStore>: Command {
  async fn persist_create(
    &self,
    cx: &mut Context<'_, S, Self::Record>,
    fields: Fields,
  ) -> Result<()>;

  async fn persist_update(
    &self,
    cx: &mut Context<'_, S, Self::Record>,
    fields: Fields,
  ) -> Result<()>;

  async fn persist_delete(&self, cx: &mut Context<'_, S, Self::Record>) -> Result<()>;
}

pub trait Reporter: Command {
  fn success_message(&self) -> String {
    format!("{} successfully {}!", Self::ENTITY.label(), Self::ACTION.past_tense())
  }

  /// Rows reported ahead of the field rows.
  fn outcome_prefix(&self, _record: &Self::Record) -> Vec<(String, String)> { Vec::new() }

  fn summary_title(&self) -> String { format!("{} details", Self::ENTITY.label()) }

  /// Announce success and fill `update_table` from `update_fields`.
  fn record_outcome<S>(&self, cx: &mut Context<'_, S, Self::Record>) {
    cx.term.notify(Notice::Success, &self.success_message());
    let Some(record) = cx.object.as_ref() else { return };

    let mut rows = self.outcome_prefix(record);
    for name in &cx.update_fields {
      if let Some(value) = record.display_value(name) {
        rows.push((fields::outcome_label(name), value));
      }
    }
    cx.update_table = rows;
  }

  fn render_summary_table<S>(&self, cx: &mut Context<'_, S, Self::Record>) {
    let rows: Vec<Vec<String>> =
      cx.update_table.iter().map(|(label, value)| vec![label.clone(), value.clone()]).collect();
    cx.term.render_table(Some(&self.summary_title()), &[], &rows);
  }
}

/// Every hook a command needs to run under [`handle`].
pub trait CrudCommand<S: EpicStore>:
  Command + Lister<S> + Fetcher<S> + FieldMapper + Mutator<S> + Reporter
{
}

impl<S, C> CrudCommand<S> for C
where
  S: EpicStore,
  C: Command + Lister<S> + Fetcher<S> + FieldMapper + Mutator<S> + Reporter,
{
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

/// Run `cmd` for the principal behind `gate`.
///
/// Cancelling a prompt returns to the start menu. A duplicate or missing
/// record is reported and the same command runs again. Any other error is
/// returned.
pub async fn handle<C, S>(
  cmd: &C,
  gate: &mut SessionGate,
  store: &S,
  term: &mut dyn Terminal,
  policy: &PasswordPolicy,
) -> Result<Nav>
where
  C: CrudCommand<S>,
  S: EpicStore,
{
  let principal = gate.resolve_principal(store, term).await?.ok_or(Error::UnknownPrincipal)?;

  if !principal.has_role(C::ALLOWED) {
    tracing::info!(
      email = %principal.email,
      role = %principal.role,
      command = ?(C::ENTITY, C::ACTION),
      "permission denied"
    );
    term.notify(Notice::Error, "Permission denied");
    return Ok(Nav::Start);
  }

  let mut cx = Context::new(store, term, &principal, policy);
  tracing::debug!(entity = ?C::ENTITY, action = ?C::ACTION, "command started");

  let outcome = match C::ACTION {
    Action::List => list(cmd, &mut cx).await,
    Action::Create => create(cmd, &mut cx).await,
    Action::Update => update(cmd, &mut cx).await,
    Action::Delete => delete(cmd, &mut cx).await,
  };

  match outcome {
    Ok(nav) => Ok(nav),
    Err(Error::Cancelled) => {
      tracing::debug!("command cancelled");
      Ok(Nav::Start)
    }
    Err(Error::Core(epic_core::Error::AlreadyExists { entity, key })) => {
      tracing::info!(entity, %key, "integrity error: duplicate");
      cx.term.notify(Notice::Error, &format!("{} exists already!", capitalise(entity)));
      Ok(Nav::Run(C::ENTITY, C::ACTION))
    }
    Err(Error::Core(epic_core::Error::DoesNotExist { entity, key })) => {
      tracing::info!(entity, %key, "integrity error: missing reference");
      cx.term.notify(Notice::Error, &format!("{} does not exist!", capitalise(entity)));
      Ok(Nav::Run(C::ENTITY, C::ACTION))
    }
    Err(e) => Err(e),
  }
}

fn capitalise(word: &str) -> String {
  let mut chars = word.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

async fn list<C, S>(cmd: &C, cx: &mut Context<'_, S, C::Record>) -> Result<Nav>
where
  C: CrudCommand<S>,
  S: EpicStore,
{
  cmd.render_listing(cx).await?;
  cmd.offer_filter(cx).await?;
  Ok(cmd.navigate_back())
}

async fn create<C, S>(cmd: &C, cx: &mut Context<'_, S, C::Record>) -> Result<Nav>
where
  C: CrudCommand<S>,
  S: EpicStore,
{
  cmd.render_listing(cx).await?;
  cx.term.notify(Notice::Title, &format!("Create a new {}:", C::ENTITY.label().to_lowercase()));
  let specs = C::map_field_input_methods(Action::Create);
  let fields = cmd.collect_input_fields(cx, &specs)?;
  cmd.persist_create(cx, fields).await?;
  cmd.record_outcome(cx);
  cmd.render_summary_table(cx);
  Ok(cmd.navigate_back())
}

async fn update<C, S>(cmd: &C, cx: &mut Context<'_, S, C::Record>) -> Result<Nav>
where
  C: CrudCommand<S>,
  S: EpicStore,
{
  cmd.render_listing(cx).await?;
  cmd.resolve_target_record(cx).await?;
  cmd.select_fields_to_update(cx)?;
  let specs = fields::pick(&C::map_field_input_methods(Action::Update), &cx.selected);
  let fields = cmd.collect_input_fields(cx, &specs)?;
  cmd.persist_update(cx, fields).await?;
  cmd.record_outcome(cx);
  cmd.render_summary_table(cx);
  Ok(cmd.navigate_back())
}

async fn delete<C, S>(cmd: &C, cx: &mut Context<'_, S, C::Record>) -> Result<Nav>
where
  C: CrudCommand<S>,
  S: EpicStore,
{
  cmd.render_listing(cx).await?;
  cmd.resolve_target_record(cx).await?;
  if !cmd.confirm_deletion(cx)? {
    tracing::debug!("deletion declined");
    return Ok(Nav::Menu(C::ENTITY));
  }
  cmd.persist_delete(cx).await?;
  cmd.record_outcome(cx);
  Ok(cmd.navigate_back())
}
