//! Event management. Sales open events for their clients, support runs
//! them, management reassigns them.

use std::{cmp::Ordering, marker::PhantomData};

use epic_core::{
  account::Role,
  event::{Event, EventPatch, NewEvent},
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

pub struct EventCommand<A>(PhantomData<A>);

impl<A> EventCommand<A> {
  pub const fn new() -> Self { Self(PhantomData) }
}

impl<A> Default for EventCommand<A> {
  fn default() -> Self { Self::new() }
}

permissions!(EventCommand, Event, Event {
  List   => [Sales, Support, Management],
  Create => [Sales],
  Update => [Support, Management],
  Delete => [Management],
});

const DATE: FieldSpec = FieldSpec::new('D', "date", "Date (DD/MM/YYYY)", InputKind::Date);
const NAME: FieldSpec = FieldSpec::new('N', "name", "Name", InputKind::Text);
const LOCATION: FieldSpec = FieldSpec::new('L', "location", "Location", InputKind::Text);
const MAX_GUESTS: FieldSpec = FieldSpec::new(
  'G',
  "max_guests",
  "Max guests",
  InputKind::Integer { min: 1, max: u32::MAX as i64 },
);
const NOTES: FieldSpec = FieldSpec::new('O', "notes", "Notes", InputKind::Text);

/// Guest counts are prompted within `1..=u32::MAX`.
fn guests(n: i64) -> Result<u32> {
  u32::try_from(n).map_err(|_| {
    epic_core::Error::Invalid { field: "max_guests", reason: format!("{n} is out of range") }
      .into()
  })
}

const HEADERS: [&str; 7] = ["Date", "Name", "Location", "Guests", "Client", "Contact", "Notes"];

fn rows(events: &[Event]) -> Vec<Vec<String>> {
  events
    .iter()
    .map(|e| {
      vec![
        day(&e.date),
        e.name.clone(),
        e.location.clone(),
        e.max_guests.to_string(),
        e.client_email.clone(),
        e.employee_email.clone(),
        e.notes.clone(),
      ]
    })
    .collect()
}

impl<A, S> Lister<S> for EventCommand<A>
where
  S: EpicStore,
  Self: Command<Record = Event>,
{
  const SORT_KEYS: &'static [SortKey] = &[
    SortKey::new('C', "[C]lient"),
    SortKey::new('D', "[D]ate"),
    SortKey::new('N', "[N]ame"),
    SortKey::new('L', "[L]ocation"),
    SortKey::new('M', "[M]ax guests"),
  ];
  const FILTER_ROLES: &'static [Role] = &[Role::Sales, Role::Support, Role::Management];

  async fn render_listing(&self, cx: &mut Context<'_, S, Event>) -> Result<()> {
    let events = cx.store.list_events().await.map_err(store_error)?;
    if events.is_empty() {
      cx.term.notify(Notice::Info, "No events to show.");
      return Ok(());
    }
    cx.term.render_table(Some("Events"), &HEADERS, &rows(&events));
    Ok(())
  }

  async fn render_own_listing(
    &self,
    cx: &mut Context<'_, S, Event>,
    keys: &[char],
    order: Order,
  ) -> Result<()> {
    let mut events = cx.store.list_events_of(cx.principal.employee_id).await.map_err(store_error)?;
    if events.is_empty() {
      cx.term.notify(Notice::Info, "You have no events.");
      return Ok(());
    }
    sort_by_keys(&mut events, keys, order, |key, a, b| match key {
      'C' => a.client_email.cmp(&b.client_email),
      'D' => a.date.cmp(&b.date),
      'N' => a.name.cmp(&b.name),
      'L' => a.location.cmp(&b.location),
      'M' => a.max_guests.cmp(&b.max_guests),
      _ => Ordering::Equal,
    });
    cx.term.render_table(Some("My events"), &HEADERS, &rows(&events));
    Ok(())
  }
}

impl<A, S> Fetcher<S> for EventCommand<A>
where
  S: EpicStore,
  Self: Command<Record = Event>,
{
  fn lookup_label(&self) -> &'static str { "Client email address" }

  async fn lookup(&self, store: &S, key: String) -> Result<Option<Event>> {
    store.find_event(key).await.map_err(store_error)
  }

  fn render_record(&self, term: &mut dyn Terminal, e: &Event) {
    let rows = vec![
      vec!["Client email:".to_owned(), e.client_email.clone()],
      vec!["[E]mployee email:".to_owned(), e.employee_email.clone()],
      vec!["[D]ate:".to_owned(), day(&e.date)],
      vec!["[N]ame:".to_owned(), e.name.clone()],
      vec!["[L]ocation:".to_owned(), e.location.clone()],
      vec!["Max [G]uests:".to_owned(), e.max_guests.to_string()],
      vec!["N[o]tes:".to_owned(), e.notes.clone()],
    ];
    term.render_table(Some("Details of the event:"), &[], &rows);
  }
}

impl<A> FieldMapper for EventCommand<A>
where
  Self: Command<Record = Event>,
{
  fn map_field_input_methods(action: Action) -> Vec<FieldSpec> {
    match action {
      Action::Create => vec![
        FieldSpec::new('C', "client_email", "Client email", InputKind::Email),
        DATE,
        NAME,
        LOCATION,
        MAX_GUESTS,
        NOTES,
      ],
      _ => vec![
        FieldSpec::new('E', "employee_email", "Employee email", InputKind::Email),
        DATE,
        NAME,
        LOCATION,
        MAX_GUESTS,
        NOTES,
      ],
    }
  }
}

impl<A, S> Mutator<S> for EventCommand<A>
where
  S: EpicStore,
  Self: Command<Record = Event>,
{
  async fn persist_create(&self, cx: &mut Context<'_, S, Event>, fields: Fields) -> Result<()> {
    let input = NewEvent {
      client_email: fields.required_text("client_email")?,
      date:         fields.required_date("date")?,
      name:         fields.required_text("name")?,
      location:     fields.required_text("location")?,
      max_guests:   guests(fields.required_integer("max_guests")?)?,
      notes:        fields.required_text("notes")?,
    };
    let event = cx.store.create_event(input).await.map_err(store_error)?;
    cx.object = Some(event);
    Ok(())
  }

  async fn persist_update(&self, cx: &mut Context<'_, S, Event>, fields: Fields) -> Result<()> {
    let event_id = cx.target()?.event_id;
    let patch = EventPatch {
      employee_email: fields.text("employee_email"),
      date:           fields.date("date"),
      name:           fields.text("name"),
      location:       fields.text("location"),
      max_guests:     fields.integer("max_guests").map(guests).transpose()?,
      notes:          fields.text("notes"),
    };
    let event = cx.store.update_event(event_id, patch).await.map_err(store_error)?;
    cx.object = Some(event);
    Ok(())
  }

  async fn persist_delete(&self, cx: &mut Context<'_, S, Event>) -> Result<()> {
    let event_id = cx.target()?.event_id;
    cx.store.delete_event(event_id).await.map_err(store_error)
  }
}

impl<A> Reporter for EventCommand<A>
where
  Self: Command<Record = Event>,
{
  /// A new event names the sales contact it took from its client; other
  /// outcomes name the client.
  fn outcome_prefix(&self, record: &Event) -> Vec<(String, String)> {
    match Self::ACTION {
      Action::Create => vec![("Employee email:".to_owned(), record.employee_email.clone())],
      _ => vec![("Client email:".to_owned(), record.client_email.clone())],
    }
  }
}
