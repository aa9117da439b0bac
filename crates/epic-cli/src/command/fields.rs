//! Declarative field prompts and the values they collect.

use chrono::{DateTime, Utc};
use epic_core::contract::Amount;

use crate::{
  Error, Result,
  input::{self, PasswordPolicy},
  term::Terminal,
};

/// Which input primitive reads a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
  Text,
  Integer { min: i64, max: i64 },
  Decimal,
  Date,
  Email,
  Password,
  Choice(&'static [&'static str]),
}

impl InputKind {
  pub fn read(
    self,
    term: &mut dyn Terminal,
    label: &str,
    policy: &PasswordPolicy,
  ) -> Result<FieldValue> {
    Ok(match self {
      InputKind::Text => FieldValue::Text(input::text(term, label)?),
      InputKind::Integer { min, max } => {
        FieldValue::Integer(input::integer(term, label, min, max)?)
      }
      InputKind::Decimal => FieldValue::Amount(input::decimal(term, label)?),
      InputKind::Date => FieldValue::Date(input::date(term, label)?),
      InputKind::Email => FieldValue::Text(input::email(term, label)?),
      InputKind::Password => FieldValue::Text(input::password(term, label, policy)?),
      InputKind::Choice(options) => FieldValue::Text(input::choice(term, options, label)?),
    })
  }
}

/// One promptable field. `key` selects it in the update menu, `name` is the
/// record field it fills, `label` is what the operator sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
  pub key:   char,
  pub name:  &'static str,
  pub label: &'static str,
  pub kind:  InputKind,
}

impl FieldSpec {
  pub const fn new(key: char, name: &'static str, label: &'static str, kind: InputKind) -> Self {
    Self { key, name, label, kind }
  }
}

/// The specs whose keys are in `selected`, in selection order, each once.
pub fn pick(specs: &[FieldSpec], selected: &[char]) -> Vec<FieldSpec> {
  let mut picked: Vec<FieldSpec> = Vec::new();
  for key in selected {
    if picked.iter().any(|s| s.key == *key) {
      continue;
    }
    if let Some(spec) = specs.iter().find(|s| s.key == *key) {
      picked.push(*spec);
    }
  }
  picked
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
  Text(String),
  Integer(i64),
  Amount(Amount),
  Date(DateTime<Utc>),
}

/// Collected answers, keyed by field name, in prompt order.
#[derive(Debug, Clone, Default)]
pub struct Fields {
  values: Vec<(&'static str, FieldValue)>,
}

impl Fields {
  pub fn insert(&mut self, name: &'static str, value: FieldValue) {
    match self.values.iter_mut().find(|(n, _)| *n == name) {
      Some((_, slot)) => *slot = value,
      None => self.values.push((name, value)),
    }
  }

  pub fn contains(&self, name: &str) -> bool { self.get(name).is_some() }

  pub fn get(&self, name: &str) -> Option<&FieldValue> {
    self.values.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
  }

  pub fn text(&self, name: &str) -> Option<String> {
    match self.get(name)? {
      FieldValue::Text(s) => Some(s.clone()),
      _ => None,
    }
  }

  pub fn integer(&self, name: &str) -> Option<i64> {
    match self.get(name)? {
      FieldValue::Integer(n) => Some(*n),
      _ => None,
    }
  }

  pub fn amount(&self, name: &str) -> Option<Amount> {
    match self.get(name)? {
      FieldValue::Amount(a) => Some(*a),
      _ => None,
    }
  }

  pub fn date(&self, name: &str) -> Option<DateTime<Utc>> {
    match self.get(name)? {
      FieldValue::Date(d) => Some(*d),
      _ => None,
    }
  }

  pub fn required_text(&self, name: &'static str) -> Result<String> {
    self.text(name).ok_or(Error::MissingField(name))
  }

  pub fn required_integer(&self, name: &'static str) -> Result<i64> {
    self.integer(name).ok_or(Error::MissingField(name))
  }

  pub fn required_amount(&self, name: &'static str) -> Result<Amount> {
    self.amount(name).ok_or(Error::MissingField(name))
  }

  pub fn required_date(&self, name: &'static str) -> Result<DateTime<Utc>> {
    self.date(name).ok_or(Error::MissingField(name))
  }

  /// Parse a text field, e.g. a role or state code.
  pub fn parsed<T>(&self, name: &str) -> Result<Option<T>>
  where
    T: std::str::FromStr<Err = epic_core::Error>,
  {
    Ok(self.text(name).map(|s| s.parse()).transpose()?)
  }
}

/// `"first_name"` → `"First name:"`
pub fn outcome_label(name: &str) -> String {
  let spaced = name.replace('_', " ");
  let mut chars = spaced.chars();
  match chars.next() {
    Some(first) => format!("{}{}:", first.to_uppercase(), chars.as_str()),
    None => String::from(":"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SPECS: &[FieldSpec] = &[
    FieldSpec::new('E', "email", "Email", InputKind::Email),
    FieldSpec::new('F', "first_name", "First name", InputKind::Text),
    FieldSpec::new('L', "last_name", "Last name", InputKind::Text),
  ];

  #[test]
  fn pick_follows_selection_order_once() {
    let picked = pick(SPECS, &['L', 'E', 'L']);
    let names: Vec<_> = picked.iter().map(|s| s.name).collect();
    assert_eq!(names, ["last_name", "email"]);
  }

  #[test]
  fn typed_access() {
    let mut f = Fields::default();
    f.insert("name", FieldValue::Text("Gala".into()));
    f.insert("max_guests", FieldValue::Integer(40));
    assert_eq!(f.text("name").as_deref(), Some("Gala"));
    assert_eq!(f.integer("name"), None);
    assert_eq!(f.required_integer("max_guests").unwrap(), 40);
    assert!(matches!(f.required_text("location"), Err(Error::MissingField("location"))));
  }

  #[test]
  fn parsed_role_codes() {
    let mut f = Fields::default();
    f.insert("role", FieldValue::Text("SU".into()));
    let role: Option<epic_core::account::Role> = f.parsed("role").unwrap();
    assert_eq!(role, Some(epic_core::account::Role::Support));
    assert_eq!(f.parsed::<epic_core::account::Role>("missing").unwrap(), None);
  }

  #[test]
  fn labels_are_capitalised() {
    assert_eq!(outcome_label("first_name"), "First name:");
    assert_eq!(outcome_label("email"), "Email:");
    assert_eq!(outcome_label("employee_email"), "Employee email:");
  }
}
