//! Field-input primitives.
//!
//! Each primitive re-prompts until the answer parses, explaining what was
//! wrong through an error notice. An empty (or blank) answer to any of them
//! is [`Error::Cancelled`], the operator's way out of a command.

use chrono::{DateTime, NaiveDate, Utc};
use epic_core::contract::Amount;

use crate::{
  Error, Result,
  term::{Notice, Terminal},
};

/// Read one trimmed, non-empty answer.
pub fn ask(term: &mut dyn Terminal, label: &str) -> Result<String> {
  let answer = term.prompt(label)?;
  let answer = answer.trim();
  if answer.is_empty() {
    tracing::debug!(label, "input cancelled");
    return Err(Error::Cancelled);
  }
  Ok(answer.to_owned())
}

pub fn text(term: &mut dyn Terminal, label: &str) -> Result<String> { ask(term, label) }

/// A whole number in `min..=max`.
pub fn integer(term: &mut dyn Terminal, label: &str, min: i64, max: i64) -> Result<i64> {
  loop {
    let answer = ask(term, label)?;
    match answer.parse::<i64>() {
      Ok(n) if n < min => term.notify(Notice::Error, &format!("Invalid input! At least {min}.")),
      Ok(n) if n > max => term.notify(Notice::Error, &format!("Invalid input! At most {max}.")),
      Ok(n) => return Ok(n),
      Err(_) => term.notify(Notice::Error, "Invalid input! Number input."),
    }
  }
}

/// A non-negative euro amount with at most two decimals.
pub fn decimal(term: &mut dyn Terminal, label: &str) -> Result<Amount> {
  loop {
    let answer = ask(term, label)?;
    match answer.parse::<Amount>() {
      Ok(amount) => return Ok(amount),
      Err(_) => term.notify(Notice::Error, "Invalid input! Decimal input."),
    }
  }
}

/// A `DD/MM/YYYY` date, read as midnight UTC.
pub fn date(term: &mut dyn Terminal, label: &str) -> Result<DateTime<Utc>> {
  loop {
    let answer = ask(term, label)?;
    let parsed = NaiveDate::parse_from_str(&answer, "%d/%m/%Y")
      .ok()
      .and_then(|d| d.and_hms_opt(0, 0, 0))
      .map(|dt| dt.and_utc());
    match parsed {
      Some(dt) => return Ok(dt),
      None => term.notify(Notice::Error, "Invalid date! Format: DD/MM/YYYY."),
    }
  }
}

pub fn email(term: &mut dyn Terminal, label: &str) -> Result<String> {
  loop {
    let answer = ask(term, label)?;
    if validate_email(&answer) {
      return Ok(answer);
    }
    term.notify(Notice::Error, "Invalid email!");
  }
}

/// A password accepted by `policy`. Every rejection reason is shown.
pub fn password(term: &mut dyn Terminal, label: &str, policy: &PasswordPolicy) -> Result<String> {
  loop {
    let answer = ask(term, label)?;
    let problems = policy.check(&answer);
    if problems.is_empty() {
      return Ok(answer);
    }
    for problem in problems {
      term.notify(Notice::Error, &problem);
    }
  }
}

/// Exactly one of `options`.
pub fn choice(term: &mut dyn Terminal, options: &[&str], label: &str) -> Result<String> {
  loop {
    let answer = ask(term, label)?;
    if options.contains(&answer.as_str()) {
      return Ok(answer);
    }
    term.notify(Notice::Error, &format!("Invalid choice! [{}]", options.join(", ")));
  }
}

/// Any subset of `options`, typed as one string of keys (`"EFL"`).
/// Characters outside `options` are dropped, so the result may be empty.
pub fn multi_choice(term: &mut dyn Terminal, options: &[char], label: &str) -> Result<Vec<char>> {
  let answer = ask(term, label)?;
  Ok(filter_choices(&answer, options))
}

/// Keep the characters of `answer` that are in `options`, in typed order.
/// Matching is case-sensitive.
pub fn filter_choices(answer: &str, options: &[char]) -> Vec<char> {
  answer.chars().filter(|c| options.contains(c)).collect()
}

/// Syntax check in the spirit of an HTML email input: one `@`, a non-empty
/// local part, and a dotted domain of non-empty labels.
pub fn validate_email(s: &str) -> bool {
  let Some((local, domain)) = s.split_once('@') else { return false };
  !local.is_empty()
    && !domain.contains('@')
    && !s.chars().any(char::is_whitespace)
    && domain.contains('.')
    && domain.split('.').all(|label| {
      !label.is_empty()
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

// ─── Password policy ─────────────────────────────────────────────────────────

const COMMON_PASSWORDS: &[&str] = &[
  "password", "password1", "password123", "12345678", "123456789", "1234567890", "qwerty123",
  "qwertyuiop", "azertyuiop", "iloveyou", "sunshine", "football", "baseball", "welcome1",
  "letmein1", "admin123", "abc12345", "trustno1", "monkey123", "dragon123",
];

/// Rules a new password must satisfy.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
  pub min_length: usize,
}

impl Default for PasswordPolicy {
  fn default() -> Self { Self { min_length: 8 } }
}

impl PasswordPolicy {
  /// Every rule `candidate` breaks; empty when acceptable.
  pub fn check(&self, candidate: &str) -> Vec<String> {
    let mut problems = Vec::new();
    if candidate.chars().count() < self.min_length {
      problems.push(format!(
        "This password is too short. It must contain at least {} characters.",
        self.min_length
      ));
    }
    if COMMON_PASSWORDS.contains(&candidate.to_lowercase().as_str()) {
      problems.push("This password is too common.".to_owned());
    }
    if candidate.chars().all(|c| c.is_ascii_digit()) {
      problems.push("This password is entirely numeric.".to_owned());
    }
    problems
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Datelike as _, Timelike as _};

  use super::*;
  use crate::term::ScriptedTerminal;

  #[test]
  fn blank_answers_cancel() {
    for blank in ["", " ", "   "] {
      let mut term = ScriptedTerminal::new([blank]);
      assert!(matches!(text(&mut term, "Name"), Err(Error::Cancelled)));
    }
  }

  #[test]
  fn exhausted_input_is_an_io_error() {
    let mut term = ScriptedTerminal::new(Vec::<String>::new());
    assert!(matches!(text(&mut term, "Name"), Err(Error::Io(_))));
  }

  #[test]
  fn integer_reprompts_below_minimum() {
    let mut term = ScriptedTerminal::new(["abc", "0", "12"]);
    assert_eq!(integer(&mut term, "Guests", 1, 100).unwrap(), 12);
    assert_eq!(term.prompts.len(), 3);
    assert_eq!(term.notices.len(), 2);
  }

  #[test]
  fn integer_reprompts_above_maximum() {
    let mut term = ScriptedTerminal::new(["5000000000", "101", "100"]);
    assert_eq!(integer(&mut term, "Guests", 1, 100).unwrap(), 100);
    assert!(term.saw(Notice::Error, "Invalid input! At most 100."));
    assert_eq!(term.notices.len(), 2);
  }

  #[test]
  fn decimal_rejects_three_decimals() {
    let mut term = ScriptedTerminal::new(["12.345", "12.34"]);
    assert_eq!(decimal(&mut term, "Total").unwrap().cents(), 1234);
    assert!(term.saw(Notice::Error, "Decimal"));
  }

  #[test]
  fn date_is_day_first_at_midnight_utc() {
    let mut term = ScriptedTerminal::new(["2025-12-15", "31/02/2025", "15/12/2025"]);
    let dt = date(&mut term, "Date").unwrap();
    assert_eq!((dt.day(), dt.month(), dt.year()), (15, 12, 2025));
    assert_eq!((dt.hour(), dt.minute()), (0, 0));
    assert_eq!(term.notices.len(), 2);
  }

  #[test]
  fn email_syntax() {
    assert!(validate_email("sam@epic-events.fr"));
    assert!(validate_email("first.last+tag@corp.co.uk"));
    for bad in ["sam", "sam@", "@epic.fr", "sam@epic", "sam@@epic.fr", "s am@epic.fr", "sam@.fr"] {
      assert!(!validate_email(bad), "{bad:?} should be rejected");
    }
  }

  #[test]
  fn choice_loops_until_listed() {
    let mut term = ScriptedTerminal::new(["sa", "Sales", "SA"]);
    assert_eq!(choice(&mut term, &["SA", "SU", "MA"], "Role").unwrap(), "SA");
    assert_eq!(term.notices.len(), 2);
  }

  #[test]
  fn multi_choice_is_case_sensitive() {
    assert_eq!(filter_choices("xy12", &['X', 'Y']), Vec::<char>::new());
    assert_eq!(filter_choices("XY12", &['X', 'Y']), vec!['X', 'Y']);
    assert_eq!(filter_choices("F,L", &['E', 'F', 'L', 'R']), vec!['F', 'L']);
  }

  #[test]
  fn multi_choice_keeps_an_empty_selection() {
    let mut term = ScriptedTerminal::new(["zz"]);
    assert!(multi_choice(&mut term, &['E', 'F'], "Fields").unwrap().is_empty());
  }

  #[test]
  fn password_policy_reasons() {
    let policy = PasswordPolicy::default();
    assert!(policy.check("Tr0ub4dor&3").is_empty());
    assert_eq!(policy.check("1234").len(), 2);
    assert_eq!(policy.check("Password123").len(), 1);
  }

  #[test]
  fn password_prompt_echoes_each_reason() {
    let mut term = ScriptedTerminal::new(["123", "Tr0ub4dor&3"]);
    let policy = PasswordPolicy { min_length: 8 };
    assert_eq!(password(&mut term, "Password", &policy).unwrap(), "Tr0ub4dor&3");
    assert!(term.saw(Notice::Error, "too short"));
    assert!(term.saw(Notice::Error, "entirely numeric"));
  }
}
